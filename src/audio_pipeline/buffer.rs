use super::codec::BitDepth;
use super::error::FormatError;

/// 正規化済みサンプル列とそのフォーマット情報
///
/// 各処理段は値として受け取り、新しいバッファを返す（共有しない）。
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// インターリーブされたサンプル（-1.0..1.0）
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: BitDepth,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16, bit_depth: BitDepth) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
            bit_depth,
        }
    }

    /// モノラルバッファを作成
    pub fn mono(samples: Vec<f32>, sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self::new(samples, sample_rate, 1, bit_depth)
    }

    /// チャネル数・サンプルレート・インターリーブ長の整合性を検証
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.channels == 0 {
            return Err(FormatError::InvalidChannels(self.channels));
        }
        if self.sample_rate == 0 {
            return Err(FormatError::InvalidSampleRate(self.sample_rate));
        }
        if self.samples.len() % usize::from(self.channels) != 0 {
            return Err(FormatError::Interleaving {
                samples: self.samples.len(),
                channels: self.channels,
            });
        }
        Ok(())
    }

    /// 1チャネルあたりのサンプル数
    pub fn frames_per_channel(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.samples.len() / usize::from(ch),
        }
    }

    /// 再生時間（秒）
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames_per_channel() as f64 / f64::from(self.sample_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
