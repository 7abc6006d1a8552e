//! 48kHzモノラル信号を10msフレーム（480サンプル）へ分割
use super::buffer::SampleBuffer;
use super::error::FormatError;
use super::{FRAME_SIZE, INFERENCE_SAMPLE_RATE};

/// ちょうど `FRAME_SIZE` サンプルを持つ推論単位
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    samples: Box<[f32; FRAME_SIZE]>,
}

impl Frame {
    /// 無音フレーム
    pub fn silent() -> Self {
        Self {
            samples: Box::new([0.0; FRAME_SIZE]),
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        self.samples.as_slice()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.samples.to_vec()
    }

    pub fn len(&self) -> usize {
        FRAME_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// 二乗平均平方根
    pub fn rms(&self) -> f32 {
        let sum = self.samples.iter().map(|s| s * s).sum::<f32>();
        (sum / FRAME_SIZE as f32).sqrt()
    }
}

impl TryFrom<&[f32]> for Frame {
    type Error = usize;

    /// 長さが `FRAME_SIZE` でなければ実際の長さを返す
    fn try_from(samples: &[f32]) -> Result<Self, Self::Error> {
        let array: [f32; FRAME_SIZE] = samples.try_into().map_err(|_| samples.len())?;
        Ok(Self {
            samples: Box::new(array),
        })
    }
}

impl TryFrom<Vec<f32>> for Frame {
    type Error = usize;

    fn try_from(samples: Vec<f32>) -> Result<Self, Self::Error> {
        let len = samples.len();
        let boxed: Box<[f32; FRAME_SIZE]> = samples
            .into_boxed_slice()
            .try_into()
            .map_err(|_| len)?;
        Ok(Self { samples: boxed })
    }
}

impl AsRef<[f32]> for Frame {
    fn as_ref(&self) -> &[f32] {
        self.as_slice()
    }
}

/// `ceil(len / 480)` 個のフレームに分割（末尾はゼロ埋め）
pub fn segment(buffer: &SampleBuffer) -> Result<Vec<Frame>, FormatError> {
    if buffer.sample_rate != INFERENCE_SAMPLE_RATE {
        return Err(FormatError::UnexpectedSampleRate {
            expected: INFERENCE_SAMPLE_RATE,
            actual: buffer.sample_rate,
        });
    }

    let frames = buffer
        .samples
        .chunks(FRAME_SIZE)
        .map(|chunk| {
            let mut samples = Box::new([0.0_f32; FRAME_SIZE]);
            samples[..chunk.len()].copy_from_slice(chunk);
            Frame { samples }
        })
        .collect();
    Ok(frames)
}

/// 指定長の信号が何フレームになるか
pub fn frame_count(samples: usize) -> usize {
    samples.div_ceil(FRAME_SIZE)
}
