/// 単純な線形補間ベースのリサンプラ
///
/// 出力長は `floor(len * dst / src)`。末尾サンプルを越える補間は行わず、
/// 最終サンプルをそのまま複製する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearResampler {
    input_rate: u32,
    output_rate: u32,
}

impl LinearResampler {
    /// 入出力サンプルレートを指定して作成
    pub fn new(input_rate: u32, output_rate: u32) -> Self {
        Self {
            input_rate,
            output_rate,
        }
    }

    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// 入力長に対する出力サンプル数（入力レート0なら0）
    pub fn output_len(&self, input_len: usize) -> usize {
        if self.input_rate == self.output_rate {
            return input_len;
        }
        if self.input_rate == 0 {
            return 0;
        }
        (input_len as f64 * self.ratio()).floor() as usize
    }

    /// 線形補間によりリサンプル
    pub fn resample(&self, samples: &[f32]) -> Vec<f32> {
        if self.input_rate == self.output_rate {
            return samples.to_vec();
        }
        if samples.is_empty() || self.input_rate == 0 {
            return Vec::new();
        }

        let ratio = self.ratio();
        let output_len = self.output_len(samples.len());
        let last = samples.len() - 1;

        let mut output = Vec::with_capacity(output_len);
        for n in 0..output_len {
            let position = n as f64 / ratio;
            let base_index = position.floor() as usize;
            if base_index >= last {
                output.push(samples[last]);
            } else {
                let frac = (position - base_index as f64) as f32;
                output.push(samples[base_index] * (1.0 - frac) + samples[base_index + 1] * frac);
            }
        }
        output
    }

    fn ratio(&self) -> f64 {
        f64::from(self.output_rate) / f64::from(self.input_rate)
    }
}

/// 単発のリサンプル
pub fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    LinearResampler::new(src_rate, dst_rate).resample(samples)
}
