use crate::audio_pipeline::Frame;

use super::backend::{FrameDenoiser, FrameOutput};
use super::error::DenoiserError;

/// テスト/ドライラン用のバックエンド
///
/// 音声はそのまま通過させる。音声確率はフレームのRMSから算出するか、
/// `scripted` で与えた列を順に（循環して）返す。呼び出し回数は `reset` まで保持される。
#[derive(Debug, Clone, Default)]
pub struct MockDenoiser {
    script: Vec<f32>,
    fail_on_call: Option<u64>,
    calls: u64,
    resets: u32,
}

impl MockDenoiser {
    /// RMSベースの確率（`min(1, 4 * rms)`）を返すモック
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した確率列を順に返すモック
    pub fn scripted(probabilities: impl Into<Vec<f32>>) -> Self {
        Self {
            script: probabilities.into(),
            ..Self::default()
        }
    }

    /// `call` 回目（1始まり、リセットで数え直し）の呼び出しで失敗させる
    pub fn failing_on(mut self, call: u64) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// リセット以降の処理フレーム数
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    fn next_probability(&self, frame: &Frame) -> f32 {
        if self.script.is_empty() {
            return (frame.rms() * 4.0).min(1.0);
        }
        let index = (self.calls % self.script.len() as u64) as usize;
        self.script[index]
    }
}

impl FrameDenoiser for MockDenoiser {
    fn process_frame(&mut self, frame: &Frame) -> Result<FrameOutput, DenoiserError> {
        if self.fail_on_call == Some(self.calls + 1) {
            self.calls += 1;
            return Err(DenoiserError::processing(format!(
                "mock failure on call {}",
                self.calls
            )));
        }

        let voice_probability = self.next_probability(frame);
        self.calls += 1;
        Ok(FrameOutput {
            voice_probability,
            frame: frame.clone(),
        })
    }

    fn reset(&mut self) -> Result<(), DenoiserError> {
        self.calls = 0;
        self.resets += 1;
        Ok(())
    }
}
