use nnnoiseless::DenoiseState;
use tracing::debug;

use crate::audio_pipeline::{Frame, FRAME_SIZE};

use super::backend::{FrameDenoiser, FrameOutput};
use super::error::DenoiserError;

/// RNNoiseは16ビット整数レンジのf32を入出力とする
const PCM_SCALE: f32 = 32768.0;

/// nnnoiseless（RNNoise）によるバックエンド
///
/// ハンドルごとに独立したモデル状態を持つため、他のハンドルの生成/破棄の影響を受けない。
pub struct RnnoiseDenoiser {
    state: Box<DenoiseState<'static>>,
    input: Vec<f32>,
    output: Vec<f32>,
    frames_processed: u64,
}

impl RnnoiseDenoiser {
    /// 新しい推論セッションを作成
    pub fn new() -> Result<Self, DenoiserError> {
        if DenoiseState::FRAME_SIZE != FRAME_SIZE {
            return Err(DenoiserError::creation(format!(
                "backend frame size {} does not match {}",
                DenoiseState::FRAME_SIZE,
                FRAME_SIZE
            )));
        }
        debug!(frame_size = FRAME_SIZE, "RNNoise state created");
        Ok(Self {
            state: DenoiseState::new(),
            input: vec![0.0; FRAME_SIZE],
            output: vec![0.0; FRAME_SIZE],
            frames_processed: 0,
        })
    }

    /// 生成/リセット以降に処理したフレーム数
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

impl std::fmt::Debug for RnnoiseDenoiser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RnnoiseDenoiser")
            .field("frames_processed", &self.frames_processed)
            .finish_non_exhaustive()
    }
}

impl FrameDenoiser for RnnoiseDenoiser {
    fn process_frame(&mut self, frame: &Frame) -> Result<FrameOutput, DenoiserError> {
        for (dst, src) in self.input.iter_mut().zip(frame.as_slice()) {
            *dst = src * PCM_SCALE;
        }

        let probability = self.state.process_frame(&mut self.output, &self.input);
        if !probability.is_finite() {
            return Err(DenoiserError::processing(format!(
                "backend returned non-finite voice probability: {probability}"
            )));
        }

        let denoised: Vec<f32> = self.output.iter().map(|s| s / PCM_SCALE).collect();
        let frame = Frame::try_from(denoised).map_err(|len| {
            DenoiserError::processing(format!("backend produced {len} samples"))
        })?;
        self.frames_processed += 1;

        Ok(FrameOutput {
            voice_probability: probability.clamp(0.0, 1.0),
            frame,
        })
    }

    fn reset(&mut self) -> Result<(), DenoiserError> {
        self.state = DenoiseState::new();
        self.frames_processed = 0;
        debug!("RNNoise state reset");
        Ok(())
    }
}
