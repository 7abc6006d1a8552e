use thiserror::Error;

use crate::audio_pipeline::FormatError;
use crate::denoiser::DenoiserError;

/// パイプライン処理のエラー（いずれも即時に呼び出し元へ返す）
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("stream frame must be {expected} samples, got {actual}")]
    FrameSize { expected: usize, actual: usize },
    #[error("denoiser error: {0}")]
    Denoiser(#[from] DenoiserError),
}
