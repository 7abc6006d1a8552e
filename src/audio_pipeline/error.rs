//! 音声フォーマット変換時のエラー定義
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    #[error("invalid channel count: {0}")]
    InvalidChannels(u16),
    #[error("sample rate must be {expected}Hz, got {actual}Hz")]
    UnexpectedSampleRate { expected: u32, actual: u32 },
    #[error("invalid sample rate: {0}Hz")]
    InvalidSampleRate(u32),
    #[error("{samples} samples cannot be split into {channels} channels")]
    Interleaving { samples: usize, channels: u16 },
}
