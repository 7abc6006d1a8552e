//! 音声フォーマット処理モジュール
//!
//! PCMバイト列のデコード/エンコード、モノラル化、線形補間リサンプル、
//! 10msフレームへの分割を提供します。各段はバッファを値で受け取り、新しいバッファを返します。
mod buffer;
pub mod codec;
mod error;
pub mod format;
mod frame_reconstructor;
pub mod framer;
mod resampler;

pub use buffer::SampleBuffer;
pub use codec::BitDepth;
pub use error::FormatError;
pub use format::{downmix, from_inference_format, to_inference_format};
pub use frame_reconstructor::FrameReconstructor;
pub use framer::{segment, Frame};
pub use resampler::{resample, LinearResampler};

/// 推論バックエンドのサンプルレート
pub const INFERENCE_SAMPLE_RATE: u32 = 48_000;

/// 1フレーム（10ms @ 48kHz）のサンプル数
pub const FRAME_SIZE: usize = 480;
