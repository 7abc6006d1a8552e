//! 降噪推論バックエンド
//!
//! `FrameDenoiser` 実装（RNNoiseやモック）を注入して使う。バックエンドは
//! 480サンプルのフレームを1つ受け取り、音声確率と降噪フレームを返すだけの外部能力として扱い、
//! 降噪アルゴリズム自体はこのクレートでは実装しない。
mod backend;
mod error;
mod mock;
pub mod rnnoise;

pub use backend::{FrameDenoiser, FrameOutput};
pub use error::DenoiserError;
pub use mock::MockDenoiser;
pub use rnnoise::RnnoiseDenoiser;
