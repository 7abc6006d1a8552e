//! 推論バックエンド共通の型とトレイト
//!
//! - `FrameOutput` は1フレーム分の推論結果（音声確率 + 降噪フレーム）
//! - `FrameDenoiser` は1セッション分の状態を持つ最小インタフェース
use crate::audio_pipeline::Frame;

use super::error::DenoiserError;

/// 1フレーム分の推論結果
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// 音声である確率（0.0..=1.0）
    pub voice_probability: f32,
    /// 降噪後のフレーム（入力と同じ480サンプル）
    pub frame: Frame,
}

/// 10msフレーム単位の降噪バックエンド
///
/// 生成がハンドルの取得、`Drop` が解放にあたる。`process_frame` は内部状態を
/// 更新するため、フレーム間で状態が引き継がれる。同一ハンドルへの同時呼び出しは
/// `&mut self` により型で禁止される。
pub trait FrameDenoiser {
    /// 1フレームを処理
    fn process_frame(&mut self, frame: &Frame) -> Result<FrameOutput, DenoiserError>;

    /// 内部状態を作り直す（ハンドルはそのまま）
    fn reset(&mut self) -> Result<(), DenoiserError>;
}

impl<D> FrameDenoiser for Box<D>
where
    D: FrameDenoiser + ?Sized,
{
    fn process_frame(&mut self, frame: &Frame) -> Result<FrameOutput, DenoiserError> {
        (**self).process_frame(frame)
    }

    fn reset(&mut self) -> Result<(), DenoiserError> {
        (**self).reset()
    }
}
