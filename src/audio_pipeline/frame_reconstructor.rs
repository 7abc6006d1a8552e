use super::framer::Frame;
use super::FRAME_SIZE;

/// 任意長のチャンク（48kHzモノラル）を480サンプルのフレームへ組み直す
///
/// ストリーミング入力を `filter_stream` に渡す前の分割に使う。
#[derive(Debug, Default)]
pub struct FrameReconstructor {
    buffer: Vec<f32>,
}

impl FrameReconstructor {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(FRAME_SIZE * 2),
        }
    }

    /// チャンクを追加し、揃ったフレームを返す
    pub fn push(&mut self, chunk: &[f32]) -> Vec<Frame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();

        while self.buffer.len() >= FRAME_SIZE {
            let remainder = self.buffer.split_off(FRAME_SIZE);
            let produced = std::mem::replace(&mut self.buffer, remainder);
            if let Ok(frame) = Frame::try_from(produced) {
                frames.push(frame);
            }
        }

        frames
    }

    /// 残りをゼロ埋めして最終フレームにする
    pub fn flush(&mut self) -> Option<Frame> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut rest = std::mem::take(&mut self.buffer);
        rest.resize(FRAME_SIZE, 0.0);
        Frame::try_from(rest).ok()
    }

    /// 未出力のサンプル数
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
