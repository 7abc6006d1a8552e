//! `filter_bytes` のスループット計測
//!
//! WAVヘッダ（44バイト）を読み飛ばした生PCMを640バイトのチャンクに分け、
//! `batch_size` 個ずつ連結して 8kHz・モノラル・16ビット・閾値0.5 で降噪する。
use thiserror::Error;
use tracing::debug;

use crate::denoiser::FrameDenoiser;
use crate::filter::{FilterError, FilterPipeline};

/// 読み飛ばすWAVヘッダのバイト数
pub const WAV_HEADER_BYTES: usize = 44;

/// 1チャンクのバイト数（16ビット・8kHzで40ms）
pub const CHUNK_BYTES: usize = 640;

pub const SAMPLE_RATE: u32 = 8_000;
pub const CHANNELS: u16 = 1;
pub const BIT_DEPTH: u16 = 16;
pub const VOICE_PROB_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerfError {
    #[error("audio data too small for a WAV file: {len} bytes")]
    TooSmall { len: usize },
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("batch {batch} failed")]
    Filter {
        batch: usize,
        #[source]
        source: FilterError,
    },
}

/// ヘッダを除いたPCMを `CHUNK_BYTES` ごとに分割（末尾は短くてよい）
pub fn pcm_chunks(audio: &[u8]) -> Result<Vec<&[u8]>, PerfError> {
    if audio.len() < WAV_HEADER_BYTES {
        return Err(PerfError::TooSmall { len: audio.len() });
    }
    Ok(audio[WAV_HEADER_BYTES..].chunks(CHUNK_BYTES).collect())
}

/// 1回分の計測本体。処理したバッチ数を返す
pub fn run_once<D>(
    pipeline: &mut FilterPipeline<D>,
    audio: &[u8],
    batch_size: usize,
) -> Result<usize, PerfError>
where
    D: FrameDenoiser,
{
    if batch_size == 0 {
        return Err(PerfError::InvalidBatchSize);
    }

    let chunks = pcm_chunks(audio)?;
    let mut batches = 0;
    for (index, group) in chunks.chunks(batch_size).enumerate() {
        let data = group.concat();
        pipeline
            .filter_bytes(&data, SAMPLE_RATE, CHANNELS, BIT_DEPTH, VOICE_PROB_THRESHOLD)
            .map_err(|source| PerfError::Filter {
                batch: index,
                source,
            })?;
        batches += 1;
    }

    debug!(chunks = chunks.len(), batches, batch_size, "perf run finished");
    Ok(batches)
}
