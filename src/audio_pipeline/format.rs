//! 推論フォーマット（48kHz・モノラル・16ビット）との相互変換
//!
//! - `downmix` は全チャネルの平均でモノラル化
//! - `to_inference_format` は downmix → 48kHz へリサンプル
//! - `from_inference_format` はサンプルレートのみ戻す（チャネル数は復元しない）
use tracing::debug;

use super::buffer::SampleBuffer;
use super::codec::BitDepth;
use super::error::FormatError;
use super::resampler::LinearResampler;
use super::INFERENCE_SAMPLE_RATE;

/// 多チャネル音声をモノラルへ平均化
///
/// 1チャネルに満たない末尾の端数サンプルは捨てる。
pub fn downmix(buffer: SampleBuffer) -> Result<SampleBuffer, FormatError> {
    let channels = buffer.channels;
    if channels == 0 {
        return Err(FormatError::InvalidChannels(channels));
    }
    if channels == 1 {
        return Ok(buffer);
    }

    let width = usize::from(channels);
    let divisor = f32::from(channels);
    let mono: Vec<f32> = if channels == 2 {
        buffer
            .samples
            .chunks_exact(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    } else {
        buffer
            .samples
            .chunks_exact(width)
            .map(|group| group.iter().sum::<f32>() / divisor)
            .collect()
    };

    Ok(SampleBuffer::mono(
        mono,
        buffer.sample_rate,
        buffer.bit_depth,
    ))
}

/// 推論用フォーマットへ変換（モノラル / 48kHz / 16ビット扱い）
pub fn to_inference_format(buffer: SampleBuffer) -> Result<SampleBuffer, FormatError> {
    if buffer.sample_rate == 0 {
        return Err(FormatError::InvalidSampleRate(buffer.sample_rate));
    }
    debug!(
        sample_rate = buffer.sample_rate,
        channels = buffer.channels,
        bits = buffer.bit_depth.bits(),
        samples = buffer.samples.len(),
        "input format"
    );

    let mono = downmix(buffer)?;
    let resampler = LinearResampler::new(mono.sample_rate, INFERENCE_SAMPLE_RATE);
    let samples = resampler.resample(&mono.samples);
    let converted = SampleBuffer::mono(samples, INFERENCE_SAMPLE_RATE, BitDepth::Sixteen);

    debug!(
        sample_rate = converted.sample_rate,
        channels = converted.channels,
        bits = converted.bit_depth.bits(),
        samples = converted.samples.len(),
        "inference format"
    );
    Ok(converted)
}

/// 推論フォーマットから指定サンプルレートへ戻す（出力はモノラルのまま）
pub fn from_inference_format(
    buffer: SampleBuffer,
    target_rate: u32,
) -> Result<SampleBuffer, FormatError> {
    if target_rate == 0 {
        return Err(FormatError::InvalidSampleRate(target_rate));
    }
    if buffer.sample_rate == target_rate {
        return Ok(buffer);
    }
    if buffer.sample_rate == 0 {
        return Err(FormatError::InvalidSampleRate(buffer.sample_rate));
    }

    debug!(from = buffer.sample_rate, to = target_rate, "restore sample rate");
    let resampler = LinearResampler::new(buffer.sample_rate, target_rate);
    let samples = resampler.resample(&buffer.samples);
    Ok(SampleBuffer::new(
        samples,
        target_rate,
        buffer.channels,
        buffer.bit_depth,
    ))
}
