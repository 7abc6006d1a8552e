//! WAVファイルの読み書き（hound）
//!
//! ヘッダ解析は hound に任せ、サンプルの正規化/量子化は `audio_pipeline::codec` と
//! 同じスケール定数を使う。整数PCM（16/24/32ビット）のみ対応。
mod error;

use std::path::Path;

use tracing::{debug, info};

use crate::audio_pipeline::codec::{normalize, quantize};
use crate::audio_pipeline::{BitDepth, SampleBuffer};
use crate::denoiser::FrameDenoiser;
use crate::filter::{FilterPipeline, FilterResult};

pub use error::WavError;

/// WAVファイルを読み込み、正規化済みバッファを返す
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<SampleBuffer, WavError> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path).map_err(|source| WavError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(WavError::Format {
            path: path.to_path_buf(),
            reason: "floating-point samples are not supported".to_string(),
        });
    }
    let depth = BitDepth::try_from(spec.bits_per_sample).map_err(|e| WavError::Format {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let samples = reader
        .into_samples::<i32>()
        .map(|sample| sample.map(|value| normalize(value, depth)))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|source| WavError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "WAV loaded"
    );
    Ok(SampleBuffer::new(
        samples,
        spec.sample_rate,
        spec.channels,
        depth,
    ))
}

/// バッファをWAVとして書き出す（空バッファは0サンプルのWAVになる）
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer) -> Result<(), WavError> {
    let path = path.as_ref();
    let encode_err = |source: hound::Error| WavError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: buffer.channels,
        sample_rate: buffer.sample_rate,
        bits_per_sample: buffer.bit_depth.bits(),
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(encode_err)?;

    for &sample in &buffer.samples {
        let value = quantize(sample, buffer.bit_depth);
        let written = match buffer.bit_depth {
            BitDepth::Sixteen => writer.write_sample(value as i16),
            BitDepth::TwentyFour | BitDepth::ThirtyTwo => writer.write_sample(value),
        };
        written.map_err(encode_err)?;
    }
    writer.finalize().map_err(encode_err)?;

    debug!(path = %path.display(), samples = buffer.samples.len(), "WAV written");
    Ok(())
}

/// WAVファイルを読み込み → 降噪 → 書き出し
///
/// 出力はモノラル、入力と同じサンプルレート・ビット深度。エラー時の出力ファイルの内容は不定。
pub fn filter_file<D, P, Q>(
    pipeline: &mut FilterPipeline<D>,
    input: P,
    output: Q,
    voice_prob_threshold: f32,
) -> Result<FilterResult, WavError>
where
    D: FrameDenoiser,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let audio = read_wav(input)?;
    let result = pipeline
        .filter(audio, voice_prob_threshold)
        .map_err(|source| WavError::Filter {
            path: input.to_path_buf(),
            source,
        })?;
    write_wav(output, &result.denoised)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        frames = result.processed_frames,
        "file filtered"
    );
    Ok(result)
}
