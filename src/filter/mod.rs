//! 降噪フィルタパイプライン
//!
//! `FilterPipeline` は注入された `FrameDenoiser` を保持し、次の2つの実行モードを提供します。
//!
//! - バッチ: 推論フォーマット変換 → フレーム分割 → フレーム毎の推論 → 閾値ゲート → 連結 → 元のサンプルレートへ復元
//! - ストリーミング: 呼び出し側で用意した480サンプルのフレームを1つずつ処理
//!
//! どちらも同じバックエンド状態と閾値判定（`probability >= threshold`）を共有します。
mod error;
pub mod stats;

use tracing::{debug, info};

use crate::audio_pipeline::{
    self, from_inference_format, segment, to_inference_format, BitDepth, Frame,
    FrameReconstructor, SampleBuffer, FRAME_SIZE, INFERENCE_SAMPLE_RATE,
};
use crate::denoiser::FrameDenoiser;

pub use error::FilterError;
pub use stats::{FrameStatistics, StatisticsCollector};

/// 閾値判定（境界を含む）
pub(crate) fn passes_gate(probability: f32, threshold: f32) -> bool {
    probability >= threshold
}

/// バッチ処理の結果
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    /// 保持されたフレームを連結し、入力のサンプルレートへ戻した音声（モノラル）
    pub denoised: SampleBuffer,
    /// 全フレームの音声確率（ゲートの結果に関係なくフレーム順）
    pub voice_probabilities: Vec<f32>,
    pub processed_frames: usize,
}

impl FilterResult {
    /// 閾値を満たしたフレーム数
    pub fn voice_frames(&self, threshold: f32) -> usize {
        self.voice_probabilities
            .iter()
            .filter(|&&p| passes_gate(p, threshold))
            .count()
    }

    /// `analyze` と同じ統計を既存の結果から算出
    pub fn statistics(&self, threshold: f32) -> FrameStatistics {
        FrameStatistics::from_probabilities(&self.voice_probabilities, threshold)
    }
}

/// ストリーミング1フレーム分の結果
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutput {
    pub frame: Frame,
    pub voice_probability: f32,
    pub keep: bool,
}

/// 降噪フィルタ本体
#[derive(Debug)]
pub struct FilterPipeline<D>
where
    D: FrameDenoiser,
{
    denoiser: D,
}

impl<D> FilterPipeline<D>
where
    D: FrameDenoiser,
{
    /// バックエンドを受け取り、パイプラインを生成
    pub fn new(denoiser: D) -> Self {
        Self { denoiser }
    }

    pub fn denoiser(&self) -> &D {
        &self.denoiser
    }

    /// バックエンドを取り出す（パイプラインは破棄）
    pub fn into_inner(self) -> D {
        self.denoiser
    }

    /// バックエンドの内部状態をリセット
    pub fn reset(&mut self) -> Result<(), FilterError> {
        self.denoiser.reset()?;
        Ok(())
    }

    /// バッファ全体を降噪し、閾値未満のフレームを除去
    pub fn filter(
        &mut self,
        input: SampleBuffer,
        voice_prob_threshold: f32,
    ) -> Result<FilterResult, FilterError> {
        let original_rate = input.sample_rate;
        let original_depth = input.bit_depth;

        let converted = to_inference_format(input)?;
        let frames = segment(&converted)?;
        debug!(frames = frames.len(), frame_size = FRAME_SIZE, "segmented");

        let mut voice_probabilities = Vec::with_capacity(frames.len());
        let mut kept = Vec::with_capacity(converted.samples.len());
        for (index, frame) in frames.iter().enumerate() {
            let output = self.denoiser.process_frame(frame)?;
            debug!(frame = index, probability = output.voice_probability, "frame processed");

            voice_probabilities.push(output.voice_probability);
            if passes_gate(output.voice_probability, voice_prob_threshold) {
                kept.extend_from_slice(output.frame.as_slice());
            }
        }

        let kept_frames = kept.len() / FRAME_SIZE;
        let mut denoised = SampleBuffer::mono(kept, INFERENCE_SAMPLE_RATE, BitDepth::Sixteen);
        if original_rate != INFERENCE_SAMPLE_RATE {
            denoised = from_inference_format(denoised, original_rate)?;
        }
        denoised.bit_depth = original_depth;

        info!(
            processed = frames.len(),
            kept = kept_frames,
            threshold = voice_prob_threshold,
            "filter complete"
        );

        Ok(FilterResult {
            denoised,
            voice_probabilities,
            processed_frames: frames.len(),
        })
    }

    /// 生PCMバイト列を降噪し、同じビット深度のPCM（モノラル）と確率列を返す
    pub fn filter_bytes(
        &mut self,
        bytes: &[u8],
        sample_rate: u32,
        channels: u16,
        bit_depth: u16,
        voice_prob_threshold: f32,
    ) -> Result<(Vec<u8>, Vec<f32>), FilterError> {
        let depth = BitDepth::try_from(bit_depth)?;
        let samples = audio_pipeline::codec::decode_with(bytes, depth);
        let input = SampleBuffer::new(samples, sample_rate, channels, depth);
        input.validate()?;

        let result = self.filter(input, voice_prob_threshold)?;
        let encoded = audio_pipeline::codec::encode_with(&result.denoised.samples, depth);
        Ok((encoded, result.voice_probabilities))
    }

    /// 1フレーム（480サンプル、48kHzモノラル）を処理
    ///
    /// フォーマット変換は行わない。バックエンドの状態は呼び出し間で引き継がれる。
    pub fn filter_stream(
        &mut self,
        frame: &[f32],
        voice_prob_threshold: f32,
    ) -> Result<StreamOutput, FilterError> {
        let frame = Frame::try_from(frame).map_err(|actual| FilterError::FrameSize {
            expected: FRAME_SIZE,
            actual,
        })?;

        let output = self.denoiser.process_frame(&frame)?;
        let keep = passes_gate(output.voice_probability, voice_prob_threshold);
        Ok(StreamOutput {
            frame: output.frame,
            voice_probability: output.voice_probability,
            keep,
        })
    }

    /// 任意長のチャンク（48kHzモノラル）を受け取り、揃ったフレームを順に処理
    ///
    /// 結果はフレームごと。1フレームの失敗は後続フレームの処理を止めない。
    pub fn push_chunk(
        &mut self,
        reconstructor: &mut FrameReconstructor,
        chunk: &[f32],
        voice_prob_threshold: f32,
    ) -> Vec<Result<StreamOutput, FilterError>> {
        reconstructor
            .push(chunk)
            .iter()
            .map(|frame| self.filter_stream(frame.as_slice(), voice_prob_threshold))
            .collect()
    }

    /// 残りのサンプルをゼロ埋めして最終フレームとして処理
    pub fn flush_stream(
        &mut self,
        reconstructor: &mut FrameReconstructor,
        voice_prob_threshold: f32,
    ) -> Option<Result<StreamOutput, FilterError>> {
        reconstructor
            .flush()
            .map(|frame| self.filter_stream(frame.as_slice(), voice_prob_threshold))
    }

    /// `filter` と同じ分割・推論を行い、音声確率の統計のみを返す
    pub fn analyze(
        &mut self,
        input: SampleBuffer,
        voice_prob_threshold: f32,
    ) -> Result<FrameStatistics, FilterError> {
        let converted = to_inference_format(input)?;
        let frames = segment(&converted)?;

        let mut collector = StatisticsCollector::new(voice_prob_threshold);
        for frame in &frames {
            let output = self.denoiser.process_frame(frame)?;
            collector.record(output.voice_probability);
        }

        let stats = collector.finish();
        info!(
            total = stats.total_frames,
            voice = stats.voice_frames,
            "analysis complete"
        );
        Ok(stats)
    }
}
