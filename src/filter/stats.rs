//! フレーム単位の音声確率の集計
use super::passes_gate;

/// 音声確率の統計
///
/// フレームが0個の場合は `min_voice_prob = 1.0`、`max_voice_prob = 0.0` となる（初期値のまま）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatistics {
    pub total_frames: usize,
    pub voice_frames: usize,
    pub noise_frames: usize,
    pub average_voice_prob: f32,
    pub max_voice_prob: f32,
    pub min_voice_prob: f32,
}

impl FrameStatistics {
    /// 確率列と閾値から統計を算出
    pub fn from_probabilities(probabilities: &[f32], threshold: f32) -> Self {
        let mut collector = StatisticsCollector::new(threshold);
        for &probability in probabilities {
            collector.record(probability);
        }
        collector.finish()
    }

    /// 音声フレームの割合（0フレームなら0.0）
    pub fn voice_ratio(&self) -> f32 {
        ratio(self.voice_frames, self.total_frames)
    }

    /// 雑音フレームの割合（0フレームなら0.0）
    pub fn noise_ratio(&self) -> f32 {
        ratio(self.noise_frames, self.total_frames)
    }
}

fn ratio(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32
    }
}

/// 確率を1つずつ受け取って畳み込む集計器
#[derive(Debug, Clone)]
pub struct StatisticsCollector {
    threshold: f32,
    total: usize,
    voice: usize,
    noise: usize,
    sum: f32,
    max: f32,
    min: f32,
}

impl StatisticsCollector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            total: 0,
            voice: 0,
            noise: 0,
            sum: 0.0,
            max: 0.0,
            min: 1.0,
        }
    }

    pub fn record(&mut self, probability: f32) {
        self.total += 1;
        self.sum += probability;
        if passes_gate(probability, self.threshold) {
            self.voice += 1;
        } else {
            self.noise += 1;
        }
        if probability > self.max {
            self.max = probability;
        }
        if probability < self.min {
            self.min = probability;
        }
    }

    pub fn finish(self) -> FrameStatistics {
        let average_voice_prob = if self.total > 0 {
            self.sum / self.total as f32
        } else {
            0.0
        };
        FrameStatistics {
            total_frames: self.total,
            voice_frames: self.voice,
            noise_frames: self.noise,
            average_voice_prob,
            max_voice_prob: self.max,
            min_voice_prob: self.min,
        }
    }
}
