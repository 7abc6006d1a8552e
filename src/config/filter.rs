//! コマンド別の音声確率閾値
use serde::Deserialize;

/// 閾値を省略したときに使う既定値（0.0..=1.0）
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FilterConfig {
    pub thresholds: ThresholdDefaults,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ThresholdDefaults {
    /// `denoise`: 既定では全フレームを保持
    pub denoise: f32,
    pub analyze: f32,
    pub stream: f32,
    pub batch: f32,
}

impl ThresholdDefaults {
    /// 範囲外の閾値があれば (名前, 値) を返す
    pub fn out_of_range(&self) -> Option<(&'static str, f32)> {
        [
            ("denoise", self.denoise),
            ("analyze", self.analyze),
            ("stream", self.stream),
            ("batch", self.batch),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdDefaults {
                denoise: 0.0,
                analyze: 0.3,
                stream: 0.3,
                batch: 0.0,
            },
        }
    }
}
