//! ディレクトリ一括処理とストリーミングデモの設定
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BatchConfig {
    pub batch: BatchSettings,
    pub stream_demo: StreamDemoSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BatchSettings {
    /// 対象ファイルの拡張子（大文字小文字は区別しない）
    pub extension: String,
    /// 出力先省略時に入力ディレクトリ名へ付与するサフィックス
    pub output_dir_suffix: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StreamDemoSettings {
    /// 生成する合成フレーム数
    pub frames: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch: BatchSettings {
                extension: "wav".to_string(),
                output_dir_suffix: "_denoised".to_string(),
            },
            stream_demo: StreamDemoSettings { frames: 10 },
        }
    }
}
