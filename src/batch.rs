//! ディレクトリ配下のWAVファイル一括降噪
//!
//! 1ファイルの失敗はログに残して次のファイルへ進む。出力は入力ディレクトリからの
//! 相対パスを保ったまま出力ディレクトリへ書き出す。
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::BatchSettings;
use crate::denoiser::FrameDenoiser;
use crate::filter::FilterPipeline;
use crate::wav;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to scan input directory: {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to create output directory: {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 一括処理の結果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    /// 成功した出力ファイル
    pub processed: Vec<PathBuf>,
    /// 失敗した入力ファイルとエラー内容
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

#[derive(Debug, Clone)]
pub struct BatchProcessor {
    settings: BatchSettings,
}

impl BatchProcessor {
    pub fn new(settings: BatchSettings) -> Self {
        Self { settings }
    }

    /// 出力先省略時のディレクトリ（`<input><suffix>`）
    pub fn default_output_dir(&self, input_dir: &Path) -> PathBuf {
        let mut name = input_dir.components().as_path().as_os_str().to_owned();
        name.push(&self.settings.output_dir_suffix);
        PathBuf::from(name)
    }

    /// 対象拡張子のファイルを再帰的に列挙（出力ディレクトリ配下は除外）
    pub fn collect_inputs(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, BatchError> {
        let mut files = Vec::new();
        // 未作成なら比較対象なし
        let skip = output_dir.canonicalize().ok();
        let walker = WalkDir::new(input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_same_dir(entry, skip.as_deref()));

        for entry in walker {
            let entry = entry.map_err(|source| BatchError::Walk {
                path: input_dir.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// 一括処理を実行
    pub fn run<D>(
        &self,
        pipeline: &mut FilterPipeline<D>,
        input_dir: &Path,
        output_dir: &Path,
        voice_prob_threshold: f32,
    ) -> Result<BatchSummary, BatchError>
    where
        D: FrameDenoiser,
    {
        fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let inputs = self.collect_inputs(input_dir, output_dir)?;
        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            files = inputs.len(),
            "batch started"
        );

        let mut summary = BatchSummary::default();
        for (index, input) in inputs.iter().enumerate() {
            let relative = input.strip_prefix(input_dir).unwrap_or(input.as_path());
            let output = output_dir.join(relative);
            info!(
                index = index + 1,
                total = inputs.len(),
                file = %relative.display(),
                "processing"
            );

            if let Some(parent) = output.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), error = %e, "failed to create directory, skipping");
                    summary.failed.push((input.clone(), e.to_string()));
                    continue;
                }
            }

            match wav::filter_file(pipeline, input, &output, voice_prob_threshold) {
                Ok(_) => summary.processed.push(output),
                Err(e) => {
                    let message = error_chain(&e);
                    warn!(file = %input.display(), error = %message, "file failed, skipping");
                    summary.failed.push((input.clone(), message));
                }
            }
        }

        info!(
            succeeded = summary.processed.len(),
            failed = summary.failed.len(),
            "batch finished"
        );
        Ok(summary)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case(self.settings.extension.trim_start_matches('.'))
            })
    }
}

/// 正規化したパスで出力ディレクトリと一致するか
fn is_same_dir(entry: &walkdir::DirEntry, target: Option<&Path>) -> bool {
    match target {
        Some(target) if entry.file_type().is_dir() => entry
            .path()
            .canonicalize()
            .is_ok_and(|path| path == target),
        _ => false,
    }
}

/// エラーと原因を `: ` で連結
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
