//! 設定モジュール（YAML 読み込み）
//!
//! `ConfigSet` は設定ディレクトリ配下の `filter.yaml` / `batch.yaml` を読み込み、
//! CLIが閾値や一括処理の既定値として参照する値を型安全に提供します。
mod batch;
mod error;
mod filter;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub use batch::*;
pub use error::ConfigError;
pub use filter::*;

/// 設定ディレクトリを指す環境変数名
pub const CONFIG_DIR_ENV: &str = "RNNOISE_FILTER_CONFIG_DIR";

/// 環境変数未設定時の設定ディレクトリ
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// すべての設定をひとまとめにした構造体
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSet {
    pub filter: FilterConfig,
    pub batch: BatchConfig,
    root: PathBuf,
}

impl Default for ConfigSet {
    /// 組み込みの既定値（設定ディレクトリが無い場合に使用）
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            batch: BatchConfig::default(),
            root: PathBuf::new(),
        }
    }
}

impl ConfigSet {
    /// ルートディレクトリから各YAMLを読み込み
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let root = dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ConfigError::MissingRoot(root));
        }

        let filter: FilterConfig = load_yaml(root.join("filter.yaml"))?;
        let batch: BatchConfig = load_yaml(root.join("batch.yaml"))?;

        let config = Self {
            filter,
            batch,
            root,
        };
        config.validate()?;
        Ok(config)
    }

    /// 環境変数（未設定時は `config/`）から設定を読み込み
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        Self::load_from_dir(dir)
    }

    /// 設定ルートのパス（既定値の場合は空）
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some((name, value)) = self.filter.thresholds.out_of_range() {
            return Err(ConfigError::Invalid {
                field: format!("thresholds.{name}"),
                reason: format!("{value} is outside 0.0..=1.0"),
            });
        }
        if self.batch.batch.extension.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "batch.extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// YAMLファイルを読み込み、型 `T` へデシリアライズ
fn load_yaml<T>(path: PathBuf) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
}
