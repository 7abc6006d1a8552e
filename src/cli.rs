//! `rnnoise-filter` のコマンドライン定義
//!
//! 閾値は各コマンド末尾の省略可能な位置引数。省略時は設定ファイルの既定値を使う。
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rnnoise-filter", about = "RNNoise based voice filter for PCM audio")]
pub struct Cli {
    /// 設定ディレクトリ（省略時は RNNOISE_FILTER_CONFIG_DIR または config/）
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Denoise a WAV file and drop frames below the threshold
    Denoise {
        input: PathBuf,
        output: PathBuf,
        /// Voice probability threshold (0.0 - 1.0)
        threshold: Option<f32>,
    },
    /// Report voice probability statistics for a WAV file
    Analyze {
        input: PathBuf,
        threshold: Option<f32>,
    },
    /// Run the streaming demo on a synthetic signal
    Stream {
        /// Number of frames to generate
        #[arg(short, long)]
        frames: Option<usize>,
        /// Samples per pushed chunk
        #[arg(short, long, default_value_t = 320)]
        chunk: usize,
        threshold: Option<f32>,
    },
    /// Denoise every WAV file under a directory
    Batch {
        input_dir: PathBuf,
        /// Output directory (default: <input_dir>_denoised)
        output_dir: Option<PathBuf>,
        threshold: Option<f32>,
    },
    /// Measure raw PCM throughput (8 kHz mono 16-bit, 640-byte chunks)
    Test {
        audio: PathBuf,
        /// Chunks per filter call
        batch_size: usize,
        /// Number of timed runs
        runs: usize,
    },
}
