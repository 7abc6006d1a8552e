pub mod audio_pipeline;
pub mod batch;
pub mod cli;
pub mod config;
pub mod denoiser;
pub mod filter;
pub mod perf;
pub mod wav;

pub use config::ConfigSet;
pub use denoiser::{FrameDenoiser, MockDenoiser, RnnoiseDenoiser};
pub use filter::{FilterError, FilterPipeline, FilterResult, FrameStatistics, StreamOutput};
