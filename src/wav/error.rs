use std::path::PathBuf;

use thiserror::Error;

use crate::filter::FilterError;

#[derive(Debug, Error)]
pub enum WavError {
    #[error("failed to open WAV file: {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("failed to decode WAV samples: {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("failed to write WAV file: {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("unsupported WAV format in {path:?}: {reason}")]
    Format { path: PathBuf, reason: String },
    #[error("failed to filter {path:?}")]
    Filter {
        path: PathBuf,
        #[source]
        source: FilterError,
    },
}
