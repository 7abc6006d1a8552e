use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DenoiserError {
    #[error("failed to create denoiser state: {message}")]
    Creation { message: String },
    #[error("frame processing failed: {message}")]
    Processing { message: String },
    #[error("failed to reset denoiser state: {message}")]
    Reset { message: String },
}

impl DenoiserError {
    pub fn creation(message: impl Into<String>) -> Self {
        Self::Creation {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    pub fn reset(message: impl Into<String>) -> Self {
        Self::Reset {
            message: message.into(),
        }
    }
}
