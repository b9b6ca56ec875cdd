use thiserror::Error;

use super::{ProbeError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Failed to install log subscriber: {source}")]
    Logging {
        #[from]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }
}
