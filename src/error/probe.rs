use std::time::Duration;

use thiserror::Error;

/// Failures of a single probe. None of them leave the probe task.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("No response headers within {header_timeout:?} after connecting (gave up at {deadline:?}).")]
    HeaderTimeout {
        header_timeout: Duration,
        deadline: Duration,
    },
    #[error("Failed to read response body: {source}")]
    BodyRead {
        #[source]
        source: reqwest::Error,
    },
    #[error("Response body stalled for {timeout:?}.")]
    BodyIdleTimeout { timeout: Duration },
}

impl ProbeError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::HeaderTimeout { .. } | Self::BodyIdleTimeout { .. } => true,
            Self::BuildClient { source }
            | Self::Transport { source }
            | Self::BodyRead { source } => source.is_timeout(),
        }
    }
}
