use std::time::Duration;

use crate::error::ProbeError;

/// Status reported when no response was obtained.
pub const NO_STATUS: u16 = 0;

/// Result of one probe, handed to the sink and then dropped.
#[derive(Debug)]
pub struct RequestOutcome {
    pub url: String,
    pub status_code: u16,
    pub elapsed: Duration,
    /// Response body as text; empty unless body printing is enabled.
    pub body_text: String,
    pub error: Option<ProbeError>,
}

impl RequestOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.body_text
    }

    /// Elapsed time rendered like `153.2ms` / `3.001s`.
    #[must_use]
    pub fn total_time(&self) -> String {
        format!("{:?}", self.elapsed)
    }
}
