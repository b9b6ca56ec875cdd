use tracing::{error, info};

use super::OutcomeSink;
use crate::error::{ProbeError, error_chain};
use crate::probe::RequestOutcome;

/// Writes outcomes as `tracing` events; formatting is left to the
/// installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutcomeSink for TracingSink {
    fn completed(&self, outcome: &RequestOutcome) {
        info!(
            url = %outcome.url,
            status_code = outcome.status_code,
            total_time = %outcome.total_time(),
            "{}",
            outcome.message()
        );
    }

    fn failed(&self, url: &str, error: &ProbeError) {
        error!(
            url = %url,
            error = %error_chain(error),
            timed_out = error.is_timeout(),
            "Probe failed."
        );
    }
}
