//! Destinations for probe outcomes.
mod log;

pub use log::TracingSink;

use crate::error::ProbeError;
use crate::probe::RequestOutcome;

/// Receives probe results at two severities.
///
/// Implementations are shared by every in-flight probe and must tolerate
/// concurrent calls.
pub trait OutcomeSink: Send + Sync + 'static {
    /// Completion record, emitted once per finished probe.
    fn completed(&self, outcome: &RequestOutcome);

    /// Error record for a transport or body-read failure.
    fn failed(&self, url: &str, error: &ProbeError);
}
