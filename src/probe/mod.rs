//! Single-request execution and outcome reporting.
mod client;
mod execution;
mod outcome;

#[cfg(test)]
mod test_server;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Configuration;
use crate::dispatch::Launch;
use crate::error::ProbeError;
use crate::shutdown::ShutdownReceiver;
use crate::sinks::OutcomeSink;

use client::build_client;
use execution::execute_probe;

pub use outcome::{NO_STATUS, RequestOutcome};

/// Executes one GET against the configured URL per call and reports the
/// outcome. Shared by every probe task of a run.
pub struct Prober<S> {
    config: Arc<Configuration>,
    client: Client,
    sink: Arc<S>,
}

impl<S: OutcomeSink> Prober<S> {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built (for example
    /// when the TLS backend fails to initialise).
    pub fn new(config: Arc<Configuration>, sink: Arc<S>) -> Result<Self, ProbeError> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            sink,
        })
    }

    /// Runs the request without reporting it.
    pub async fn probe(&self) -> RequestOutcome {
        execute_probe(
            &self.client,
            &self.config.target_url,
            &self.config.timeouts,
            self.config.print_body,
        )
        .await
    }

    /// Emits the error record (if any) followed by the completion record.
    pub fn report(&self, outcome: &RequestOutcome) {
        if let Some(error) = outcome.error.as_ref() {
            self.sink.failed(&outcome.url, error);
        }
        self.sink.completed(outcome);
    }
}

#[async_trait]
impl<S: OutcomeSink> Launch for Prober<S> {
    async fn launch(&self, mut shutdown_rx: ShutdownReceiver) {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!(url = %self.config.target_url, "Probe cancelled by shutdown.");
            }
            outcome = self.probe() => self.report(&outcome),
        }
    }
}
