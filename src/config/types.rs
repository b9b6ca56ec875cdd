use std::time::Duration;

use reqwest::Url;

use crate::args::{PositiveU64, PositiveUsize, ProbeArgs};
use crate::error::ValidationError;

/// Timeout applied to every request phase unless tuned otherwise.
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(3);
/// Seconds worth of probes allowed in flight at the configured rate.
const IN_FLIGHT_WINDOW_SECS: usize = 10;
/// Lower bound for the in-flight cap so low rates still tolerate stragglers.
const MIN_IN_FLIGHT: usize = 16;

/// Per-phase timeouts for a probe.
///
/// `connect` covers TCP connect and the TLS handshake. `response_header`
/// bounds the wait for the status line and headers once the request is
/// sent. The body has no overall deadline; `body_idle` only limits a single
/// stalled read and is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    pub connect: Duration,
    pub keep_alive: Duration,
    pub response_header: Duration,
    pub body_idle: Option<Duration>,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_PHASE_TIMEOUT)
    }
}

impl ProbeTimeouts {
    #[must_use]
    pub const fn uniform(timeout: Duration) -> Self {
        Self {
            connect: timeout,
            keep_alive: timeout,
            response_header: timeout,
            body_idle: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub target_url: String,
    pub requests_per_second: PositiveU64,
    pub print_body: bool,
    pub insecure_tls: bool,
    pub timeouts: ProbeTimeouts,
    pub max_in_flight: PositiveUsize,
}

impl Configuration {
    /// Builds a configuration with default flags and timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is empty, does not parse, has no host,
    /// or uses a scheme other than http/https.
    pub fn new(target_url: &str, requests_per_second: PositiveU64) -> Result<Self, ValidationError> {
        validate_url(target_url)?;
        Ok(Self {
            target_url: target_url.to_owned(),
            requests_per_second,
            print_body: false,
            insecure_tls: false,
            timeouts: ProbeTimeouts::default(),
            max_in_flight: default_max_in_flight(requests_per_second),
        })
    }
}

impl TryFrom<&ProbeArgs> for Configuration {
    type Error = ValidationError;

    fn try_from(args: &ProbeArgs) -> Result<Self, Self::Error> {
        let mut config = Self::new(args.url.trim(), args.rps)?;
        config.print_body = args.body;
        config.insecure_tls = args.insecure;
        Ok(config)
    }
}

/// `rps × 10`, at least 16.
#[must_use]
pub fn default_max_in_flight(requests_per_second: PositiveU64) -> PositiveUsize {
    let rps = usize::try_from(requests_per_second.get()).unwrap_or(usize::MAX);
    PositiveUsize::at_least_one(rps.saturating_mul(IN_FLIGHT_WINDOW_SECS).max(MIN_IN_FLIGHT))
}

fn validate_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    let parsed = Url::parse(value).map_err(|err| ValidationError::InvalidUrl {
        url: value.to_owned(),
        source: err,
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(())
}
