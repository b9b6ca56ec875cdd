use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response};
use tokio::time::{Instant, timeout};

use super::outcome::{NO_STATUS, RequestOutcome};
use crate::config::ProbeTimeouts;
use crate::error::ProbeError;

struct BodyRead {
    bytes: Vec<u8>,
    error: Option<ProbeError>,
}

pub(super) async fn execute_probe(
    client: &Client,
    url: &str,
    timeouts: &ProbeTimeouts,
    capture_body: bool,
) -> RequestOutcome {
    let start = Instant::now();

    let (status_code, body, error) = match send_request(client, url, timeouts).await
    {
        Err(err) => (NO_STATUS, Vec::new(), Some(err)),
        Ok(response) => {
            let status = response.status().as_u16();
            let read = read_body(response, timeouts.body_idle, capture_body).await;
            (status, read.bytes, read.error)
        }
    };
    let elapsed = start.elapsed();

    let body_text = if capture_body {
        String::from_utf8_lossy(&body).into_owned()
    } else {
        String::new()
    };

    RequestOutcome {
        url: url.to_owned(),
        status_code,
        elapsed,
        body_text,
        error,
    }
}

/// Resolves once the status line and headers are in, or fails.
///
/// The client's `connect_timeout` bounds connect plus TLS on its own, so the
/// deadline here is the connect budget plus the header budget. A slow
/// handshake never eats into the header wait.
async fn send_request(
    client: &Client,
    url: &str,
    timeouts: &ProbeTimeouts,
) -> Result<Response, ProbeError> {
    let deadline = send_deadline(timeouts);
    match timeout(deadline, client.get(url).send()).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ProbeError::Transport { source: err }),
        Err(_) => Err(ProbeError::HeaderTimeout {
            header_timeout: timeouts.response_header,
            deadline,
        }),
    }
}

pub(super) const fn send_deadline(timeouts: &ProbeTimeouts) -> Duration {
    timeouts.connect.saturating_add(timeouts.response_header)
}

/// Reads the whole body. Whatever arrived before a failure is kept.
async fn read_body(response: Response, idle_timeout: Option<Duration>, keep: bool) -> BodyRead {
    let mut stream = response.bytes_stream();
    let mut bytes = Vec::new();
    loop {
        let next = match idle_timeout {
            Some(limit) => match timeout(limit, stream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    return BodyRead {
                        bytes,
                        error: Some(ProbeError::BodyIdleTimeout { timeout: limit }),
                    };
                }
            },
            None => stream.next().await,
        };
        match next {
            Some(Ok(chunk)) => {
                if keep {
                    bytes.extend_from_slice(&chunk);
                }
            }
            Some(Err(err)) => {
                return BodyRead {
                    bytes,
                    error: Some(ProbeError::BodyRead { source: err }),
                };
            }
            None => return BodyRead { bytes, error: None },
        }
    }
}
