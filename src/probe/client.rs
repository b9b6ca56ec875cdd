use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::config::Configuration;
use crate::error::ProbeError;

/// Builds the transport for one prober.
///
/// Pooling is disabled so every probe pays for its own connect and
/// handshake, which is what the latency numbers are meant to include.
pub(super) fn build_client(config: &Configuration) -> Result<Client, ProbeError> {
    let timeouts = config.timeouts;
    let mut client_builder = Client::builder()
        .connect_timeout(timeouts.connect)
        .tcp_keepalive(Some(timeouts.keep_alive))
        .pool_max_idle_per_host(0)
        .user_agent(DEFAULT_USER_AGENT);

    if config.insecure_tls {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| ProbeError::BuildClient { source: err })
}
