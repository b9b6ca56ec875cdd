use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::AppResult;

/// Installs a JSON subscriber on stdout with event fields at the top level,
/// one object per line.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed. The log
/// stream is the only output of a run, so callers should not carry on.
pub fn init_logging() -> AppResult<()> {
    let filter = std::env::var("STEADYPROBE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new("info"),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
