use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::{ProbeArgs, normalize_flag_style};
use crate::config::Configuration;
use crate::dispatch::Dispatcher;
use crate::error::AppResult;
use crate::probe::Prober;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::sinks::TracingSink;

/// Parses the command line, then probes until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error for invalid flags, an unusable URL, or when the runtime
/// or HTTP client cannot be built.
pub fn run() -> AppResult<()> {
    let args = parse_args()?;
    let config = Configuration::try_from(&args)?;

    crate::logger::init_logging()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(Arc::new(config)))
}

fn parse_args() -> AppResult<ProbeArgs> {
    let cmd = ProbeArgs::command();
    let raw_args = normalize_flag_style(std::env::args_os());
    let matches = cmd.get_matches_from(raw_args);
    Ok(ProbeArgs::from_arg_matches(&matches)?)
}

async fn run_async(config: Arc<Configuration>) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let prober = Prober::new(Arc::clone(&config), Arc::new(TracingSink))?;
    let dispatcher = Dispatcher::from_config(&config);

    info!(
        url = %config.target_url,
        rps = config.requests_per_second.get(),
        interval = ?dispatcher.interval(),
        max_in_flight = dispatcher.max_in_flight(),
        print_body = config.print_body,
        insecure_tls = config.insecure_tls,
        "Starting probe loop."
    );

    let report = dispatcher.run(Arc::new(prober), &shutdown_tx).await;

    info!(
        launched = report.launched,
        dropped = report.dropped,
        "Probe loop stopped."
    );

    drop(shutdown_tx.send(()));
    signal_handle.await?;
    Ok(())
}
