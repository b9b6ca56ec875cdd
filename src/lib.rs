//! Core library for the `steadyprobe` CLI.
//!
//! A fixed-rate HTTP probe: a dispatcher launches one GET per tick at the
//! configured requests-per-second, every probe measures status and latency
//! under fixed per-phase timeouts, and the outcome is written to a sink as a
//! structured log record. The binary is a thin wrapper around [`entry::run`].
pub mod args;
pub mod config;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod logger;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod sinks;
