//! Run configuration shared read-only by every probe.
pub mod types;


pub use types::{Configuration, DEFAULT_PHASE_TIMEOUT, ProbeTimeouts};
