//! Fixed-rate launch loop.
mod dispatcher;
mod interval;


use async_trait::async_trait;

use crate::shutdown::ShutdownReceiver;

pub use dispatcher::{DispatchReport, Dispatcher};
pub use interval::{MIN_TICK, inter_launch_interval};

/// One unit of work started on every tick.
///
/// The receiver fires when the process shuts down; implementations should
/// stop early when it does.
#[async_trait]
pub trait Launch: Send + Sync + 'static {
    async fn launch(&self, shutdown_rx: ShutdownReceiver);
}
