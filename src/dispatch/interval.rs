use std::time::Duration;

use crate::args::PositiveU64;

const MILLIS_PER_SECOND: u64 = 1000;
/// Shortest timer period; tokio intervals reject a zero period.
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// `1000 / rps` milliseconds, floored. Rates above 1000 floor to zero.
#[must_use]
pub const fn inter_launch_interval(requests_per_second: PositiveU64) -> Duration {
    let millis = match MILLIS_PER_SECOND.checked_div(requests_per_second.get()) {
        Some(millis) => millis,
        None => 0,
    };
    Duration::from_millis(millis)
}
