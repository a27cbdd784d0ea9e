//! Asynchronous delay used between two dispatcher cycles.
use embassy_time::Duration;

/// Timer abstraction for the async runner.
pub trait PollTimer {
    /// Asynchronously wait for `period`.
    fn delay<'a>(&'a mut self, period: Duration) -> impl core::future::Future<Output = ()> + 'a;
}
