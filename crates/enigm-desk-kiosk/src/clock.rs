/*
[INPUT]:  Monotonic system time
[OUTPUT]: Clock abstraction used for picture cadence, clue timeout and poll pacing
[POS]:    Runtime support - time source
[UPDATE]: When time handling changes
*/

use std::time::{Duration, Instant};

/// Time source for the controller's polling loops
pub trait Clock {
    fn now(&self) -> Instant;

    /// Wait between two polls
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant::now` and `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
