use std::time::{Duration, Instant};

/// Monotonic clock used for reaction-time measurement and the inter-trial
/// gate. Wall-clock adjustments must never show up in an `elapsed` reading.
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    /// Nanoseconds since some fixed, monotonically non-decreasing origin.
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
    /// Blocks the calling thread for `d`. Zero returns immediately.
    fn sleep(&self, d: Duration);
}

/// `Instant`-backed timer with a precision sleep on Linux.
#[derive(Debug, Clone)]
pub struct MonotonicTimer {
    start: Instant,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for MonotonicTimer {
    type Timestamp = u64;

    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }

    fn sleep(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        #[cfg(target_os = "linux")]
        linux_sleep(d);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(d);
    }
}

/// `clock_nanosleep` against CLOCK_MONOTONIC avoids the timer-slack rounding
/// of `thread::sleep` on short inter-trial delays.
#[cfg(target_os = "linux")]
fn linux_sleep(duration: Duration) {
    use libc::{CLOCK_MONOTONIC, clock_nanosleep, timespec};

    let req = timespec {
        tv_sec: duration.as_secs() as libc::time_t,
        tv_nsec: duration.subsec_nanos() as libc::c_long,
    };

    unsafe {
        clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
    }
}
