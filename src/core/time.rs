//=========================================================================
// Time Service
//=========================================================================
//
// Absolute platform clock in milliseconds.
//
// Architecture:
//   reference: Instant ──elapsed()──> + base_ms ──> absolute_time()
//
// The clock is monotonic between rebinds. `set_absolute_time()` moves the
// base and resets the reference instant, so reads continue from the new
// value without restarting the pump.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== TimeService =========================================================

/// Monotonic millisecond clock with an explicit override hook.
#[derive(Debug, Clone)]
pub struct TimeService {
    reference: Instant,
    base_ms: f64,
}

impl TimeService {
    /// Creates a clock reading zero now.
    pub fn new() -> Self {
        Self {
            reference: Instant::now(),
            base_ms: 0.0,
        }
    }

    /// Returns the absolute time in milliseconds.
    ///
    /// Counted from pump start unless rebound with [`set_absolute_time`].
    ///
    /// [`set_absolute_time`]: TimeService::set_absolute_time
    pub fn absolute_time(&self) -> f64 {
        self.base_ms + self.reference.elapsed().as_secs_f64() * 1000.0
    }

    /// Rebinds the clock so the next read continues from `time_ms`.
    pub fn set_absolute_time(&mut self, time_ms: f64) {
        self.base_ms = time_ms;
        self.reference = Instant::now();
    }

    /// Resets the clock to zero (called when the pump starts).
    pub(crate) fn restart(&mut self) {
        self.set_absolute_time(0.0);
    }

    /// Sleeps the calling thread for `ms` milliseconds.
    pub fn sleep(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

impl Default for TimeService {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_near_zero() {
        let time = TimeService::new();
        let now = time.absolute_time();
        assert!(now >= 0.0);
        assert!(now < 1000.0, "Fresh clock should read close to zero, got {}", now);
    }

    #[test]
    fn reads_are_non_decreasing() {
        let time = TimeService::new();
        let mut last = time.absolute_time();
        for _ in 0..1000 {
            let now = time.absolute_time();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn set_absolute_time_rebinds_base() {
        let mut time = TimeService::new();
        time.set_absolute_time(5_000.0);

        let first = time.absolute_time();
        assert!(first >= 5_000.0);

        let second = time.absolute_time();
        assert!(second >= first);
    }

    #[test]
    fn set_absolute_time_can_move_backwards() {
        let mut time = TimeService::new();
        time.set_absolute_time(10_000.0);
        time.set_absolute_time(100.0);

        let now = time.absolute_time();
        assert!(now >= 100.0 && now < 10_000.0);
    }

    #[test]
    fn sleep_advances_clock() {
        let time = TimeService::new();
        let before = time.absolute_time();
        time.sleep(5);
        assert!(time.absolute_time() - before >= 5.0);
    }

    #[test]
    fn restart_returns_to_zero() {
        let mut time = TimeService::new();
        time.set_absolute_time(42_000.0);
        time.restart();
        assert!(time.absolute_time() < 1000.0);
    }
}
