//! Wall-clock time sources
//!
//! Energy recovery is measured against real time, not simulation ticks, so the
//! session asks a `Clock` for epoch milliseconds whenever it needs a timestamp.

use std::cell::Cell;
use std::rc::Rc;

/// Source of wall-clock time in Unix epoch milliseconds
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// The platform's real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests and replays. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Whole seconds elapsed between two epoch-ms timestamps (floored, never negative)
pub fn elapsed_secs(since_ms: i64, now_ms: i64) -> u64 {
    (now_ms - since_ms).max(0) as u64 / 1000
}

/// Format a countdown as `HH:MM:SS`
pub fn format_countdown(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(10_800), "03:00:00");
        assert_eq!(format_countdown(3_661), "01:01:01");
        assert_eq!(format_countdown(59), "00:00:59");
        assert_eq!(format_countdown(0), "00:00:00");
    }

    #[test]
    fn test_elapsed_floors_and_clamps() {
        assert_eq!(elapsed_secs(1_000, 2_999), 1);
        assert_eq!(elapsed_secs(5_000, 1_000), 0);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(100);
        let other = clock.clone();
        clock.advance_secs(2);
        assert_eq!(other.now_ms(), 2_100);
    }
}
