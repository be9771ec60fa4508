//! Request timestamps for Binance API calls.
//!
//! Every request carries a `timestamp` parameter in milliseconds since the
//! Unix epoch. Binance rejects signed requests whose timestamp falls outside
//! the receive window.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing request timestamps.
///
/// Implement this to pin timestamps in tests or to apply a server time offset.
pub trait TimestampProvider: Send + Sync {
    /// Current time in whole milliseconds since the Unix epoch.
    fn timestamp_ms(&self) -> u64;
}

/// Timestamp provider backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock provider.
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemClock {
    fn timestamp_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_close_to_wall_clock() {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let ts = SystemClock::new().timestamp_ms();
        assert!(ts.abs_diff(wall) < 5_000);
    }

    #[test]
    fn test_system_clock_is_milliseconds() {
        // 2020-01-01 in ms; a seconds or micros clock would fall far outside.
        let ts = SystemClock.timestamp_ms();
        assert!(ts > 1_577_836_800_000);
        assert!(ts < 100_000_000_000_000);
    }
}
