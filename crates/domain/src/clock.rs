//! Clock port and implementations.
//!
//! The factory stamps `lastUpdated` through this port so tests can pin time.

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Current time as Unix seconds, the unit persisted in `lastUpdated`.
pub fn unix_now(clock: &dyn ClockPort) -> i64 {
    clock.now().timestamp()
}

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock, for deterministic timestamps.
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_reports_unix_seconds() {
        let at = Utc
            .with_ymd_and_hms(2021, 3, 14, 15, 9, 26)
            .single()
            .expect("valid timestamp");
        let clock = FixedClock(at);
        assert_eq!(unix_now(&clock), at.timestamp());
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(unix_now(&SystemClock::new()) > 0);
    }
}
