//! Time capability.
//!
//! The daily lock depends on "today" in the user's local time zone, so the
//! state machine asks a `Clock` rather than reading the system time itself.

use chrono::{DateTime, FixedOffset, Local};
use std::sync::Mutex;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// System clock in the local time zone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock that returns a settable instant
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Parse an RFC 3339 instant, e.g. `2024-01-01T23:59:50+02:00`
    pub fn at(rfc3339: &str) -> crate::Result<Self> {
        let now = DateTime::parse_from_rfc3339(rfc3339)
            .map_err(|e| crate::Error::Config(format!("Invalid instant '{}': {}", rfc3339, e)))?;
        Ok(Self::new(now))
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
