//! Injectable time source.
//!
//! Services that hold time-based state (the region membership cache) take a
//! [`Clock`] instead of calling `Utc::now()` directly, so tests can drive
//! expiry deterministically.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
