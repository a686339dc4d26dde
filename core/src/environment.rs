//! Injected dependencies shared by the lifecycle engine and feed assembler.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected so that expiry behavior is deterministic under test; see
/// `FixedClock` and `ManualClock` in `helphive-testing`.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
