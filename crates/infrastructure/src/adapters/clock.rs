//! Clock adapter.

use chrono::{DateTime, Utc};

use skirmish_workflow::ports::Clock;

// =============================================================================
// SystemClock
// =============================================================================

/// Wall-clock time source for production use.
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
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
