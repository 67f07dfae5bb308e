//! Production wall-clock backed by chrono.

use crate::traits::Clock;

/// System clock reporting nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ns(&self) -> u64 {
        // timestamp_nanos_opt only fails outside ~1677..2262, which a
        // sane host clock never reports.
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .max(0) as u64
    }
}
