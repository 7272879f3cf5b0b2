use chrono::{DateTime, Utc};

/// Overrides "now" for the current thread while the closure runs.
///
/// Itinerary construction stamps `created_at` from the wall clock, which makes
/// fixture snapshots differ between runs. This helper provides a minimally
/// invasive mechanism: during the closure, treat "now" as the given instant.
/// `None` uses the system clock.
pub fn with_fixed_now_utc<R>(now: Option<DateTime<Utc>>, f: impl FnOnce() -> R) -> R {
    crate::runtime::with_fixed_now_utc(now, f)
}

/// The active "now": the fixed override when one is installed, otherwise the
/// system clock.
pub fn now_utc() -> DateTime<Utc> {
    crate::runtime::now_utc()
}
