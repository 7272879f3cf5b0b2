use chrono::{DateTime, Utc};
use std::cell::Cell;

thread_local! {
    static FIXED_NOW_UTC: Cell<Option<DateTime<Utc>>> = const { Cell::new(None) };
}

pub(crate) fn with_fixed_now_utc<R>(now: Option<DateTime<Utc>>, f: impl FnOnce() -> R) -> R {
    FIXED_NOW_UTC.with(|cell| {
        let prev = cell.replace(now);
        let out = f();
        cell.set(prev);
        out
    })
}

pub(crate) fn now_utc() -> DateTime<Utc> {
    FIXED_NOW_UTC
        .with(|cell| cell.get())
        .unwrap_or_else(Utc::now)
}
