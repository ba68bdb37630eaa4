//! Time utilities: parsing HH:MM and full timestamps given on the command line.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// A moment given as a bare time (taken on `today`) or a full timestamp.
pub fn parse_at(s: &str, today: NaiveDate) -> AppResult<NaiveDateTime> {
    if let Some(t) = parse_time(s) {
        return Ok(today.and_time(t));
    }

    let s = s.trim();
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    Err(AppError::InvalidTime(s.to_string()))
}
