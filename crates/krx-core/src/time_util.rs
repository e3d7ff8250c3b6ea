//! Wall-clock helpers for the archiver's trading-window gate and per-day
//! directory naming.
//!
//! Unlike the exchange timestamps that flow through the analyzer (plain
//! seconds-since-midnight, parsed straight off the wire), these helpers deal
//! in *local* wall-clock time, since the archiver's gate and file rollover
//! are defined in terms of when the operator's machine thinks it is.

use chrono::{Local, Timelike};

/// Current local minute-of-day (0..=1439).
pub fn local_minute_of_day() -> u32 {
    let now = Local::now();
    now.hour() * 60 + now.minute()
}

/// Current local date, formatted `YYYY-MM-DD`, for archive directory naming.
pub fn local_date_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parse a 12-char `HHMMSSuuuuuu` wire time-of-day field into decimal seconds
/// since midnight.
///
/// Returns `None` if the field isn't exactly 12 ASCII digits.
pub fn parse_time_to_seconds(field: &str) -> Option<f64> {
    if field.len() != 12 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hh: u32 = field[0..2].parse().ok()?;
    let mm: u32 = field[2..4].parse().ok()?;
    let ss: u32 = field[4..6].parse().ok()?;
    let micros: u32 = field[6..12].parse().ok()?;
    Some((hh * 3600 + mm * 60 + ss) as f64 + micros as f64 / 1_000_000.0)
}
