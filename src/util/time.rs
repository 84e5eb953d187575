//! Time and date calculation utilities.
//!
//! This module provides the time math shared by the reminder dispatcher (minutes
//! until a contest starts, human-readable lead strings) and the fallback schedule
//! generators (next occurrence of a fixed weekly UTC slot).

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc, Weekday};

/// Minutes from `now` until `start`, rounded to the nearest whole minute.
pub fn minutes_until(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (start - now).num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

/// Formats a minute count the way reminder payloads expect it.
///
/// Above an hour: `"2h 15m"`; otherwise `"45 minutes"`.
pub fn format_time_until(minutes: i64) -> String {
    if minutes > 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{} minutes", minutes)
    }
}

/// The `weeks_ahead`-th occurrence of `weekday` at a fixed UTC time, counting from
/// `now`'s date. `weeks_ahead = 0` is the next occurrence; when today is already
/// that weekday, `include_today` decides whether today's slot counts.
pub fn upcoming_weekday_at(
    now: DateTime<Utc>,
    weekday: Weekday,
    hour: u32,
    minute: u32,
    weeks_ahead: i64,
    include_today: bool,
) -> DateTime<Utc> {
    let today = now.weekday().num_days_from_sunday() as i64;
    let target = weekday.num_days_from_sunday() as i64;

    let mut days_until = (target - today).rem_euclid(7);
    if days_until == 0 && !include_today {
        days_until = 7;
    }

    let date = now.date_naive() + Duration::days(days_until + weeks_ahead * 7);
    Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap_or_default())
}
