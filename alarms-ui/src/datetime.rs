use api_structs::time_conversion::{now, printable_age, secs_between};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

pub fn printable_local_date(timestamp: DateTime<Utc>) -> String {
    let offset_minutes = js_sys::Date::new_0().get_timezone_offset() as i64;
    utc_to_local_date(timestamp.naive_utc(), offset_minutes)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn utc_to_local_date(utc: NaiveDateTime, offset_minutes: i64) -> NaiveDateTime {
    utc - Duration::minutes(offset_minutes)
}

/// "5m ago" style age relative to the browser clock
pub fn printable_age_since(timestamp: DateTime<Utc>) -> String {
    format!("{} ago", printable_age(secs_between(timestamp, now())))
}
