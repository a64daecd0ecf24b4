use chrono::{DateTime, Utc};

pub const SECS_IN_1_MIN: i64 = 60;
pub const SECS_IN_1_HOUR: i64 = 60 * SECS_IN_1_MIN;
pub const SECS_IN_1_DAY: i64 = 24 * SECS_IN_1_HOUR;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Seconds elapsed between `since` and `now`, clamped at zero for
/// timestamps reported slightly in the future by skewed backends.
pub fn secs_between(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - since).num_seconds()).unwrap_or(0)
}

/// Compact age such as `42s`, `5m`, `3h` or `2d`
pub fn printable_age(secs: u64) -> String {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    if secs < SECS_IN_1_MIN {
        format!("{secs}s")
    } else if secs < SECS_IN_1_HOUR {
        format!("{}m", secs / SECS_IN_1_MIN)
    } else if secs < SECS_IN_1_DAY {
        format!("{}h", secs / SECS_IN_1_HOUR)
    } else {
        format!("{}d", secs / SECS_IN_1_DAY)
    }
}

pub fn printable_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[test]
fn printable_age_picks_largest_unit() {
    assert_eq!(printable_age(0), "0s");
    assert_eq!(printable_age(59), "59s");
    assert_eq!(printable_age(60), "1m");
    assert_eq!(printable_age(3 * 3600 + 10), "3h");
    assert_eq!(printable_age(2 * 86400), "2d");
    assert_eq!(printable_age(u64::MAX), format!("{}d", i64::MAX / SECS_IN_1_DAY));
}

#[test]
fn secs_between_doesnt_go_negative() {
    let earlier = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let later = DateTime::parse_from_rfc3339("2024-01-01T00:01:30Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(secs_between(earlier, later), 90);
    assert_eq!(secs_between(later, earlier), 0);
}
