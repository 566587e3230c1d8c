//! Relative time formatting.

use chrono::{DateTime, Utc};

/// Human readable distance between `then` and `now`, suffixed with "ago".
///
/// Buckets follow the usual feed conventions: under 45 seconds is
/// "less than a minute", then minutes, hours, days, months and years.
/// Timestamps in the future are treated as "less than a minute ago".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use glimpse_domain::common::time_ago;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
/// assert_eq!(time_ago(now - Duration::days(1), now), "1 day ago");
/// ```
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;
    let hours = (minutes + 30) / 60;
    let days = (hours + 12) / 24;

    let distance = if seconds < 45 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes.max(1), "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if hours < 24 {
        format!("about {}", plural(hours, "hour"))
    } else if days < 30 {
        plural(days.max(1), "day")
    } else if days < 45 {
        "about 1 month".to_string()
    } else if days < 365 {
        plural((days + 15) / 30, "month")
    } else if days < 365 + 182 {
        "about 1 year".to_string()
    } else {
        format!("over {}", plural(days / 365, "year"))
    };

    format!("{} ago", distance)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
