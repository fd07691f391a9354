//! Date formatting in the en-US conventions used across the UI.

use chrono::{DateTime, Local, TimeZone, Utc};
use strum::{Display, EnumString};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Output styles matching the en-US `Intl.DateTimeFormat` presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DateStyle {
    /// `1/15/2025`
    #[default]
    Numeric,
    /// `Jan 15, 2025`
    Medium,
    /// `January 15, 2025`
    Long,
    /// `Wednesday, January 15, 2025`
    Full,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Numeric => "%-m/%-d/%Y",
            Self::Medium => "%b %-d, %Y",
            Self::Long => "%B %-d, %Y",
            Self::Full => "%A, %B %-d, %Y",
        }
    }
}

/// Describes how long ago `date` was, relative to the current time.
///
/// See [`format_relative_time_at`] for the buckets.
pub fn format_relative_time<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format_relative_time_at(date, &Utc::now())
}

/// Describes how long before `now` the `date` was.
///
/// Elapsed whole seconds are bucketed into "just now" (under a minute),
/// "N minutes ago", "N hours ago" and "N days ago" (under a week). Older
/// dates are printed as `M/D/YYYY` in the date's own time zone. Dates in
/// the future count as "just now".
///
/// ## Examples
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use rmkit_utils::format_relative_time_at;
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
/// assert_eq!(format_relative_time_at(&(now - Duration::seconds(30)), &now), "just now");
/// assert_eq!(format_relative_time_at(&(now - Duration::hours(5)), &now), "5 hours ago");
/// assert_eq!(format_relative_time_at(&(now - Duration::days(30)), &now), "12/16/2024");
/// ```
pub fn format_relative_time_at<Tz, Now>(date: &DateTime<Tz>, now: &DateTime<Now>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    Now: TimeZone,
{
    let elapsed = (now.timestamp_millis() - date.timestamp_millis()).div_euclid(1000);

    match elapsed {
        s if s < MINUTE => "just now".to_string(),
        s if s < HOUR => format!("{} minutes ago", s / MINUTE),
        s if s < DAY => format!("{} hours ago", s / HOUR),
        s if s < WEEK => format!("{} days ago", s / DAY),
        _ => format_date(date, DateStyle::Numeric),
    }
}

/// Formats a date in one of the en-US [`DateStyle`] presets.
pub fn format_date<Tz>(date: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(style.pattern()).to_string()
}

/// Whether `date` falls on the current local calendar day.
pub fn is_today<Tz: TimeZone>(date: &DateTime<Tz>) -> bool {
    is_same_day(&date.with_timezone(&Local), &Local::now())
}

/// Whether two instants fall on the same calendar day of the time zone they carry.
pub fn is_same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_buckets() {
        let now = noon();
        let cases = [
            (Duration::seconds(0), "just now"),
            (Duration::seconds(59), "just now"),
            (Duration::seconds(60), "1 minutes ago"),
            (Duration::minutes(59), "59 minutes ago"),
            (Duration::hours(1), "1 hours ago"),
            (Duration::hours(23), "23 hours ago"),
            (Duration::days(1), "1 days ago"),
            (Duration::days(6), "6 days ago"),
        ];

        for (ago, expected) in cases {
            assert_eq!(format_relative_time_at(&(now - ago), &now), expected, "{ago:?}");
        }
    }

    #[test]
    fn test_partial_seconds_are_floored() {
        let now = noon();
        let date = now - Duration::milliseconds(60_999);
        assert_eq!(format_relative_time_at(&date, &now), "1 minutes ago");

        let date = now - Duration::milliseconds(59_999);
        assert_eq!(format_relative_time_at(&date, &now), "just now");
    }

    #[test]
    fn test_one_week_falls_back_to_date() {
        let now = noon();
        assert_eq!(format_relative_time_at(&(now - Duration::days(7)), &now), "1/8/2025");
    }

    #[test]
    fn test_future_is_just_now() {
        let now = noon();
        assert_eq!(format_relative_time_at(&(now + Duration::days(3)), &now), "just now");
    }

    #[test]
    fn test_date_styles() {
        let date = noon();
        assert_eq!(format_date(&date, DateStyle::Numeric), "1/15/2025");
        assert_eq!(format_date(&date, DateStyle::Medium), "Jan 15, 2025");
        assert_eq!(format_date(&date, DateStyle::Long), "January 15, 2025");
        assert_eq!(format_date(&date, DateStyle::Full), "Wednesday, January 15, 2025");
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!("long".parse::<DateStyle>().unwrap(), DateStyle::Long);
        assert_eq!(DateStyle::Full.to_string(), "full");
    }

    #[test]
    fn test_date_uses_its_own_offset() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let late_utc = Utc.with_ymd_and_hms(2025, 1, 15, 20, 0, 0).unwrap();
        assert_eq!(format_date(&late_utc.with_timezone(&tokyo), DateStyle::Numeric), "1/16/2025");
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(&Local::now()));
        assert!(!is_today(&(Local::now() - Duration::days(2))));
    }

    #[test]
    fn test_is_same_day() {
        let morning = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 1).unwrap();
        let evening = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        assert!(is_same_day(&morning, &evening));
        assert!(!is_same_day(&evening, &next));
    }
}
