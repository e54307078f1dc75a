use crate::error::SchedulerError;
use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike, Utc};
use std::str::FromStr;

/// Named recurrence interval mapped to a fixed calendar duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Every 10 seconds.
    Deciminute,
    /// Every minute.
    Minute,
    /// Every hour.
    Hourly,
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every calendar month. Day-of-month is clamped when the target month
    /// is shorter (Jan 31 + 1 month = Feb 29 in a leap year).
    Monthly,
}

impl Frequency {
    /// Advance a timestamp by one interval of this frequency.
    pub fn advance(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Deciminute => from + Duration::seconds(10),
            Frequency::Minute => from + Duration::minutes(1),
            Frequency::Hourly => from + Duration::hours(1),
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::days(7),
            Frequency::Monthly => from + Months::new(1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Deciminute => "deciminute",
            Frequency::Minute => "minute",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deciminute" => Ok(Frequency::Deciminute),
            "minute" => Ok(Frequency::Minute),
            "hourly" => Ok(Frequency::Hourly),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(SchedulerError::Configuration(format!(
                "unknown frequency '{}'",
                other
            ))),
        }
    }
}

/// Calendar unit a computed fire time is rounded to the start of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOf {
    Minute,
    Hour,
    Day,
    /// Weeks start on Sunday.
    Week,
    Month,
}

impl StartOf {
    /// Truncate a timestamp to the start of the containing unit.
    pub fn truncate(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = t.date_naive();
        let (date, hour, minute) = match self {
            StartOf::Minute => (date, t.hour(), t.minute()),
            StartOf::Hour => (date, t.hour(), 0),
            StartOf::Day => (date, 0, 0),
            StartOf::Week => {
                let back = Duration::days(i64::from(t.weekday().num_days_from_sunday()));
                (date - back, 0, 0)
            }
            StartOf::Month => (date.with_day(1).unwrap_or(date), 0, 0),
        };
        date.and_hms_opt(hour, minute, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or(t)
    }
}

impl FromStr for StartOf {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" => Ok(StartOf::Minute),
            "hour" => Ok(StartOf::Hour),
            "day" => Ok(StartOf::Day),
            "week" => Ok(StartOf::Week),
            "month" => Ok(StartOf::Month),
            other => Err(SchedulerError::Configuration(format!(
                "unknown rounding unit '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().expect("test timestamp")
    }

    #[test]
    fn advances_by_fixed_durations() {
        let base = at("2024-01-01T00:00:00Z");
        assert_eq!(Frequency::Deciminute.advance(base), at("2024-01-01T00:00:10Z"));
        assert_eq!(Frequency::Minute.advance(base), at("2024-01-01T00:01:00Z"));
        assert_eq!(Frequency::Hourly.advance(base), at("2024-01-01T01:00:00Z"));
        assert_eq!(Frequency::Daily.advance(base), at("2024-01-02T00:00:00Z"));
        assert_eq!(Frequency::Weekly.advance(base), at("2024-01-08T00:00:00Z"));
    }

    #[test]
    fn monthly_advance_clamps_short_months() {
        let jan31 = at("2024-01-31T12:00:00Z");
        assert_eq!(Frequency::Monthly.advance(jan31), at("2024-02-29T12:00:00Z"));

        let jan31_common = at("2023-01-31T12:00:00Z");
        assert_eq!(
            Frequency::Monthly.advance(jan31_common),
            at("2023-02-28T12:00:00Z")
        );
    }

    #[test]
    fn parses_known_frequencies() {
        assert_eq!("deciminute".parse::<Frequency>().unwrap(), Frequency::Deciminute);
        assert_eq!("MONTHLY".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn unknown_frequency_is_a_configuration_error() {
        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, SchedulerError::Configuration(_)));
    }

    #[test]
    fn truncates_to_unit_starts() {
        let t = at("2024-01-03T13:45:27Z");
        assert_eq!(StartOf::Minute.truncate(t), at("2024-01-03T13:45:00Z"));
        assert_eq!(StartOf::Hour.truncate(t), at("2024-01-03T13:00:00Z"));
        assert_eq!(StartOf::Day.truncate(t), at("2024-01-03T00:00:00Z"));
        assert_eq!(StartOf::Month.truncate(t), at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn week_truncation_lands_on_sunday() {
        // 2024-01-03 is a Wednesday; the preceding Sunday is 2023-12-31.
        let wednesday = at("2024-01-03T13:45:27Z");
        assert_eq!(StartOf::Week.truncate(wednesday), at("2023-12-31T00:00:00Z"));

        // Already on a Sunday midnight: stays put.
        let sunday = at("2023-12-31T00:00:00Z");
        assert_eq!(StartOf::Week.truncate(sunday), sunday);
    }
}
