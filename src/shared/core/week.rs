// Week bucketing key for study time.
//
// Purpose
// - Normalize any calendar date to the Monday of its ISO week.
// - Parse and format the `YYYY-MM-DD` wire representation.
//
// Boundaries
// - Date-only. Time of day and time zone are resolved by the caller (see `WeekStart::current`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::core::clock::Clock;

pub const WEEK_START_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("week start must be a date formatted as YYYY-MM-DD, got {0:?}")]
pub struct WeekStartError(pub String);

/// Monday of a calendar week. Always a Monday by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekStart(NaiveDate);

impl WeekStart {
    /// Monday of the week that contains `date`. Sundays roll back six days.
    pub fn containing(date: NaiveDate) -> Self {
        let days_since_monday = date.weekday().num_days_from_monday();
        Self(date - TimeDelta::days(i64::from(days_since_monday)))
    }

    /// Week containing the clock's current UTC date.
    pub fn current(clock: &dyn Clock) -> Self {
        Self::containing(clock.now().date_naive())
    }

    /// Parses `YYYY-MM-DD` and normalizes the result to its Monday.
    pub fn parse(raw: &str) -> Result<Self, WeekStartError> {
        NaiveDate::parse_from_str(raw.trim(), WEEK_START_FORMAT)
            .map(Self::containing)
            .map_err(|_| WeekStartError(raw.to_string()))
    }

    /// Parses an optional query value, falling back to the current week.
    pub fn parse_or_current(raw: Option<&str>, clock: &dyn Clock) -> Result<Self, WeekStartError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::current(clock)),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WEEK_START_FORMAT))
    }
}

impl FromStr for WeekStart {
    type Err = WeekStartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WeekStart {
    type Error = WeekStartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WeekStart> for String {
    fn from(value: WeekStart) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for WeekStart {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

#[cfg(test)]
mod week_start_tests {
    use super::*;
    use crate::shared::core::clock::ManualClock;
    use chrono::{TimeZone, Utc, Weekday};
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2025, 6, 2), date(2025, 6, 2))]
    #[case(date(2025, 6, 4), date(2025, 6, 2))]
    #[case(date(2025, 6, 7), date(2025, 6, 2))]
    #[case(date(2025, 6, 8), date(2025, 6, 2))]
    #[case(date(2025, 6, 1), date(2025, 5, 26))]
    #[case(date(2025, 3, 1), date(2025, 2, 24))]
    #[case(date(2025, 1, 1), date(2024, 12, 30))]
    #[case(date(2024, 3, 3), date(2024, 2, 26))]
    fn it_should_normalize_to_the_monday_of_the_week(#[case] input: NaiveDate, #[case] monday: NaiveDate) {
        assert_eq!(WeekStart::containing(input).date(), monday);
    }

    #[rstest]
    fn it_should_format_as_an_iso_date() {
        assert_eq!(WeekStart::containing(date(2025, 6, 5)).to_string(), "2025-06-02");
    }

    #[rstest]
    fn it_should_parse_and_normalize_a_mid_week_date() {
        let week = WeekStart::parse("2025-06-05").unwrap();
        assert_eq!(week.to_string(), "2025-06-02");
    }

    #[rstest]
    #[case("")]
    #[case("2025-13-01")]
    #[case("06/02/2025")]
    #[case("2025-06-02T00:00:00Z")]
    #[case("last monday")]
    fn it_should_reject_a_malformed_week_start(#[case] raw: &str) {
        assert_eq!(WeekStart::parse(raw), Err(WeekStartError(raw.to_string())));
    }

    #[rstest]
    fn it_should_use_the_current_utc_week_when_none_is_given() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 8, 23, 59, 59).unwrap());
        let week = WeekStart::parse_or_current(None, &clock).unwrap();
        assert_eq!(week.to_string(), "2025-06-02");
    }

    #[rstest]
    fn it_should_serialize_as_a_plain_string() {
        let week = WeekStart::parse("2025-06-02").unwrap();
        assert_eq!(serde_json::to_value(week).unwrap(), serde_json::json!("2025-06-02"));
        let back: WeekStart = serde_json::from_value(serde_json::json!("2025-06-04")).unwrap();
        assert_eq!(back, week);
    }

    proptest! {
        #[test]
        fn week_start_is_always_a_monday_and_a_fixed_point(days in -200_000i64..200_000) {
            let input = date(2000, 1, 1) + TimeDelta::days(days);
            let week = WeekStart::containing(input);
            prop_assert_eq!(week.date().weekday(), Weekday::Mon);
            prop_assert_eq!(WeekStart::containing(week.date()), week);
            let back = (input - week.date()).num_days();
            prop_assert!((0..7).contains(&back));
        }
    }
}
