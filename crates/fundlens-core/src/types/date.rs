//! Date type for fund analytics.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// A calendar date for fund analytics.
///
/// Newtype around `chrono::NaiveDate`. Trading days are weekdays; exchange
/// holidays are not modelled, since the snapshot files already contain only
/// the dates a market printed.
///
/// # Example
///
/// ```rust
/// use fundlens_core::types::Date;
///
/// let friday = Date::from_ymd(2025, 8, 1).unwrap();
/// assert_eq!(friday.next_trading_day(), Date::from_ymd(2025, 8, 4).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AnalyticsResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                AnalyticsError::invalid_input(format!("invalid date {year}-{month:02}-{day:02}"))
            })
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if the string is not a valid date.
    pub fn parse(s: &str) -> AnalyticsResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| AnalyticsError::invalid_input(format!("cannot parse date: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Adds a number of calendar days (negative to go back).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calendar days from `self` to `other` (positive if `other` is later).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Returns true for Monday through Friday.
    #[must_use]
    pub fn is_trading_day(&self) -> bool {
        !matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the closest trading day strictly before this date.
    #[must_use]
    pub fn previous_trading_day(&self) -> Self {
        let mut d = self.add_days(-1);
        while !d.is_trading_day() {
            d = d.add_days(-1);
        }
        d
    }

    /// Returns the closest trading day strictly after this date.
    #[must_use]
    pub fn next_trading_day(&self) -> Self {
        let mut d = self.add_days(1);
        while !d.is_trading_day() {
            d = d.add_days(1);
        }
        d
    }

    /// Returns this date if it is a trading day, else the next one.
    #[must_use]
    pub fn trading_day_on_or_after(&self) -> Self {
        if self.is_trading_day() {
            *self
        } else {
            self.next_trading_day()
        }
    }

    /// Returns the first trading day of the date's week (Monday-based).
    #[must_use]
    pub fn week_first_trading_day(&self) -> Self {
        let monday = self.add_days(-i64::from(self.weekday().num_days_from_monday()));
        monday.trading_day_on_or_after()
    }

    /// Returns the first trading day of the date's month.
    #[must_use]
    pub fn month_first_trading_day(&self) -> Self {
        Date(self.0.with_day(1).unwrap_or(self.0)).trading_day_on_or_after()
    }

    /// Returns the first trading day of the date's year.
    #[must_use]
    pub fn year_first_trading_day(&self) -> Self {
        self.start_of_year().trading_day_on_or_after()
    }

    /// Returns January 1st of the date's year.
    #[must_use]
    pub fn start_of_year(&self) -> Self {
        Date(NaiveDate::from_yo_opt(self.year(), 1).unwrap_or(self.0))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl std::str::FromStr for Date {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd() {
        let d = Date::from_ymd(2025, 7, 30).unwrap();
        assert_eq!(d.year(), 2025);
        assert_eq!(d.to_string(), "2025-07-30");
        assert!(Date::from_ymd(2025, 2, 30).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let d = Date::parse("2024-01-02").unwrap();
        assert_eq!(d.to_string(), "2024-01-02");
        assert!(Date::parse("02/01/2024").is_err());
        assert_eq!("2024-01-02".parse::<Date>().unwrap(), d);
    }

    #[test]
    fn test_trading_days() {
        let saturday = Date::from_ymd(2025, 8, 2).unwrap();
        assert!(!saturday.is_trading_day());
        assert_eq!(
            saturday.previous_trading_day(),
            Date::from_ymd(2025, 8, 1).unwrap()
        );
        assert_eq!(
            saturday.next_trading_day(),
            Date::from_ymd(2025, 8, 4).unwrap()
        );

        let monday = Date::from_ymd(2025, 8, 4).unwrap();
        assert_eq!(
            monday.previous_trading_day(),
            Date::from_ymd(2025, 8, 1).unwrap()
        );
    }

    #[test]
    fn test_days_between() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(a.days_between(&b), 30);
        assert_eq!(b.days_between(&a), -30);
        assert_eq!(a.add_days(30), b);
    }

    #[test]
    fn test_start_of_year() {
        let d = Date::from_ymd(2025, 7, 30).unwrap();
        assert_eq!(d.start_of_year(), Date::from_ymd(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_serde_transparent() {
        let d = Date::from_ymd(2025, 7, 30).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-07-30\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_period_first_trading_days() {
        // Thursday 2025-08-07
        let d = Date::from_ymd(2025, 8, 7).unwrap();
        assert_eq!(d.week_first_trading_day(), Date::from_ymd(2025, 8, 4).unwrap());
        // August 2025 starts on a Friday
        assert_eq!(d.month_first_trading_day(), Date::from_ymd(2025, 8, 1).unwrap());
        // March 2025 starts on a Saturday
        let march = Date::from_ymd(2025, 3, 14).unwrap();
        assert_eq!(march.month_first_trading_day(), Date::from_ymd(2025, 3, 3).unwrap());
        // 2022 starts on a Saturday
        let y = Date::from_ymd(2022, 6, 1).unwrap();
        assert_eq!(y.start_of_year(), Date::from_ymd(2022, 1, 1).unwrap());
        assert_eq!(y.year_first_trading_day(), Date::from_ymd(2022, 1, 3).unwrap());

        let monday = Date::from_ymd(2025, 8, 4).unwrap();
        assert_eq!(monday.week_first_trading_day(), monday);
    }
}
