//! Temporal types for stays and reporting windows
//!
//! This module provides the calendar building blocks the billing and
//! reporting domains share:
//! - `Timezone`: the property's configured IANA timezone with day-boundary helpers
//! - `DateRange`: an inclusive calendar date range
//! - `StayPeriod`: a check-in/check-out pair with night counting

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Timezone wrapper for the property's configured zone
///
/// Wraps chrono_tz::Tz with custom serialization support. All report
/// boundaries (start of day, month, year) are computed in this zone and
/// converted to UTC for comparison against stored timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// The local calendar date of a UTC timestamp
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(self.0)
            .earliest()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }

    /// Gets the end of day (23:59:59.999999999) in this timezone as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap()
            .and_local_timezone(self.0)
            .latest()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },
}

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A guest stay: check-in and check-out timestamps
///
/// Check-out at or before check-in on the same instant is rejected only
/// when inverted; a same-instant pair is a day-use stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl StayPeriod {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Self, TemporalError> {
        if check_out < check_in {
            return Err(TemporalError::InvalidPeriod {
                start: check_in.to_string(),
                end: check_out.to_string(),
            });
        }
        Ok(Self { check_in, check_out })
    }

    /// Number of billable nights: the stay duration in days, rounded up
    ///
    /// Day-use stays (under 24 hours, including zero-length) bill as one night.
    pub fn nights(&self) -> u32 {
        let seconds = (self.check_out - self.check_in).num_seconds();
        let nights = (seconds + 86_399).div_euclid(86_400);
        nights.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    #[test]
    fn test_start_and_end_of_day() {
        let tz = Timezone::new(Kolkata);
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        // IST is UTC+05:30
        let start = tz.start_of_day(date);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap());

        let end = tz.end_of_day(date);
        assert!(end > start);
        assert_eq!(tz.local_date(end), date);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let tz = Timezone::new(Kolkata);
        // 20:00 UTC is 01:30 the next day in IST
        let utc = Utc.with_ymd_and_hms(2026, 3, 15, 20, 0, 0).unwrap();
        assert_eq!(tz.local_date(utc), NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(TemporalError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_date_range_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        )
        .unwrap();
        assert_eq!(range.days(), 31);
        assert!(range.contains(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn test_stay_nights_exact_days() {
        let stay = StayPeriod::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_stay_nights_rounds_up() {
        let stay = StayPeriod::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 3, 11, 0, 0).unwrap(),
        )
        .unwrap();
        // 1 day 21 hours rounds up to 2 nights
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_day_use_counts_one_night() {
        let check_in = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let stay = StayPeriod::new(check_in, check_in).unwrap();
        assert_eq!(stay.nights(), 1);
    }

    #[test]
    fn test_stay_rejects_inverted() {
        let check_in = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        assert!(StayPeriod::new(check_in, check_out).is_err());
    }

    #[test]
    fn test_timezone_serde_roundtrip() {
        let tz = Timezone::new(Kolkata);
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Asia/Kolkata\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }
}
