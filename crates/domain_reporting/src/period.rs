//! Report period resolution
//!
//! Named periods resolve to calendar-aligned boundaries in the property's
//! configured timezone: start of day/week/month/year through the matching
//! end, converted to UTC for comparison against stored timestamps.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, Timezone};

use crate::error::ReportError;

/// A reporting period as requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "period")]
pub enum ReportPeriod {
    /// The current local day
    Today,
    /// The current ISO week, Monday through Sunday
    Week,
    /// The current calendar month
    Month,
    /// The current calendar year
    Year,
    /// A caller-supplied range; missing bounds default to the current month
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// A resolved reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// First instant of the window (UTC)
    pub start: DateTime<Utc>,
    /// Last instant of the window (UTC)
    pub end: DateTime<Utc>,
    /// The local calendar dates the window covers
    pub range: DateRange,
}

impl ReportWindow {
    /// Returns true if the timestamp falls inside the window
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

impl ReportPeriod {
    /// Resolves the period against the given clock and timezone
    pub fn resolve(&self, tz: &Timezone, now: DateTime<Utc>) -> Result<ReportWindow, ReportError> {
        let today = tz.local_date(now);

        let range = match self {
            ReportPeriod::Today => DateRange::single_day(today),
            ReportPeriod::Week => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                DateRange::new(monday, monday + Duration::days(6))?
            }
            ReportPeriod::Month => month_of(today),
            ReportPeriod::Year => DateRange::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap(),
            )?,
            ReportPeriod::Custom { from, to } => {
                let month = month_of(today);
                DateRange::new(from.unwrap_or(month.start), to.unwrap_or(month.end))?
            }
        };

        Ok(ReportWindow {
            start: tz.start_of_day(range.start),
            end: tz.end_of_day(range.end),
            range,
        })
    }
}

/// The calendar month containing the given date
fn month_of(date: NaiveDate) -> DateRange {
    let start = date.with_day(1).unwrap();
    let end = start + Months::new(1) - Duration::days(1);
    DateRange { start, end }
}
