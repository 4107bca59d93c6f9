//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the hotel operations
//! system. Fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, StayPeriod, Timezone};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard INR amount
    pub fn inr_100() -> Money {
        Money::new(dec!(100.00), Currency::INR)
    }

    /// The three-night room total used across billing scenarios
    pub fn room_total_300() -> Money {
        Money::new(dec!(300.00), Currency::INR)
    }

    /// The tax paired with the three-night room total
    pub fn tax_54() -> Money {
        Money::new(dec!(54.00), Currency::INR)
    }

    /// A zero amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The property timezone used throughout the test suite
    pub fn property_timezone() -> Timezone {
        Timezone::new(Kolkata)
    }

    /// Standard check-in (Mar 1, 2026, noon UTC)
    pub fn check_in() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    /// Standard check-out three nights later
    pub fn check_out() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
    }

    /// The standard three-night stay
    pub fn three_night_stay() -> StayPeriod {
        StayPeriod::new(Self::check_in(), Self::check_out()).unwrap()
    }

    /// A mid-March "now" for report resolution (Wed Mar 18, 15:00 IST)
    pub fn report_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 18, 9, 30, 0).unwrap()
    }

    /// The local date of [`Self::report_clock`]
    pub fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 18).unwrap()
    }
}
