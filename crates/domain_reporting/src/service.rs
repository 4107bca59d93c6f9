//! Report generation service
//!
//! Pure read-side aggregation: the service walks ledger entries and
//! snapshots handed to it and never mutates anything, so reports are
//! point-in-time views by construction.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use core_kernel::{Currency, Money, Rate, RoomId, Timezone};
use rust_decimal::Decimal;
use domain_billing::{BookingSnapshot, BookingStatus, LedgerStore, TransactionKind};

use crate::activity::{BookingActivityReport, GroupTotal, ServiceActivityReport};
use crate::error::ReportError;
use crate::financial::{FinancialReport, FlowSummary, ProfitSummary};
use crate::occupancy::{OccupancyReport, RoomTypeUsage};
use crate::period::{ReportPeriod, ReportWindow};
use crate::snapshot::{RoomSnapshot, RoomStatus, RoomType, ServiceBookingSnapshot};

/// Which report to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Financial,
    Occupancy,
    Bookings,
    Services,
    All,
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial" => Ok(ReportKind::Financial),
            "occupancy" => Ok(ReportKind::Occupancy),
            "bookings" => Ok(ReportKind::Bookings),
            "services" => Ok(ReportKind::Services),
            "all" => Ok(ReportKind::All),
            other => Err(ReportError::UnknownReportKind(other.to_string())),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportKind::Financial => "financial",
            ReportKind::Occupancy => "occupancy",
            ReportKind::Bookings => "bookings",
            ReportKind::Services => "services",
            ReportKind::All => "all",
        };
        write!(f, "{}", s)
    }
}

/// The data a report is generated over
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub ledger: &'a LedgerStore,
    pub rooms: &'a [RoomSnapshot],
    pub bookings: &'a [BookingSnapshot],
    pub services: &'a [ServiceBookingSnapshot],
}

/// A generated report: the requested sections over one window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub window: ReportWindow,
    pub financial: Option<FinancialReport>,
    pub occupancy: Option<OccupancyReport>,
    pub bookings: Option<BookingActivityReport>,
    pub services: Option<ServiceActivityReport>,
}

/// Generates reports over ledger entries and snapshots
#[derive(Debug, Clone)]
pub struct ReportService {
    timezone: Timezone,
    currency: Currency,
}

impl ReportService {
    /// Creates a report service for the property's timezone and currency
    pub fn new(timezone: Timezone, currency: Currency) -> Self {
        Self { timezone, currency }
    }

    /// Produces the requested report for the given period
    ///
    /// `All` fills every section from the same resolved window. Empty
    /// input data yields zero totals and empty groupings, not an error.
    pub fn generate(
        &self,
        kind: ReportKind,
        period: &ReportPeriod,
        ctx: &ReportContext<'_>,
    ) -> Result<Report, ReportError> {
        let window = period.resolve(&self.timezone, Utc::now())?;
        debug!(kind = %kind, start = %window.start, end = %window.end, "generating report");

        let mut report = Report {
            kind,
            window,
            financial: None,
            occupancy: None,
            bookings: None,
            services: None,
        };

        if matches!(kind, ReportKind::Financial | ReportKind::All) {
            report.financial = Some(self.financial(&window, ctx.ledger)?);
        }
        if matches!(kind, ReportKind::Occupancy | ReportKind::All) {
            report.occupancy = Some(self.occupancy(&window, ctx.rooms, ctx.bookings)?);
        }
        if matches!(kind, ReportKind::Bookings | ReportKind::All) {
            report.bookings = Some(self.bookings(&window, ctx.bookings)?);
        }
        if matches!(kind, ReportKind::Services | ReportKind::All) {
            report.services = Some(self.services(&window, ctx.services)?);
        }

        Ok(report)
    }

    /// Revenue, expenses, and profit over the window
    pub fn financial(
        &self,
        window: &ReportWindow,
        ledger: &LedgerStore,
    ) -> Result<FinancialReport, ReportError> {
        let mut revenue = FlowSummary::empty(self.currency);
        let mut expenses = FlowSummary::empty(self.currency);

        for txn in ledger.between(window.start, window.end) {
            let day = self.timezone.local_date(txn.occurred_on);
            match txn.kind {
                TransactionKind::Revenue => revenue.add(txn, day)?,
                TransactionKind::Expense => expenses.add(txn, day)?,
            }
        }

        let profit = revenue.total.checked_sub(&expenses.total)?;

        Ok(FinancialReport {
            revenue,
            expenses,
            profit: ProfitSummary { total: profit },
        })
    }

    /// Room status counts and stay movement over the window
    ///
    /// Cancelled bookings do not count as check-ins or check-outs.
    pub fn occupancy(
        &self,
        window: &ReportWindow,
        rooms: &[RoomSnapshot],
        bookings: &[BookingSnapshot],
    ) -> Result<OccupancyReport, ReportError> {
        let total_rooms = rooms.len();
        let occupied_rooms = rooms.iter().filter(|r| r.status == RoomStatus::Booked).count();
        let available_rooms = rooms.iter().filter(|r| r.status == RoomStatus::Available).count();
        let maintenance_rooms = rooms.iter().filter(|r| r.status == RoomStatus::Maintenance).count();

        let occupancy_rate = Rate::ratio(
            Decimal::from(occupied_rooms as u64),
            Decimal::from(total_rooms as u64),
        )
        .as_percentage()
        .round_dp(2);

        let room_types: HashMap<RoomId, RoomType> =
            rooms.iter().map(|r| (r.room_id, r.room_type)).collect();

        let mut check_ins = 0;
        let mut check_outs = 0;
        let mut by_room_type: BTreeMap<RoomType, RoomTypeUsage> = BTreeMap::new();

        for booking in bookings {
            if booking.status == BookingStatus::Cancelled {
                continue;
            }
            if window.contains(booking.stay.check_in) {
                check_ins += 1;
                if let Some(room_type) = room_types.get(&booking.room_id) {
                    let usage = by_room_type.entry(*room_type).or_insert_with(|| RoomTypeUsage {
                        bookings: 0,
                        revenue: Money::zero(self.currency),
                    });
                    usage.bookings += 1;
                    usage.revenue = usage.revenue.checked_add(&booking.total_amount)?;
                }
            }
            if window.contains(booking.stay.check_out) {
                check_outs += 1;
            }
        }

        Ok(OccupancyReport {
            total_rooms,
            occupied_rooms,
            available_rooms,
            maintenance_rooms,
            occupancy_rate,
            check_ins,
            check_outs,
            by_room_type,
        })
    }

    /// Bookings checked in during the window, with grouped totals
    pub fn bookings(
        &self,
        window: &ReportWindow,
        bookings: &[BookingSnapshot],
    ) -> Result<BookingActivityReport, ReportError> {
        let matching: Vec<BookingSnapshot> = bookings
            .iter()
            .filter(|b| window.contains(b.stay.check_in))
            .cloned()
            .collect();

        let mut total_revenue = Money::zero(self.currency);
        let mut by_status: BTreeMap<BookingStatus, GroupTotal> = BTreeMap::new();
        let mut by_payment_status = BTreeMap::new();

        for booking in &matching {
            total_revenue = total_revenue.checked_add(&booking.total_amount)?;
            by_status
                .entry(booking.status)
                .or_insert_with(|| GroupTotal::zero(self.currency))
                .add(&booking.total_amount)?;
            by_payment_status
                .entry(booking.payment_status)
                .or_insert_with(|| GroupTotal::zero(self.currency))
                .add(&booking.total_amount)?;
        }

        Ok(BookingActivityReport {
            bookings: matching,
            total_revenue,
            by_status,
            by_payment_status,
        })
    }

    /// Service bookings made during the window, with grouped totals
    pub fn services(
        &self,
        window: &ReportWindow,
        services: &[ServiceBookingSnapshot],
    ) -> Result<ServiceActivityReport, ReportError> {
        let matching: Vec<ServiceBookingSnapshot> = services
            .iter()
            .filter(|s| window.contains(s.booked_at))
            .cloned()
            .collect();

        let mut total_revenue = Money::zero(self.currency);
        let mut by_status: BTreeMap<_, GroupTotal> = BTreeMap::new();
        let mut by_category: BTreeMap<String, GroupTotal> = BTreeMap::new();

        for service in &matching {
            total_revenue = total_revenue.checked_add(&service.amount)?;
            by_status
                .entry(service.status)
                .or_insert_with(|| GroupTotal::zero(self.currency))
                .add(&service.amount)?;
            by_category
                .entry(service.category.clone())
                .or_insert_with(|| GroupTotal::zero(self.currency))
                .add(&service.amount)?;
        }

        Ok(ServiceActivityReport {
            services: matching,
            total_revenue,
            by_status,
            by_category,
        })
    }
}
