//! Reporting Domain - Period-Based Reconciliation Reports
//!
//! This crate turns ledger entries and read-only snapshots into the
//! period reports the accounts desk works from: financial (revenue,
//! expenses, profit), occupancy, booking activity, and service activity.
//!
//! Report windows are calendar-aligned in the property's configured
//! timezone; report generation is strictly read-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_reporting::{ReportKind, ReportPeriod, ReportService, ReportContext};
//!
//! let reports = ReportService::new(timezone, currency);
//! let report = reports.generate(ReportKind::Financial, &ReportPeriod::Today, &ctx)?;
//! ```

pub mod period;
pub mod snapshot;
pub mod financial;
pub mod occupancy;
pub mod activity;
pub mod service;
pub mod error;

pub use period::{ReportPeriod, ReportWindow};
pub use snapshot::{RoomSnapshot, RoomStatus, RoomType, ServiceBookingSnapshot, ServiceStatus};
pub use financial::{FinancialReport, FlowSummary, ProfitSummary};
pub use occupancy::{OccupancyReport, RoomTypeUsage};
pub use activity::{BookingActivityReport, GroupTotal, ServiceActivityReport};
pub use service::{Report, ReportContext, ReportKind, ReportService};
pub use error::ReportError;
