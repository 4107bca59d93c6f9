//! Reporting domain errors

use core_kernel::{MoneyError, TemporalError};
use thiserror::Error;

/// Errors that can occur while generating reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested report type is not one we know
    #[error("Unknown report kind: {0}")]
    UnknownReportKind(String),

    /// The requested period does not form a valid range
    #[error("Invalid period: {0}")]
    Period(#[from] TemporalError),

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}
