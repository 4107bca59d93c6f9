//! Billing domain errors

use core_kernel::{BookingId, InvoiceId, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Booking not found
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// An invoice already exists for the booking
    #[error("An invoice already exists for booking {0}")]
    DuplicateInvoice(BookingId),

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment larger than the outstanding balance
    #[error("Payment amount cannot exceed due amount: amount {amount}, due {due}")]
    AmountExceedsDue {
        amount: Decimal,
        due: Decimal,
    },

    /// The invoice changed between read and commit
    #[error("Invoice {0} was modified concurrently")]
    ConcurrentUpdate(InvoiceId),

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }
}
