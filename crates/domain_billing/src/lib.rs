//! Billing Domain - Invoicing, Payment Application, and the Ledger
//!
//! This crate implements the billing engine for the hotel operations
//! system: it turns a confirmed booking into a priced invoice, applies
//! payments against invoices while keeping the paid/due/status triple
//! consistent, and records every money movement as an immutable ledger
//! entry for reporting.
//!
//! # Consistency rules
//!
//! - `due_amount == total_amount - paid_amount`, always; both derived
//!   fields are written through a single derivation function
//! - a payment may never exceed the invoice's current due amount
//! - every successful payment produces exactly one [`Payment`] and one
//!   revenue [`LedgerTransaction`], committed atomically with the
//!   invoice update
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingService, InvoiceRequest, PaymentRequest, PaymentMode};
//!
//! let mut billing = BillingService::new(bookings);
//!
//! let invoice = billing.build_invoice(booking_id, InvoiceRequest::new().with_tax(tax))?;
//! let receipt = billing.apply_payment(
//!     PaymentRequest::new(amount, PaymentMode::Card).for_invoice(invoice.id),
//! )?;
//! ```

pub mod booking;
pub mod invoice;
pub mod payment;
pub mod transaction;
pub mod ledger;
pub mod billing;
pub mod error;

pub use booking::{BookingSnapshot, BookingSource, BookingStatus};
pub use invoice::{
    derive_settlement, Invoice, InvoiceItem, InvoiceNumberSequence, InvoiceStore, SettlementStatus,
};
pub use payment::{Payment, PaymentMode};
pub use transaction::{LedgerTransaction, TransactionKind};
pub use ledger::{LedgerStore, TransactionFilter, TransactionPage};
pub use billing::{
    BillingService, ExtraItem, InvoiceRequest, ManualEntry, PaymentReceipt, PaymentRequest,
};
pub use error::BillingError;
