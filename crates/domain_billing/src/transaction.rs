//! Ledger transaction records
//!
//! A ledger transaction is one revenue or expense entry. Entries are
//! never mutated after recording; corrections are new entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, InvoiceId, Money, StaffId, TransactionId, VendorId};

use crate::payment::PaymentMode;

/// Which aggregate bucket an entry contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

/// A single revenue or expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Revenue or expense
    pub kind: TransactionKind,
    /// Reporting category (e.g. "Room Booking", "Salaries")
    pub category: String,
    /// Entry amount, always positive
    pub amount: Money,
    /// Timestamp of the economic event, not of recording
    pub occurred_on: DateTime<Utc>,
    /// Payment mode the money moved through
    pub mode: PaymentMode,
    /// Human-readable description
    pub description: Option<String>,
    /// External reference (invoice number, bill number)
    pub reference: Option<String>,
    /// Linked booking, if any
    pub booking_id: Option<BookingId>,
    /// Linked vendor, if any
    pub vendor_id: Option<VendorId>,
    /// Linked invoice, if any
    pub invoice_id: Option<InvoiceId>,
    /// Staff member who recorded the entry
    pub recorded_by: Option<StaffId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl LedgerTransaction {
    fn new(kind: TransactionKind, category: impl Into<String>, amount: Money, mode: PaymentMode) -> Self {
        let now = Utc::now();

        Self {
            id: TransactionId::new_v7(),
            kind,
            category: category.into(),
            amount,
            occurred_on: now,
            mode,
            description: None,
            reference: None,
            booking_id: None,
            vendor_id: None,
            invoice_id: None,
            recorded_by: None,
            created_at: now,
        }
    }

    /// Creates a revenue entry dated now
    pub fn revenue(category: impl Into<String>, amount: Money, mode: PaymentMode) -> Self {
        Self::new(TransactionKind::Revenue, category, amount, mode)
    }

    /// Creates an expense entry dated now
    pub fn expense(category: impl Into<String>, amount: Money, mode: PaymentMode) -> Self {
        Self::new(TransactionKind::Expense, category, amount, mode)
    }

    /// Sets the economic event date
    pub fn dated(mut self, occurred_on: DateTime<Utc>) -> Self {
        self.occurred_on = occurred_on;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Links the entry to a booking
    pub fn with_booking(mut self, booking_id: BookingId) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    /// Links the entry to a vendor
    pub fn with_vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    /// Links the entry to an invoice
    pub fn with_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    /// Records who entered the transaction
    pub fn with_recorded_by(mut self, staff: StaffId) -> Self {
        self.recorded_by = Some(staff);
        self
    }
}
