//! Payment records
//!
//! A payment is one money-received event. It is immutable once created and
//! always paired with exactly one revenue ledger transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{InvoiceId, Money, PaymentId, StaffId};

/// Payment mode accepted at the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
    NetBanking,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::NetBanking => "netbanking",
        };
        write!(f, "{}", s)
    }
}

/// A single money-received event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Invoice the payment settles, if any
    pub invoice_id: Option<InvoiceId>,
    /// Amount received
    pub amount: Money,
    /// How the money arrived
    pub mode: PaymentMode,
    /// When the money was received
    pub paid_at: DateTime<Utc>,
    /// External reference (transaction ID, cheque number)
    pub reference: Option<String>,
    /// Staff member who took the payment
    pub received_by: Option<StaffId>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment received now
    pub fn new(amount: Money, mode: PaymentMode) -> Self {
        let now = Utc::now();

        Self {
            id: PaymentId::new_v7(),
            invoice_id: None,
            amount,
            mode,
            paid_at: now,
            reference: None,
            received_by: None,
            notes: None,
            created_at: now,
        }
    }

    /// Ties the payment to an invoice
    pub fn for_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Records who took the payment
    pub fn with_received_by(mut self, staff: StaffId) -> Self {
        self.received_by = Some(staff);
        self
    }

    /// Attaches free-form notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
