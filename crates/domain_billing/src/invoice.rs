//! Invoice aggregate and settlement derivation
//!
//! An invoice is built once from a booking snapshot and then mutated only
//! by payment application. The stored `due_amount` and `payment_status`
//! fields are always written through [`derive_settlement`], so the
//! derivation rule exists in exactly one place.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use core_kernel::{BookingId, GuestId, InvoiceId, Money, RoomId};

use crate::booking::BookingSnapshot;
use crate::error::BillingError;
use crate::payment::PaymentMode;

/// Settlement progress of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Nothing received yet
    Pending,
    /// Some payment received, balance outstanding
    Partial,
    /// Fully settled
    Paid,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Partial => "partial",
            SettlementStatus::Paid => "paid",
        };
        write!(f, "{}", s)
    }
}

/// Derives the outstanding balance and settlement status from totals
///
/// This is the only place the due/status rule lives. Both amounts must be
/// in the same currency (guaranteed by invoice construction). A seeded
/// overpayment yields a negative due amount rather than clamping, so
/// `due == total - paid` holds unconditionally.
pub fn derive_settlement(total: Money, paid: Money) -> (Money, SettlementStatus) {
    let due = total - paid;
    let status = if paid.is_zero() {
        SettlementStatus::Pending
    } else if paid.amount() >= total.amount() {
        SettlementStatus::Paid
    } else {
        SettlementStatus::Partial
    };
    (due, status)
}

/// A line item on an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Item ID
    pub id: Uuid,
    /// Description shown on the bill
    pub description: String,
    /// Quantity
    pub quantity: Decimal,
    /// Per-unit rate
    pub rate: Money,
    /// Line total
    pub amount: Money,
}

impl InvoiceItem {
    /// Creates a priced line item with `amount = quantity * rate`
    pub fn line(
        description: impl Into<String>,
        quantity: Decimal,
        rate: Money,
    ) -> Result<Self, BillingError> {
        if quantity <= Decimal::ZERO {
            return Err(BillingError::validation("item quantity must be positive"));
        }
        if !rate.is_positive() {
            return Err(BillingError::validation("item rate must be positive"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity,
            rate,
            amount: rate.multiply(quantity),
        })
    }

    /// Creates the mandatory room-charge line for a stay
    ///
    /// The line amount carries the booking total verbatim; the nightly rate
    /// is `total / nights` rounded for display, so an indivisible total
    /// never gains or loses paise through the rate.
    pub fn room_charges(nights: u32, stay_total: Money) -> Result<Self, BillingError> {
        if !stay_total.is_positive() {
            return Err(BillingError::validation("booking total must be positive"));
        }

        let rate = stay_total
            .divide(Decimal::from(nights.max(1)))?
            .round_bankers(stay_total.currency().decimal_places());
        let noun = if nights == 1 { "night" } else { "nights" };

        Ok(Self {
            id: Uuid::new_v4(),
            description: format!("Room Charges ({} {})", nights, noun),
            quantity: Decimal::from(nights),
            rate,
            amount: stay_total,
        })
    }
}

/// An invoice for one booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Invoice number (human-readable)
    pub invoice_number: String,
    /// Source booking
    pub booking_id: BookingId,
    /// Guest being billed
    pub guest_id: GuestId,
    /// Room the charges relate to
    pub room_id: RoomId,
    /// Line items, room charges first
    pub items: Vec<InvoiceItem>,
    /// Sum of line amounts
    pub subtotal: Money,
    /// Tax amount
    pub tax: Money,
    /// Discount amount
    pub discount: Money,
    /// subtotal + tax - discount
    pub total_amount: Money,
    /// Sum of payments applied so far
    pub paid_amount: Money,
    /// Outstanding balance, always total - paid
    pub due_amount: Money,
    /// Derived settlement status
    pub payment_status: SettlementStatus,
    /// Mode of the first recorded payment
    pub payment_mode: Option<PaymentMode>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the invoice was issued
    pub issued_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
    /// Mutation counter for compare-and-swap commits
    pub version: u64,
}

impl Invoice {
    /// Issues a new invoice for a booking
    ///
    /// # Arguments
    ///
    /// * `invoice_number` - Pre-allocated human-readable number
    /// * `booking` - Booking snapshot the invoice is derived from
    /// * `items` - Line items, the room-charge line first
    /// * `tax` / `discount` - Non-negative adjustments
    /// * `notes` - Optional free-form notes
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty item list, a negative tax or
    /// discount, or a discount exceeding the taxed subtotal.
    pub fn issue(
        invoice_number: impl Into<String>,
        booking: &BookingSnapshot,
        items: Vec<InvoiceItem>,
        tax: Money,
        discount: Money,
        notes: Option<String>,
    ) -> Result<Self, BillingError> {
        if items.is_empty() {
            return Err(BillingError::validation("invoice requires at least one line item"));
        }
        if tax.is_negative() {
            return Err(BillingError::validation("tax must not be negative"));
        }
        if discount.is_negative() {
            return Err(BillingError::validation("discount must not be negative"));
        }

        let currency = items[0].amount.currency();
        let mut subtotal = Money::zero(currency);
        for item in &items {
            subtotal = subtotal.checked_add(&item.amount)?;
        }

        let total_amount = subtotal.checked_add(&tax)?.checked_sub(&discount)?;
        if total_amount.is_negative() {
            return Err(BillingError::validation("discount cannot exceed subtotal plus tax"));
        }

        let paid_amount = Money::zero(currency);
        let (due_amount, payment_status) = derive_settlement(total_amount, paid_amount);
        let now = Utc::now();

        Ok(Self {
            id: InvoiceId::new_v7(),
            invoice_number: invoice_number.into(),
            booking_id: booking.booking_id,
            guest_id: booking.guest_id,
            room_id: booking.room_id,
            items,
            subtotal,
            tax,
            discount,
            total_amount,
            paid_amount,
            due_amount,
            payment_status,
            payment_mode: None,
            notes,
            issued_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Seeds an already-collected amount, for data imported from outside
    ///
    /// Imported figures are taken as-is: a seeded amount above the total
    /// leaves the invoice `Paid` with a negative due.
    pub fn with_paid_amount(mut self, paid: Money) -> Result<Self, BillingError> {
        if paid.is_negative() {
            return Err(BillingError::validation("paid amount must not be negative"));
        }
        // currency guard before the infallible derivation
        self.total_amount.checked_sub(&paid)?;
        let (due, status) = derive_settlement(self.total_amount, paid);
        self.paid_amount = paid;
        self.due_amount = due;
        self.payment_status = status;
        Ok(self)
    }

    /// Records a payment against the invoice
    ///
    /// Validates before touching any field: a rejected payment leaves the
    /// invoice exactly as it was.
    ///
    /// # Errors
    ///
    /// - `Validation` for a non-positive amount
    /// - `AmountExceedsDue` when the amount is larger than the outstanding balance
    /// - `Calculation` on a currency mismatch
    pub fn record_payment(&mut self, amount: Money, mode: PaymentMode) -> Result<(), BillingError> {
        if !amount.is_positive() {
            return Err(BillingError::validation("payment amount must be positive"));
        }
        let new_paid = self.paid_amount.checked_add(&amount)?;
        if amount.amount() > self.due_amount.amount() {
            return Err(BillingError::AmountExceedsDue {
                amount: amount.amount(),
                due: self.due_amount.amount(),
            });
        }

        let (due, status) = derive_settlement(self.total_amount, new_paid);
        self.paid_amount = new_paid;
        self.due_amount = due;
        self.payment_status = status;
        if self.payment_mode.is_none() {
            self.payment_mode = Some(mode);
        }
        self.updated_at = Utc::now();
        self.version += 1;

        Ok(())
    }

    /// Returns true once the invoice is fully settled
    pub fn is_settled(&self) -> bool {
        self.payment_status == SettlementStatus::Paid
    }
}

/// Year-scoped monotonic invoice number allocator
///
/// Produces `INV-<year>-<seq>`; the sequence restarts at 1 when the year
/// rolls over, so numbers are unique by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceNumberSequence {
    year: i32,
    next: u32,
}

impl InvoiceNumberSequence {
    /// Starts a fresh sequence for the current year
    pub fn new() -> Self {
        Self::starting_at(Utc::now().year(), 1)
    }

    /// Resumes a sequence at a known position (e.g. after reload)
    pub fn starting_at(year: i32, next: u32) -> Self {
        Self { year, next: next.max(1) }
    }

    /// Allocates the next number for the given instant's year
    pub fn next_number(&mut self, now: DateTime<Utc>) -> String {
        let year = now.year();
        if year != self.year {
            self.year = year;
            self.next = 1;
        }
        let seq = self.next;
        self.next += 1;
        format!("INV-{}-{:04}", year, seq)
    }
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory invoice store with compare-and-swap commits
///
/// # Invariants
///
/// - At most one invoice per booking
/// - A commit only lands if the caller read the version it is replacing
#[derive(Debug, Default)]
pub struct InvoiceStore {
    by_id: HashMap<InvoiceId, Invoice>,
    by_booking: HashMap<BookingId, InvoiceId>,
}

impl InvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an invoice by ID
    pub fn get(&self, id: InvoiceId) -> Option<&Invoice> {
        self.by_id.get(&id)
    }

    /// Gets the invoice issued for a booking, if any
    pub fn get_by_booking(&self, booking_id: BookingId) -> Option<&Invoice> {
        self.by_booking.get(&booking_id).and_then(|id| self.by_id.get(id))
    }

    /// Finds an invoice by its human-readable number
    pub fn find_by_number(&self, number: &str) -> Option<&Invoice> {
        self.by_id.values().find(|inv| inv.invoice_number == number)
    }

    /// Inserts a freshly issued invoice
    ///
    /// # Errors
    ///
    /// Returns `DuplicateInvoice` if the booking already has one.
    pub fn insert(&mut self, invoice: Invoice) -> Result<(), BillingError> {
        if self.by_booking.contains_key(&invoice.booking_id) {
            return Err(BillingError::DuplicateInvoice(invoice.booking_id));
        }
        self.by_booking.insert(invoice.booking_id, invoice.id);
        self.by_id.insert(invoice.id, invoice);
        Ok(())
    }

    /// Commits a mutated copy, guarded by the version it was read at
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound` if the invoice vanished
    /// - `ConcurrentUpdate` if the stored version no longer matches
    pub fn commit(&mut self, updated: Invoice, expected_version: u64) -> Result<(), BillingError> {
        match self.by_id.get_mut(&updated.id) {
            None => Err(BillingError::InvoiceNotFound(updated.id.to_string())),
            Some(current) if current.version != expected_version => {
                Err(BillingError::ConcurrentUpdate(updated.id))
            }
            Some(current) => {
                *current = updated;
                Ok(())
            }
        }
    }

    /// Iterates over all stored invoices
    pub fn iter(&self) -> impl Iterator<Item = &Invoice> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
