//! Billing service
//!
//! Orchestrates the flows that touch more than one record: turning a
//! booking into an invoice, and applying a payment (payment record +
//! invoice update + ledger entry, committed together or not at all).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{BookingId, InvoiceId, Money, StaffId, TransactionId, VendorId};

use crate::booking::BookingSource;
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceItem, InvoiceNumberSequence, InvoiceStore};
use crate::ledger::LedgerStore;
use crate::payment::{Payment, PaymentMode};
use crate::transaction::{LedgerTransaction, TransactionKind};

/// An extra chargeable line for an invoice (late checkout, minibar, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Money,
}

/// Parameters for building an invoice from a booking
#[derive(Debug, Clone, Default)]
pub struct InvoiceRequest {
    pub extra_items: Vec<ExtraItem>,
    pub tax: Option<Money>,
    pub discount: Option<Money>,
    pub notes: Option<String>,
}

impl InvoiceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extra chargeable line
    pub fn with_item(mut self, description: impl Into<String>, quantity: Decimal, rate: Money) -> Self {
        self.extra_items.push(ExtraItem {
            description: description.into(),
            quantity,
            rate,
        });
        self
    }

    pub fn with_tax(mut self, tax: Money) -> Self {
        self.tax = Some(tax);
        self
    }

    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Parameters for applying a payment
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Money,
    pub mode: PaymentMode,
    pub invoice_id: Option<InvoiceId>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub received_by: Option<StaffId>,
}

impl PaymentRequest {
    pub fn new(amount: Money, mode: PaymentMode) -> Self {
        Self {
            amount,
            mode,
            invoice_id: None,
            reference: None,
            notes: None,
            received_by: None,
        }
    }

    /// Applies the payment against an invoice
    pub fn for_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_received_by(mut self, staff: StaffId) -> Self {
        self.received_by = Some(staff);
        self
    }
}

/// Everything one payment produced, returned together so the caller can
/// render a single confirmation
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment: Payment,
    /// Updated invoice, absent for standalone payments
    pub invoice: Option<Invoice>,
    pub transaction: LedgerTransaction,
}

/// A manual revenue or expense entry from the accounts desk
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub mode: PaymentMode,
    /// Date of the economic event
    pub occurred_on: DateTime<Utc>,
    pub booking_id: Option<BookingId>,
    pub vendor_id: Option<VendorId>,
    pub notes: Option<String>,
    pub recorded_by: Option<StaffId>,
}

/// The billing engine: invoices, payments, and the ledger behind them
///
/// Payment application is a single logical transaction: everything is
/// validated on a working copy first, the invoice commits by
/// compare-and-swap on its version, and the payment and ledger rows are
/// appended only after that swap. A rejected call leaves no trace.
pub struct BillingService<B: BookingSource> {
    bookings: B,
    invoices: InvoiceStore,
    payments: Vec<Payment>,
    ledger: LedgerStore,
    numbers: InvoiceNumberSequence,
}

impl<B: BookingSource> BillingService<B> {
    /// Creates a billing service over the given booking source
    pub fn new(bookings: B) -> Self {
        Self {
            bookings,
            invoices: InvoiceStore::new(),
            payments: Vec::new(),
            ledger: LedgerStore::new(),
            numbers: InvoiceNumberSequence::new(),
        }
    }

    /// Resumes invoice numbering from a known position
    pub fn with_number_sequence(mut self, numbers: InvoiceNumberSequence) -> Self {
        self.numbers = numbers;
        self
    }

    /// The invoice store
    pub fn invoices(&self) -> &InvoiceStore {
        &self.invoices
    }

    /// All recorded payments, oldest first
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// The ledger store
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Builds and stores the invoice for a booking
    ///
    /// The mandatory first line carries the room charges for the whole
    /// stay; extra items follow in request order. The booking itself is
    /// not touched.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking does not exist
    /// - `DuplicateInvoice` if the booking is already invoiced
    /// - `Validation` for bad line items, tax, or discount
    pub fn build_invoice(
        &mut self,
        booking_id: BookingId,
        request: InvoiceRequest,
    ) -> Result<Invoice, BillingError> {
        let booking = self
            .bookings
            .booking(booking_id)
            .ok_or(BillingError::BookingNotFound(booking_id))?;

        if self.invoices.get_by_booking(booking_id).is_some() {
            return Err(BillingError::DuplicateInvoice(booking_id));
        }

        let nights = booking.nights();
        let mut items = vec![InvoiceItem::room_charges(nights, booking.total_amount)?];
        for extra in &request.extra_items {
            items.push(InvoiceItem::line(
                extra.description.clone(),
                extra.quantity,
                extra.rate,
            )?);
        }

        let currency = booking.total_amount.currency();
        let tax = request.tax.unwrap_or_else(|| Money::zero(currency));
        let discount = request.discount.unwrap_or_else(|| Money::zero(currency));

        let number = self.numbers.next_number(Utc::now());
        let invoice = Invoice::issue(number, &booking, items, tax, discount, request.notes)?;

        info!(
            invoice = %invoice.invoice_number,
            booking = %booking_id,
            total = %invoice.total_amount,
            "invoice issued"
        );

        self.invoices.insert(invoice.clone())?;
        Ok(invoice)
    }

    /// Applies a payment, with or without an invoice
    ///
    /// # Errors
    ///
    /// - `Validation` for a non-positive amount
    /// - `InvoiceNotFound` for a dangling invoice reference
    /// - `AmountExceedsDue` when the amount is above the outstanding balance
    /// - `ConcurrentUpdate` if the invoice changed under the caller
    pub fn apply_payment(&mut self, request: PaymentRequest) -> Result<PaymentReceipt, BillingError> {
        if !request.amount.is_positive() {
            return Err(BillingError::validation("payment amount must be positive"));
        }

        match request.invoice_id {
            Some(invoice_id) => self.apply_invoice_payment(invoice_id, request),
            None => self.apply_standalone_payment(request),
        }
    }

    fn apply_invoice_payment(
        &mut self,
        invoice_id: InvoiceId,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, BillingError> {
        let current = self
            .invoices
            .get(invoice_id)
            .ok_or_else(|| BillingError::InvoiceNotFound(invoice_id.to_string()))?;
        let read_version = current.version;

        // Validate and derive on a working copy; the stored invoice stays
        // untouched until the commit below.
        let mut updated = current.clone();
        updated.record_payment(request.amount, request.mode)?;

        let mut payment = Payment::new(request.amount, request.mode).for_invoice(invoice_id);
        if let Some(reference) = &request.reference {
            payment = payment.with_reference(reference.clone());
        }
        if let Some(notes) = &request.notes {
            payment = payment.with_notes(notes.clone());
        }
        if let Some(staff) = request.received_by {
            payment = payment.with_received_by(staff);
        }

        let reference = request
            .reference
            .unwrap_or_else(|| updated.invoice_number.clone());
        let mut transaction = LedgerTransaction::revenue("Room Booking", request.amount, request.mode)
            .with_description(format!("Payment for invoice {}", updated.invoice_number))
            .with_reference(reference)
            .with_booking(updated.booking_id)
            .with_invoice(invoice_id);
        if let Some(staff) = request.received_by {
            transaction = transaction.with_recorded_by(staff);
        }

        self.invoices.commit(updated.clone(), read_version)?;
        self.payments.push(payment.clone());
        self.ledger.append(transaction.clone());

        info!(
            payment = %payment.id,
            invoice = %updated.invoice_number,
            amount = %payment.amount,
            status = %updated.payment_status,
            "payment applied"
        );

        Ok(PaymentReceipt {
            payment,
            invoice: Some(updated),
            transaction,
        })
    }

    fn apply_standalone_payment(&mut self, request: PaymentRequest) -> Result<PaymentReceipt, BillingError> {
        let mut payment = Payment::new(request.amount, request.mode);
        if let Some(reference) = &request.reference {
            payment = payment.with_reference(reference.clone());
        }
        if let Some(notes) = &request.notes {
            payment = payment.with_notes(notes.clone());
        }
        if let Some(staff) = request.received_by {
            payment = payment.with_received_by(staff);
        }

        let description = request
            .notes
            .unwrap_or_else(|| "Direct payment received".to_string());
        let mut transaction = LedgerTransaction::revenue("Others", request.amount, request.mode)
            .with_description(description);
        if let Some(reference) = request.reference {
            transaction = transaction.with_reference(reference);
        }
        if let Some(staff) = request.received_by {
            transaction = transaction.with_recorded_by(staff);
        }

        self.payments.push(payment.clone());
        self.ledger.append(transaction.clone());

        info!(payment = %payment.id, amount = %payment.amount, "standalone payment recorded");

        Ok(PaymentReceipt {
            payment,
            invoice: None,
            transaction,
        })
    }

    /// Records a manual revenue or expense entry in the ledger
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the amount is not positive.
    pub fn record_manual_entry(&mut self, entry: ManualEntry) -> Result<TransactionId, BillingError> {
        let mut transaction = match entry.kind {
            TransactionKind::Revenue => {
                LedgerTransaction::revenue(entry.category, entry.amount, entry.mode)
            }
            TransactionKind::Expense => {
                LedgerTransaction::expense(entry.category, entry.amount, entry.mode)
            }
        }
        .dated(entry.occurred_on);

        if let Some(booking_id) = entry.booking_id {
            transaction = transaction.with_booking(booking_id);
        }
        if let Some(vendor_id) = entry.vendor_id {
            transaction = transaction.with_vendor(vendor_id);
        }
        if let Some(notes) = entry.notes {
            transaction = transaction.with_description(notes);
        }
        if let Some(staff) = entry.recorded_by {
            transaction = transaction.with_recorded_by(staff);
        }

        self.ledger.record(transaction)
    }
}
