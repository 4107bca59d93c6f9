//! Append-only ledger store
//!
//! Holds every revenue and expense entry. The ledger is append-only: there
//! is no update operation, and removal is the business of administrative
//! tooling outside the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{BookingId, InvoiceId, TransactionId, VendorId};

use crate::error::BillingError;
use crate::payment::PaymentMode;
use crate::transaction::{LedgerTransaction, TransactionKind};

/// Filter for ledger queries
///
/// Unset fields match everything. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub mode: Option<PaymentMode>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub booking_id: Option<BookingId>,
    pub vendor_id: Option<VendorId>,
    pub invoice_id: Option<InvoiceId>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            kind: None,
            category: None,
            mode: None,
            from: None,
            to: None,
            booking_id: None,
            vendor_id: None,
            invoice_id: None,
            page: 1,
            page_size: 50,
        }
    }
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn mode(mut self, mode: PaymentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Restricts to entries whose economic date falls in [from, to]
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn for_booking(mut self, booking_id: BookingId) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    pub fn for_vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn for_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn matches(&self, txn: &LedgerTransaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(mode) = self.mode {
            if txn.mode != mode {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.occurred_on < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.occurred_on > to {
                return false;
            }
        }
        if let Some(booking_id) = self.booking_id {
            if txn.booking_id != Some(booking_id) {
                return false;
            }
        }
        if let Some(vendor_id) = self.vendor_id {
            if txn.vendor_id != Some(vendor_id) {
                return false;
            }
        }
        if let Some(invoice_id) = self.invoice_id {
            if txn.invoice_id != Some(invoice_id) {
                return false;
            }
        }
        true
    }
}

/// One page of ledger query results, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<LedgerTransaction>,
    /// Total matches across all pages
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

/// The ledger transaction store
#[derive(Debug, Default)]
pub struct LedgerStore {
    transactions: Vec<LedgerTransaction>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends an entry
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the amount is not positive.
    pub fn record(&mut self, txn: LedgerTransaction) -> Result<TransactionId, BillingError> {
        if !txn.amount.is_positive() {
            return Err(BillingError::validation("transaction amount must be positive"));
        }
        Ok(self.append(txn))
    }

    /// Appends a pre-validated entry
    pub(crate) fn append(&mut self, txn: LedgerTransaction) -> TransactionId {
        let id = txn.id;
        debug!(transaction = %id, kind = ?txn.kind, category = %txn.category, "ledger entry recorded");
        self.transactions.push(txn);
        id
    }

    /// Gets an entry by ID
    pub fn get(&self, id: TransactionId) -> Option<&LedgerTransaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Runs a filtered, paginated query, ordered by economic date descending
    pub fn query(&self, filter: &TransactionFilter) -> TransactionPage {
        let mut matched: Vec<&LedgerTransaction> =
            self.transactions.iter().filter(|t| filter.matches(t)).collect();
        matched.sort_by(|a, b| {
            b.occurred_on
                .cmp(&a.occurred_on)
                .then(b.created_at.cmp(&a.created_at))
        });

        let total = matched.len();
        let page = filter.page.max(1);
        let page_size = filter.page_size.max(1);
        let offset = (page as usize - 1) * page_size as usize;

        let transactions = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        TransactionPage {
            transactions,
            total,
            page,
            page_size,
        }
    }

    /// Iterates over entries whose economic date falls in [start, end]
    pub fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &LedgerTransaction> {
        self.transactions
            .iter()
            .filter(move |t| t.occurred_on >= start && t.occurred_on <= end)
    }

    /// Iterates over every entry
    pub fn iter(&self) -> impl Iterator<Item = &LedgerTransaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
