//! Financial report types
//!
//! Revenue and expenses are aggregated separately with identical shape,
//! then combined into a profit figure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Currency, Money, MoneyError};
use domain_billing::{LedgerTransaction, PaymentMode};

/// One side of the ledger (revenue or expenses) over a window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Sum over every matching entry
    pub total: Money,
    /// Totals keyed by reporting category
    pub by_category: BTreeMap<String, Money>,
    /// Totals keyed by payment mode
    pub by_mode: BTreeMap<PaymentMode, Money>,
    /// Totals keyed by local calendar day
    pub daily: BTreeMap<NaiveDate, Money>,
}

impl FlowSummary {
    /// An empty summary in the given currency
    pub fn empty(currency: Currency) -> Self {
        Self {
            total: Money::zero(currency),
            by_category: BTreeMap::new(),
            by_mode: BTreeMap::new(),
            daily: BTreeMap::new(),
        }
    }

    /// Folds one ledger entry into the summary
    pub(crate) fn add(&mut self, txn: &LedgerTransaction, day: NaiveDate) -> Result<(), MoneyError> {
        let currency = self.total.currency();
        self.total = self.total.checked_add(&txn.amount)?;

        let slot = self
            .by_category
            .entry(txn.category.clone())
            .or_insert_with(|| Money::zero(currency));
        *slot = slot.checked_add(&txn.amount)?;

        let slot = self
            .by_mode
            .entry(txn.mode)
            .or_insert_with(|| Money::zero(currency));
        *slot = slot.checked_add(&txn.amount)?;

        let slot = self.daily.entry(day).or_insert_with(|| Money::zero(currency));
        *slot = slot.checked_add(&txn.amount)?;

        Ok(())
    }
}

/// Net result over the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitSummary {
    /// revenue.total - expenses.total
    pub total: Money,
}

/// The financial section of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub revenue: FlowSummary,
    pub expenses: FlowSummary,
    pub profit: ProfitSummary,
}
