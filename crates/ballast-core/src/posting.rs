//! # Posting Module
//!
//! Builds the payable journal entry raised when a voucher is submitted.
//!
//! ## What Gets Posted
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Voucher submitted with total taxes and charges = 100.00               │
//! │                                                                         │
//! │  Account                    Party              Debit      Credit       │
//! │  ─────────────────────────  ────────────────   ───────    ───────      │
//! │  Freight & Duty (expense)                      100.00                  │
//! │  Creditors (payable)        Oceanic Freight               100.00       │
//! │                                                ───────    ───────      │
//! │                                                100.00     100.00       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The entry is returned to the caller; persisting it, and reposting stock
//! ledger and GL entries on the receipts, is the host's job.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{VoucherError, VoucherResult};
use crate::voucher::LandedCostVoucher;

// =============================================================================
// Journal Entry Types
// =============================================================================

/// One account line of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalEntryLine {
    pub account: String,

    /// Supplier the line settles against, for payable lines.
    pub party: Option<String>,

    #[ts(as = "String")]
    pub debit: Decimal,

    #[ts(as = "String")]
    pub credit: Decimal,
}

/// A journal entry ready for the host to persist and post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalEntry {
    /// The voucher this entry was raised from.
    pub voucher_id: String,

    pub company: String,

    #[ts(as = "String")]
    pub posting_date: NaiveDate,

    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Sum of all debit amounts.
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }

    /// A journal entry must always balance.
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}

// =============================================================================
// Payable Entry Construction
// =============================================================================

/// Builds the payable journal entry for a voucher: debit the expense account
/// for the full charge total, credit the supplier's payable account for the
/// same amount.
///
/// The payable account comes from the caller because resolving a supplier's
/// account is chart-of-accounts work the host owns.
pub fn build_payable_entry(
    voucher: &LandedCostVoucher,
    payable_account: &str,
    posting_date: NaiveDate,
) -> VoucherResult<JournalEntry> {
    let supplier = voucher
        .supplier
        .clone()
        .ok_or(VoucherError::MissingSupplier)?;

    let total = voucher.total_taxes_and_charges;

    Ok(JournalEntry {
        voucher_id: voucher.id.clone(),
        company: voucher.company.clone(),
        posting_date,
        lines: vec![
            JournalEntryLine {
                account: voucher.expense_account.clone(),
                party: None,
                debit: total,
                credit: Decimal::ZERO,
            },
            JournalEntryLine {
                account: payable_account.to_string(),
                party: Some(supplier),
                debit: Decimal::ZERO,
                credit: total,
            },
        ],
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChargeBasis;
    use rust_decimal_macros::dec;

    fn voucher() -> LandedCostVoucher {
        let mut v = LandedCostVoucher::new(
            "LCV-0001",
            "Acme Imports",
            "Freight & Duty - AI",
            ChargeBasis::Amount,
        );
        v.supplier = Some("Oceanic Freight Co".to_string());
        v.total_taxes_and_charges = dec!(100.00);
        v
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_payable_entry_is_balanced() {
        let entry = build_payable_entry(&voucher(), "Creditors - AI", date()).unwrap();
        assert!(entry.is_balanced());
        assert_eq!(entry.total_debit(), dec!(100.00));
        assert_eq!(entry.total_credit(), dec!(100.00));
    }

    #[test]
    fn test_payable_entry_lines() {
        let entry = build_payable_entry(&voucher(), "Creditors - AI", date()).unwrap();
        assert_eq!(entry.voucher_id, "LCV-0001");
        assert_eq!(entry.lines.len(), 2);

        let expense = &entry.lines[0];
        assert_eq!(expense.account, "Freight & Duty - AI");
        assert_eq!(expense.party, None);
        assert_eq!(expense.debit, dec!(100.00));
        assert_eq!(expense.credit, dec!(0));

        let payable = &entry.lines[1];
        assert_eq!(payable.account, "Creditors - AI");
        assert_eq!(payable.party.as_deref(), Some("Oceanic Freight Co"));
        assert_eq!(payable.debit, dec!(0));
        assert_eq!(payable.credit, dec!(100.00));
    }

    #[test]
    fn test_payable_entry_requires_supplier() {
        let mut v = voucher();
        v.supplier = None;
        let err = build_payable_entry(&v, "Creditors - AI", date()).unwrap_err();
        assert_eq!(err, VoucherError::MissingSupplier);
    }
}
