//! # Landed Cost Voucher
//!
//! The voucher document model and its recompute / lifecycle operations.
//!
//! ## Voucher Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Voucher Lifecycle                                 │
//! │                                                                         │
//! │  1. BUILD                                                              │
//! │     └── add_receipt() ×N          → receipt rows, supplier backfilled  │
//! │     └── set_items_from_receipts() → item rows snapshot receipt lines   │
//! │                                                                         │
//! │  2. RECOMPUTE (on every total / basis / item change)                   │
//! │     └── distribute_charges()      → engine writes applicable_charges   │
//! │                                                                         │
//! │  3. VALIDATE                                                           │
//! │     └── validate()                → receipt, item, UOM, drift checks   │
//! │                                                                         │
//! │  4. SUBMIT                                                             │
//! │     └── submit()                  → Draft → Submitted, payable entry   │
//! │                                                                         │
//! │  5. (OPTIONAL) CANCEL                                                  │
//! │     └── cancel()                  → Submitted → Cancelled              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reposting stock ledger and GL entries on the underlying receipts, and
//! persisting any of this, is the host's job. Every operation here is a pure
//! transformation of the voucher value.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::apportion::{apportion, ApportionmentRequest, LineItem};
use crate::error::{ApportionError, VoucherError, VoucherResult};
use crate::posting::{build_payable_entry, JournalEntry};
use crate::types::{ChargeBasis, ReceiptLines, ReceiptRef, TaxCharge, VoucherItem, VoucherStatus};
use crate::validation;
use crate::MAX_CHARGE_PRECISION;

// =============================================================================
// Voucher
// =============================================================================

/// A landed cost voucher: extra purchase charges distributed across the items
/// of one or more receipt documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LandedCostVoucher {
    /// Identifier of the voucher in the host system.
    pub id: String,

    pub company: String,

    /// Supplier being paid for the charges. Backfilled from the first receipt
    /// that carries one, may be overridden by the user.
    pub supplier: Option<String>,

    #[ts(as = "Option<String>")]
    pub posting_date: Option<NaiveDate>,

    /// Default expense account the charges are booked against.
    pub expense_account: String,

    pub distribute_charges_based_on: ChargeBasis,

    pub purchase_receipts: Vec<ReceiptRef>,

    pub items: Vec<VoucherItem>,

    pub taxes: Vec<TaxCharge>,

    /// Sum of the taxes table. Refreshed by [`Self::set_total_taxes_and_charges`].
    #[ts(as = "String")]
    pub total_taxes_and_charges: Decimal,

    /// Sum of item amounts. Refreshed by [`Self::set_items_from_receipts`].
    #[ts(as = "String")]
    pub total_amount: Decimal,

    /// Sum of item weights. Refreshed by [`Self::set_items_from_receipts`].
    #[ts(as = "String")]
    pub total_weight: Decimal,

    pub status: VoucherStatus,
}

impl LandedCostVoucher {
    /// Creates an empty draft voucher.
    pub fn new(
        id: impl Into<String>,
        company: impl Into<String>,
        expense_account: impl Into<String>,
        distribute_charges_based_on: ChargeBasis,
    ) -> Self {
        LandedCostVoucher {
            id: id.into(),
            company: company.into(),
            supplier: None,
            posting_date: None,
            expense_account: expense_account.into(),
            distribute_charges_based_on,
            purchase_receipts: Vec::new(),
            items: Vec::new(),
            taxes: Vec::new(),
            total_taxes_and_charges: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            total_weight: Decimal::ZERO,
            status: VoucherStatus::Draft,
        }
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Appends a receipt document row.
    ///
    /// Backfills the voucher's `supplier` and `posting_date` from the receipt
    /// when they are still unset, mirroring how the host form fetches them.
    pub fn add_receipt(&mut self, receipt: ReceiptRef) {
        if self.supplier.is_none() {
            self.supplier = receipt.supplier.clone();
        }
        if self.posting_date.is_none() {
            self.posting_date = receipt.posting_date;
        }
        self.purchase_receipts.push(receipt);
    }

    /// Rebuilds the items table from receipt line snapshots.
    ///
    /// ## Rules
    /// - Non-stock lines are skipped; they carry no inventory to load cost onto
    /// - Line weight = weight per unit × qty, rounded to `weight_precision`
    /// - Lines without a cost center fall back to `default_cost_center`
    /// - `total_amount` and `total_weight` are recomputed from scratch
    pub fn set_items_from_receipts(
        &mut self,
        sources: &[ReceiptLines],
        default_cost_center: Option<&str>,
        weight_precision: u32,
    ) -> VoucherResult<()> {
        if weight_precision > MAX_CHARGE_PRECISION {
            return Err(ApportionError::InvalidPrecision {
                requested: weight_precision,
                max: MAX_CHARGE_PRECISION,
            }
            .into());
        }

        self.items.clear();
        self.total_amount = Decimal::ZERO;
        self.total_weight = Decimal::ZERO;

        for source in sources {
            for line in source.lines.iter().filter(|line| line.is_stock_item) {
                let weight = (line.weight_per_unit * line.qty).round_dp_with_strategy(
                    weight_precision,
                    RoundingStrategy::MidpointAwayFromZero,
                );

                let item = VoucherItem {
                    item_code: line.item_code.clone(),
                    description: line.description.clone(),
                    qty: line.qty,
                    rate: line.base_rate,
                    amount: line.base_amount,
                    weight,
                    weight_uom: line.weight_uom.clone(),
                    cost_center: line
                        .cost_center
                        .clone()
                        .or_else(|| default_cost_center.map(str::to_string)),
                    receipt_type: source.receipt_type,
                    receipt_id: source.receipt_id.clone(),
                    receipt_line_id: line.line_id.clone(),
                    applicable_charges: Decimal::ZERO,
                };

                self.total_amount += item.amount;
                self.total_weight += item.weight;
                self.items.push(item);
            }
        }

        debug!(
            voucher = %self.id,
            items = self.items.len(),
            total_amount = %self.total_amount,
            total_weight = %self.total_weight,
            "rebuilt items from receipt lines"
        );

        Ok(())
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    /// Refreshes `total_taxes_and_charges` as the sum of the taxes table.
    pub fn set_total_taxes_and_charges(&mut self) {
        self.total_taxes_and_charges = self.taxes.iter().map(|tax| tax.amount).sum();
    }

    /// Distributes the charge total across the items by the selected basis,
    /// writing each share into `applicable_charges`.
    ///
    /// Refreshes the charge total first, so one call is enough after any tax
    /// row edit. With an empty taxes table this is a no-op: there is nothing
    /// to distribute and existing charges are left untouched.
    pub fn distribute_charges(&mut self, precision: u32) -> VoucherResult<()> {
        self.set_total_taxes_and_charges();

        if self.taxes.is_empty() {
            return Ok(());
        }

        let basis = self.distribute_charges_based_on;
        let request = ApportionmentRequest {
            total_charge: self.total_taxes_and_charges,
            items: self
                .items
                .iter()
                .map(|item| LineItem::new(basis.value_of(item)))
                .collect(),
            basis,
            precision,
        };

        let shares = apportion(&request)?;
        for (item, share) in self.items.iter_mut().zip(shares) {
            item.applicable_charges = share;
        }

        debug!(
            voucher = %self.id,
            total = %self.total_taxes_and_charges,
            basis = %basis,
            "distributed charges across items"
        );

        Ok(())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Runs the full pre-submit validation suite.
    ///
    /// ## Checks, in order
    /// 1. Precision is representable
    /// 2. Receipt rows present, submitted, same company, stock-updating
    /// 3. Items present, traceable to listed receipts, cost centers set
    /// 4. Weight UOMs uniform (only when distributing by weight)
    /// 5. Allocated charges reconcile with the charge total; drift under the
    ///    tolerance is absorbed by the last item, anything larger is an error
    pub fn validate(&mut self, precision: u32) -> VoucherResult<()> {
        if precision > MAX_CHARGE_PRECISION {
            return Err(ApportionError::InvalidPrecision {
                requested: precision,
                max: MAX_CHARGE_PRECISION,
            }
            .into());
        }

        validation::validate_receipts(&self.purchase_receipts, &self.company)?;
        self.set_total_taxes_and_charges();

        if self.items.is_empty() {
            return Err(VoucherError::NoItems);
        }
        validation::validate_item_links(&self.items, &self.purchase_receipts)?;

        if self.distribute_charges_based_on == ChargeBasis::Weight {
            validation::validate_weight_uoms(&self.items)?;
        }

        self.reconcile_applicable_charges(precision)
    }

    /// Compares the allocated charges against the charge total.
    ///
    /// Drift strictly below `2 · 10^-precision` is absorbed by the last item,
    /// the same reconciliation the engine applies; anything larger means the
    /// charge column was edited out from under the voucher.
    fn reconcile_applicable_charges(&mut self, precision: u32) -> VoucherResult<()> {
        let basis = self.distribute_charges_based_on;
        let total_basis: Decimal = self.items.iter().map(|item| basis.value_of(item)).sum();
        if total_basis.is_zero() {
            return Err(ApportionError::DegenerateBasis { basis }.into());
        }

        let allocated: Decimal = self
            .items
            .iter()
            .map(|item| item.applicable_charges)
            .sum();

        let diff = (self.total_taxes_and_charges - allocated)
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);

        if diff.abs() < validation::reconciliation_tolerance(precision) {
            if !diff.is_zero() {
                if let Some(last) = self.items.last_mut() {
                    last.applicable_charges += diff;
                }
            }
            Ok(())
        } else {
            Err(VoucherError::ChargeMismatch {
                expected: self.total_taxes_and_charges,
                allocated,
            })
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Submits the voucher: validates, flips Draft → Submitted, and returns
    /// the payable journal entry for the host to post.
    ///
    /// The posting date is supplied by the caller (usually "today") so the
    /// operation stays deterministic.
    pub fn submit(
        &mut self,
        payable_account: &str,
        posting_date: NaiveDate,
        precision: u32,
    ) -> VoucherResult<JournalEntry> {
        if self.status != VoucherStatus::Draft {
            return Err(VoucherError::InvalidStatus {
                id: self.id.clone(),
                status: self.status,
                operation: "submit",
            });
        }

        self.validate(precision)?;
        let entry = build_payable_entry(self, payable_account, posting_date)?;
        self.status = VoucherStatus::Submitted;

        debug!(
            voucher = %self.id,
            total = %self.total_taxes_and_charges,
            "voucher submitted"
        );

        Ok(entry)
    }

    /// Cancels a submitted voucher.
    ///
    /// The host is responsible for reversing whatever it posted on submit.
    pub fn cancel(&mut self) -> VoucherResult<()> {
        if self.status != VoucherStatus::Submitted {
            return Err(VoucherError::InvalidStatus {
                id: self.id.clone(),
                status: self.status,
                operation: "cancel",
            });
        }

        self.status = VoucherStatus::Cancelled;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
