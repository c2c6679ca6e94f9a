//! # Domain Types
//!
//! Core domain types for landed cost vouchers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ReceiptRef    │   │   VoucherItem   │   │    TaxCharge    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  receipt_type   │   │  item_code      │   │  description    │       │
//! │  │  receipt_id     │   │  qty/amount/    │   │  expense_account│       │
//! │  │  supplier       │   │    weight       │   │  amount         │       │
//! │  │  grand_total    │   │  applicable_    │   └─────────────────┘       │
//! │  └─────────────────┘   │    charges      │                             │
//! │                        └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  ChargeBasis    │   │  VoucherStatus  │   │ ReceiptDocumentType │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  Qty            │   │  Draft          │   │  PurchaseReceipt    │   │
//! │  │  Amount         │   │  Submitted      │   │  PurchaseInvoice    │   │
//! │  │  Weight         │   │  Cancelled      │   └─────────────────────┘   │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `VoucherItem` freezes the receipt line data (qty, rate, amount, weight) at
//! the moment items are pulled onto the voucher. Later edits to the receipt in
//! the host system do not silently change an existing voucher.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Charge Basis
// =============================================================================

/// The per-item attribute used as the weight in proportional allocation.
///
/// ## Why an Enum?
/// The host form offers a fixed "Distribute Charges Based On" select. Keeping
/// it closed lets the engine pick the item field without stringly-typed
/// lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChargeBasis {
    /// Distribute proportionally to item quantity.
    Qty,
    /// Distribute proportionally to item amount (base currency).
    Amount,
    /// Distribute proportionally to item weight.
    Weight,
}

impl ChargeBasis {
    /// Returns the basis value of an item under this basis.
    #[inline]
    pub fn value_of(&self, item: &VoucherItem) -> Decimal {
        match self {
            ChargeBasis::Qty => item.qty,
            ChargeBasis::Amount => item.amount,
            ChargeBasis::Weight => item.weight,
        }
    }
}

/// Renders the lowercase item field name, for error messages.
impl fmt::Display for ChargeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChargeBasis::Qty => "qty",
            ChargeBasis::Amount => "amount",
            ChargeBasis::Weight => "weight",
        };
        write!(f, "{name}")
    }
}

impl Default for ChargeBasis {
    fn default() -> Self {
        ChargeBasis::Qty
    }
}

// =============================================================================
// Voucher Status
// =============================================================================

/// The lifecycle status of a voucher or receipt document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    /// Document is being edited; charges may still be redistributed.
    Draft,
    /// Document has been submitted and posted.
    Submitted,
    /// Document was submitted and later cancelled.
    Cancelled,
}

impl Default for VoucherStatus {
    fn default() -> Self {
        VoucherStatus::Draft
    }
}

// =============================================================================
// Receipt Document Type
// =============================================================================

/// The kind of purchase document a voucher distributes charges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptDocumentType {
    /// A goods receipt note.
    PurchaseReceipt,
    /// A purchase invoice that also updates stock.
    PurchaseInvoice,
}

// =============================================================================
// Receipt Reference
// =============================================================================

/// A receipt document row on the voucher.
///
/// The `supplier`, `posting_date` and `grand_total` fields are snapshots the
/// host fetched from the referenced document; `updates_stock` matters only for
/// purchase invoices, which may be billing-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptRef {
    pub receipt_type: ReceiptDocumentType,

    /// Identifier of the receipt document in the host system.
    pub receipt_id: String,

    /// Company the receipt was booked under.
    pub company: String,

    /// Supplier on the receipt document.
    pub supplier: Option<String>,

    /// Posting date of the receipt document.
    #[ts(as = "Option<String>")]
    pub posting_date: Option<NaiveDate>,

    /// Grand total of the receipt document in base currency.
    #[ts(as = "String")]
    pub grand_total: Decimal,

    /// Lifecycle status of the receipt document.
    pub status: VoucherStatus,

    /// Whether the document moved inventory.
    pub updates_stock: bool,
}

// =============================================================================
// Receipt Line
// =============================================================================

/// A line item of a receipt document, as supplied by the host.
///
/// This is the raw input to [`crate::voucher::LandedCostVoucher::set_items_from_receipts`];
/// lines with `is_stock_item == false` never make it onto the voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    /// Identifier of the line within the receipt document.
    pub line_id: String,

    pub item_code: String,

    pub description: Option<String>,

    #[ts(as = "String")]
    pub qty: Decimal,

    /// Unit rate in base currency.
    #[ts(as = "String")]
    pub base_rate: Decimal,

    /// Line amount in base currency.
    #[ts(as = "String")]
    pub base_amount: Decimal,

    /// Cost center on the line, if the receipt carries one.
    pub cost_center: Option<String>,

    /// Weight of one unit, from the item master.
    #[ts(as = "String")]
    pub weight_per_unit: Decimal,

    /// Unit of measure for the weight, from the item master.
    pub weight_uom: Option<String>,

    /// Whether the item is a stock item. Non-stock lines carry no landed cost.
    pub is_stock_item: bool,
}

/// The lines of one receipt document, keyed by the receipt they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLines {
    pub receipt_type: ReceiptDocumentType,
    pub receipt_id: String,
    pub lines: Vec<ReceiptLine>,
}

// =============================================================================
// Voucher Item
// =============================================================================

/// A purchased line item receiving a share of the charges.
/// Uses the snapshot pattern: receipt line data is frozen at pull time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherItem {
    pub item_code: String,

    pub description: Option<String>,

    #[ts(as = "String")]
    pub qty: Decimal,

    /// Unit rate at pull time (frozen).
    #[ts(as = "String")]
    pub rate: Decimal,

    /// Line amount at pull time (frozen).
    #[ts(as = "String")]
    pub amount: Decimal,

    /// Total line weight: weight per unit × qty, rounded at pull time.
    #[ts(as = "String")]
    pub weight: Decimal,

    pub weight_uom: Option<String>,

    /// Cost center the charge share is booked against.
    pub cost_center: Option<String>,

    /// Receipt document this item came from.
    pub receipt_type: ReceiptDocumentType,
    pub receipt_id: String,

    /// Line of the receipt document this item came from.
    pub receipt_line_id: String,

    /// The item's share of total taxes and charges (output column).
    #[ts(as = "String")]
    pub applicable_charges: Decimal,
}

// =============================================================================
// Tax Charge
// =============================================================================

/// One row of the taxes and charges table (freight, duty, insurance, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxCharge {
    pub description: String,

    /// Expense account for this charge, if it differs from the voucher's.
    pub expense_account: Option<String>,

    /// Charge amount in base currency.
    #[ts(as = "String")]
    pub amount: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================
