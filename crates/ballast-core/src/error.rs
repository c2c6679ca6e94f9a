//! # Error Types
//!
//! Domain-specific error types for ballast-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ballast-core errors (this file)                                       │
//! │  ├── ApportionError   - Charge apportionment failures                  │
//! │  └── VoucherError     - Voucher validation / lifecycle failures        │
//! │                                                                         │
//! │  Host errors (outside this crate)                                      │
//! │  └── Whatever the embedding framework raises around fetch/persist      │
//! │                                                                         │
//! │  Flow: ApportionError → VoucherError → host → form layer message       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (receipt id, item code, row index)
//! 3. Errors are enum variants, never String
//! 4. Every failure is detected before results are written back: a voucher
//!    is never left with a partially distributed charge column

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{ChargeBasis, VoucherStatus};

// =============================================================================
// Apportion Error
// =============================================================================

/// Failures of the charge apportionment engine.
///
/// Both variants are local validation failures detected before any share is
/// computed; the engine never produces NaN, Infinity, or a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApportionError {
    /// The apportionment weights sum to zero, so shares are undefined.
    ///
    /// ## When This Occurs
    /// - Every item has zero qty / amount / weight for the selected basis
    /// - Typically the user picked `Weight` on items with no weight master data
    #[error("total {basis} for all items is zero, charges cannot be distributed")]
    DegenerateBasis { basis: ChargeBasis },

    /// The requested rounding precision is not representable.
    #[error("precision {requested} exceeds the maximum supported ({max})")]
    InvalidPrecision { requested: u32, max: u32 },
}

// =============================================================================
// Voucher Error
// =============================================================================

/// Voucher validation and lifecycle errors.
///
/// These mirror the checks a landed cost voucher runs before it may be
/// submitted. They should be caught by the host and translated to
/// user-facing form messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    /// The voucher has no receipt document rows at all.
    #[error("at least one receipt document is required")]
    NoReceipts,

    /// A referenced receipt document has not been submitted.
    ///
    /// ## When This Occurs
    /// - The receipt is still a draft in the host system
    /// - The receipt was cancelled after being added to the voucher
    #[error("receipt document {receipt_id} must be submitted")]
    ReceiptNotSubmitted { receipt_id: String },

    /// A receipt document belongs to a different company than the voucher.
    #[error("receipt document {receipt_id} belongs to company {receipt_company}, voucher company is {voucher_company}")]
    CompanyMismatch {
        receipt_id: String,
        receipt_company: String,
        voucher_company: String,
    },

    /// A purchase invoice was referenced that does not update stock.
    /// Landed cost can only be applied to documents that moved inventory.
    #[error("purchase invoice {receipt_id} does not update stock")]
    ReceiptWithoutStockUpdate { receipt_id: String },

    /// The voucher has no items to distribute charges over.
    ///
    /// ## When This Occurs
    /// - The user never pulled items from the receipt documents
    /// - Every receipt line was a non-stock item
    #[error("no items to distribute charges over, pull items from the receipt documents first")]
    NoItems,

    /// An item row references a receipt that is not listed on the voucher.
    #[error("item row {row}: receipt document {receipt_id} is not listed in the receipt documents table")]
    UnknownReceipt { row: usize, receipt_id: String },

    /// An item row has no cost center to book the charge against.
    #[error("item row {row}: cost center is required for item {item_code}")]
    MissingCostCenter { row: usize, item_code: String },

    /// Weight-based distribution across items measured in different units.
    #[error("weight UOMs of all items must be the same, found: {uoms}")]
    MixedWeightUoms { uoms: String },

    /// The allocated charges drifted from the charge total by more than the
    /// reconciliation tolerance.
    #[error("total applicable charges {allocated} must equal total taxes and charges {expected}")]
    ChargeMismatch { expected: Decimal, allocated: Decimal },

    /// The voucher is not in a status that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Submitting a voucher twice
    /// - Cancelling a voucher that was never submitted
    #[error("voucher {id} is {status:?}, cannot {operation}")]
    InvalidStatus {
        id: String,
        status: VoucherStatus,
        operation: &'static str,
    },

    /// No supplier to credit on the payable journal entry.
    #[error("supplier is required to post the payable entry")]
    MissingSupplier,

    /// Apportionment failed (wraps ApportionError).
    #[error(transparent)]
    Apportion(#[from] ApportionError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with ApportionError.
pub type ApportionResult<T> = Result<T, ApportionError>;

/// Convenience type alias for Results with VoucherError.
pub type VoucherResult<T> = Result<T, VoucherError>;

// =============================================================================
// Unit Tests
// =============================================================================
