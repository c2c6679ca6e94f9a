//! # ballast-core: Pure Landed-Cost Logic for Ballast
//!
//! This crate is the **heart** of Ballast. It contains the landed cost
//! voucher business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ballast Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  ERP Host (form layer, any framework)           │   │
//! │  │   Receipt picker ──► Charges grid ──► Items grid ──► Submit     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ fetches receipts, persists vouchers    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ballast-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ apportion │  │  voucher  │  │ validation│  │   │
//! │  │   │  Receipt  │  │  engine   │  │ lifecycle │  │   rules   │  │   │
//! │  │   │   Item    │  │  shares   │  │ recompute │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ┌───────────┐                           │   │
//! │  │                        │  posting  │                           │   │
//! │  │                        │  payable  │                           │   │
//! │  │                        └───────────┘                           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Host document store, stock ledger, GL (external)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (receipts, items, charges, basis)
//! - [`apportion`] - The charge apportionment engine
//! - [`voucher`] - The landed cost voucher document and its operations
//! - [`validation`] - Pre-submit validation rules
//! - [`posting`] - Payable journal entry construction
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Arithmetic**: All monetary, quantity and weight values are
//!    `rust_decimal::Decimal` - never floats, never NaN
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Exact Conservation**: Distributed charges always sum back to the
//!    charge total; the last item absorbs rounding drift
//!
//! ## Example Usage
//!
//! ```rust
//! use ballast_core::apportion::{apportion, ApportionmentRequest, LineItem};
//! use ballast_core::ChargeBasis;
//! use rust_decimal_macros::dec;
//!
//! // 100.00 of freight over items weighing 10, 20 and 30 kg
//! let request = ApportionmentRequest {
//!     total_charge: dec!(100.00),
//!     items: vec![
//!         LineItem::new(dec!(10)),
//!         LineItem::new(dec!(20)),
//!         LineItem::new(dec!(30)),
//!     ],
//!     basis: ChargeBasis::Weight,
//!     precision: 2,
//! };
//!
//! let shares = apportion(&request).unwrap();
//! assert_eq!(shares, vec![dec!(16.67), dec!(33.33), dec!(50.00)]);
//!
//! // Conservation: the shares sum back to the total exactly
//! let sum: rust_decimal::Decimal = shares.iter().sum();
//! assert_eq!(sum, dec!(100.00));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod apportion;
pub mod error;
pub mod posting;
pub mod types;
pub mod validation;
pub mod voucher;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ballast_core::LandedCostVoucher` instead of
// `use ballast_core::voucher::LandedCostVoucher`

pub use apportion::{apportion, ApportionmentRequest, LineItem};
pub use error::{ApportionError, ApportionResult, VoucherError, VoucherResult};
pub use posting::{build_payable_entry, JournalEntry, JournalEntryLine};
pub use types::*;
pub use voucher::LandedCostVoucher;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of decimal places for charge amounts.
///
/// ## Why a constant?
/// Hosts pass the precision of their currency field on every call; this is
/// the fallback for hosts that don't configure one. Two decimal places covers
/// the overwhelming majority of currencies.
pub const DEFAULT_CHARGE_PRECISION: u32 = 2;

/// Maximum number of decimal places a host may request.
///
/// ## Business Reason
/// ERP currency and float fields cap out at nine decimal places; anything
/// beyond that is a configuration error, not a real precision.
pub const MAX_CHARGE_PRECISION: u32 = 9;
