//! # Charge Apportionment Engine
//!
//! Distributes a total charge across line items proportionally to a basis
//! value, with exact remainder reconciliation.
//!
//! ## The Rounding Drift Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE ROUNDING DRIFT PROBLEM                                             │
//! │                                                                         │
//! │  Split 10.00 of freight across 3 equal items at 2 decimal places:      │
//! │    10.00 / 3 = 3.3333...  → rounds to 3.33 per item                    │
//! │    3.33 × 3 = 9.99        → 0.01 of freight vanished!                  │
//! │                                                                         │
//! │  OUR SOLUTION: Remainder Reconciliation                                 │
//! │    Round every share independently, measure the drift against the      │
//! │    total, and add the whole difference to the LAST item:               │
//! │      [3.33, 3.33, 3.33] + diff(0.01) → [3.33, 3.33, 3.34]              │
//! │                                                                         │
//! │    The sum now equals the total EXACTLY, at the cost of the last item  │
//! │    absorbing all rounding drift. Simple and auditable; deliberately    │
//! │    not the statistically fairer largest-remainder method.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ballast_core::apportion::{apportion, ApportionmentRequest, LineItem};
//! use ballast_core::types::ChargeBasis;
//! use rust_decimal_macros::dec;
//!
//! let request = ApportionmentRequest {
//!     total_charge: dec!(100.00),
//!     items: vec![
//!         LineItem::new(dec!(10)),
//!         LineItem::new(dec!(20)),
//!         LineItem::new(dec!(30)),
//!     ],
//!     basis: ChargeBasis::Qty,
//!     precision: 2,
//! };
//!
//! let shares = apportion(&request).unwrap();
//! assert_eq!(shares, vec![dec!(16.67), dec!(33.33), dec!(50.00)]);
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ApportionError, ApportionResult};
use crate::types::ChargeBasis;
use crate::MAX_CHARGE_PRECISION;

// =============================================================================
// Request Types
// =============================================================================

/// One line item carrying its apportionment weight.
///
/// The engine does not care whether the value is a quantity, an amount or a
/// weight; [`ApportionmentRequest::basis`] records which one it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// The item's weight under the selected basis.
    #[ts(as = "String")]
    pub basis_value: Decimal,
}

impl LineItem {
    /// Creates a line item from its basis value.
    #[inline]
    pub const fn new(basis_value: Decimal) -> Self {
        LineItem { basis_value }
    }
}

/// A complete apportionment request.
///
/// Constructed fresh on every recompute trigger; the engine keeps no state
/// between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApportionmentRequest {
    /// The total charge to distribute. May be zero or negative.
    #[ts(as = "String")]
    pub total_charge: Decimal,

    /// Items in voucher order. The LAST item absorbs rounding drift.
    pub items: Vec<LineItem>,

    /// Which item attribute the basis values were taken from.
    /// Only used for error reporting; the values themselves drive the math.
    pub basis: ChargeBasis,

    /// Decimal places each share is rounded to before reconciliation.
    pub precision: u32,
}

// =============================================================================
// The Engine
// =============================================================================

/// Apportions `total_charge` across `items` proportionally to their basis
/// values.
///
/// Returns one allocated charge per item, same order and length as the input.
///
/// ## Invariant
/// The returned shares sum to `total_charge` exactly. Each share is rounded
/// half-up to `precision` decimal places, then the difference between the
/// total and the rounded sum is added, unrounded, to the last share.
///
/// ## Rules
/// - Empty `items` → empty result, no error
/// - `precision` above [`MAX_CHARGE_PRECISION`] → [`ApportionError::InvalidPrecision`]
/// - Basis values summing to zero → [`ApportionError::DegenerateBasis`]
///
/// ## Example
/// ```rust
/// use ballast_core::apportion::{apportion, ApportionmentRequest, LineItem};
/// use ballast_core::types::ChargeBasis;
/// use rust_decimal_macros::dec;
///
/// // Three equal items cannot split 10.00 evenly at 2 decimal places;
/// // the last item picks up the cent.
/// let request = ApportionmentRequest {
///     total_charge: dec!(10.00),
///     items: vec![LineItem::new(dec!(1)); 3],
///     basis: ChargeBasis::Qty,
///     precision: 2,
/// };
/// let shares = apportion(&request).unwrap();
/// assert_eq!(shares, vec![dec!(3.33), dec!(3.33), dec!(3.34)]);
/// ```
pub fn apportion(request: &ApportionmentRequest) -> ApportionResult<Vec<Decimal>> {
    if request.precision > MAX_CHARGE_PRECISION {
        return Err(ApportionError::InvalidPrecision {
            requested: request.precision,
            max: MAX_CHARGE_PRECISION,
        });
    }

    // Nothing to allocate over produces nothing.
    if request.items.is_empty() {
        return Ok(Vec::new());
    }

    let total_basis: Decimal = request.items.iter().map(|item| item.basis_value).sum();
    if total_basis.is_zero() {
        return Err(ApportionError::DegenerateBasis {
            basis: request.basis,
        });
    }

    let mut shares: Vec<Decimal> = request
        .items
        .iter()
        .map(|item| {
            (item.basis_value * request.total_charge / total_basis)
                .round_dp_with_strategy(request.precision, RoundingStrategy::MidpointAwayFromZero)
        })
        .collect();

    let allocated: Decimal = shares.iter().sum();
    let diff = request.total_charge - allocated;
    if !diff.is_zero() {
        // Last item absorbs all rounding drift, unrounded.
        if let Some(last) = shares.last_mut() {
            *last += diff;
        }
    }

    Ok(shares)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn request(total: Decimal, basis_values: &[Decimal], precision: u32) -> ApportionmentRequest {
        ApportionmentRequest {
            total_charge: total,
            items: basis_values.iter().copied().map(LineItem::new).collect(),
            basis: ChargeBasis::Qty,
            precision,
        }
    }

    #[test]
    fn test_even_split_needs_no_adjustment() {
        let shares = apportion(&request(
            dec!(100.00),
            &[dec!(10), dec!(20), dec!(30)],
            2,
        ))
        .unwrap();
        assert_eq!(shares, vec![dec!(16.67), dec!(33.33), dec!(50.00)]);
    }

    #[test]
    fn test_last_item_absorbs_drift() {
        let shares = apportion(&request(dec!(10.00), &[dec!(1), dec!(1), dec!(1)], 2)).unwrap();
        assert_eq!(shares, vec![dec!(3.33), dec!(3.33), dec!(3.34)]);
    }

    #[test]
    fn test_empty_items() {
        let shares = apportion(&request(dec!(100.00), &[], 2)).unwrap();
        assert!(shares.is_empty());
    }

    #[test]
    fn test_single_item_gets_full_total() {
        let shares = apportion(&request(dec!(99.99), &[dec!(7)], 2)).unwrap();
        assert_eq!(shares, vec![dec!(99.99)]);
    }

    #[test]
    fn test_zero_total_charge() {
        let shares = apportion(&request(dec!(0), &[dec!(3), dec!(7)], 2)).unwrap();
        assert_eq!(shares, vec![dec!(0.00), dec!(0.00)]);
    }

    #[test]
    fn test_negative_total_charge() {
        // A credit note distributes the same way, sign included.
        let shares = apportion(&request(dec!(-10.00), &[dec!(1), dec!(1), dec!(1)], 2)).unwrap();
        let sum: Decimal = shares.iter().sum();
        assert_eq!(sum, dec!(-10.00));
        assert_eq!(shares, vec![dec!(-3.33), dec!(-3.33), dec!(-3.34)]);
    }

    #[test]
    fn test_zero_basis_item_gets_nothing() {
        let shares = apportion(&request(dec!(50.00), &[dec!(0), dec!(5)], 2)).unwrap();
        assert_eq!(shares, vec![dec!(0.00), dec!(50.00)]);
    }

    #[test]
    fn test_degenerate_basis() {
        let err = apportion(&request(dec!(50.00), &[dec!(0), dec!(0)], 2)).unwrap_err();
        assert_eq!(
            err,
            ApportionError::DegenerateBasis {
                basis: ChargeBasis::Qty
            }
        );
    }

    #[test]
    fn test_invalid_precision() {
        let err = apportion(&request(dec!(50.00), &[dec!(1)], MAX_CHARGE_PRECISION + 1))
            .unwrap_err();
        assert_eq!(
            err,
            ApportionError::InvalidPrecision {
                requested: MAX_CHARGE_PRECISION + 1,
                max: MAX_CHARGE_PRECISION
            }
        );
    }

    #[test]
    fn test_precision_zero_rounds_to_whole_units() {
        let shares = apportion(&request(dec!(100), &[dec!(1), dec!(1), dec!(1)], 0)).unwrap();
        // 33.33... rounds to 33; the last item takes the remaining 34.
        assert_eq!(shares, vec![dec!(33), dec!(33), dec!(34)]);
    }

    #[test]
    fn test_remainder_lands_on_last_in_input_order() {
        // Swapping item order changes WHICH item absorbs drift, never the sum.
        let forward = apportion(&request(dec!(10.00), &[dec!(1), dec!(2)], 2)).unwrap();
        let reverse = apportion(&request(dec!(10.00), &[dec!(2), dec!(1)], 2)).unwrap();
        assert_eq!(forward, vec![dec!(3.33), dec!(6.67)]);
        assert_eq!(reverse, vec![dec!(6.67), dec!(3.33)]);
        let sum_f: Decimal = forward.iter().sum();
        let sum_r: Decimal = reverse.iter().sum();
        assert_eq!(sum_f, sum_r);
    }

    #[test]
    fn test_idempotent() {
        let req = request(dec!(123.45), &[dec!(2.5), dec!(7.5), dec!(1.25)], 2);
        assert_eq!(apportion(&req).unwrap(), apportion(&req).unwrap());
    }

    proptest! {
        /// Conservation: shares always sum back to the total, exactly.
        #[test]
        fn prop_shares_sum_to_total(
            total_minor in -1_000_000i64..1_000_000i64,
            basis_milli in proptest::collection::vec(0i64..100_000i64, 1..20),
            precision in 0u32..=6,
        ) {
            prop_assume!(basis_milli.iter().sum::<i64>() > 0);

            let req = ApportionmentRequest {
                total_charge: Decimal::new(total_minor, 2),
                items: basis_milli
                    .iter()
                    .map(|b| LineItem::new(Decimal::new(*b, 3)))
                    .collect(),
                basis: ChargeBasis::Amount,
                precision,
            };

            let shares = apportion(&req).unwrap();
            prop_assert_eq!(shares.len(), req.items.len());
            let sum: Decimal = shares.iter().sum();
            prop_assert_eq!(sum, req.total_charge);
        }
    }
}
