//! # Validation Module
//!
//! Voucher validation rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host form layer                                              │
//! │  ├── Field-level checks, pick lists, mandatory markers                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure Rust)                                      │
//! │  ├── Receipt rows present, submitted, same company                     │
//! │  ├── Items traceable to listed receipts, cost centers set              │
//! │  └── Weight UOMs uniform when distributing by weight                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Host document store                                          │
//! │  └── Referential integrity on persist                                  │
//! │                                                                         │
//! │  Defense in depth: the host cannot be trusted to have run layer 1      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function is pure and returns the first violation it finds, in row
//! order, so the host can point the user at a specific grid row.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{VoucherError, VoucherResult};
use crate::types::{ReceiptDocumentType, ReceiptRef, VoucherItem, VoucherStatus};

// =============================================================================
// Receipt Rules
// =============================================================================

/// Validates the receipt documents table.
///
/// ## Rules
/// - At least one receipt row
/// - Every receipt is submitted
/// - Every receipt belongs to the voucher's company
/// - Purchase invoices must update stock (billing-only invoices carry no
///   inventory to load cost onto)
pub fn validate_receipts(receipts: &[ReceiptRef], voucher_company: &str) -> VoucherResult<()> {
    if receipts.is_empty() {
        return Err(VoucherError::NoReceipts);
    }

    for receipt in receipts {
        if receipt.status != VoucherStatus::Submitted {
            return Err(VoucherError::ReceiptNotSubmitted {
                receipt_id: receipt.receipt_id.clone(),
            });
        }

        if receipt.company != voucher_company {
            return Err(VoucherError::CompanyMismatch {
                receipt_id: receipt.receipt_id.clone(),
                receipt_company: receipt.company.clone(),
                voucher_company: voucher_company.to_string(),
            });
        }

        if receipt.receipt_type == ReceiptDocumentType::PurchaseInvoice && !receipt.updates_stock {
            return Err(VoucherError::ReceiptWithoutStockUpdate {
                receipt_id: receipt.receipt_id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Item Rules
// =============================================================================

/// Validates item provenance and booking data.
///
/// ## Rules
/// - Every item references a receipt listed in the receipts table
/// - Every item carries a cost center
///
/// Row numbers in errors are 1-based, matching the host grid.
pub fn validate_item_links(items: &[VoucherItem], receipts: &[ReceiptRef]) -> VoucherResult<()> {
    let listed: BTreeSet<&str> = receipts
        .iter()
        .map(|receipt| receipt.receipt_id.as_str())
        .collect();

    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;

        if !listed.contains(item.receipt_id.as_str()) {
            return Err(VoucherError::UnknownReceipt {
                row,
                receipt_id: item.receipt_id.clone(),
            });
        }

        let has_cost_center = item
            .cost_center
            .as_deref()
            .map_or(false, |cc| !cc.trim().is_empty());
        if !has_cost_center {
            return Err(VoucherError::MissingCostCenter {
                row,
                item_code: item.item_code.clone(),
            });
        }
    }

    Ok(())
}

/// Validates that all items share one weight UOM.
///
/// Only meaningful when charges distribute by weight; summing kilograms with
/// pounds would silently skew every share.
pub fn validate_weight_uoms(items: &[VoucherItem]) -> VoucherResult<()> {
    let uoms: BTreeSet<String> = items
        .iter()
        .map(|item| {
            item.weight_uom
                .clone()
                .unwrap_or_else(|| "(not set)".to_string())
        })
        .collect();

    if uoms.len() > 1 {
        return Err(VoucherError::MixedWeightUoms {
            uoms: uoms.into_iter().collect::<Vec<_>>().join(", "),
        });
    }

    Ok(())
}

// =============================================================================
// Reconciliation Tolerance
// =============================================================================

/// The maximum drift between the charge total and the allocated sum that the
/// last item may silently absorb: `2 · 10^-precision`, i.e. two units in the
/// last rounded place.
///
/// ## Example
/// ```rust
/// use ballast_core::validation::reconciliation_tolerance;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(reconciliation_tolerance(2), dec!(0.02));
/// assert_eq!(reconciliation_tolerance(0), dec!(2));
/// ```
pub fn reconciliation_tolerance(precision: u32) -> Decimal {
    Decimal::new(2, precision)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn receipt(id: &str) -> ReceiptRef {
        ReceiptRef {
            receipt_type: ReceiptDocumentType::PurchaseReceipt,
            receipt_id: id.to_string(),
            company: "Acme Imports".to_string(),
            supplier: Some("Oceanic Freight Co".to_string()),
            posting_date: None,
            grand_total: dec!(1000.00),
            status: VoucherStatus::Submitted,
            updates_stock: true,
        }
    }

    fn item(receipt_id: &str, cost_center: Option<&str>, weight_uom: Option<&str>) -> VoucherItem {
        VoucherItem {
            item_code: "WIDGET".to_string(),
            description: None,
            qty: dec!(1),
            rate: dec!(100.00),
            amount: dec!(100.00),
            weight: dec!(5.000),
            weight_uom: weight_uom.map(str::to_string),
            cost_center: cost_center.map(str::to_string),
            receipt_type: ReceiptDocumentType::PurchaseReceipt,
            receipt_id: receipt_id.to_string(),
            receipt_line_id: format!("{receipt_id}-1"),
            applicable_charges: dec!(0),
        }
    }

    #[test]
    fn test_receipts_required() {
        assert_eq!(
            validate_receipts(&[], "Acme Imports").unwrap_err(),
            VoucherError::NoReceipts
        );
    }

    #[test]
    fn test_receipt_must_be_submitted() {
        let mut r = receipt("PR-0001");
        r.status = VoucherStatus::Draft;
        let err = validate_receipts(&[r], "Acme Imports").unwrap_err();
        assert!(matches!(err, VoucherError::ReceiptNotSubmitted { .. }));
    }

    #[test]
    fn test_receipt_company_must_match() {
        let r = receipt("PR-0001");
        let err = validate_receipts(&[r], "Other Company").unwrap_err();
        assert!(matches!(err, VoucherError::CompanyMismatch { .. }));
    }

    #[test]
    fn test_invoice_must_update_stock() {
        let mut r = receipt("PINV-0001");
        r.receipt_type = ReceiptDocumentType::PurchaseInvoice;
        r.updates_stock = false;
        let err = validate_receipts(&[r], "Acme Imports").unwrap_err();
        assert!(matches!(err, VoucherError::ReceiptWithoutStockUpdate { .. }));

        let mut ok = receipt("PINV-0002");
        ok.receipt_type = ReceiptDocumentType::PurchaseInvoice;
        assert!(validate_receipts(&[ok], "Acme Imports").is_ok());
    }

    #[test]
    fn test_item_must_reference_listed_receipt() {
        let receipts = vec![receipt("PR-0001")];
        let items = vec![
            item("PR-0001", Some("Main - AI"), None),
            item("PR-9999", Some("Main - AI"), None),
        ];
        let err = validate_item_links(&items, &receipts).unwrap_err();
        assert_eq!(
            err,
            VoucherError::UnknownReceipt {
                row: 2,
                receipt_id: "PR-9999".to_string()
            }
        );
    }

    #[test]
    fn test_item_needs_cost_center() {
        let receipts = vec![receipt("PR-0001")];
        for missing in [None, Some(""), Some("   ")] {
            let items = vec![item("PR-0001", missing, None)];
            let err = validate_item_links(&items, &receipts).unwrap_err();
            assert!(matches!(err, VoucherError::MissingCostCenter { row: 1, .. }));
        }
    }

    #[test]
    fn test_weight_uoms_must_be_uniform() {
        let items = vec![
            item("PR-0001", Some("Main - AI"), Some("kg")),
            item("PR-0001", Some("Main - AI"), Some("lb")),
        ];
        let err = validate_weight_uoms(&items).unwrap_err();
        assert_eq!(
            err,
            VoucherError::MixedWeightUoms {
                uoms: "kg, lb".to_string()
            }
        );

        let uniform = vec![
            item("PR-0001", Some("Main - AI"), Some("kg")),
            item("PR-0001", Some("Main - AI"), Some("kg")),
        ];
        assert!(validate_weight_uoms(&uniform).is_ok());
    }

    #[test]
    fn test_missing_uom_counts_as_its_own_unit() {
        let items = vec![
            item("PR-0001", Some("Main - AI"), Some("kg")),
            item("PR-0001", Some("Main - AI"), None),
        ];
        assert!(validate_weight_uoms(&items).is_err());
    }

    #[test]
    fn test_reconciliation_tolerance() {
        assert_eq!(reconciliation_tolerance(2), dec!(0.02));
        assert_eq!(reconciliation_tolerance(3), dec!(0.002));
        assert_eq!(reconciliation_tolerance(0), dec!(2));
    }
}
