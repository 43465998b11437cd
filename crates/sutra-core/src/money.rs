//! # Invoice Arithmetic
//!
//! Line-item amounts, GST computation, and grand-total aggregation.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Quantities and rates on an invoice are fractional:                     │
//! │    2.5 kg × ₹147.33/kg = ₹368.325 → must round to ₹368.33              │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    Exact base-10 arithmetic, explicit rounding at 2 decimal places      │
//! │    with half-away-from-zero (the commercial rounding convention).       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute Discipline
//! ```text
//! Items / rates change
//!      │
//!      ▼
//! item_amount() per line  ← amount = round(quantity × rate, 2)
//!      │
//!      ▼
//! recompute_totals()      ← subtotal, SGST/CGST/IGST, grand total
//!      │
//!      ▼
//! amount_to_words()       ← textual grand total (words module)
//!
//! Full recomputation from the item list is the source of truth.
//! There is no incremental or cached update path.
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::BillItem;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use sutra_core::money::round_money;
///
/// let v: Decimal = "368.325".parse().unwrap();
/// assert_eq!(round_money(v).to_string(), "368.33");
/// ```
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes one line-item amount: `round(quantity × rate, 2)`.
///
/// Negative inputs are accepted without error but produce meaningless
/// negative amounts; rejecting them is the validation layer's job.
#[inline]
pub fn item_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    round_money(quantity * rate)
}

/// Computes a tax amount: `round(base × rate, 2)`.
///
/// `rate` is already normalized to a fraction (percentage / 100).
#[inline]
pub fn tax_amount(base: Decimal, rate: Decimal) -> Decimal {
    round_money(base * rate)
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals for a bill.
///
/// Every field is recomputed together; callers never patch one in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    /// Sum of all item amounts.
    #[ts(as = "String")]
    pub subtotal: Decimal,

    /// State GST amount (subtotal × sgst_rate / 100, rounded).
    #[ts(as = "String")]
    pub sgst_amount: Decimal,

    /// Central GST amount.
    #[ts(as = "String")]
    pub cgst_amount: Decimal,

    /// Integrated GST amount.
    #[ts(as = "String")]
    pub igst_amount: Decimal,

    /// Subtotal plus all three tax amounts.
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

/// Recomputes all derived totals from the full item list and tax rates.
///
/// ## Contract
/// - Idempotent: calling twice on unchanged inputs yields identical output
/// - Must be called after ANY change to items or rates
/// - Rates are percentages (9 means 9%)
pub fn recompute_totals(
    items: &[BillItem],
    sgst_rate: Decimal,
    cgst_rate: Decimal,
    igst_rate: Decimal,
) -> BillTotals {
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();

    let sgst_amount = tax_amount(subtotal, sgst_rate / Decimal::ONE_HUNDRED);
    let cgst_amount = tax_amount(subtotal, cgst_rate / Decimal::ONE_HUNDRED);
    let igst_amount = tax_amount(subtotal, igst_rate / Decimal::ONE_HUNDRED);

    let grand_total = round_money(subtotal + sgst_amount + cgst_amount + igst_amount);

    BillTotals {
        subtotal,
        sgst_amount,
        cgst_amount,
        igst_amount,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(quantity: &str, rate: &str) -> BillItem {
        let quantity = dec(quantity);
        let rate = dec(rate);
        BillItem {
            sno: 1,
            description: "Moulded component".into(),
            hsn_code: "3926".into(),
            quantity,
            rate,
            amount: item_amount(quantity, rate),
        }
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec("1.005")), dec("1.01"));
        assert_eq!(round_money(dec("1.004")), dec("1.00"));
        assert_eq!(round_money(dec("368.325")), dec("368.33"));
        assert_eq!(round_money(dec("-1.005")), dec("-1.01"));
    }

    #[test]
    fn test_item_amount() {
        assert_eq!(item_amount(dec("2.5"), dec("147.33")), dec("368.33"));
        assert_eq!(item_amount(dec("0"), dec("100")), dec("0.00"));
        assert_eq!(item_amount(dec("3"), dec("10")), dec("30.00"));
    }

    #[test]
    fn test_tax_amount() {
        // 9% of 1000 = 90.00
        assert_eq!(tax_amount(dec("1000"), dec("0.09")), dec("90.00"));
        // 9% of 333.33 = 29.9997 → 30.00
        assert_eq!(tax_amount(dec("333.33"), dec("0.09")), dec("30.00"));
        // 0% of anything is zero
        assert_eq!(tax_amount(dec("1000"), dec("0")), dec("0.00"));
    }

    #[test]
    fn test_recompute_totals() {
        let items = vec![item("2", "500"), item("1", "250.50")];
        let totals = recompute_totals(&items, dec("9"), dec("9"), dec("0"));

        assert_eq!(totals.subtotal, dec("1250.50"));
        assert_eq!(totals.sgst_amount, dec("112.55")); // 1250.50 × 0.09 = 112.545
        assert_eq!(totals.cgst_amount, dec("112.55"));
        assert_eq!(totals.igst_amount, dec("0.00"));
        assert_eq!(totals.grand_total, dec("1475.60"));
    }

    #[test]
    fn test_recompute_totals_idempotent() {
        let items = vec![item("3.5", "99.99")];
        let first = recompute_totals(&items, dec("9"), dec("9"), dec("0"));
        let second = recompute_totals(&items, dec("9"), dec("9"), dec("0"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_recompute_totals_empty_items() {
        let totals = recompute_totals(&[], dec("9"), dec("9"), dec("0"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.grand_total, dec("0.00"));
    }

    #[test]
    fn test_igst_only_interstate() {
        // Inter-state sale: IGST 18%, no SGST/CGST
        let items = vec![item("1", "1000")];
        let totals = recompute_totals(&items, dec("0"), dec("0"), dec("18"));
        assert_eq!(totals.sgst_amount, dec("0.00"));
        assert_eq!(totals.cgst_amount, dec("0.00"));
        assert_eq!(totals.igst_amount, dec("180.00"));
        assert_eq!(totals.grand_total, dec("1180.00"));
    }
}
