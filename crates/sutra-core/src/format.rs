//! # Display Formatting
//!
//! Locale-aware currency and date string rendering for the invoice surface.
//!
//! ## Note
//! These helpers produce the exact strings printed on the invoice (₹ with
//! Indian digit grouping, DD/MM/YYYY dates). Frontend widgets may format
//! differently for editing; the printed document uses these.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::round_money;

/// Formats an amount as Indian Rupees with lakh/crore digit grouping.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use sutra_core::format::format_inr;
///
/// let amount: Decimal = "123456.78".parse().unwrap();
/// assert_eq!(format_inr(amount), "₹1,23,456.78");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());

    // Always "<integer>.<2 digits>" after the formatting above.
    let (int_part, frac_part) = match text.split_once('.') {
        Some(parts) => parts,
        None => (text.as_str(), "00"),
    };

    format!("{}₹{}.{}", sign, group_indian(int_part), frac_part)
}

/// Groups an unsigned digit string Indian-style: last 3 digits, then 2s.
///
/// `1234567` → `12,34,567`
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let bytes = head.as_bytes();
    let mut end = bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats a date as `DD/MM/YYYY`, the convention printed on the invoice.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(s: &str) -> String {
        format_inr(s.parse().unwrap())
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(inr("0"), "₹0.00");
        assert_eq!(inr("999"), "₹999.00");
        assert_eq!(inr("1000"), "₹1,000.00");
        assert_eq!(inr("123456.78"), "₹1,23,456.78");
        assert_eq!(inr("12345678.90"), "₹1,23,45,678.90");
        assert_eq!(inr("1234567890"), "₹1,23,45,67,890.00");
    }

    #[test]
    fn test_format_inr_rounds_to_paise() {
        assert_eq!(inr("10.005"), "₹10.01");
        assert_eq!(inr("10.004"), "₹10.00");
    }

    #[test]
    fn test_format_inr_negative() {
        assert_eq!(inr("-1500.50"), "-₹1,500.50");
    }

    #[test]
    fn test_format_date() {
        let date: NaiveDate = "2025-04-09".parse().unwrap();
        assert_eq!(format_date(date), "09/04/2025");
    }
}
