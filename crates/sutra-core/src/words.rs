//! # Number to Words
//!
//! Indian-numbering-system word rendering for invoice grand totals.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INDIAN GROUPING (not Western thousand/million)                         │
//! │                                                                         │
//! │   12,34,56,789                                                          │
//! │   ──┬ ─┬ ─┬ ───┬                                                        │
//! │     │  │  │    └── hundreds  (0-999)                                    │
//! │     │  │  └─────── thousand  (×1,000)                                   │
//! │     │  └────────── lakh      (×1,00,000)                                │
//! │     └───────────── crore     (×1,00,00,000)                             │
//! │                                                                         │
//! │  The crore count itself can exceed 999 (e.g. 123 crore), so it is       │
//! │  rendered by recursing into the same converter.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This rendering is presentation-only and has no inverse.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Converts a non-negative amount into `"<words> Rupees[ and <words> Paise] Only"`.
///
/// ## Rules
/// - Exactly zero renders as the literal `"Zero Rupees Only"`
/// - Rupees are the integer floor of the amount
/// - Paise are `round((amount - floor) × 100)`; the paise clause is omitted
///   entirely when paise is zero
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use sutra_core::words::amount_to_words;
///
/// let total: Decimal = "1234.50".parse().unwrap();
/// assert_eq!(
///     amount_to_words(total),
///     "One Thousand Two Hundred Thirty Four Rupees and Fifty Paise Only"
/// );
/// ```
pub fn amount_to_words(amount: Decimal) -> String {
    if amount.is_zero() {
        return "Zero Rupees Only".to_string();
    }

    let rupees = amount.trunc().to_u64().unwrap_or(0);
    let paise = ((amount - amount.trunc()) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0);

    let rupee_words = if rupees == 0 {
        "Zero".to_string()
    } else {
        integer_to_words(rupees)
    };

    if paise == 0 {
        format!("{} Rupees Only", rupee_words)
    } else {
        format!(
            "{} Rupees and {} Paise Only",
            rupee_words,
            integer_to_words(paise)
        )
    }
}

/// Converts a positive integer into Indian-system words.
///
/// Returns an empty string for zero; the caller decides how to render it.
fn integer_to_words(n: u64) -> String {
    if n == 0 {
        return String::new();
    }

    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    let rest = n % 10_000_000;
    if crore > 0 {
        // Recursive composition handles amounts of 100 crore and above.
        parts.push(format!("{} Crore", integer_to_words(crore)));
    }

    let lakh = rest / 100_000;
    let rest = rest % 100_000;
    if lakh > 0 {
        parts.push(format!("{} Lakh", below_thousand(lakh)));
    }

    let thousand = rest / 1_000;
    let rest = rest % 1_000;
    if thousand > 0 {
        parts.push(format!("{} Thousand", below_thousand(thousand)));
    }

    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Renders 1-999 (hundreds, tens, ones).
fn below_thousand(n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();

    if n >= 100 {
        parts.push(format!("{} Hundred", ONES[(n / 100) as usize]));
    }

    let rem = n % 100;
    if rem >= 20 {
        let tens = TENS[(rem / 10) as usize];
        let ones = ONES[(rem % 10) as usize];
        if ones.is_empty() {
            parts.push(tens.to_string());
        } else {
            parts.push(format!("{} {}", tens, ones));
        }
    } else if rem > 0 {
        parts.push(ONES[rem as usize].to_string());
    }

    parts.join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> String {
        amount_to_words(s.parse().unwrap())
    }

    #[test]
    fn test_zero() {
        assert_eq!(words("0"), "Zero Rupees Only");
        assert_eq!(words("0.00"), "Zero Rupees Only");
    }

    #[test]
    fn test_whole_rupees() {
        assert_eq!(words("1"), "One Rupees Only");
        assert_eq!(words("42"), "Forty Two Rupees Only");
        assert_eq!(words("100"), "One Hundred Rupees Only");
        assert_eq!(
            words("1500"),
            "One Thousand Five Hundred Rupees Only"
        );
    }

    #[test]
    fn test_lakh_and_crore() {
        assert_eq!(words("100000"), "One Lakh Rupees Only");
        assert_eq!(
            words("250000"),
            "Two Lakh Fifty Thousand Rupees Only"
        );
        assert_eq!(words("10000000"), "One Crore Rupees Only");
        assert_eq!(
            words("12345678"),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Rupees Only"
        );
    }

    #[test]
    fn test_crore_count_composes_recursively() {
        // 123,45,67,890 = 123 crore 45 lakh 67 thousand 890
        assert_eq!(
            words("1234567890"),
            "One Hundred Twenty Three Crore Forty Five Lakh Sixty Seven Thousand \
             Eight Hundred Ninety Rupees Only"
        );
    }

    #[test]
    fn test_paise() {
        assert_eq!(
            words("1234.50"),
            "One Thousand Two Hundred Thirty Four Rupees and Fifty Paise Only"
        );
        assert_eq!(words("0.05"), "Zero Rupees and Five Paise Only");
        assert_eq!(words("1.01"), "One Rupees and One Paise Only");
    }

    #[test]
    fn test_paise_clause_omitted_when_zero() {
        assert_eq!(words("500.00"), "Five Hundred Rupees Only");
    }

    #[test]
    fn test_teens() {
        assert_eq!(words("14"), "Fourteen Rupees Only");
        assert_eq!(words("19000"), "Nineteen Thousand Rupees Only");
        assert_eq!(words("117"), "One Hundred Seventeen Rupees Only");
    }
}
