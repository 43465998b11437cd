//! # Invoice Numbering
//!
//! Derives the next sequential invoice number for the current calendar year.
//!
//! ## Format
//! `SC<year><4-digit sequence>`, e.g. `SC20250007`.
//!
//! ## Known Limitation
//! The derivation scans the FULL set of existing invoice numbers. Two
//! concurrent creators can derive the same number; the database's UNIQUE
//! constraint on `invoice_no` surfaces the collision so the caller can
//! re-derive and retry.

use crate::types::Bill;
use crate::INVOICE_PREFIX;

/// Derives the next invoice number for `year` from the existing bills.
///
/// ## Rule
/// Scan numbers with prefix `SC<year>`, parse the trailing numeric suffix
/// of each (non-numeric suffixes contribute 0), take the maximum, add 1,
/// and zero-pad to 4 digits. With no match for the year the sequence
/// starts at `0001`.
///
/// ## Example
/// ```text
/// ["SC20250001", "SC20250003"] + year 2025 → "SC20250004"
/// []                           + year 2025 → "SC20250001"
/// ```
pub fn next_invoice_number(bills: &[Bill], year: i32) -> String {
    next_from_numbers(bills.iter().map(|bill| bill.invoice_no.as_str()), year)
}

/// Same derivation over raw invoice-number strings.
pub fn next_from_numbers<'a>(numbers: impl IntoIterator<Item = &'a str>, year: i32) -> String {
    let prefix = format!("{}{}", INVOICE_PREFIX, year);

    let max_suffix = numbers
        .into_iter()
        .filter_map(|number| number.strip_prefix(prefix.as_str()))
        .map(|suffix| suffix.parse::<u32>().unwrap_or(0))
        .max()
        .unwrap_or(0);

    format!("{}{:04}", prefix, max_suffix + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_after_existing() {
        let numbers = ["SC20250001", "SC20250003"];
        assert_eq!(next_from_numbers(numbers, 2025), "SC20250004");
    }

    #[test]
    fn test_first_of_the_year() {
        assert_eq!(next_from_numbers([], 2025), "SC20250001");
        // Older years do not advance the sequence
        let numbers = ["SC20240099", "SC20230012"];
        assert_eq!(next_from_numbers(numbers, 2025), "SC20250001");
    }

    #[test]
    fn test_non_numeric_suffix_contributes_zero() {
        let numbers = ["SC2025ABCD", "SC20250002"];
        assert_eq!(next_from_numbers(numbers, 2025), "SC20250003");
    }

    #[test]
    fn test_sequence_beyond_padding() {
        let numbers = ["SC20259999"];
        assert_eq!(next_from_numbers(numbers, 2025), "SC202510000");
    }
}
