//! # GSTIN Validator
//!
//! Structural validation of the 15-character GST Identification Number.
//!
//! ## Format
//! ```text
//! 3 3 A G P P J 5 0 5 7 R 1 Z O
//! ─┬─ ────┬──── ──┬──── │ │ │ └─ checksum placeholder (not verified)
//!  │      │       │     │ │ └─── literal 'Z'
//!  │      │       │     │ └───── entity code (1-9 or A-Z)
//!  │      │       │     └─────── one letter
//!  │      │       └───────────── 4 digits
//!  │      └───────────────────── 5 letters (PAN holder name part)
//!  └──────────────────────────── 2-digit state code
//! ```
//!
//! This validator is advisory: it gates form submission, not data integrity
//! at the storage layer. No checksum verification is performed.

use once_cell::sync::Lazy;
use regex::Regex;

static GSTIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
        .expect("GSTIN pattern is a valid regex")
});

/// Returns true if `value` matches the 15-character GSTIN structure.
///
/// Empty or malformed input returns false; no error is raised.
///
/// ## Example
/// ```rust
/// use sutra_core::gstin::is_valid_gstin;
///
/// assert!(is_valid_gstin("33AGPPJ5057R1ZO"));
/// assert!(!is_valid_gstin("invalid"));
/// ```
pub fn is_valid_gstin(value: &str) -> bool {
    GSTIN_PATTERN.is_match(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_gstin() {
        assert!(is_valid_gstin("33AGPPJ5057R1ZO"));
        assert!(is_valid_gstin("29ABCDE1234F1Z5"));
    }

    #[test]
    fn test_invalid_gstin() {
        assert!(!is_valid_gstin(""));
        assert!(!is_valid_gstin("invalid"));
        // Too short
        assert!(!is_valid_gstin("33AGPPJ5057R1Z"));
        // Too long
        assert!(!is_valid_gstin("33AGPPJ5057R1ZO0"));
        // Lowercase letters are rejected
        assert!(!is_valid_gstin("33agppj5057r1zo"));
        // 14th character must be the literal Z
        assert!(!is_valid_gstin("33AGPPJ5057R1XO"));
        // Entity code cannot be zero
        assert!(!is_valid_gstin("33AGPPJ5057R0ZO"));
    }
}
