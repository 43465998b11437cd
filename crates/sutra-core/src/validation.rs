//! # Validation Module
//!
//! Save-time validation for bills.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service layer (Rust)                                         │
//! │  └── THIS MODULE: field-keyed business rule validation                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraint on invoice_no                                   │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation aborts the whole save; there is no partial save.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::gstin::is_valid_gstin;
use crate::types::Bill;
use crate::MAX_GST_RATE_PERCENT;

/// Field-keyed validation messages, one entry per offending field.
///
/// Serialized as a plain `{ field: message }` object so the frontend can
/// highlight every invalid field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records a message for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Returns true if no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterates over (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// Validates a bill before save.
///
/// ## Rules
/// - `buyer_name` must be non-empty
/// - `buyer_gstin`, when present, must be structurally valid
/// - every line item must have a description
/// - each tax rate must lie in 0..=28 percent
/// - the grand total must be greater than zero
pub fn validate_bill(bill: &Bill) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if bill.buyer_name.trim().is_empty() {
        errors.insert("buyer_name", "Buyer name is required");
    }

    // GSTIN is optional (unregistered buyers), but must be well-formed
    // when supplied.
    let gstin = bill.buyer_gstin.trim();
    if !gstin.is_empty() && !is_valid_gstin(gstin) {
        errors.insert("buyer_gstin", "Invalid GSTIN format");
    }

    if bill
        .items
        .iter()
        .any(|item| item.description.trim().is_empty())
    {
        errors.insert("items", "All items must have a description");
    }

    let max = rust_decimal::Decimal::from(MAX_GST_RATE_PERCENT);
    for (field, rate) in [
        ("sgst_rate", bill.sgst_rate),
        ("cgst_rate", bill.cgst_rate),
        ("igst_rate", bill.igst_rate),
    ] {
        if rate.is_sign_negative() || rate > max {
            errors.insert(field, format!("Rate must be between 0 and {}%", max));
        }
    }

    if bill.grand_total <= rust_decimal::Decimal::ZERO {
        errors.insert("grand_total", "Invoice total must be greater than zero");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn valid_bill() -> Bill {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let mut bill = Bill::draft("SC20250001", date);
        bill.buyer_name = "Acme Industries".into();
        bill.buyer_gstin = "33AGPPJ5057R1ZO".into();
        bill.update_item(1, |item| {
            item.description = "Polyurethane roller".into();
            item.quantity = Decimal::from(2);
            item.rate = Decimal::from(500);
        })
        .unwrap();
        bill
    }

    #[test]
    fn test_valid_bill_passes() {
        assert!(validate_bill(&valid_bill()).is_ok());
    }

    #[test]
    fn test_missing_buyer_name() {
        let mut bill = valid_bill();
        bill.buyer_name = "   ".into();
        let errors = validate_bill(&bill).unwrap_err();
        assert_eq!(errors.get("buyer_name"), Some("Buyer name is required"));
    }

    #[test]
    fn test_empty_gstin_is_allowed() {
        let mut bill = valid_bill();
        bill.buyer_gstin = String::new();
        assert!(validate_bill(&bill).is_ok());
    }

    #[test]
    fn test_malformed_gstin_rejected() {
        let mut bill = valid_bill();
        bill.buyer_gstin = "NOT-A-GSTIN".into();
        let errors = validate_bill(&bill).unwrap_err();
        assert_eq!(errors.get("buyer_gstin"), Some("Invalid GSTIN format"));
    }

    #[test]
    fn test_item_without_description() {
        let mut bill = valid_bill();
        bill.add_item(); // blank description, but non-zero totals remain
        let errors = validate_bill(&bill).unwrap_err();
        assert!(errors.get("items").is_some());
    }

    #[test]
    fn test_rate_out_of_range() {
        let mut bill = valid_bill();
        bill.set_tax_rates(Decimal::from(30), Decimal::from(9), Decimal::ZERO);
        let errors = validate_bill(&bill).unwrap_err();
        assert!(errors.get("sgst_rate").is_some());
        assert!(errors.get("cgst_rate").is_none());
    }

    #[test]
    fn test_zero_total_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let mut bill = Bill::draft("SC20250001", date);
        bill.buyer_name = "Acme Industries".into();
        bill.update_item(1, |item| {
            item.description = "Placeholder".into();
        })
        .unwrap();
        let errors = validate_bill(&bill).unwrap_err();
        assert!(errors.get("grand_total").is_some());
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let bill = Bill::draft("SC20250001", date);
        let errors = validate_bill(&bill).unwrap_err();
        assert!(errors.get("buyer_name").is_some());
        assert!(errors.get("items").is_some());
        assert!(errors.get("grand_total").is_some());
    }
}
