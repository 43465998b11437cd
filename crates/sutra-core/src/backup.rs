//! # CSV Backup Export
//!
//! Renders the full bill list into the backup CSV format.
//!
//! ## Wire Format
//! ```text
//! Invoice No,Date,Buyer,GSTIN,Total,Status,Drive Link
//! "SC20250001","15/01/2025","Acme Industries","33AGPPJ5057R1ZO","1180.00","final",""
//! ```
//!
//! The header row is literal and unquoted; every value row is fully quoted
//! with embedded quotes doubled. This is a reporting convenience, not a
//! re-importable format — no import path exists.

use crate::format::format_date;
use crate::types::Bill;

/// The literal header row of the backup file.
const HEADER: &str = "Invoice No,Date,Buyer,GSTIN,Total,Status,Drive Link";

/// Renders `bills` into the backup CSV, one row per bill.
pub fn backup_csv(bills: &[Bill]) -> String {
    let mut out = String::with_capacity(64 * (bills.len() + 1));
    out.push_str(HEADER);
    out.push('\n');

    for bill in bills {
        let row = [
            bill.invoice_no.as_str(),
            &format_date(bill.invoice_date),
            bill.buyer_name.as_str(),
            bill.buyer_gstin.as_str(),
            &format!("{:.2}", bill.grand_total),
            &bill.status.to_string(),
            bill.drive_link.as_deref().unwrap_or(""),
        ]
        .map(quote)
        .join(",");

        out.push_str(&row);
        out.push('\n');
    }

    out
}

/// Quotes one CSV value, doubling embedded quotes.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn bill(invoice_no: &str, buyer: &str) -> Bill {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut bill = Bill::draft(invoice_no, date);
        bill.buyer_name = buyer.to_string();
        bill.buyer_gstin = "33AGPPJ5057R1ZO".to_string();
        bill.update_item(1, |item| {
            item.description = "Component".into();
            item.quantity = Decimal::ONE;
            item.rate = Decimal::from(1000);
        })
        .unwrap();
        bill
    }

    #[test]
    fn test_header_row() {
        let csv = backup_csv(&[]);
        assert_eq!(csv, "Invoice No,Date,Buyer,GSTIN,Total,Status,Drive Link\n");
    }

    #[test]
    fn test_row_rendering() {
        let csv = backup_csv(&[bill("SC20250001", "Acme Industries")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        // 1000 + 9% + 9% = 1180.00
        assert_eq!(
            lines[1],
            "\"SC20250001\",\"15/01/2025\",\"Acme Industries\",\"33AGPPJ5057R1ZO\",\
             \"1180.00\",\"final\",\"\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = backup_csv(&[bill("SC20250001", "The \"Best\" Foundry")]);
        assert!(csv.contains("\"The \"\"Best\"\" Foundry\""));
    }

    #[test]
    fn test_drive_link_column() {
        let mut b = bill("SC20250002", "Acme Industries");
        b.drive_link = Some("https://drive.google.com/file/d/xyz/view".into());
        let csv = backup_csv(&[b]);
        assert!(csv.contains("\"https://drive.google.com/file/d/xyz/view\""));
    }
}
