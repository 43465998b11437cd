//! # Domain Types
//!
//! Core domain types used throughout Sutra Billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bill       │   │    BillItem     │   │ CompanyDetails  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  sno (1-based)  │   │  name           │       │
//! │  │  invoice_no     │   │  description    │   │  gstin          │       │
//! │  │  buyer_*        │   │  hsn_code       │   │  bank details   │       │
//! │  │  items[]        │   │  quantity       │   └─────────────────┘       │
//! │  │  totals         │   │  rate           │                             │
//! │  │  status         │   │  amount (drvd)  │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │   BillStatus    │       │
//! │                                              │  ─────────────  │       │
//! │                                              │  Final          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every bill has:
//! - `id`: UUID v4 - immutable, used as the record key (never a data field)
//! - `invoice_no`: human-readable business identifier, e.g. `SC20250007`
//!
//! ## Derived-Field Invariants
//! After any mutation through the methods on [`Bill`]:
//! - every `item.amount == round(quantity × rate, 2)`
//! - `subtotal` equals the sum of item amounts
//! - each tax amount is derived from `subtotal` and its rate
//! - `grand_total == subtotal + sgst + cgst + igst`
//! - `amount_in_words` is the word form of the current grand total
//! - item `sno` values are 1-based and contiguous

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{self, item_amount};
use crate::words::amount_to_words;

// =============================================================================
// Bill Item
// =============================================================================

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillItem {
    /// 1-based sequence number, contiguous, renumbered on deletion.
    pub sno: u32,

    /// Free-text description of the goods.
    pub description: String,

    /// HSN classification code for tax purposes.
    pub hsn_code: String,

    /// Quantity (non-negative, may be fractional).
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Unit rate (non-negative currency value).
    #[ts(as = "String")]
    pub rate: Decimal,

    /// Derived: `round(quantity × rate, 2)` at all times after any edit.
    #[ts(as = "String")]
    pub amount: Decimal,
}

impl BillItem {
    /// Creates a blank line with the given sequence number.
    pub fn blank(sno: u32) -> Self {
        BillItem {
            sno,
            description: String::new(),
            hsn_code: String::new(),
            quantity: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

// =============================================================================
// Bill Status
// =============================================================================

/// Lifecycle status of a bill.
///
/// Every saved bill is marked `Final` unconditionally; there is no true
/// draft/final state machine in the workflow. The enum keeps the storage
/// representation explicit and leaves room for a future redesign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BillStatus {
    /// Saved and renderable as a tax invoice.
    #[default]
    Final,
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Final => write!(f, "final"),
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "final" => Ok(BillStatus::Final),
            other => Err(format!("Unknown bill status: '{}'", other)),
        }
    }
}

// =============================================================================
// Bill
// =============================================================================

/// One GST tax invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Unique identifier (UUID v4). Assigned by the repository on create.
    pub id: String,

    /// Human-readable invoice number, e.g. `SC20250007`.
    pub invoice_no: String,

    /// Invoice date.
    #[ts(as = "String")]
    pub invoice_date: NaiveDate,

    /// Buyer name (required at save time).
    pub buyer_name: String,

    /// Buyer postal address.
    pub buyer_address: String,

    /// Buyer GSTIN (optional; structurally validated when present).
    pub buyer_gstin: String,

    /// Purchase order reference.
    pub po_no: String,

    /// Purchase order date.
    #[ts(as = "Option<String>")]
    pub po_date: Option<NaiveDate>,

    /// Delivery challan reference.
    pub dc_no: String,

    /// Delivery challan date.
    #[ts(as = "Option<String>")]
    pub dc_date: Option<NaiveDate>,

    /// Mode of transport for delivery.
    pub transport_mode: String,

    /// Ordered line items.
    pub items: Vec<BillItem>,

    /// Derived: sum of item amounts.
    #[ts(as = "String")]
    pub subtotal: Decimal,

    /// State GST rate, percentage 0-28.
    #[ts(as = "String")]
    pub sgst_rate: Decimal,

    /// Central GST rate, percentage 0-28.
    #[ts(as = "String")]
    pub cgst_rate: Decimal,

    /// Integrated GST rate, percentage 0-28.
    #[ts(as = "String")]
    pub igst_rate: Decimal,

    /// Derived: `round(subtotal × sgst_rate / 100, 2)`.
    #[ts(as = "String")]
    pub sgst_amount: Decimal,

    /// Derived: `round(subtotal × cgst_rate / 100, 2)`.
    #[ts(as = "String")]
    pub cgst_amount: Decimal,

    /// Derived: `round(subtotal × igst_rate / 100, 2)`.
    #[ts(as = "String")]
    pub igst_amount: Decimal,

    /// Derived: subtotal plus all three tax amounts.
    #[ts(as = "String")]
    pub grand_total: Decimal,

    /// Derived: word form of the grand total.
    pub amount_in_words: String,

    /// Lifecycle status.
    pub status: BillStatus,

    /// Remote file identifier set after a successful Drive sync.
    pub drive_file_id: Option<String>,

    /// Shareable link to the synced PDF.
    pub drive_link: Option<String>,

    /// When the bill was created (set by the repository).
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the bill was last updated (refreshed by the repository).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Constructs a new empty bill: one blank item and the default
    /// intra-state tax split (SGST 9% / CGST 9% / IGST 0%).
    ///
    /// The repository overwrites `id` and the timestamps on create.
    pub fn draft(invoice_no: impl Into<String>, invoice_date: NaiveDate) -> Self {
        let now = Utc::now();
        let mut bill = Bill {
            id: String::new(),
            invoice_no: invoice_no.into(),
            invoice_date,
            buyer_name: String::new(),
            buyer_address: String::new(),
            buyer_gstin: String::new(),
            po_no: String::new(),
            po_date: None,
            dc_no: String::new(),
            dc_date: None,
            transport_mode: String::new(),
            items: vec![BillItem::blank(1)],
            subtotal: Decimal::ZERO,
            sgst_rate: Decimal::from(9),
            cgst_rate: Decimal::from(9),
            igst_rate: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            cgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            amount_in_words: String::new(),
            status: BillStatus::Final,
            drive_file_id: None,
            drive_link: None,
            created_at: now,
            updated_at: now,
        };
        bill.recompute();
        bill
    }

    /// Appends a blank line item with the next sequence number.
    pub fn add_item(&mut self) {
        let sno = self.items.len() as u32 + 1;
        self.items.push(BillItem::blank(sno));
        self.recompute();
    }

    /// Edits the line item with the given sequence number.
    ///
    /// The closure may change description, HSN code, quantity, and rate;
    /// `amount` is recomputed afterwards regardless of what it sets.
    pub fn update_item(&mut self, sno: u32, edit: impl FnOnce(&mut BillItem)) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.sno == sno)
            .ok_or(CoreError::ItemNotFound(sno))?;

        edit(item);
        self.recompute();
        Ok(())
    }

    /// Removes the line item with the given sequence number.
    ///
    /// Refuses to remove the only item; an invoice always has at least one
    /// line. Remaining items are renumbered contiguously from 1 and all
    /// derived fields are recomputed from the remaining items only.
    pub fn remove_item(&mut self, sno: u32) -> CoreResult<()> {
        if self.items.len() == 1 {
            return Err(CoreError::LastItem);
        }

        let index = self
            .items
            .iter()
            .position(|item| item.sno == sno)
            .ok_or(CoreError::ItemNotFound(sno))?;

        self.items.remove(index);
        self.recompute();
        Ok(())
    }

    /// Sets all three tax rates and recomputes the derived totals.
    ///
    /// Item amounts and subtotal are unaffected by a rate change.
    pub fn set_tax_rates(&mut self, sgst: Decimal, cgst: Decimal, igst: Decimal) {
        self.sgst_rate = sgst;
        self.cgst_rate = cgst;
        self.igst_rate = igst;
        self.recompute();
    }

    /// Recomputes every derived field from the item list and tax rates.
    ///
    /// Idempotent; safe (and cheap) to call after any mutation. This is the
    /// only code path that writes derived fields, so the invariants in the
    /// module docs hold whenever mutation goes through the methods above.
    pub fn recompute(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.sno = index as u32 + 1;
            item.amount = item_amount(item.quantity, item.rate);
        }

        let totals =
            money::recompute_totals(&self.items, self.sgst_rate, self.cgst_rate, self.igst_rate);

        self.subtotal = totals.subtotal;
        self.sgst_amount = totals.sgst_amount;
        self.cgst_amount = totals.cgst_amount;
        self.igst_amount = totals.igst_amount;
        self.grand_total = totals.grand_total;
        self.amount_in_words = amount_to_words(self.grand_total);
    }
}

// =============================================================================
// Company Details
// =============================================================================

/// The issuing company's profile, printed on every invoice.
///
/// Loaded once at process start from configuration and treated as immutable
/// for the process lifetime. The default is the built-in profile used when
/// no configuration file overrides it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyDetails {
    /// Registered company name.
    pub name: String,

    /// First tagline printed under the name.
    pub tagline1: String,

    /// Second tagline printed under the name.
    pub tagline2: String,

    /// Registered address.
    pub address: String,

    /// Company GSTIN.
    pub gstin: String,

    /// Contact email.
    pub email: String,

    /// Contact mobile number.
    pub mobile: String,

    /// Bank name for payment instructions.
    pub bank_name: String,

    /// Bank branch.
    pub bank_branch: String,

    /// Account number.
    pub account_no: String,

    /// IFSC code.
    pub ifsc_code: String,
}

impl Default for CompanyDetails {
    fn default() -> Self {
        CompanyDetails {
            name: "SUSI CORPORATION".into(),
            tagline1: "Mfrs. of : Thermoplastic, Rubber and Polyurethene Moulded Components \
                       for Engineering Industries"
                .into(),
            tagline2: "Specialists in : Industrial Components for Bottling Plants, Conveyors, \
                       Packaging Equipments, SPM's and Indigenous for Import Substitutes"
                .into(),
            address: "Old # 8, New # 17, Gnanambal Garden II Street, Ayanavaram, \
                      Chennai - 600023."
                .into(),
            gstin: "33AGPPJ5057R1ZO".into(),
            email: "susicorpn@gmail.com".into(),
            mobile: "98841 02646".into(),
            bank_name: "KARNATAKA BANK LTD.".into(),
            bank_branch: "Ayanavaram, Chennai - 600023".into(),
            account_no: "1592000100049401".into(),
            ifsc_code: "KARB0000159".into(),
        }
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

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn bill_with_items() -> Bill {
        let mut bill = Bill::draft("SC20250001", date("2025-04-10"));
        bill.update_item(1, |item| {
            item.description = "Polyurethane roller".into();
            item.hsn_code = "3926".into();
            item.quantity = dec("2");
            item.rate = dec("500");
        })
        .unwrap();
        bill.add_item();
        bill.update_item(2, |item| {
            item.description = "Rubber gasket".into();
            item.hsn_code = "4016".into();
            item.quantity = dec("10");
            item.rate = dec("25.05");
        })
        .unwrap();
        bill
    }

    #[test]
    fn test_draft_defaults() {
        let bill = Bill::draft("SC20250001", date("2025-04-10"));
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].sno, 1);
        assert_eq!(bill.sgst_rate, dec("9"));
        assert_eq!(bill.cgst_rate, dec("9"));
        assert_eq!(bill.igst_rate, dec("0"));
        assert_eq!(bill.grand_total, Decimal::ZERO);
        assert_eq!(bill.amount_in_words, "Zero Rupees Only");
        assert_eq!(bill.status, BillStatus::Final);
    }

    #[test]
    fn test_item_edit_recomputes_everything() {
        let bill = bill_with_items();
        // 2 × 500 + 10 × 25.05 = 1000 + 250.50
        assert_eq!(bill.subtotal, dec("1250.50"));
        assert_eq!(bill.sgst_amount, dec("112.55"));
        assert_eq!(bill.cgst_amount, dec("112.55"));
        assert_eq!(bill.grand_total, dec("1475.60"));
        assert_eq!(
            bill.amount_in_words,
            "One Thousand Four Hundred Seventy Five Rupees and Sixty Paise Only"
        );
    }

    #[test]
    fn test_remove_item_renumbers_contiguously() {
        let mut bill = bill_with_items();
        bill.add_item();
        bill.update_item(3, |item| {
            item.description = "Conveyor pad".into();
            item.quantity = dec("1");
            item.rate = dec("100");
        })
        .unwrap();

        bill.remove_item(2).unwrap();

        let snos: Vec<u32> = bill.items.iter().map(|item| item.sno).collect();
        assert_eq!(snos, vec![1, 2]);
        // Totals reflect the remaining items only: 1000 + 100
        assert_eq!(bill.subtotal, dec("1100.00"));
        assert_eq!(bill.grand_total, dec("1298.00"));
    }

    #[test]
    fn test_remove_missing_item() {
        let mut bill = bill_with_items();
        assert!(matches!(
            bill.remove_item(9),
            Err(CoreError::ItemNotFound(9))
        ));
    }

    #[test]
    fn test_remove_last_item_refused() {
        let mut bill = Bill::draft("SC20250001", date("2025-04-10"));
        assert!(matches!(bill.remove_item(1), Err(CoreError::LastItem)));
        assert_eq!(bill.items.len(), 1);
    }

    #[test]
    fn test_rate_change_leaves_items_untouched() {
        let mut bill = bill_with_items();
        let subtotal_before = bill.subtotal;
        let amounts_before: Vec<Decimal> = bill.items.iter().map(|item| item.amount).collect();

        bill.set_tax_rates(dec("0"), dec("0"), dec("18"));

        let amounts_after: Vec<Decimal> = bill.items.iter().map(|item| item.amount).collect();
        assert_eq!(amounts_before, amounts_after);
        assert_eq!(bill.subtotal, subtotal_before);
        assert_eq!(bill.sgst_amount, dec("0.00"));
        assert_eq!(bill.igst_amount, dec("225.09")); // 1250.50 × 0.18
        assert_eq!(bill.grand_total, dec("1475.59"));
    }

    #[test]
    fn test_serde_round_trip() {
        let bill = bill_with_items();
        let json = serde_json::to_string(&bill).unwrap();
        let back: Bill = serde_json::from_str(&json).unwrap();
        assert_eq!(bill, back);
    }

    #[test]
    fn test_default_company_profile() {
        let company = CompanyDetails::default();
        assert_eq!(company.name, "SUSI CORPORATION");
        assert!(crate::gstin::is_valid_gstin(&company.gstin));
    }
}
