//! # sutra-core: Pure Invoice Logic for Sutra Billing
//!
//! This crate is the **heart** of Sutra Billing. It contains the invoice
//! calculation and query engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sutra Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Bill Form ──► Bill List ──► Dashboard ──► Invoice Preview   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ IPC                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   sutra-app (Service Layer)                     │   │
//! │  │    save_bill, list_bills, dashboard, export_bill, etc.         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sutra-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   words   │  │   query   │  │   │
//! │  │   │   Bill    │  │ Rounding  │  │  Indian   │  │  Filter   │  │   │
//! │  │   │ BillItem  │  │ GST calc  │  │ grouping  │  │ Dashboard │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   gstin   │  │ numbering │  │validation │  │  backup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sutra-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Bill, BillItem, CompanyDetails)
//! - [`money`] - Invoice arithmetic with exact decimal rounding
//! - [`words`] - Indian-numbering-system amount-in-words rendering
//! - [`gstin`] - Structural GSTIN validation
//! - [`numbering`] - Sequential invoice number derivation
//! - [`query`] - Bill filtering and dashboard aggregation
//! - [`validation`] - Save-time business rule validation
//! - [`format`] - Currency and date display formatting
//! - [`backup`] - CSV backup rendering
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal::Decimal`,
//!    rounded half-away-from-zero at 2 decimal places - never floats
//! 4. **Full Recompute**: Derived fields are recomputed from the item list on
//!    every mutation; there is no cached or incremental state
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use sutra_core::Bill;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
//! let mut bill = Bill::draft("SC20250001", date);
//!
//! bill.update_item(1, |item| {
//!     item.description = "Polyurethane roller".into();
//!     item.quantity = Decimal::from(2);
//!     item.rate = Decimal::from(500);
//! }).unwrap();
//!
//! // 1000 subtotal + 9% SGST + 9% CGST
//! assert_eq!(bill.grand_total, "1180.00".parse().unwrap());
//! assert_eq!(
//!     bill.amount_in_words,
//!     "One Thousand One Hundred Eighty Rupees Only"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod format;
pub mod gstin;
pub mod money;
pub mod numbering;
pub mod query;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sutra_core::Bill` instead of
// `use sutra_core::types::Bill`

pub use backup::backup_csv;
pub use error::{CoreError, CoreResult};
pub use format::{format_date, format_inr};
pub use gstin::is_valid_gstin;
pub use money::{round_money, BillTotals};
pub use numbering::next_invoice_number;
pub use query::{
    aggregate_dashboard, filter_bills, DashboardStats, FilterOptions, SearchField, TimeRange,
};
pub use types::{Bill, BillItem, BillStatus, CompanyDetails};
pub use validation::{validate_bill, FieldErrors};
pub use words::amount_to_words;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Invoice number prefix, combined with the calendar year: `SC2025…`
pub const INVOICE_PREFIX: &str = "SC";

/// Upper bound for a single GST rate, in percent.
///
/// ## Business Reason
/// 28% is the highest GST slab; anything above it on a form is a typo.
pub const MAX_GST_RATE_PERCENT: u32 = 28;
