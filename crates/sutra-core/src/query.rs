//! # Bill Query Engine
//!
//! Filtering and dashboard aggregation over in-memory bill lists.
//!
//! ## Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       filter_bills Pipeline                             │
//! │                                                                         │
//! │  bills ──► date window ──► field search ──► sort (date desc) ──► out   │
//! │                                                                         │
//! │  Date window:  1/3/6 calendar months back from `today`, or the          │
//! │                explicit custom start/end bounds                         │
//! │  Field search: case-insensitive substring on buyer name, invoice        │
//! │                number, or buyer GSTIN                                   │
//! │  Sort:         invoice date descending, stable on ties                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are pure and total: `today` is a parameter (no clock
//! reads), empty input yields empty output, and every aggregate is derived
//! fresh on each call with no caching.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::types::Bill;

// =============================================================================
// Filter Options
// =============================================================================

/// Date-window selection for bill listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeRange {
    /// Bills from the last calendar month.
    #[serde(rename = "last1month")]
    LastMonth,

    /// Bills from the last 3 calendar months.
    #[serde(rename = "last3months")]
    Last3Months,

    /// Bills from the last 6 calendar months.
    #[default]
    #[serde(rename = "last6months")]
    Last6Months,

    /// Explicit start/end bounds from the options.
    #[serde(rename = "custom")]
    Custom,
}

/// Which bill field the search term matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SearchField {
    /// Match against the buyer name.
    #[default]
    BuyerName,

    /// Match against the invoice number.
    InvoiceNo,

    /// Match against the buyer GSTIN.
    Gstin,
}

/// A listing query descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterOptions {
    /// Date window selection.
    pub time_range: TimeRange,

    /// Lower date bound; only consulted when `time_range` is `Custom`.
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,

    /// Upper date bound; only consulted when `time_range` is `Custom`.
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,

    /// Free-text search term; empty means no text filter.
    pub search_term: String,

    /// Field the search term matches against.
    pub search_field: SearchField,
}

// =============================================================================
// Filtering
// =============================================================================

/// Filters and orders a bill list according to `options`.
///
/// `today` anchors the relative time ranges; callers pass the current date
/// (`Utc::now().date_naive()`), tests pass a fixed one.
///
/// ## Behavior
/// 1. Retain bills with `invoice_date >= start` where start is derived from
///    the time range (or `start_date` when custom). With `Custom` and an
///    `end_date`, additionally require `invoice_date <= end`. No date filter
///    applies when no bound resolves (custom with neither date set).
/// 2. If `search_term` is non-empty, keep only bills whose selected field
///    contains the term, case-insensitively.
/// 3. Sort by invoice date descending; ties keep their relative order.
pub fn filter_bills(bills: &[Bill], options: &FilterOptions, today: NaiveDate) -> Vec<Bill> {
    let start = match options.time_range {
        TimeRange::LastMonth => today.checked_sub_months(Months::new(1)),
        TimeRange::Last3Months => today.checked_sub_months(Months::new(3)),
        TimeRange::Last6Months => today.checked_sub_months(Months::new(6)),
        TimeRange::Custom => options.start_date,
    };
    let end = match options.time_range {
        TimeRange::Custom => options.end_date,
        _ => None,
    };

    let term = options.search_term.trim().to_lowercase();

    let mut result: Vec<Bill> = bills
        .iter()
        .filter(|bill| start.map_or(true, |s| bill.invoice_date >= s))
        .filter(|bill| end.map_or(true, |e| bill.invoice_date <= e))
        .filter(|bill| {
            if term.is_empty() {
                return true;
            }
            let haystack = match options.search_field {
                SearchField::BuyerName => &bill.buyer_name,
                SearchField::InvoiceNo => &bill.invoice_no,
                SearchField::Gstin => &bill.buyer_gstin,
            };
            haystack.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    // sort_by is stable, so equal dates keep their input order.
    result.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
    result
}

// =============================================================================
// Dashboard Aggregation
// =============================================================================

/// Revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyRevenue {
    /// `{year}-{2-digit month}` key, e.g. `2025-04`.
    pub month: String,

    /// Summed grand totals for the month.
    #[ts(as = "String")]
    pub revenue: Decimal,
}

/// Revenue attributed to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRevenue {
    /// Buyer name, matched exactly and case-sensitively.
    pub name: String,

    /// Summed grand totals for the customer.
    #[ts(as = "String")]
    pub amount: Decimal,
}

/// Derived, non-persisted dashboard aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// Sum of grand totals over all bills.
    #[ts(as = "String")]
    pub total_revenue: Decimal,

    /// Number of bills.
    pub total_bills: u64,

    /// Summed SGST amounts.
    #[ts(as = "String")]
    pub sgst_collected: Decimal,

    /// Summed CGST amounts.
    #[ts(as = "String")]
    pub cgst_collected: Decimal,

    /// Summed IGST amounts.
    #[ts(as = "String")]
    pub igst_collected: Decimal,

    /// Chronologically ascending monthly revenue, most recent 6 months with
    /// data. Months without bills are absent (no zero-filling).
    pub monthly_revenue: Vec<MonthlyRevenue>,

    /// Top 5 customers by summed revenue, descending; ties keep first-seen
    /// order.
    pub top_customers: Vec<CustomerRevenue>,
}

/// Aggregates a bill list into dashboard statistics.
pub fn aggregate_dashboard(bills: &[Bill]) -> DashboardStats {
    let total_revenue: Decimal = bills.iter().map(|bill| bill.grand_total).sum();
    let sgst_collected: Decimal = bills.iter().map(|bill| bill.sgst_amount).sum();
    let cgst_collected: Decimal = bills.iter().map(|bill| bill.cgst_amount).sum();
    let igst_collected: Decimal = bills.iter().map(|bill| bill.igst_amount).sum();

    // BTreeMap keeps the YYYY-MM keys in ascending order for free.
    let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
    for bill in bills {
        let key = format!(
            "{}-{:02}",
            bill.invoice_date.year(),
            bill.invoice_date.month()
        );
        *by_month.entry(key).or_insert(Decimal::ZERO) += bill.grand_total;
    }
    let mut monthly_revenue: Vec<MonthlyRevenue> = by_month
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect();
    if monthly_revenue.len() > 6 {
        monthly_revenue = monthly_revenue.split_off(monthly_revenue.len() - 6);
    }

    // Vec grouping preserves first-seen order, which decides ties below.
    let mut by_customer: Vec<CustomerRevenue> = Vec::new();
    for bill in bills {
        match by_customer
            .iter_mut()
            .find(|entry| entry.name == bill.buyer_name)
        {
            Some(entry) => entry.amount += bill.grand_total,
            None => by_customer.push(CustomerRevenue {
                name: bill.buyer_name.clone(),
                amount: bill.grand_total,
            }),
        }
    }
    by_customer.sort_by(|a, b| b.amount.cmp(&a.amount));
    by_customer.truncate(5);

    DashboardStats {
        total_revenue,
        total_bills: bills.len() as u64,
        sgst_collected,
        cgst_collected,
        igst_collected,
        monthly_revenue,
        top_customers: by_customer,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
