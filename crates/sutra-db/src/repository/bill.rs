//! # Bill Repository
//!
//! Database operations for bill records.
//!
//! ## Record Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill Row Mapping                                 │
//! │                                                                         │
//! │  The bill is a document: scalar fields map to columns, the line         │
//! │  items are one JSON TEXT column, and every monetary value is a          │
//! │  decimal string (exact round-trip, no float drift).                     │
//! │                                                                         │
//! │  Bill (sutra-core)          bills table                                 │
//! │  ─────────────────          ───────────                                 │
//! │  items: Vec<BillItem>  ──►  items TEXT (JSON array)                     │
//! │  subtotal: Decimal     ──►  subtotal TEXT ("1250.50")                   │
//! │  invoice_date          ──►  invoice_date TEXT ("2025-04-10")            │
//! │  status                ──►  status TEXT ("final")                       │
//! │                                                                         │
//! │  `id` is the row key only; create() assigns it and the timestamps.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use sutra_core::{Bill, BillItem, BillStatus};

// =============================================================================
// Row Type
// =============================================================================

/// Raw row as stored in the `bills` table.
///
/// Decimals, items, and status stay textual here; [`TryFrom`] turns the row
/// into a domain [`Bill`] and reports corruption instead of panicking.
#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: String,
    invoice_no: String,
    invoice_date: NaiveDate,
    buyer_name: String,
    buyer_address: String,
    buyer_gstin: String,
    po_no: String,
    po_date: Option<NaiveDate>,
    dc_no: String,
    dc_date: Option<NaiveDate>,
    transport_mode: String,
    items: String,
    subtotal: String,
    sgst_rate: String,
    cgst_rate: String,
    igst_rate: String,
    sgst_amount: String,
    cgst_amount: String,
    igst_amount: String,
    grand_total: String,
    amount_in_words: String,
    status: String,
    drive_file_id: Option<String>,
    drive_link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BillRow> for Bill {
    type Error = DbError;

    fn try_from(row: BillRow) -> Result<Self, Self::Error> {
        let id = row.id.clone();
        let parse_decimal = |field: &str, value: &str| -> Result<Decimal, DbError> {
            value
                .parse()
                .map_err(|_| DbError::corrupt(&id, format!("bad decimal in {}", field)))
        };

        let items: Vec<BillItem> = serde_json::from_str(&row.items)
            .map_err(|e| DbError::corrupt(&id, format!("bad items JSON: {}", e)))?;

        let status: BillStatus = row
            .status
            .parse()
            .map_err(|e: String| DbError::corrupt(&id, e))?;

        Ok(Bill {
            subtotal: parse_decimal("subtotal", &row.subtotal)?,
            sgst_rate: parse_decimal("sgst_rate", &row.sgst_rate)?,
            cgst_rate: parse_decimal("cgst_rate", &row.cgst_rate)?,
            igst_rate: parse_decimal("igst_rate", &row.igst_rate)?,
            sgst_amount: parse_decimal("sgst_amount", &row.sgst_amount)?,
            cgst_amount: parse_decimal("cgst_amount", &row.cgst_amount)?,
            igst_amount: parse_decimal("igst_amount", &row.igst_amount)?,
            grand_total: parse_decimal("grand_total", &row.grand_total)?,
            items,
            status,
            id: row.id,
            invoice_no: row.invoice_no,
            invoice_date: row.invoice_date,
            buyer_name: row.buyer_name,
            buyer_address: row.buyer_address,
            buyer_gstin: row.buyer_gstin,
            po_no: row.po_no,
            po_date: row.po_date,
            dc_no: row.dc_no,
            dc_date: row.dc_date,
            transport_mode: row.transport_mode,
            amount_in_words: row.amount_in_words,
            drive_file_id: row.drive_file_id,
            drive_link: row.drive_link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "\
    id, invoice_no, invoice_date, buyer_name, buyer_address, buyer_gstin, \
    po_no, po_date, dc_no, dc_date, transport_mode, items, \
    subtotal, sgst_rate, cgst_rate, igst_rate, \
    sgst_amount, cgst_amount, igst_amount, grand_total, amount_in_words, \
    status, drive_file_id, drive_link, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Lists every bill, most recently created first.
    pub async fn list_all(&self) -> DbResult<Vec<Bill>> {
        let sql = format!(
            "SELECT {} FROM bills ORDER BY created_at DESC",
            SELECT_COLUMNS
        );
        let rows: Vec<BillRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    /// Gets a bill by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Bill>> {
        let sql = format!("SELECT {} FROM bills WHERE id = ?1", SELECT_COLUMNS);
        let row: Option<BillRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Bill::try_from).transpose()
    }

    /// Creates a bill, assigning its identity and timestamps.
    ///
    /// The caller's `id`, `created_at`, and `updated_at` are ignored and
    /// overwritten; the stored record is returned.
    ///
    /// ## Duplicate Invoice Numbers
    /// The UNIQUE index on `invoice_no` surfaces concurrent-derivation
    /// collisions as [`DbError::UniqueViolation`]; the caller re-derives the
    /// number and retries.
    pub async fn create(&self, bill: &Bill) -> DbResult<Bill> {
        let mut stored = bill.clone();
        stored.id = Uuid::new_v4().to_string();
        let now = Utc::now();
        stored.created_at = now;
        stored.updated_at = now;

        debug!(id = %stored.id, invoice_no = %stored.invoice_no, "Creating bill");

        let items = serialize_items(&stored.id, &stored.items)?;

        sqlx::query(
            r#"
            INSERT INTO bills (
                id, invoice_no, invoice_date, buyer_name, buyer_address, buyer_gstin,
                po_no, po_date, dc_no, dc_date, transport_mode, items,
                subtotal, sgst_rate, cgst_rate, igst_rate,
                sgst_amount, cgst_amount, igst_amount, grand_total, amount_in_words,
                status, drive_file_id, drive_link, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, ?20, ?21,
                ?22, ?23, ?24, ?25, ?26
            )
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.invoice_no)
        .bind(stored.invoice_date)
        .bind(&stored.buyer_name)
        .bind(&stored.buyer_address)
        .bind(&stored.buyer_gstin)
        .bind(&stored.po_no)
        .bind(stored.po_date)
        .bind(&stored.dc_no)
        .bind(stored.dc_date)
        .bind(&stored.transport_mode)
        .bind(&items)
        .bind(stored.subtotal.to_string())
        .bind(stored.sgst_rate.to_string())
        .bind(stored.cgst_rate.to_string())
        .bind(stored.igst_rate.to_string())
        .bind(stored.sgst_amount.to_string())
        .bind(stored.cgst_amount.to_string())
        .bind(stored.igst_amount.to_string())
        .bind(stored.grand_total.to_string())
        .bind(&stored.amount_in_words)
        .bind(stored.status.to_string())
        .bind(&stored.drive_file_id)
        .bind(&stored.drive_link)
        .bind(stored.created_at)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Rewrites a bill's data fields and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are immutable; the stored record is returned.
    pub async fn update(&self, id: &str, bill: &Bill) -> DbResult<Bill> {
        debug!(id = %id, invoice_no = %bill.invoice_no, "Updating bill");

        let mut stored = bill.clone();
        stored.id = id.to_string();
        stored.updated_at = Utc::now();

        let items = serialize_items(id, &stored.items)?;

        let result = sqlx::query(
            r#"
            UPDATE bills SET
                invoice_no = ?2, invoice_date = ?3,
                buyer_name = ?4, buyer_address = ?5, buyer_gstin = ?6,
                po_no = ?7, po_date = ?8, dc_no = ?9, dc_date = ?10,
                transport_mode = ?11, items = ?12,
                subtotal = ?13, sgst_rate = ?14, cgst_rate = ?15, igst_rate = ?16,
                sgst_amount = ?17, cgst_amount = ?18, igst_amount = ?19,
                grand_total = ?20, amount_in_words = ?21,
                status = ?22, drive_file_id = ?23, drive_link = ?24,
                updated_at = ?25
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&stored.invoice_no)
        .bind(stored.invoice_date)
        .bind(&stored.buyer_name)
        .bind(&stored.buyer_address)
        .bind(&stored.buyer_gstin)
        .bind(&stored.po_no)
        .bind(stored.po_date)
        .bind(&stored.dc_no)
        .bind(stored.dc_date)
        .bind(&stored.transport_mode)
        .bind(&items)
        .bind(stored.subtotal.to_string())
        .bind(stored.sgst_rate.to_string())
        .bind(stored.cgst_rate.to_string())
        .bind(stored.igst_rate.to_string())
        .bind(stored.sgst_amount.to_string())
        .bind(stored.cgst_amount.to_string())
        .bind(stored.igst_amount.to_string())
        .bind(stored.grand_total.to_string())
        .bind(&stored.amount_in_words)
        .bind(stored.status.to_string())
        .bind(&stored.drive_file_id)
        .bind(&stored.drive_link)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        Ok(stored)
    }

    /// Records the Drive linkage after a successful PDF sync.
    pub async fn set_drive_file(&self, id: &str, file_id: &str, link: &str) -> DbResult<()> {
        debug!(id = %id, file_id = %file_id, "Recording Drive file for bill");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE bills SET drive_file_id = ?2, drive_link = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(file_id)
        .bind(link)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        Ok(())
    }

    /// Deletes a bill entirely.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting bill");

        let result = sqlx::query("DELETE FROM bills WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        Ok(())
    }

    /// Counts all stored bills.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Serializes the item list for the JSON column.
fn serialize_items(id: &str, items: &[BillItem]) -> DbResult<String> {
    serde_json::to_string(items)
        .map_err(|e| DbError::corrupt(id, format!("cannot serialize items: {}", e)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use rust_decimal::Decimal;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_bill(invoice_no: &str) -> Bill {
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let mut bill = Bill::draft(invoice_no, date);
        bill.buyer_name = "Acme Industries".into();
        bill.buyer_address = "12 Industrial Estate, Chennai".into();
        bill.buyer_gstin = "33AGPPJ5057R1ZO".into();
        bill.update_item(1, |item| {
            item.description = "Polyurethane roller".into();
            item.hsn_code = "3926".into();
            item.quantity = Decimal::from(2);
            item.rate = Decimal::from(500);
        })
        .unwrap();
        bill
    }

    #[tokio::test]
    async fn test_create_assigns_identity() {
        let db = test_db().await;
        let created = db.bills().create(&sample_bill("SC20250001")).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.invoice_no, "SC20250001");
    }

    #[tokio::test]
    async fn test_round_trip_preserves_every_field() {
        let db = test_db().await;
        let mut bill = sample_bill("SC20250001");
        bill.po_no = "PO-7781".into();
        bill.po_date = NaiveDate::from_ymd_opt(2025, 4, 1);
        bill.transport_mode = "Road".into();

        let created = db.bills().create(&bill).await.unwrap();
        let fetched = db.bills().get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.grand_total, "1180.00".parse().unwrap());
        assert_eq!(
            fetched.amount_in_words,
            "One Thousand One Hundred Eighty Rupees Only"
        );
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.bills().get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let db = test_db().await;
        let repo = db.bills();
        repo.create(&sample_bill("SC20250001")).await.unwrap();
        repo.create(&sample_bill("SC20250002")).await.unwrap();

        let bills = repo.list_all().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert!(bills[0].created_at >= bills[1].created_at);
    }

    #[tokio::test]
    async fn test_duplicate_invoice_no_rejected() {
        let db = test_db().await;
        let repo = db.bills();
        repo.create(&sample_bill("SC20250001")).await.unwrap();

        let err = repo.create(&sample_bill("SC20250001")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_rewrites_and_refreshes_timestamp() {
        let db = test_db().await;
        let repo = db.bills();
        let created = repo.create(&sample_bill("SC20250001")).await.unwrap();

        let mut edited = created.clone();
        edited.buyer_name = "Bottling Works".into();
        edited
            .update_item(1, |item| item.rate = Decimal::from(750))
            .unwrap();

        let updated = repo.update(&created.id, &edited).await.unwrap();
        assert_eq!(updated.buyer_name, "Bottling Works");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.grand_total, "1770.00".parse().unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_bill() {
        let db = test_db().await;
        let err = db
            .bills()
            .update("no-such-id", &sample_bill("SC20250009"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_drive_file() {
        let db = test_db().await;
        let repo = db.bills();
        let created = repo.create(&sample_bill("SC20250001")).await.unwrap();

        repo.set_drive_file(&created.id, "file-abc", "https://drive.google.com/file/d/file-abc")
            .await
            .unwrap();

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.drive_file_id.as_deref(), Some("file-abc"));
        assert!(fetched.drive_link.as_deref().unwrap().contains("file-abc"));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let db = test_db().await;
        let repo = db.bills();
        let created = repo.create(&sample_bill("SC20250001")).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
