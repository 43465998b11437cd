//! # Billing Service
//!
//! The application's operation surface: everything a frontend or CLI calls.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      BillingService Operations                          │
//! │                                                                         │
//! │  Drafting                                                              │
//! │  ────────                                                              │
//! │  new_draft()          derive next invoice number, open a draft         │
//! │  draft()              read the current draft                           │
//! │  edit_draft(f)        mutate the draft (totals recompute inside)       │
//! │  discard_draft()      drop the draft                                   │
//! │  save_draft()         validate + persist the draft, then clear it      │
//! │                                                                         │
//! │  Records                                                               │
//! │  ───────                                                               │
//! │  list_bills(filter)   filtered, newest-invoice-first                   │
//! │  get_bill(id)                                                          │
//! │  save_bill(bill)      validate + create                                │
//! │  update_bill(id, b)   validate + full rewrite                          │
//! │  delete_bill(id)      local delete + best-effort Drive cleanup         │
//! │                                                                         │
//! │  Reporting                                                             │
//! │  ─────────                                                             │
//! │  dashboard()          revenue/tax totals, monthly series, top buyers   │
//! │  backup_csv()         CSV snapshot of every bill                       │
//! │  write_backup()       backup_csv written into the export dir           │
//! │                                                                         │
//! │  Export                                                                │
//! │  ──────                                                                │
//! │  export_bill(id, r)   render PDF, write locally, sync to Drive,        │
//! │                       record the Drive link on the bill                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Utc};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::draft::DraftState;
use crate::error::{ApiError, ApiResult};
use sutra_core::{
    aggregate_dashboard, backup_csv, filter_bills, next_invoice_number, validate_bill, Bill,
    DashboardStats, FilterOptions,
};
use sutra_db::Database;
use sutra_sync::{
    export_and_sync, DriveClient, ExportOutcome, InvoiceRenderer, SyncConfig, SyncStatus,
};

/// The billing application service.
///
/// Holds the database, the company profile, the current draft, and the
/// optional Drive client. Clone freely; all state is shared.
#[derive(Clone)]
pub struct BillingService {
    db: Database,
    config: AppConfig,
    draft: DraftState,
    drive: Option<DriveClient>,
}

impl BillingService {
    /// Wires the service together from its configuration.
    ///
    /// Drive sync that is enabled but misconfigured degrades to local-only
    /// with a warning rather than refusing to start.
    pub fn new(db: Database, config: AppConfig, sync: SyncConfig) -> Self {
        let drive = if sync.is_sync_enabled() {
            match DriveClient::new(sync.drive.clone()) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Drive sync disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        BillingService {
            db,
            config,
            draft: DraftState::new(),
            drive,
        }
    }

    /// The configured company profile.
    pub fn company(&self) -> &sutra_core::CompanyDetails {
        &self.config.company
    }

    // =========================================================================
    // Drafting
    // =========================================================================

    /// Opens a new draft with the next invoice number for the current year.
    pub async fn new_draft(&self) -> ApiResult<Bill> {
        let today = Utc::now().date_naive();
        let bills = self.db.bills().list_all().await?;
        let invoice_no = next_invoice_number(&bills, today.year());

        info!(invoice_no = %invoice_no, "Opening new draft");

        let bill = Bill::draft(invoice_no, today);
        self.draft.start(bill.clone());
        Ok(bill)
    }

    /// Returns a copy of the current draft, if any.
    pub fn draft(&self) -> Option<Bill> {
        self.draft.with_draft(Clone::clone)
    }

    /// Edits the current draft in place.
    pub fn edit_draft<T>(&self, f: impl FnOnce(&mut Bill) -> T) -> ApiResult<T> {
        self.draft
            .with_draft_mut(f)
            .ok_or_else(|| ApiError::internal("No draft in progress"))
    }

    /// Discards the current draft.
    pub fn discard_draft(&self) {
        self.draft.clear();
    }

    /// Validates and persists the current draft, clearing it on success.
    pub async fn save_draft(&self) -> ApiResult<Bill> {
        let bill = self
            .draft
            .with_draft(Clone::clone)
            .ok_or_else(|| ApiError::internal("No draft in progress"))?;

        let saved = self.save_bill(bill).await?;
        self.draft.clear();
        Ok(saved)
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Lists bills matching the filter, newest invoice date first.
    pub async fn list_bills(&self, options: &FilterOptions) -> ApiResult<Vec<Bill>> {
        let bills = self.db.bills().list_all().await?;
        let today = Utc::now().date_naive();
        Ok(filter_bills(&bills, options, today))
    }

    /// Fetches one bill.
    pub async fn get_bill(&self, id: &str) -> ApiResult<Bill> {
        self.db
            .bills()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Bill", id))
    }

    /// Validates and stores a new bill.
    pub async fn save_bill(&self, mut bill: Bill) -> ApiResult<Bill> {
        bill.recompute();
        validate_bill(&bill).map_err(ApiError::validation)?;

        let saved = self.db.bills().create(&bill).await?;
        info!(id = %saved.id, invoice_no = %saved.invoice_no, "Bill saved");
        Ok(saved)
    }

    /// Validates and rewrites an existing bill.
    pub async fn update_bill(&self, id: &str, mut bill: Bill) -> ApiResult<Bill> {
        bill.recompute();
        validate_bill(&bill).map_err(ApiError::validation)?;

        let updated = self.db.bills().update(id, &bill).await?;
        info!(id = %id, invoice_no = %updated.invoice_no, "Bill updated");
        Ok(updated)
    }

    /// Deletes a bill and, best-effort, its Drive copy.
    pub async fn delete_bill(&self, id: &str) -> ApiResult<()> {
        let bill = self.get_bill(id).await?;
        self.db.bills().delete(id).await?;
        info!(id = %id, invoice_no = %bill.invoice_no, "Bill deleted");

        // The local record is gone; a stale Drive file is an annoyance,
        // not an error.
        if let (Some(client), Some(file_id)) = (&self.drive, &bill.drive_file_id) {
            if let Err(e) = client.delete_file(file_id).await {
                warn!(file_id = %file_id, error = %e, "Failed to delete Drive file");
            }
        }

        Ok(())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Aggregates dashboard statistics over every stored bill.
    pub async fn dashboard(&self) -> ApiResult<DashboardStats> {
        let bills = self.db.bills().list_all().await?;
        Ok(aggregate_dashboard(&bills))
    }

    /// Returns the CSV backup of every stored bill.
    pub async fn backup_csv(&self) -> ApiResult<String> {
        let bills = self.db.bills().list_all().await?;
        Ok(backup_csv(&bills))
    }

    /// Writes the CSV backup into the export directory.
    ///
    /// The filename carries the date so repeated backups do not clobber
    /// each other within a day's granularity.
    pub async fn write_backup(&self) -> ApiResult<std::path::PathBuf> {
        let csv = self.backup_csv().await?;

        let dir = &self.config.paths.export_dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| ApiError::internal(format!("Failed to create export dir: {}", e)))?;

        let filename = format!("bills_backup_{}.csv", Utc::now().format("%Y-%m-%d"));
        let path = dir.join(filename);
        std::fs::write(&path, csv)
            .map_err(|e| ApiError::internal(format!("Failed to write backup: {}", e)))?;

        info!(path = %path.display(), "CSV backup written");
        Ok(path)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Exports a bill to PDF and syncs it to Drive if configured.
    ///
    /// A successful upload records the Drive file on the bill so the next
    /// export overwrites the same file. A failed upload still leaves the
    /// local PDF in place and reports the failure in the outcome.
    pub async fn export_bill<R: InvoiceRenderer>(
        &self,
        id: &str,
        renderer: &R,
    ) -> ApiResult<ExportOutcome> {
        let bill = self.get_bill(id).await?;

        let outcome = export_and_sync(
            renderer,
            &bill,
            &self.config.paths.export_dir,
            self.drive.as_ref(),
        )
        .await?;

        if let SyncStatus::Synced { file_id, link } = &outcome.sync {
            self.db.bills().set_drive_file(id, file_id, link).await?;
        }

        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
