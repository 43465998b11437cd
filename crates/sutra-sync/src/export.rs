//! # Invoice Export
//!
//! Local PDF export with best-effort Drive sync.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Export & Sync Flow                               │
//! │                                                                         │
//! │  export_and_sync(bill)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceRenderer::render(bill) ──► PDF bytes                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Write invoice_<no>.pdf to output dir   ← MUST succeed                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Drive configured?                                                     │
//! │       ├── No  ──► SyncStatus::Disabled                                 │
//! │       └── Yes ──► upload_pdf()                                         │
//! │                      ├── Ok  ──► SyncStatus::Synced { file_id, link }  │
//! │                      └── Err ──► SyncStatus::Failed(reason)            │
//! │                                                                         │
//! │  INVARIANT: a Drive failure never fails the export. The PDF is         │
//! │  already on disk; the sync is a side channel.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::drive::DriveClient;
use crate::error::{SyncError, SyncResult};
use sutra_core::Bill;

// =============================================================================
// Renderer Seam
// =============================================================================

/// Renders a bill into PDF bytes.
///
/// The layout engine is pluggable: the app wires in a concrete renderer,
/// tests use a stub. Implementations must be pure over the bill value.
pub trait InvoiceRenderer: Send + Sync {
    /// Produces the PDF document for a bill.
    fn render(&self, bill: &Bill) -> SyncResult<Vec<u8>>;
}

// =============================================================================
// Outcome Types
// =============================================================================

/// Result of the Drive side of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Uploaded; the bill should record these for overwrite on re-export.
    Synced { file_id: String, link: String },

    /// Drive sync is not configured or disabled.
    Disabled,

    /// Upload failed; the local PDF is still valid.
    Failed(String),
}

impl SyncStatus {
    /// Returns true if the PDF reached Drive.
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced { .. })
    }
}

/// Outcome of exporting one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Where the PDF landed locally.
    pub pdf_path: PathBuf,

    /// What happened on the Drive side.
    pub sync: SyncStatus,
}

// =============================================================================
// Export
// =============================================================================

/// Renders a bill to PDF, writes it locally, then syncs to Drive if enabled.
///
/// Pass `drive: None` for local-only export. The bill's existing
/// `drive_file_id` is reused so a re-export overwrites the previous upload.
pub async fn export_and_sync<R: InvoiceRenderer>(
    renderer: &R,
    bill: &Bill,
    output_dir: &Path,
    drive: Option<&DriveClient>,
) -> SyncResult<ExportOutcome> {
    let pdf_bytes = renderer.render(bill)?;

    std::fs::create_dir_all(output_dir).map_err(|e| SyncError::WriteFailed(e.to_string()))?;

    let pdf_path = output_dir.join(format!("invoice_{}.pdf", bill.invoice_no));
    std::fs::write(&pdf_path, &pdf_bytes).map_err(|e| SyncError::WriteFailed(e.to_string()))?;

    info!(
        invoice_no = %bill.invoice_no,
        path = %pdf_path.display(),
        bytes = pdf_bytes.len(),
        "Invoice PDF written"
    );

    let sync = match drive {
        None => SyncStatus::Disabled,
        Some(client) => {
            match client
                .upload_pdf(
                    &bill.invoice_no,
                    &pdf_bytes,
                    bill.invoice_date,
                    bill.drive_file_id.as_deref(),
                )
                .await
            {
                Ok(file) => SyncStatus::Synced {
                    file_id: file.file_id,
                    link: file.link,
                },
                Err(e) => {
                    warn!(invoice_no = %bill.invoice_no, error = %e, "Drive sync failed, PDF kept locally");
                    SyncStatus::Failed(e.to_string())
                }
            }
        }
    };

    Ok(ExportOutcome { pdf_path, sync })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct StubRenderer;

    impl InvoiceRenderer for StubRenderer {
        fn render(&self, bill: &Bill) -> SyncResult<Vec<u8>> {
            Ok(format!("%PDF-1.4 {}", bill.invoice_no).into_bytes())
        }
    }

    struct FailingRenderer;

    impl InvoiceRenderer for FailingRenderer {
        fn render(&self, _bill: &Bill) -> SyncResult<Vec<u8>> {
            Err(SyncError::RenderFailed("layout overflow".into()))
        }
    }

    fn sample_bill() -> Bill {
        let date = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        Bill::draft("SC20250001", date)
    }

    #[tokio::test]
    async fn test_local_only_export() {
        let dir = std::env::temp_dir().join(format!("sutra-export-{}", std::process::id()));
        let outcome = export_and_sync(&StubRenderer, &sample_bill(), &dir, None)
            .await
            .unwrap();

        assert_eq!(outcome.sync, SyncStatus::Disabled);
        assert!(outcome.pdf_path.ends_with("invoice_SC20250001.pdf"));

        let written = std::fs::read(&outcome.pdf_path).unwrap();
        assert!(written.starts_with(b"%PDF-1.4"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_local_pdf() {
        // Port 9 (discard) on loopback: the connection is refused well
        // within the 1s timeout, so upload_pdf fails deterministically.
        let client = DriveClient::new(crate::config::DriveSettings {
            script_url: "https://127.0.0.1:9/exec".to_string(),
            folder_root: "Bills".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let dir = std::env::temp_dir().join(format!("sutra-export-fail-{}", std::process::id()));
        let outcome = export_and_sync(&StubRenderer, &sample_bill(), &dir, Some(&client))
            .await
            .unwrap();

        assert!(matches!(outcome.sync, SyncStatus::Failed(_)));
        let written = std::fs::read(&outcome.pdf_path).unwrap();
        assert!(written.starts_with(b"%PDF-1.4"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_render_failure_propagates() {
        let dir = std::env::temp_dir();
        let err = export_and_sync(&FailingRenderer, &sample_bill(), &dir, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::RenderFailed(_)));
    }

    #[test]
    fn test_sync_status_predicates() {
        let synced = SyncStatus::Synced {
            file_id: "abc".into(),
            link: "https://drive.google.com/file/d/abc".into(),
        };
        assert!(synced.is_synced());
        assert!(!SyncStatus::Disabled.is_synced());
        assert!(!SyncStatus::Failed("timeout".into()).is_synced());
    }
}
