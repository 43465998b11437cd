//! # Google Drive Client
//!
//! HTTP client for the Google Apps Script web app that fronts Drive.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Apps Script Upload Protocol                         │
//! │                                                                         │
//! │  POST <script_url>                                                     │
//! │  {                                                                      │
//! │    "action": "upload",                                                 │
//! │    "filename": "invoice_SC20250001.pdf",                               │
//! │    "fileData": "data:application/pdf;base64,JVBERi0x...",              │
//! │    "folderName": "Bills/2025/04",                                      │
//! │    "existingFileId": "1aBcD..."   ← optional, enables overwrite        │
//! │  }                                                                      │
//! │                                                                         │
//! │  Response:                                                             │
//! │  { "status": "success", "fileId": "1aBcD...", "url": "https://..." }   │
//! │  { "status": "error", "message": "..." }                               │
//! │                                                                         │
//! │  Delete:                                                               │
//! │  { "action": "delete", "fileId": "1aBcD..." }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The folder path is derived from the invoice date, so Drive mirrors the
//! financial filing: one folder per year, one per month.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DriveSettings;
use crate::error::{SyncError, SyncResult};

// =============================================================================
// Wire Types
// =============================================================================

/// Upload request body for the Apps Script endpoint.
#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    action: &'static str,
    filename: String,
    #[serde(rename = "fileData")]
    file_data: String,
    #[serde(rename = "folderName")]
    folder_name: String,
    #[serde(rename = "existingFileId", skip_serializing_if = "Option::is_none")]
    existing_file_id: Option<&'a str>,
}

/// Delete request body.
#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    action: &'static str,
    #[serde(rename = "fileId")]
    file_id: &'a str,
}

/// Response from the Apps Script endpoint.
#[derive(Debug, Deserialize)]
struct ScriptResponse {
    status: String,
    #[serde(rename = "fileId", default)]
    file_id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// A file stored on Drive after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveFile {
    /// Drive file ID, used for later overwrites and deletes.
    pub file_id: String,

    /// Shareable link ("anyone with the link" viewer access).
    pub link: String,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Drive Apps Script endpoint.
#[derive(Debug, Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    settings: DriveSettings,
}

impl DriveClient {
    /// Creates a client from Drive settings.
    pub fn new(settings: DriveSettings) -> SyncResult<Self> {
        if settings.script_url.is_empty() {
            return Err(SyncError::MissingScriptUrl);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SyncError::RequestFailed(e.to_string()))?;

        Ok(DriveClient { http, settings })
    }

    /// Uploads an invoice PDF to Drive.
    ///
    /// Passing `existing_file_id` overwrites the previous upload in place, so
    /// re-exporting a corrected invoice keeps a single Drive file.
    pub async fn upload_pdf(
        &self,
        invoice_no: &str,
        pdf_bytes: &[u8],
        invoice_date: NaiveDate,
        existing_file_id: Option<&str>,
    ) -> SyncResult<DriveFile> {
        let request = UploadRequest {
            action: "upload",
            filename: invoice_filename(invoice_no),
            file_data: pdf_data_url(pdf_bytes),
            folder_name: folder_for(&self.settings.folder_root, invoice_date),
            existing_file_id,
        };

        debug!(
            invoice_no = %invoice_no,
            folder = %request.folder_name,
            overwrite = existing_file_id.is_some(),
            "Uploading invoice PDF to Drive"
        );

        let response: ScriptResponse = self
            .http
            .post(&self.settings.script_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::RequestFailed(e.to_string()))?
            .json()
            .await?;

        if response.status == "error" {
            return Err(SyncError::ScriptError(
                response.message.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        let file_id = response
            .file_id
            .ok_or_else(|| SyncError::BadResponse("missing fileId".into()))?;
        let link = response
            .url
            .ok_or_else(|| SyncError::BadResponse("missing url".into()))?;

        info!(invoice_no = %invoice_no, file_id = %file_id, "Invoice PDF uploaded to Drive");

        Ok(DriveFile { file_id, link })
    }

    /// Deletes a file from Drive.
    ///
    /// Best-effort cleanup when a bill is deleted locally; a missing remote
    /// file is not an error worth surfacing.
    pub async fn delete_file(&self, file_id: &str) -> SyncResult<()> {
        if file_id.is_empty() {
            return Ok(());
        }

        debug!(file_id = %file_id, "Deleting Drive file");

        let request = DeleteRequest {
            action: "delete",
            file_id,
        };

        self.http
            .post(&self.settings.script_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::RequestFailed(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// PDF filename for an invoice.
fn invoice_filename(invoice_no: &str) -> String {
    format!("invoice_{}.pdf", invoice_no)
}

/// Encodes PDF bytes as the data URL the Apps Script expects.
fn pdf_data_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", BASE64.encode(bytes))
}

/// Drive folder path for an invoice date: `<root>/<YYYY>/<MM>`.
fn folder_for(root: &str, date: NaiveDate) -> String {
    format!("{}/{}/{:02}", root, date.year(), date.month())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename("SC20250001"), "invoice_SC20250001.pdf");
    }

    #[test]
    fn test_pdf_data_url_prefix() {
        let url = pdf_data_url(b"%PDF-1.4");
        assert!(url.starts_with("data:application/pdf;base64,"));
        assert_eq!(url, "data:application/pdf;base64,JVBERi0xLjQ=");
    }

    #[test]
    fn test_folder_path_zero_pads_month() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        assert_eq!(folder_for("Bills", date), "Bills/2025/04");

        let december = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(folder_for("Bills", december), "Bills/2024/12");
    }

    #[test]
    fn test_upload_request_wire_shape() {
        let request = UploadRequest {
            action: "upload",
            filename: invoice_filename("SC20250001"),
            file_data: pdf_data_url(b"%PDF"),
            folder_name: folder_for("Bills", NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()),
            existing_file_id: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "upload");
        assert_eq!(json["filename"], "invoice_SC20250001.pdf");
        assert_eq!(json["folderName"], "Bills/2025/04");
        // Absent existingFileId must be omitted, not null
        assert!(json.get("existingFileId").is_none());
    }

    #[test]
    fn test_upload_request_with_overwrite() {
        let request = UploadRequest {
            action: "upload",
            filename: invoice_filename("SC20250001"),
            file_data: pdf_data_url(b"%PDF"),
            folder_name: "Bills/2025/04".to_string(),
            existing_file_id: Some("file-123"),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["existingFileId"], "file-123");
    }

    #[test]
    fn test_script_response_decoding() {
        let ok: ScriptResponse = serde_json::from_str(
            r#"{"status":"success","fileId":"abc","url":"https://drive.google.com/file/d/abc"}"#,
        )
        .unwrap();
        assert_eq!(ok.status, "success");
        assert_eq!(ok.file_id.as_deref(), Some("abc"));

        let err: ScriptResponse =
            serde_json::from_str(r#"{"status":"error","message":"quota exceeded"}"#).unwrap();
        assert_eq!(err.status, "error");
        assert_eq!(err.message.as_deref(), Some("quota exceeded"));
        assert!(err.file_id.is_none());
    }

    #[test]
    fn test_client_requires_url() {
        let err = DriveClient::new(DriveSettings::default()).unwrap_err();
        assert!(matches!(err, SyncError::MissingScriptUrl));
    }
}
