//! # sutra-sync: Drive Sync Layer for Sutra Billing
//!
//! This crate provides invoice PDF export and Google Drive synchronization.
//! Bills live locally; Drive carries a shareable copy of each exported PDF.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sync Layer Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  export_and_sync (export.rs)                     │  │
//! │  │                                                                  │  │
//! │  │  Renders via the InvoiceRenderer seam, writes the PDF to disk,  │  │
//! │  │  then hands the bytes to the DriveClient if sync is enabled.    │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┴─────────────────────┐                  │
//! │         ▼                                           ▼                   │
//! │  ┌────────────────┐                        ┌────────────────────────┐  │
//! │  │  DriveClient   │                        │  SyncConfig            │  │
//! │  │  (drive.rs)    │                        │  (config.rs)           │  │
//! │  │                │                        │                        │  │
//! │  │  Apps Script   │                        │  sync.toml + env vars  │  │
//! │  │  upload/delete │                        │  SUTRA_DRIVE_URL etc.  │  │
//! │  └────────────────┘                        └────────────────────────┘  │
//! │                                                                         │
//! │  DESIGN RULE: the local PDF is the source of truth. Drive is a         │
//! │  best-effort mirror; its failures are reported, never fatal.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod drive;
pub mod error;
pub mod export;

pub use config::{DriveSettings, SyncConfig};
pub use drive::{DriveClient, DriveFile};
pub use error::{SyncError, SyncResult};
pub use export::{export_and_sync, ExportOutcome, InvoiceRenderer, SyncStatus};
