//! # sutra-app: Application Layer for Sutra Billing
//!
//! Wires the pure core, the SQLite layer, and the Drive sync layer into the
//! operation surface a frontend (or CLI) calls.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           sutra-app                                     │
//! │                                                                         │
//! │  service.rs   BillingService: drafts, CRUD, dashboard, export          │
//! │  draft.rs     DraftState: the invoice currently being edited           │
//! │  config.rs    AppConfig: company profile + filesystem paths            │
//! │  error.rs     ApiError/ErrorCode: serialized operation failures        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! ```rust,ignore
//! use sutra_app::{init_tracing, AppConfig, BillingService};
//! use sutra_db::{Database, DbConfig};
//! use sutra_sync::SyncConfig;
//!
//! init_tracing();
//! let config = AppConfig::load_or_default(None);
//! let db = Database::new(DbConfig::new(&config.paths.database)).await?;
//! let sync = SyncConfig::load_or_default(None);
//! let service = BillingService::new(db, config, sync);
//! ```

pub mod config;
pub mod draft;
pub mod error;
pub mod service;

pub use config::{AppConfig, PathSettings};
pub use draft::DraftState;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use service::BillingService;

/// Initializes structured logging for the process.
///
/// Filter via `RUST_LOG`, e.g. `RUST_LOG=sutra_db=debug,info`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}
