//! # Sync Error Types
//!
//! Error types for export and Drive sync operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Remote              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  RequestFailed  │  │  ScriptError            │ │
//! │  │  MissingUrl     │  │  Timeout        │  │  BadResponse            │ │
//! │  │  InvalidUrl     │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │     Local       │                                                   │
//! │  │                 │                                                   │
//! │  │  RenderFailed   │                                                   │
//! │  │  WriteFailed    │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering export and Drive upload failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid sync configuration.
    #[error("Invalid sync configuration: {0}")]
    InvalidConfig(String),

    /// Drive sync requested but no Apps Script URL configured.
    #[error("Drive script URL not configured. Set it in sync.toml or SUTRA_DRIVE_URL.")]
    MissingScriptUrl,

    /// Invalid Apps Script URL.
    #[error("Invalid Drive script URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// HTTP request to the Apps Script endpoint failed.
    #[error("Drive request failed: {0}")]
    RequestFailed(String),

    /// Request timed out.
    #[error("Drive request timeout after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The Apps Script endpoint reported an error.
    #[error("Drive script error: {0}")]
    ScriptError(String),

    /// The endpoint returned a response the client could not decode.
    #[error("Bad Drive response: {0}")]
    BadResponse(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// The invoice renderer failed to produce a PDF.
    #[error("PDF render failed: {0}")]
    RenderFailed(String),

    /// Writing the PDF to disk failed.
    #[error("Failed to write PDF: {0}")]
    WriteFailed(String),
}

impl SyncError {
    /// Returns true if the operation might succeed if retried.
    ///
    /// ## Retryable
    /// - Transport failures (network blips, timeouts)
    ///
    /// ## Not Retryable
    /// - Configuration errors (need user action)
    /// - Script errors (the remote rejected the payload)
    /// - Local render/write failures
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::RequestFailed(_) | SyncError::Timeout(_))
    }

    /// Returns true if this is a configuration error requiring user action.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::MissingScriptUrl
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured timeout here
            SyncError::Timeout(0)
        } else if err.is_decode() {
            SyncError::BadResponse(err.to_string())
        } else {
            SyncError::RequestFailed(err.to_string())
        }
    }
}
