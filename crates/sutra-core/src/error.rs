//! # Domain Error Types
//!
//! Error types for the invoice logic layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (this module) ← Typed domain failures                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in sutra-app) ← Serialized for the frontend                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays field-level or toast messages                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::validation::FieldErrors;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Domain errors for invoice operations.
///
/// ## Design Principles
/// - Errors are typed, never bare strings or panics
/// - Validation failures carry the full field-keyed message map so the
///   frontend can highlight every offending field at once
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Bill lookup by identity failed.
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// Line item lookup by sequence number failed.
    #[error("Line item not found: sno {0}")]
    ItemNotFound(u32),

    /// An invoice always keeps at least one line item.
    #[error("Cannot remove the last line item")]
    LastItem,

    /// Save-time validation failed; no partial save occurred.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::BillNotFound("abc-123".into());
        assert!(err.to_string().contains("abc-123"));

        let err = CoreError::ItemNotFound(3);
        assert!(err.to_string().contains("sno 3"));
    }
}
