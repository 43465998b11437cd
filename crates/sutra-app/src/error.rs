//! # API Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Sutra Billing                          │
//! │                                                                         │
//! │  Caller                      Service Layer                              │
//! │  ──────                      ─────────────                              │
//! │                                                                         │
//! │  service.save_bill(bill)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Operation                                               │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── FieldErrors { "buyer_name": ... } ───┐   │  │
//! │  │         │                                                    │   │  │
//! │  │         ▼                                                    ▼   │  │
//! │  │  Database Error? ───── DbError::UniqueViolation ───────► ApiError│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Validation failures carry per-field messages so a form can mark        │
//! │  the offending inputs; everything else is a code + message pair.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use sutra_core::{CoreError, FieldErrors};
use sutra_db::DbError;

/// API error returned from service operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Validation failed",
///   "fields": { "buyer_name": "Buyer name is required" }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field validation messages, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Duplicate invoice number or similar uniqueness clash
    Duplicate,

    /// Database operation failed
    DatabaseError,

    /// PDF export failed
    ExportError,

    /// Drive sync configuration problem
    SyncConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error carrying per-field messages.
    pub fn validation(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            fields: Some(
                errors
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportError, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field } => ApiError::new(
                ErrorCode::Duplicate,
                format!("Duplicate {}: already exists", field),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::CorruptRecord { id, message } => {
                tracing::error!("Corrupt record {}: {}", id, message);
                ApiError::new(ErrorCode::DatabaseError, "Stored record could not be read")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BillNotFound(id) => ApiError::not_found("Bill", &id),
            CoreError::ItemNotFound(sno) => ApiError::new(
                ErrorCode::NotFound,
                format!("Line item not found: sno {}", sno),
            ),
            CoreError::LastItem => ApiError::new(
                ErrorCode::ValidationError,
                "Cannot remove the last line item",
            ),
            CoreError::Validation(errors) => ApiError::validation(errors),
        }
    }
}

/// Converts sync errors to API errors.
impl From<sutra_sync::SyncError> for ApiError {
    fn from(err: sutra_sync::SyncError) -> Self {
        if err.is_config_error() {
            ApiError::new(ErrorCode::SyncConfigError, err.to_string())
        } else {
            ApiError::export(err.to_string())
        }
    }
}

/// Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("buyer_name", "Buyer name is required");

        let api: ApiError = CoreError::Validation(errors).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        let fields = api.fields.unwrap();
        assert_eq!(
            fields.get("buyer_name").map(String::as_str),
            Some("Buyer name is required")
        );
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate() {
        let api: ApiError = DbError::UniqueViolation {
            field: "bills.invoice_no".into(),
        }
        .into();
        assert_eq!(api.code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::not_found("Bill", "abc");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Bill not found: abc");
        assert!(json.get("fields").is_none());
    }
}
