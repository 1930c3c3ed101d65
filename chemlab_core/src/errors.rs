//! # Error Types
//!
//! Structured errors for the fallible edges of chemlab_core: storage I/O,
//! JSON handling and store input checks.
//!
//! The calculation engine does not use these. A calculation that cannot be
//! performed returns `None`; see [`crate::calculations`].
//!
//! ## Example
//!
//! ```rust
//! use chemlab_core::errors::{LabError, LabResult};
//!
//! fn validate_quantity(quantity: f64) -> LabResult<()> {
//!     if quantity < 0.0 {
//!         return Err(LabError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chemlab_core operations
pub type LabResult<T> = Result<T, LabError>;

/// Structured error type for store and storage operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LabError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No record with the given id exists in the collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Key-value storage failure
    #[error("Storage error: {operation} on '{key}' - {reason}")]
    StorageError {
        operation: String,
        key: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Persisted state was written by a newer schema
    #[error("Version mismatch: stored version {found}, supported up to {supported}")]
    VersionMismatch { found: u32, supported: u32 },
}

impl LabError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        LabError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        LabError::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Create a StorageError
    pub fn storage(operation: impl Into<String>, key: impl Into<String>, reason: impl Into<String>) -> Self {
        LabError::StorageError {
            operation: operation.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LabError::InvalidInput { .. } => "INVALID_INPUT",
            LabError::NotFound { .. } => "NOT_FOUND",
            LabError::StorageError { .. } => "STORAGE_ERROR",
            LabError::SerializationError { .. } => "SERIALIZATION_ERROR",
            LabError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(e: serde_json::Error) -> Self {
        LabError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = LabError::invalid_input("groups_count", "0", "At least one group is required");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: LabError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LabError::not_found("Inventory item", "abc").error_code(), "NOT_FOUND");
        assert_eq!(LabError::storage("write", "k", "disk full").error_code(), "STORAGE_ERROR");
        let version = LabError::VersionMismatch { found: 3, supported: 0 };
        assert_eq!(version.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_not_found_message() {
        let err = LabError::not_found("Lab work", 42);
        assert_eq!(err.to_string(), "Lab work not found: 42");
    }
}
