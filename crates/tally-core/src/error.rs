//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What clients see (status + JSON body)          │
//! │                                                                         │
//! │  Flow: ValidationError ──┐                                             │
//! │        DbError ──────────┴──► ApiError ──► HTTP response               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Name the offending field in every message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a request reaches storage. Every variant maps to a
/// client error (HTTP 422).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value cannot be represented (e.g., NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Request body could not be decoded into the entity's fields.
    ///
    /// ## When This Occurs
    /// - Body is not JSON
    /// - A field is missing or has the wrong type
    /// - A path id is not an integer
    #[error("{0}")]
    Malformed(String),
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "price has invalid format: must be a finite number"
        );
    }

    #[test]
    fn test_malformed_passes_message_through() {
        let err = ValidationError::Malformed("missing field `phone`".to_string());
        assert_eq!(err.to_string(), "missing field `phone`");
    }
}
