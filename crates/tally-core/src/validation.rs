//! # Validation Module
//!
//! Field rules for entity inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON extraction (apps/api)                                   │
//! │  ├── Body must be JSON                                                 │
//! │  └── Fields present with the right types (serde)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Customer name not empty                                           │
//! │  └── Item price is a finite number                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE (customers.phone)                                          │
//! │  └── Foreign keys (only when enforced)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_required;
//!
//! assert!(validate_required("name", "Ann").is_ok());
//! assert!(validate_required("name", "").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewCustomer, NewItem, NewOrder};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input types that check their own field rules.
pub trait Validate {
    /// Returns the first rule the value breaks, if any.
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is not empty.
///
/// Whitespace counts as content; values are stored exactly as given.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Validates that a floating-point field is a real number.
///
/// ## Rules
/// - NaN and infinities are rejected (SQLite cannot round-trip them)
/// - Any finite value is accepted, negative and zero included
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Inputs
// =============================================================================

/// Only the name is required. Any phone text is accepted, the empty string
/// included; uniqueness is left to the store.
impl Validate for NewCustomer {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)
    }
}

impl Validate for NewItem {
    fn validate(&self) -> ValidationResult<()> {
        validate_finite("price", self.price)
    }
}

/// Orders carry only integer references and optional notes; serde already
/// enforced the types, and references are not checked here.
impl Validate for NewOrder {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
