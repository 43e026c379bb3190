//! # tally-core: Entity Types for Tally
//!
//! Domain layer of the Tally record service. Holds the three entities
//! (customers, items, orders), the rules their inputs must satisfy, and the
//! errors raised when they don't. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    POST/GET/PUT/DELETE  /customers  /items  /orders             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ NewCustomer / NewItem / NewOrder       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ validation │  │   error   │                  │   │
//! │  │   │ Customer  │  │  Validate  │  │Validation │                  │   │
//! │  │   │ Item      │  │  rules     │  │  Error    │                  │   │
//! │  │   │ Order     │  │            │  │           │                  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │              SQLite pool, schema, repositories                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities and their create/replace inputs
//! - [`validation`] - Field rules checked before anything reaches storage
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{NewCustomer, Validate};
//!
//! let input = NewCustomer {
//!     name: "Ann".to_string(),
//!     phone: "555-1".to_string(),
//! };
//! input.validate().unwrap();
//!
//! let customer = input.with_id(1);
//! assert_eq!(customer.id, 1);
//! assert_eq!(customer.phone, "555-1");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
pub use validation::Validate;
