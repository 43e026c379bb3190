//! # HTTP Handlers
//!
//! One module per resource. Each exposes `routes()` which the top-level
//! router merges.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ Route                    │ Handlers                                     │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ /health                  │ GET                                          │
//! │ /customers               │ POST                                         │
//! │ /customers/{id}          │ GET  PUT  DELETE                             │
//! │ /items                   │ POST                                         │
//! │ /items/{id}              │ GET  PUT  DELETE                             │
//! │ /orders                  │ POST                                         │
//! │ /orders/{id}             │ GET  PUT  DELETE                             │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod health;
pub mod item;
pub mod order;

use serde::Serialize;
use tally_core::Entity;

/// Confirmation body for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub detail: String,
}

impl Deleted {
    /// `{"detail": "Customer deleted successfully"}` and friends.
    pub fn of<E: Entity>() -> Self {
        Deleted {
            detail: format!("{} deleted successfully", E::NAME),
        }
    }
}
