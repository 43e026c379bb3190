//! # Repository Module
//!
//! Database repository implementations for Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.customers().insert(&input)                                 │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── insert(&self, input)        → Customer (id assigned)              │
//! │  ├── get_by_id(&self, id)        → Option<Customer>                    │
//! │  ├── update(&self, id, input)    → Customer (full replace)             │
//! │  └── delete(&self, id)           → ()                                  │
//! │       │                                                                 │
//! │       │  acquire 1 connection ─► 1 SQL statement ─► release            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation checks a connection out of the pool for exactly one
//! statement. The `PoolConnection` guard returns it when it drops, on the
//! error path too. Nothing spans more than one statement.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD, phone uniqueness
//! - [`ItemRepository`](item::ItemRepository) - Item CRUD
//! - [`OrderRepository`](order::OrderRepository) - Order CRUD

pub mod customer;
pub mod item;
pub mod order;
