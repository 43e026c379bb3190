//! # Domain Types
//!
//! The three entities Tally stores, plus the input shape each one is created
//! and replaced from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Item       │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  name           │   │  customer_id ──►│ Cust. │
//! │  │  phone (UNIQUE) │   │  price (f64)    │   │  item_id ──────►│ Item  │
//! │  └─────────────────┘   └─────────────────┘   │  timestamp      │       │
//! │                                              │  notes?         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input vs Stored Shape
//! Every entity has two shapes:
//! - `NewX`: the request body for create and full replace (no `id`)
//! - `X`: the stored row, `id` assigned by the store
//!
//! `NewX::with_id` stamps an input with an id. Rows map onto `X` field by
//! field (`sqlx::FromRow` with the `sqlx` feature), never positionally.

use serde::{Deserialize, Serialize};

// =============================================================================
// Entity
// =============================================================================

/// Common surface of the stored entity types.
pub trait Entity {
    /// Human-readable entity name, used in error and confirmation messages.
    const NAME: &'static str;
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Auto-assigned primary key.
    pub id: i64,

    /// Display name. Never empty.
    pub name: String,

    /// Phone number. Unique across all customers.
    pub phone: String,
}

/// Customer fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
}

impl NewCustomer {
    /// Builds the stored customer for a given id.
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            phone: self.phone,
        }
    }
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";
}

// =============================================================================
// Item
// =============================================================================

/// An item that can be ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Unit price. No range is enforced.
    pub price: f64,
}

/// Item fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
}

impl NewItem {
    /// Builds the stored item for a given id.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

impl Entity for Item {
    const NAME: &'static str = "Item";
}

// =============================================================================
// Order
// =============================================================================

/// An order of one item by one customer.
///
/// `customer_id` and `item_id` are references by value. Whether the store
/// rejects dangling references depends on how the database was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub item_id: i64,
    /// Caller-supplied time, e.g. epoch seconds.
    pub timestamp: i64,
    /// Free-form notes. Serialized as `null` when absent.
    pub notes: Option<String>,
}

/// Order fields as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub item_id: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewOrder {
    /// Builds the stored order for a given id.
    pub fn with_id(self, id: i64) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            item_id: self.item_id,
            timestamp: self.timestamp,
            notes: self.notes,
        }
    }
}

impl Entity for Order {
    const NAME: &'static str = "Order";
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_id_keeps_submitted_fields() {
        let input = NewCustomer {
            name: "Ann".to_string(),
            phone: "555-1".to_string(),
        };
        let customer = input.clone().with_id(7);

        assert_eq!(customer.id, 7);
        assert_eq!(customer.name, input.name);
        assert_eq!(customer.phone, input.phone);
    }

    #[test]
    fn test_order_notes_default_to_none() {
        let input: NewOrder = serde_json::from_value(json!({
            "customer_id": 1,
            "item_id": 1,
            "timestamp": 1000
        }))
        .unwrap();

        assert_eq!(input.notes, None);
    }

    #[test]
    fn test_order_serializes_missing_notes_as_null() {
        let order = NewOrder {
            customer_id: 1,
            item_id: 2,
            timestamp: 1000,
            notes: None,
        }
        .with_id(3);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "customer_id": 1,
                "item_id": 2,
                "timestamp": 1000,
                "notes": null
            })
        );
    }

    #[test]
    fn test_item_accepts_integer_price() {
        let input: NewItem = serde_json::from_value(json!({
            "name": "Widget",
            "price": 10
        }))
        .unwrap();

        assert_eq!(input.price, 10.0);
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(Customer::NAME, "Customer");
        assert_eq!(Item::NAME, "Item");
        assert_eq!(Order::NAME, "Order");
    }
}
