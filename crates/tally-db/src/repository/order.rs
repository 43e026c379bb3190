//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## References
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Order → Customer / Item references                      │
//! │                                                                         │
//! │  orders.customer_id ──FOREIGN KEY──► customers.id                      │
//! │  orders.item_id     ──FOREIGN KEY──► items.id                          │
//! │                                                                         │
//! │  enforce_foreign_keys = false (default)                                │
//! │    Dangling ids are stored as given.                                   │
//! │                                                                         │
//! │  enforce_foreign_keys = true                                           │
//! │    SQLite rejects the statement → DbError::ForeignKeyViolation         │
//! │                                                                         │
//! │  This repository never looks the references up itself.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Entity, NewOrder, Order};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The submitted fields plus the store-assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - Dangling reference, only when enforced
    pub async fn insert(&self, input: &NewOrder) -> DbResult<Order> {
        debug!(
            customer_id = input.customer_id,
            item_id = input.item_id,
            "Inserting order"
        );

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, item_id, timestamp, notes)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(input.customer_id)
        .bind(input.item_id)
        .bind(input.timestamp)
        .bind(&input.notes)
        .execute(&mut *conn)
        .await?;

        Ok(input.clone().with_id(result.last_insert_rowid()))
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let mut conn = self.pool.acquire().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, item_id, timestamp, notes
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(order)
    }

    /// Replaces every field of an existing order, notes included.
    ///
    /// Omitting `notes` in the replacement clears them.
    pub async fn update(&self, id: i64, input: &NewOrder) -> DbResult<Order> {
        debug!(id, "Updating order");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = ?2,
                item_id = ?3,
                timestamp = ?4,
                notes = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.customer_id)
        .bind(input.item_id)
        .bind(input.timestamp)
        .bind(&input.notes)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Order::NAME, id));
        }

        Ok(input.clone().with_id(id))
    }

    /// Deletes an order.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting order");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Order::NAME, id));
        }

        Ok(())
    }

    /// Counts total orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tally_core::{NewCustomer, NewItem};

    fn order(customer_id: i64, item_id: i64) -> NewOrder {
        NewOrder {
            customer_id,
            item_id,
            timestamp: 1000,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_without_notes_round_trips() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().orders();

        let created = repo.insert(&order(1, 1)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.notes, None);

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(order(1, 1).with_id(1)));
    }

    #[tokio::test]
    async fn test_notes_round_trip() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().orders();
        let input = NewOrder {
            notes: Some("leave at door".to_string()),
            ..order(3, 4)
        };

        let created = repo.insert(&input).await.unwrap();
        let found = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.notes.as_deref(), Some("leave at door"));
        assert_eq!(found, input.with_id(created.id));
    }

    #[tokio::test]
    async fn test_dangling_references_accepted_by_default() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.orders().insert(&order(404, 405)).await.unwrap();

        assert_eq!(db.customers().count().await.unwrap(), 0);
        assert_eq!(created.customer_id, 404);
    }

    #[tokio::test]
    async fn test_dangling_references_rejected_when_enforced() {
        let db = Database::new(DbConfig::in_memory().enforce_foreign_keys(true))
            .await
            .unwrap();

        let err = db.orders().insert(&order(404, 405)).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_valid_references_accepted_when_enforced() {
        let db = Database::new(DbConfig::in_memory().enforce_foreign_keys(true))
            .await
            .unwrap();
        let customer = db
            .customers()
            .insert(&NewCustomer {
                name: "Ann".to_string(),
                phone: "555-1".to_string(),
            })
            .await
            .unwrap();
        let item = db
            .items()
            .insert(&NewItem {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();

        let created = db
            .orders()
            .insert(&order(customer.id, item.id))
            .await
            .unwrap();

        assert_eq!(created.customer_id, customer.id);
        assert_eq!(created.item_id, item.id);
    }

    #[tokio::test]
    async fn test_update_clears_notes_when_omitted() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().orders();
        let created = repo
            .insert(&NewOrder {
                notes: Some("fragile".to_string()),
                ..order(1, 1)
            })
            .await
            .unwrap();

        let replacement = NewOrder {
            timestamp: 2000,
            ..order(2, 2)
        };
        repo.update(created.id, &replacement).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, replacement.with_id(created.id));
        assert_eq!(found.notes, None);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().orders();

        assert!(matches!(
            repo.update(1, &order(1, 1)).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(1).await,
            Err(DbError::NotFound { .. })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
