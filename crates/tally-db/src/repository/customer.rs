//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Phone Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Enforces Unique Phones                           │
//! │                                                                         │
//! │  insert { name: "Bob", phone: "555-1" }                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO customers ...   ← no read-before-write                    │
//! │       │                                                                 │
//! │       ├── OK ──────────────────────────► Customer { id: 2, .. }        │
//! │       │                                                                 │
//! │       └── "UNIQUE constraint failed: customers.phone"                  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           DbError::UniqueViolation { field: "phone", value: "555-1" }  │
//! │                                                                         │
//! │  The UNIQUE index decides, so two racing inserts can't both win.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Customer, Entity, NewCustomer};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let customer = repo.insert(&input).await?;
/// let found = repo.get_by_id(customer.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The submitted fields plus the store-assigned id
    /// * `Err(DbError::UniqueViolation)` - Phone already belongs to a customer
    pub async fn insert(&self, input: &NewCustomer) -> DbResult<Customer> {
        debug!(phone = %input.phone, "Inserting customer");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("INSERT INTO customers (name, phone) VALUES (?1, ?2)")
            .bind(&input.name)
            .bind(&input.phone)
            .execute(&mut *conn)
            .await
            .map_err(|e| phone_conflict(e, &input.phone))?;

        Ok(input.clone().with_id(result.last_insert_rowid()))
    }

    /// Gets a customer by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let mut conn = self.pool.acquire().await?;

        let customer =
            sqlx::query_as::<_, Customer>("SELECT id, name, phone FROM customers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(customer)
    }

    /// Replaces every field of an existing customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The submitted fields stamped with `id`
    /// * `Err(DbError::NotFound)` - No customer has this id
    /// * `Err(DbError::UniqueViolation)` - Phone belongs to another customer
    pub async fn update(&self, id: i64, input: &NewCustomer) -> DbResult<Customer> {
        debug!(id, phone = %input.phone, "Updating customer");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("UPDATE customers SET name = ?2, phone = ?3 WHERE id = ?1")
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .execute(&mut *conn)
            .await
            .map_err(|e| phone_conflict(e, &input.phone))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Customer::NAME, id));
        }

        Ok(input.clone().with_id(id))
    }

    /// Deletes a customer.
    ///
    /// Orders that reference the customer are left in place unless foreign
    /// keys are enforced, in which case the delete fails.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Customer::NAME, id));
        }

        Ok(())
    }

    /// Counts total customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

/// Attaches the offending phone to a unique violation.
fn phone_conflict(err: sqlx::Error, phone: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, phone),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tally_core::NewOrder;

    fn ann() -> NewCustomer {
        NewCustomer {
            name: "Ann".to_string(),
            phone: "555-1".to_string(),
        }
    }

    async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let repo = database().await.customers();

        let created = repo.insert(&ann()).await.unwrap();
        assert_eq!(created.id, 1);

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(ann().with_id(1)));
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_sequence() {
        let repo = database().await.customers();

        let first = repo.insert(&ann()).await.unwrap();
        let second = repo
            .insert(&NewCustomer {
                name: "Bob".to_string(),
                phone: "555-2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(second.id, first.id + 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_phone_conflicts_regardless_of_name() {
        let repo = database().await.customers();
        repo.insert(&ann()).await.unwrap();

        let err = repo
            .insert(&NewCustomer {
                name: "Someone Else".to_string(),
                phone: "555-1".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "phone");
                assert_eq!(value.as_deref(), Some("555-1"));
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_phone_is_stored_and_unique() {
        let repo = database().await.customers();
        let blank = NewCustomer {
            name: "Ann".to_string(),
            phone: String::new(),
        };

        let created = repo.insert(&blank).await.unwrap();
        assert_eq!(
            repo.get_by_id(created.id).await.unwrap(),
            Some(blank.clone().with_id(created.id))
        );

        let err = repo
            .insert(&NewCustomer {
                name: "Bob".to_string(),
                ..blank
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, value: Some(ref value) }
                if field == "phone" && value.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = database().await.customers();

        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = database().await.customers();
        let created = repo.insert(&ann()).await.unwrap();

        let replacement = NewCustomer {
            name: "Annie".to_string(),
            phone: "555-9".to_string(),
        };
        let updated = repo.update(created.id, &replacement).await.unwrap();
        assert_eq!(updated, replacement.clone().with_id(created.id));

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(replacement.with_id(created.id)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_changes_nothing() {
        let repo = database().await.customers();
        let created = repo.insert(&ann()).await.unwrap();

        let err = repo.update(42, &ann()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { id: 42, .. }));

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_update_to_taken_phone_conflicts() {
        let repo = database().await.customers();
        repo.insert(&ann()).await.unwrap();
        let bob = repo
            .insert(&NewCustomer {
                name: "Bob".to_string(),
                phone: "555-2".to_string(),
            })
            .await
            .unwrap();

        let err = repo
            .update(
                bob.id,
                &NewCustomer {
                    name: "Bob".to_string(),
                    phone: "555-1".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.get_by_id(bob.id).await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = database().await.customers();
        let created = repo.insert(&ann()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Customer"));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_referenced_customer_is_allowed_by_default() {
        let db = database().await;
        let customer = db.customers().insert(&ann()).await.unwrap();
        db.orders()
            .insert(&NewOrder {
                customer_id: customer.id,
                item_id: 1,
                timestamp: 1000,
                notes: None,
            })
            .await
            .unwrap();

        db.customers().delete(customer.id).await.unwrap();
        assert_eq!(db.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_referenced_customer_fails_when_enforced() {
        let db = Database::new(DbConfig::in_memory().enforce_foreign_keys(true))
            .await
            .unwrap();
        let customer = db.customers().insert(&ann()).await.unwrap();
        let item = db
            .items()
            .insert(&tally_core::NewItem {
                name: "Widget".to_string(),
                price: 9.99,
            })
            .await
            .unwrap();
        db.orders()
            .insert(&NewOrder {
                customer_id: customer.id,
                item_id: item.id,
                timestamp: 1000,
                notes: None,
            })
            .await
            .unwrap();

        let err = db.customers().delete(customer.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
