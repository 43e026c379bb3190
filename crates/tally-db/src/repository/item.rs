//! # Item Repository
//!
//! Database operations for items. Items carry no uniqueness rule, so the
//! only failure besides store errors is a missing id.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Entity, Item, NewItem};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item and returns it with its assigned id.
    pub async fn insert(&self, input: &NewItem) -> DbResult<Item> {
        debug!(name = %input.name, price = input.price, "Inserting item");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("INSERT INTO items (name, price) VALUES (?1, ?2)")
            .bind(&input.name)
            .bind(input.price)
            .execute(&mut *conn)
            .await?;

        Ok(input.clone().with_id(result.last_insert_rowid()))
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let mut conn = self.pool.acquire().await?;

        let item = sqlx::query_as::<_, Item>("SELECT id, name, price FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(item)
    }

    /// Replaces every field of an existing item.
    ///
    /// ## Returns
    /// * `Ok(Item)` - The submitted fields stamped with `id`
    /// * `Err(DbError::NotFound)` - No item has this id
    pub async fn update(&self, id: i64, input: &NewItem) -> DbResult<Item> {
        debug!(id, "Updating item");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("UPDATE items SET name = ?2, price = ?3 WHERE id = ?1")
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Item::NAME, id));
        }

        Ok(input.clone().with_id(id))
    }

    /// Deletes an item.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Item::NAME, id));
        }

        Ok(())
    }

    /// Counts total items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
