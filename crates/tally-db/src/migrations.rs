//! # Database Migrations
//!
//! Embedded schema for Tally and the check that an existing database matches it.
//!
//! ## How Initialization Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Initialization                              │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table                                          │
//! │       │                                                                 │
//! │       ├── Table doesn't exist? Create it                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order                                       │
//! │       │   001_initial_schema.sql  (CREATE TABLE IF NOT EXISTS ...)     │
//! │       ▼                                                                 │
//! │  verify_schema: PRAGMA table_info per table                            │
//! │       │                                                                 │
//! │       ├── Column missing? ──► DbError::MigrationFailed (fatal)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Server continues startup                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones
//! 5. Add any new required columns to [`REQUIRED_COLUMNS`]

use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the directory into
/// the binary at compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Columns each table must have for the repositories to work.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("customers", &["id", "name", "phone"]),
    ("items", &["id", "name", "price"]),
    (
        "orders",
        &["id", "customer_id", "item_id", "timestamp", "notes"],
    ),
];

/// Runs all pending database migrations, then verifies the schema.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Fails when a pre-existing table is incompatible
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;
    verify_schema(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Checks that every table in [`REQUIRED_COLUMNS`] exists with its columns.
///
/// `CREATE TABLE IF NOT EXISTS` silently keeps an older table with the same
/// name, so this is what turns an incompatible database into a startup error.
pub async fn verify_schema(pool: &SqlitePool) -> DbResult<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(pool)
            .await?;

        if rows.is_empty() {
            return Err(DbError::MigrationFailed(format!(
                "table {table} does not exist"
            )));
        }

        let present = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(missing) = columns
            .iter()
            .find(|column| !present.iter().any(|name| name == *column))
        {
            return Err(DbError::MigrationFailed(format!(
                "table {table} is missing column {missing}"
            )));
        }

        debug!(table, "Schema verified");
    }

    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    // Missing bookkeeping table means nothing was applied yet
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if tracked == 0 {
        return Ok((total, 0));
    }

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();

        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_status_before_migrations() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert!(total >= 1);
        assert_eq!(applied, 0);
    }

    #[tokio::test]
    async fn test_status_on_closed_pool_is_an_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = migration_status(db.pool()).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_verify_schema_rejects_missing_table() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let err = verify_schema(db.pool()).await.unwrap_err();
        assert!(matches!(err, DbError::MigrationFailed(ref msg) if msg.contains("customers")));
    }

    #[tokio::test]
    async fn test_incompatible_existing_table_fails() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        // A customers table from some other application, without phone
        sqlx::query("CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT)")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.run_migrations().await.unwrap_err();
        match err {
            DbError::MigrationFailed(msg) => {
                assert_eq!(msg, "table customers is missing column phone");
            }
            other => panic!("expected MigrationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_preexisting_compatible_tables_are_kept() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL UNIQUE
            )",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query("INSERT INTO customers (name, phone) VALUES ('Ann', '555-1')")
            .execute(db.pool())
            .await
            .unwrap();

        db.run_migrations().await.unwrap();

        let count = db.customers().count().await.unwrap();
        assert_eq!(count, 1);
    }
}
