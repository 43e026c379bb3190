//! Shared state handed to every handler.

use tally_db::Database;

/// Application state held by the router.
///
/// Holds the single [`Database`] handle; repositories are created per request
/// from its pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
