//! # Tally API
//!
//! HTTP surface over the Tally store.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer ─── one span per request (method, uri, status, latency)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Router ─── /customers  /items  /orders  /health                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Extractors ─── EntityId (path)  ValidJson<T> (body + Validate)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Handler ─── state.db.<repo>().<op>() ─── one pooled connection        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<T>  or  ApiError { code, detail }                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("db.sqlite")).await?;
//! let app = tally_api::router(AppState::new(db));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(handlers::customer::routes())
        .merge(handlers::item::routes())
        .merge(handlers::order::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,sqlx=warn,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
