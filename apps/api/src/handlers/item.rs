//! Item endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tally_core::{Entity, Item, NewItem};
use tracing::info;

use super::Deleted;
use crate::error::ApiError;
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

pub async fn create_item(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewItem>,
) -> Result<Json<Item>, ApiError> {
    let item = state.db.items().insert(&input).await?;

    info!(id = item.id, "Item created");
    Ok(Json(item))
}

pub async fn get_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Item>, ApiError> {
    state
        .db
        .items()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(Item::NAME))
}

pub async fn update_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<NewItem>,
) -> Result<Json<Item>, ApiError> {
    let item = state.db.items().update(id, &input).await?;

    info!(id, "Item updated");
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Deleted>, ApiError> {
    state.db.items().delete(id).await?;

    info!(id, "Item deleted");
    Ok(Json(Deleted::of::<Item>()))
}
