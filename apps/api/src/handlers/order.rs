//! Order endpoints.
//!
//! Orders reference a customer and an item by id. Whether those ids must
//! exist depends on `TALLY_ENFORCE_FOREIGN_KEYS`; by default they are stored
//! as given.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tally_core::{Entity, NewOrder, Order};
use tracing::info;

use super::Deleted;
use crate::error::ApiError;
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    let order = state.db.orders().insert(&input).await?;

    info!(
        id = order.id,
        customer_id = order.customer_id,
        item_id = order.item_id,
        "Order created"
    );
    Ok(Json(order))
}

/// `GET /orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Order>, ApiError> {
    state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(Order::NAME))
}

/// `PUT /orders/{id}`
///
/// Full replacement; a body without `notes` clears them.
pub async fn update_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    let order = state.db.orders().update(id, &input).await?;

    info!(id, "Order updated");
    Ok(Json(order))
}

/// `DELETE /orders/{id}`
pub async fn delete_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Deleted>, ApiError> {
    state.db.orders().delete(id).await?;

    info!(id, "Order deleted");
    Ok(Json(Deleted::of::<Order>()))
}
