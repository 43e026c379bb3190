//! Customer endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tally_core::{Customer, Entity, NewCustomer};
use tracing::info;

use super::Deleted;
use crate::error::ApiError;
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
}

/// `POST /customers`
pub async fn create_customer(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.db.customers().insert(&input).await?;

    info!(id = customer.id, "Customer created");
    Ok(Json(customer))
}

/// `GET /customers/{id}`
pub async fn get_customer(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Customer>, ApiError> {
    state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(Customer::NAME))
}

/// `PUT /customers/{id}`
///
/// Full replacement. A phone held by another customer is a conflict.
pub async fn update_customer(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(input): ValidJson<NewCustomer>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.db.customers().update(id, &input).await?;

    info!(id, "Customer updated");
    Ok(Json(customer))
}

/// `DELETE /customers/{id}`
pub async fn delete_customer(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Deleted>, ApiError> {
    state.db.customers().delete(id).await?;

    info!(id, "Customer deleted");
    Ok(Json(Deleted::of::<Customer>()))
}
