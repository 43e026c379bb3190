//! # Request Extractors
//!
//! Axum's stock `Json` and `Path` extractors reject bad input with plain-text
//! bodies. These wrappers turn every rejection into an [`ApiError`] so clients
//! always get the `{"code", "detail"}` shape.
//!
//! ```text
//! PUT /customers/abc          ──► EntityId     ──► 422 VALIDATION_ERROR
//! POST /customers {"name":1}  ──► ValidJson<T> ──► 422 VALIDATION_ERROR
//! POST /customers {"name":""} ──► Validate     ──► 422 VALIDATION_ERROR
//! ```

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tally_core::Validate;

use crate::error::ApiError;

/// JSON body that has been deserialized and passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Integer id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(EntityId(id))
    }
}
