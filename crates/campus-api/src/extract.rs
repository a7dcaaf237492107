//! Typed path extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::ApiError;

/// Entity key taken from the request path.
///
/// Wraps the `Path` extractor so a malformed id is rejected as an
/// `ApiError::BadRequest` and carries the standard error body, instead of
/// the framework's plain-text rejection.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        raw.parse::<i64>()
            .map(EntityId)
            .map_err(|_| ApiError::BadRequest(format!("invalid id '{}'", raw)))
    }
}
