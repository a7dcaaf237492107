//! University endpoint handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use campus_core::University;

use crate::error::ApiError;
use crate::extract::EntityId;
use crate::state::UniversityState;

/// GET /api/university
pub async fn list_universities(
    State(state): State<UniversityState>,
) -> Result<Json<Vec<University>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

/// GET /api/university/{id}
pub async fn get_university(
    State(state): State<UniversityState>,
    EntityId(id): EntityId,
) -> Result<Json<University>, ApiError> {
    match state.service.get(id).await? {
        Some(u) => Ok(Json(u)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/university
pub async fn create_university(
    State(state): State<UniversityState>,
    Json(university): Json<University>,
) -> Result<Json<University>, ApiError> {
    let created = state.service.create(university).await?;
    tracing::info!(id = ?created.id, name = %created.name, "created university");
    Ok(Json(created))
}

/// PUT /api/university/{id}
pub async fn update_university(
    State(state): State<UniversityState>,
    EntityId(id): EntityId,
    Json(university): Json<University>,
) -> Result<Json<University>, ApiError> {
    match state.service.update(id, university).await? {
        Some(u) => Ok(Json(u)),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/university/{id}
pub async fn delete_university(
    State(state): State<UniversityState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
