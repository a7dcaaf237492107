//! Course endpoint handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use campus_core::Course;

use crate::error::ApiError;
use crate::extract::EntityId;
use crate::state::CourseState;

/// GET /api/courses
pub async fn list_courses(State(state): State<CourseState>) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<CourseState>,
    EntityId(id): EntityId,
) -> Result<Json<Course>, ApiError> {
    match state.service.get(id).await? {
        Some(c) => Ok(Json(c)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<CourseState>,
    Json(course): Json<Course>,
) -> Result<Json<Course>, ApiError> {
    let created = state.service.create(course).await?;
    tracing::info!(id = ?created.id, title = %created.title, "created course");
    Ok(Json(created))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    State(state): State<CourseState>,
    EntityId(id): EntityId,
    Json(course): Json<Course>,
) -> Result<Json<Course>, ApiError> {
    match state.service.update(id, course).await? {
        Some(c) => Ok(Json(c)),
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<CourseState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// GET /api/courses/university/{university_id}
pub async fn courses_by_university(
    State(state): State<CourseState>,
    EntityId(university_id): EntityId,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.service.by_university(university_id).await?))
}

/// GET /api/courses/department/{department}
pub async fn courses_by_department(
    State(state): State<CourseState>,
    Path(department): Path<String>,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.service.by_department(&department).await?))
}

/// GET /api/courses/active
pub async fn active_courses(
    State(state): State<CourseState>,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.service.active().await?))
}
