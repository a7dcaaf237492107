//! campus-api - REST API layer for the campus resource services
//!
//! One router per service, each serving its entity under the service's
//! path prefix. The routers are self-contained axum apps: the gateway
//! forwards full paths, and the same router also works standalone.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use campus_api::university_router;
//! use campus_service::UniversityService;
//! use campus_store::MemoryStore;
//!
//! let service = Arc::new(UniversityService::new(Arc::new(MemoryStore::new())));
//! let app = university_router(service);
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use extract::EntityId;
pub use state::{CourseState, UniversityState};

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use campus_service::{CourseService, UniversityService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Permissive CORS for the services themselves. The gateway applies the
/// real origin policy; this layer is what makes a service answer CORS
/// headers of its own, which the gateway then dedupes.
fn service_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the university service router
pub fn university_router(service: Arc<UniversityService>) -> Router {
    let state = UniversityState::new(service);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/university",
            get(handlers::university::list_universities)
                .post(handlers::university::create_university),
        )
        .route(
            "/api/university/{id}",
            get(handlers::university::get_university)
                .put(handlers::university::update_university)
                .delete(handlers::university::delete_university),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(service_cors())
        .with_state(state)
}

/// Create the course service router
pub fn courses_router(service: Arc<CourseService>) -> Router {
    let state = CourseState::new(service);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/courses",
            get(handlers::courses::list_courses).post(handlers::courses::create_course),
        )
        .route(
            "/api/courses/{id}",
            get(handlers::courses::get_course)
                .put(handlers::courses::update_course)
                .delete(handlers::courses::delete_course),
        )
        // Attribute-filtered queries
        .route(
            "/api/courses/university/{university_id}",
            get(handlers::courses::courses_by_university),
        )
        .route(
            "/api/courses/department/{department}",
            get(handlers::courses::courses_by_department),
        )
        .route("/api/courses/active", get(handlers::courses::active_courses))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(service_cors())
        .with_state(state)
}
