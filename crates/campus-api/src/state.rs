//! Application state for the campus REST APIs

use std::sync::Arc;

use campus_service::{CourseService, UniversityService};

/// State for the university service router
#[derive(Clone)]
pub struct UniversityState {
    pub service: Arc<UniversityService>,
}

impl UniversityState {
    pub fn new(service: Arc<UniversityService>) -> Self {
        Self { service }
    }
}

/// State for the course service router
#[derive(Clone)]
pub struct CourseState {
    pub service: Arc<CourseService>,
}

impl CourseState {
    pub fn new(service: Arc<CourseService>) -> Self {
        Self { service }
    }
}
