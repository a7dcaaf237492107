//! Course resource service

use std::sync::Arc;

use campus_core::store::CourseRepository;
use campus_core::{Course, StoreResult};

/// Business logic for the Course entity.
///
/// Same lifecycle shape as the university service, plus the indexed
/// attribute queries. `university_id` is treated as an opaque value;
/// whether the university exists is not this service's concern.
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> StoreResult<Vec<Course>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<Course>> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, course: Course) -> StoreResult<Course> {
        self.repo.save(course).await
    }

    /// Overwrites only if `id` exists; path id wins over payload id
    pub async fn update(&self, id: i64, course: Course) -> StoreResult<Option<Course>> {
        self.repo.save_if_exists(id, course).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        self.repo.delete_if_exists(id).await
    }

    /// Courses referencing a university id (possibly empty)
    pub async fn by_university(&self, university_id: i64) -> StoreResult<Vec<Course>> {
        self.repo.find_by_university_id(university_id).await
    }

    /// Courses in a department (possibly empty)
    pub async fn by_department(&self, department: &str) -> StoreResult<Vec<Course>> {
        self.repo.find_by_department(department).await
    }

    /// Courses currently flagged active
    pub async fn active(&self) -> StoreResult<Vec<Course>> {
        self.repo.find_by_is_active(true).await
    }
}
