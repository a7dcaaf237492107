//! University resource service

use std::sync::Arc;

use campus_core::store::Repository;
use campus_core::{StoreResult, University};

/// Business logic for the University entity.
pub struct UniversityService {
    repo: Arc<dyn Repository<University>>,
}

impl UniversityService {
    pub fn new(repo: Arc<dyn Repository<University>>) -> Self {
        Self { repo }
    }

    /// All universities, store order
    pub async fn list(&self) -> StoreResult<Vec<University>> {
        self.repo.find_all().await
    }

    /// University by id; `None` when absent (the caller decides how to
    /// signal it)
    pub async fn get(&self, id: i64) -> StoreResult<Option<University>> {
        self.repo.find_by_id(id).await
    }

    /// Unconditionally saves; the store assigns the id when unset
    pub async fn create(&self, university: University) -> StoreResult<University> {
        self.repo.save(university).await
    }

    /// Overwrites the row at `id` only if it already exists. The path id
    /// wins over any id carried in the payload. Never creates.
    pub async fn update(&self, id: i64, university: University) -> StoreResult<Option<University>> {
        self.repo.save_if_exists(id, university).await
    }

    /// Removes the row at `id`; `false` and a no-op when absent
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        self.repo.delete_if_exists(id).await
    }
}
