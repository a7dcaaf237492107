//! In-process table implementing the repository contracts

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use campus_core::store::{CourseRepository, Entity, Repository};
use campus_core::{Course, StoreResult};

/// Single-table store for one entity kind.
///
/// Rows live in a `BTreeMap` keyed by id, so `find_all` returns the
/// store's natural (key) order. Keys come from a monotonic counter that
/// is never decremented: an id freed by a delete is not reassigned within
/// the process lifetime. Compound operations (`save_if_exists`,
/// `delete_if_exists`) hold the write lock across check and mutation.
pub struct MemoryStore<E> {
    rows: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of rows currently stored
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Rows matching a predicate, in key order
    fn find_matching(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.rows
            .read()
            .values()
            .filter(|e| pred(e))
            .cloned()
            .collect()
    }

    /// Keep the allocator ahead of any explicitly keyed row
    fn reserve_through(&self, id: i64) {
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn find_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<E>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.rows.read().contains_key(&id))
    }

    async fn save(&self, mut entity: E) -> StoreResult<E> {
        let id = match entity.id() {
            Some(id) => {
                self.reserve_through(id);
                id
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                entity.set_id(id);
                id
            }
        };

        self.rows.write().insert(id, entity.clone());
        debug!(kind = E::KIND, id, "saved row");
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.rows.write().remove(&id);
        Ok(())
    }

    async fn save_if_exists(&self, id: i64, mut entity: E) -> StoreResult<Option<E>> {
        entity.set_id(id);
        let mut rows = self.rows.write();
        if !rows.contains_key(&id) {
            return Ok(None);
        }
        rows.insert(id, entity.clone());
        debug!(kind = E::KIND, id, "updated row");
        Ok(Some(entity))
    }

    async fn delete_if_exists(&self, id: i64) -> StoreResult<bool> {
        let removed = self.rows.write().remove(&id).is_some();
        if removed {
            debug!(kind = E::KIND, id, "deleted row");
        }
        Ok(removed)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore<Course> {
    async fn find_by_university_id(&self, university_id: i64) -> StoreResult<Vec<Course>> {
        Ok(self.find_matching(|c| c.university_id == Some(university_id)))
    }

    async fn find_by_department(&self, department: &str) -> StoreResult<Vec<Course>> {
        Ok(self.find_matching(|c| c.department.as_deref() == Some(department)))
    }

    async fn find_by_is_active(&self, is_active: bool) -> StoreResult<Vec<Course>> {
        Ok(self.find_matching(|c| c.is_active == is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::University;
    use pretty_assertions::assert_eq;

    fn university(name: &str) -> University {
        University {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn course(title: &str, university_id: i64, department: &str, active: bool) -> Course {
        Course {
            title: title.to_string(),
            university_id: Some(university_id),
            department: Some(department.to_string()),
            is_active: active,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.save(university("A")).await.unwrap();
        let b = store.save(university("B")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reused() {
        let store = MemoryStore::new();
        let a = store.save(university("A")).await.unwrap();
        let a_id = a.id.unwrap();

        assert!(store.delete_if_exists(a_id).await.unwrap());
        let b = store.save(university("B")).await.unwrap();

        assert!(b.id.unwrap() > a_id);
    }

    #[tokio::test]
    async fn save_with_explicit_id_overwrites_and_reserves() {
        let store = MemoryStore::new();
        let mut u = university("A");
        u.id = Some(10);
        store.save(u).await.unwrap();

        // Allocator must not collide with the explicit key
        let b = store.save(university("B")).await.unwrap();
        assert_eq!(b.id, Some(11));

        let mut again = university("A2");
        again.id = Some(10);
        store.save(again).await.unwrap();
        assert_eq!(store.len(), 2);
        let stored = store.find_by_id(10).await.unwrap().unwrap();
        assert_eq!(stored.name, "A2");
    }

    #[tokio::test]
    async fn save_if_exists_never_inserts() {
        let store: MemoryStore<University> = MemoryStore::new();
        let result = store.save_if_exists(99, university("ghost")).await.unwrap();

        assert_eq!(result, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_if_exists_forces_key() {
        let store = MemoryStore::new();
        let a = store.save(university("A")).await.unwrap();
        let id = a.id.unwrap();

        let mut payload = university("A2");
        payload.id = Some(12345); // payload id must lose to the path id
        let updated = store.save_if_exists(id, payload).await.unwrap().unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_if_exists_reports_presence() {
        let store = MemoryStore::new();
        let a = store.save(university("A")).await.unwrap();

        assert!(store.delete_if_exists(a.id.unwrap()).await.unwrap());
        assert!(!store.delete_if_exists(a.id.unwrap()).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn exists_by_id_tracks_lifecycle() {
        let store = MemoryStore::new();
        assert!(!store.exists_by_id(1).await.unwrap());

        let a = store.save(university("A")).await.unwrap();
        let id = a.id.unwrap();
        assert!(store.exists_by_id(id).await.unwrap());

        store.delete_by_id(id).await.unwrap();
        assert!(!store.exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_by_id_is_silent_when_absent() {
        let store: MemoryStore<University> = MemoryStore::new();
        store.delete_by_id(42).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn course_finders_filter_by_attribute() {
        let store = MemoryStore::new();
        store.save(course("Intro CS", 1, "CS", true)).await.unwrap();
        store.save(course("Databases", 1, "CS", false)).await.unwrap();
        store.save(course("Anatomy", 2, "Medicine", true)).await.unwrap();

        let by_uni = store.find_by_university_id(1).await.unwrap();
        assert_eq!(by_uni.len(), 2);

        let by_dept = store.find_by_department("Medicine").await.unwrap();
        assert_eq!(by_dept.len(), 1);
        assert_eq!(by_dept[0].title, "Anatomy");

        let active = store.find_by_is_active(true).await.unwrap();
        assert_eq!(active.len(), 2);

        // No matches is an empty vector, not an error
        let none = store.find_by_department("History").await.unwrap();
        assert!(none.is_empty());
    }
}
