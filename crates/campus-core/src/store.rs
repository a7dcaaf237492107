//! Repository contracts - the store abstraction behind the services
//!
//! The external relational store is reached exclusively through these
//! traits. Each Resource Service takes its repository at construction,
//! so a different adapter (another store client, a test double) can be
//! swapped in without touching service or handler code.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::Course;

/// An entity kind persisted in the store.
///
/// Keys are `i64`, server-assigned and unique within the kind. The store
/// adapter owns assignment; an unset id on `save` means insert.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Stable name of the entity kind, used in logs
    const KIND: &'static str;

    /// Key of this entity, `None` before the first save
    fn id(&self) -> Option<i64>;

    /// Force the key (update paths override any payload id)
    fn set_id(&mut self, id: i64);
}

/// Generic persistence interface over a single entity type.
///
/// `save_if_exists` and `delete_if_exists` are the compound forms used by
/// update/delete: they perform the existence check and the mutation under
/// the adapter's own synchronization, so concurrent update/delete on the
/// same id cannot interleave between check and act.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All entities, store's natural order
    async fn find_all(&self) -> StoreResult<Vec<E>>;

    /// Entity by key; absence is not an error
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<E>>;

    /// Whether a row with this key exists
    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Insert (key unset) or overwrite (key set). Returns the stored
    /// entity with its assigned key.
    async fn save(&self, entity: E) -> StoreResult<E>;

    /// Remove by key; silent no-op when absent
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    /// Overwrite the row at `id` only if it already exists. Never inserts;
    /// returns `None` when the id is absent.
    async fn save_if_exists(&self, id: i64, entity: E) -> StoreResult<Option<E>>;

    /// Remove the row at `id` if present, reporting whether it existed
    async fn delete_if_exists(&self, id: i64) -> StoreResult<bool>;
}

/// Course repository with the indexed attribute finders declared by the
/// course service. Matches return empty vectors, never errors.
#[async_trait]
pub trait CourseRepository: Repository<Course> {
    async fn find_by_university_id(&self, university_id: i64) -> StoreResult<Vec<Course>>;

    async fn find_by_department(&self, department: &str) -> StoreResult<Vec<Course>>;

    async fn find_by_is_active(&self, is_active: bool) -> StoreResult<Vec<Course>>;
}
