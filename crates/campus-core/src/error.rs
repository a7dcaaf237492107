//! Common error type for store adapters

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a store adapter.
///
/// Absent rows are not errors: `find_by_id` returns `Option` and the
/// services translate absence into domain outcomes. These variants cover
/// the store itself failing; they propagate unmodified to the API layer,
/// which maps them to a 500 response.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store connection lost or not reachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Query or statement failed inside the store
    #[error("store failure: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Unavailable(_) => 500,
            StoreError::Internal(_) => 500,
        }
    }
}
