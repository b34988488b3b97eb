//! # Store Errors
//!
//! "Not found" is never an error here; lookups return `Option`, `bool`
//! or an empty `Vec`.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A writer panicked while holding the collection lock
    #[error("Result store lock poisoned")]
    LockPoisoned,
}
