//! # Result Store
//!
//! In-memory collection of examination results.
//!
//! The collection is owned by a repository value that is constructed once
//! and shared with request handlers; it is never module-level state.
//! Writers are serialized by an `RwLock`, readers get cloned snapshots.

pub mod errors;
pub mod record;
pub mod repository;

pub use errors::{StoreError, StoreResult};
pub use record::{sample_records, NewResult, ResultPatch, ResultRecord};
pub use repository::{InMemoryResultRepository, ResultRepository};
