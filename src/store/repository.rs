//! # Result Repository
//!
//! Storage operations over the result collection. Every read returns an
//! owned snapshot; callers never hold references into the store.

use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::record::{sample_records, ResultPatch, ResultRecord};

/// Result repository trait
///
/// Abstracts storage operations for examination results.
pub trait ResultRepository: Send + Sync {
    /// Append a record. Callers guarantee `id` uniqueness.
    fn add(&self, record: ResultRecord) -> StoreResult<ResultRecord>;

    /// All records, in insertion order
    fn all(&self) -> StoreResult<Vec<ResultRecord>>;

    /// Records whose `regno` matches case-insensitively
    fn by_regno(&self, regno: &str) -> StoreResult<Vec<ResultRecord>>;

    /// Find a record by its id
    fn by_id(&self, id: &str) -> StoreResult<Option<ResultRecord>>;

    /// Merge `patch` into the record with `id`, returning the updated record
    fn update(&self, id: &str, patch: ResultPatch) -> StoreResult<Option<ResultRecord>>;

    /// Remove the first record with `id`. Returns whether one was removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Remove every record
    fn clear(&self) -> StoreResult<()>;
}

/// In-memory result repository
#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    results: RwLock<Vec<ResultRecord>>,
}

impl InMemoryResultRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the sample records
    pub fn seeded() -> Self {
        Self {
            results: RwLock::new(sample_records()),
        }
    }
}

impl ResultRepository for InMemoryResultRepository {
    fn add(&self, record: ResultRecord) -> StoreResult<ResultRecord> {
        let mut results = self.results.write().map_err(|_| StoreError::LockPoisoned)?;
        results.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> StoreResult<Vec<ResultRecord>> {
        let results = self.results.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(results.clone())
    }

    fn by_regno(&self, regno: &str) -> StoreResult<Vec<ResultRecord>> {
        let results = self.results.read().map_err(|_| StoreError::LockPoisoned)?;
        let wanted = regno.to_lowercase();
        Ok(results
            .iter()
            .filter(|r| r.regno.to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    fn by_id(&self, id: &str) -> StoreResult<Option<ResultRecord>> {
        let results = self.results.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(results.iter().find(|r| r.id == id).cloned())
    }

    fn update(&self, id: &str, patch: ResultPatch) -> StoreResult<Option<ResultRecord>> {
        let mut results = self.results.write().map_err(|_| StoreError::LockPoisoned)?;

        Ok(results.iter_mut().find(|r| r.id == id).map(|existing| {
            existing.apply(patch);
            existing.clone()
        }))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut results = self.results.write().map_err(|_| StoreError::LockPoisoned)?;

        match results.iter().position(|r| r.id == id) {
            Some(index) => {
                results.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&self) -> StoreResult<()> {
        let mut results = self.results.write().map_err(|_| StoreError::LockPoisoned)?;
        results.clear();
        Ok(())
    }
}
