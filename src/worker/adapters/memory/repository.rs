//! In-memory item repository.

use crate::worker::ports::{ItemRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory item repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    rejected: HashSet<String>,
}

impl InMemoryItemRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses every push for `item_type`.
    #[must_use]
    pub fn rejecting(mut self, item_type: impl Into<String>) -> Self {
        self.rejected.insert(item_type.into());
        self
    }
}

fn lock_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn push(&self, item_type: &str, items: Vec<Value>) -> RepositoryResult<usize> {
        if self.rejected.contains(item_type) {
            return Err(RepositoryError::Rejected {
                item_type: item_type.to_owned(),
                reason: "repository is read-only".to_owned(),
            });
        }
        let count = items.len();
        self.state
            .write()
            .map_err(lock_error)?
            .entry(item_type.to_owned())
            .or_default()
            .extend(items);
        Ok(count)
    }

    async fn items(&self, item_type: &str) -> RepositoryResult<Vec<Value>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(item_type).cloned().unwrap_or_default())
    }
}
