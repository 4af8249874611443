//! Platform item repository port.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Destination for extracted items, keyed by item type.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Appends items to the repository for `item_type`, returning how many
    /// were accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the items cannot be stored.
    async fn push(&self, item_type: &str, items: Vec<Value>) -> RepositoryResult<usize>;

    /// Returns everything pushed for `item_type`, in push order.
    async fn items(&self, item_type: &str) -> RepositoryResult<Vec<Value>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The repository refused the batch.
    #[error("repository '{item_type}' rejected items: {reason}")]
    Rejected {
        /// Target repository.
        item_type: String,
        /// Reason given.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
