//! Failures inside a phase worker.

use crate::extraction::domain::ExtractionPhase;
use crate::extraction::ports::DocumentLoadError;
use crate::metadata::error::MetadataValidationError;
use crate::worker::ports::{RepositoryError, SourceApiError};
use thiserror::Error;

/// Everything that can end a phase worker with an error event.
///
/// The display string is what the error event carries.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The source API call failed.
    #[error(transparent)]
    Source(#[from] SourceApiError),

    /// The repository refused the items.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A packaged document could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentLoadError),

    /// The External Metadata Document is structurally invalid.
    #[error("external domain metadata is invalid: {0}")]
    InvalidMetadata(#[from] MetadataValidationError),

    /// An item could not be serialized for the repository.
    #[error("failed to serialize item: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The worker was started with another phase's state or event.
    #[error("{phase} worker received input for another phase")]
    PhaseMismatch {
        /// Phase of the worker.
        phase: ExtractionPhase,
    },
}
