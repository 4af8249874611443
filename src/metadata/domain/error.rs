//! Error types for the metadata document model.

use thiserror::Error;

/// Error returned when a field type name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field type: {0}")]
pub struct ParseFieldTypeError(pub String);
