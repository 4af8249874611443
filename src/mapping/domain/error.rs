//! Error types for resolving mapping document entries.

use super::TransformationMethod;
use thiserror::Error;

/// Errors returned while resolving a transformation entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingDomainError {
    /// The method is outside the closed vocabulary.
    #[error(transparent)]
    UnknownTransformationMethod(#[from] ParseTransformationMethodError),

    /// The method's payload is missing or malformed.
    #[error("invalid {method} payload: {reason}")]
    InvalidPayload {
        /// Method whose payload is invalid.
        method: TransformationMethod,
        /// Description of the problem.
        reason: String,
    },
}

impl MappingDomainError {
    /// Creates an invalid payload error.
    #[must_use]
    pub fn invalid_payload(method: TransformationMethod, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            method,
            reason: reason.into(),
        }
    }
}

/// Error returned when a transformation method name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transformation method: {0}")]
pub struct ParseTransformationMethodError(pub String);
