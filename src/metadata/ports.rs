//! Validator port for External Metadata Documents.

use crate::metadata::{
    domain::ExternalMetadataDocument,
    error::{MetadataLint, MetadataValidationError},
};

/// Result type for metadata validation.
pub type MetadataValidationResult<T> = Result<T, MetadataValidationError>;

/// Lints collected from a structurally valid document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataValidationReport {
    /// Non-fatal findings, in document order.
    pub lints: Vec<MetadataLint>,
}

impl MetadataValidationReport {
    /// Returns whether the document produced no lints.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.lints.is_empty()
    }
}

/// Port for structural validation of metadata documents.
pub trait MetadataValidator: Send + Sync {
    /// Validates the whole document, returning non-fatal lints on success.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataValidationError`] describing every structural
    /// problem; several are combined into [`MetadataValidationError::Multiple`].
    fn validate(
        &self,
        document: &ExternalMetadataDocument,
    ) -> MetadataValidationResult<MetadataValidationReport>;
}
