//! Default metadata validator.

use crate::metadata::{
    domain::ExternalMetadataDocument,
    error::MetadataValidationError,
    ports::{MetadataValidationReport, MetadataValidationResult, MetadataValidator},
    validation::rules,
};

/// Applies every metadata rule, then lints the stage diagrams.
///
/// Lints are only computed once the document is structurally valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetadataValidator;

impl DefaultMetadataValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MetadataValidator for DefaultMetadataValidator {
    fn validate(
        &self,
        document: &ExternalMetadataDocument,
    ) -> MetadataValidationResult<MetadataValidationReport> {
        rules::validate_has_record_types(document)?;

        let mut errors = Vec::new();
        for (record_type_name, record_type) in &document.record_types {
            for (field_name, field) in &record_type.fields {
                errors.extend(rules::field_errors(
                    document,
                    record_type_name,
                    field_name,
                    field,
                ));
            }
            errors.extend(rules::stage_diagram_errors(record_type_name, record_type));
        }
        if let Some(err) = MetadataValidationError::multiple(errors) {
            return Err(err);
        }

        let lints = document
            .record_types
            .iter()
            .filter_map(|(name, record_type)| {
                record_type
                    .stage_diagram
                    .as_ref()
                    .map(|diagram| rules::stage_diagram_lints(name, diagram))
            })
            .flatten()
            .collect();
        Ok(MetadataValidationReport { lints })
    }
}
