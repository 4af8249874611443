//! Default mapping validator.

use crate::mapping::{
    domain::DomainMappingDocument,
    error::MappingValidationError,
    ports::{MappingValidationConfig, MappingValidationResult, MappingValidator},
    validation::rules,
};

/// Applies every mapping rule and reports all problems at once.
///
/// # Examples
///
/// ```
/// use workbridge::mapping::domain::DomainMappingDocument;
/// use workbridge::mapping::ports::MappingValidator;
/// use workbridge::mapping::validation::DefaultMappingValidator;
///
/// let document = DomainMappingDocument::from_json(r#"{
///     "format_version": "v1",
///     "devrev_metadata_version": 2,
///     "additional_mappings": {"record_type_mappings": {}}
/// }"#).expect("well-formed JSON");
///
/// assert!(DefaultMappingValidator::new().validate(&document).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultMappingValidator {
    config: MappingValidationConfig,
}

impl DefaultMappingValidator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with a custom configuration.
    #[must_use]
    pub const fn with_config(config: MappingValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &MappingValidationConfig {
        &self.config
    }
}

impl MappingValidator for DefaultMappingValidator {
    fn validate(&self, document: &DomainMappingDocument) -> MappingValidationResult<()> {
        rules::validate_has_record_types(document)?;

        let mut errors: Vec<MappingValidationError> = document
            .additional_mappings
            .record_type_mappings
            .iter()
            .flat_map(|(record_type, mapping)| rules::record_type_errors(record_type, mapping))
            .collect();

        errors.extend(
            document
                .field_mappings()
                .filter_map(|field| rules::validate_field_mapping(field, &self.config).err()),
        );

        MappingValidationError::multiple(errors).map_or(Ok(()), Err)
    }
}
