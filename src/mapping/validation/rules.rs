//! Individual mapping document rules.
//!
//! Each rule inspects one part of the document and returns the problems it
//! found; the validator service folds them into a single error.

use crate::mapping::{
    domain::{
        DomainMappingDocument, FieldMappingRef, MappingDomainError, RecordTypeMapping,
        Transformation,
    },
    error::{FieldLocation, MappingValidationError},
    ports::MappingValidationConfig,
};

/// Rejects documents that map no record types.
///
/// # Errors
///
/// Returns [`MappingValidationError::NoRecordTypeMappings`] for an empty map.
pub fn validate_has_record_types(
    document: &DomainMappingDocument,
) -> Result<(), MappingValidationError> {
    if document.additional_mappings.record_type_mappings.is_empty() {
        return Err(MappingValidationError::NoRecordTypeMappings);
    }
    Ok(())
}

/// Checks the shape of one record type mapping, excluding its fields.
#[must_use]
pub fn record_type_errors(
    record_type: &str,
    mapping: &RecordTypeMapping,
) -> Vec<MappingValidationError> {
    let invalid = |reason: String| MappingValidationError::InvalidRecordType {
        record_type: record_type.to_owned(),
        reason,
    };
    let mut errors = Vec::new();

    if mapping.default_mapping.object_category.trim().is_empty() {
        errors.push(invalid("default mapping has an empty object_category".to_owned()));
    }
    if mapping.default_mapping.object_type.trim().is_empty() {
        errors.push(invalid("default mapping has an empty object_type".to_owned()));
    }

    for (index, possible) in mapping.possible_record_type_mappings.iter().enumerate() {
        if possible.devrev_leaf_type.trim().is_empty() {
            errors.push(invalid(format!(
                "possible mapping at index {index} has an empty devrev_leaf_type"
            )));
        }
        if possible.shard.mode.trim().is_empty() {
            errors.push(invalid(format!(
                "possible mapping at index {index} has an empty shard mode"
            )));
        }
    }

    errors
}

/// Checks one field mapping against the transformation vocabulary.
///
/// # Errors
///
/// Returns the first problem with the field's transformation.
pub fn validate_field_mapping(
    field: FieldMappingRef<'_>,
    config: &MappingValidationConfig,
) -> Result<(), MappingValidationError> {
    let Some(spec) = field.mapping.transformation_method_for_set.as_ref() else {
        return Ok(());
    };
    let location = FieldLocation {
        record_type: field.record_type.to_owned(),
        leaf_type: field.leaf_type.to_owned(),
        field: field.field.to_owned(),
    };

    let transformation = spec.resolve().map_err(|err| match err {
        MappingDomainError::UnknownTransformationMethod(unknown) => {
            MappingValidationError::UnknownTransformationMethod {
                location: location.clone(),
                method: unknown.0,
            }
        }
        payload @ MappingDomainError::InvalidPayload { .. } => {
            MappingValidationError::InvalidFieldMapping {
                location: location.clone(),
                reason: payload.to_string(),
            }
        }
    })?;

    let method = transformation.method();
    let names_source_field = field
        .mapping
        .primary_external_field
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if field.mapping.forward && method.reads_primary_external_field() && !names_source_field {
        return Err(MappingValidationError::InvalidFieldMapping {
            location,
            reason: format!("{method} requires a primary_external_field"),
        });
    }

    if let Transformation::MapEnum(tables) = &transformation
        && config.require_invertible_enums
    {
        let source_values = tables.non_invertible_keys();
        let target_values = tables.dangling_reverse_keys();
        if !source_values.is_empty() || !target_values.is_empty() {
            return Err(MappingValidationError::NonInvertibleEnumMapping {
                location,
                source_values,
                target_values,
            });
        }
    }

    Ok(())
}
