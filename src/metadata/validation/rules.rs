//! Individual metadata document rules.

use crate::metadata::{
    domain::{ExternalMetadataDocument, Field, FieldType, RecordType, StageDiagram},
    error::{MetadataLint, MetadataValidationError},
};

/// Rejects documents that declare no record types.
///
/// # Errors
///
/// Returns [`MetadataValidationError::NoRecordTypes`] for an empty map.
pub fn validate_has_record_types(
    document: &ExternalMetadataDocument,
) -> Result<(), MetadataValidationError> {
    if document.record_types.is_empty() {
        return Err(MetadataValidationError::NoRecordTypes);
    }
    Ok(())
}

/// Checks one field's type and its type-specific payload.
#[must_use]
pub fn field_errors(
    document: &ExternalMetadataDocument,
    record_type: &str,
    field_name: &str,
    field: &Field,
) -> Vec<MetadataValidationError> {
    let invalid = |reason: &str| MetadataValidationError::InvalidField {
        record_type: record_type.to_owned(),
        field: field_name.to_owned(),
        reason: reason.to_owned(),
    };

    let field_type = match field.parsed_type() {
        Ok(field_type) => field_type,
        Err(err) => {
            return vec![MetadataValidationError::UnknownFieldType {
                record_type: record_type.to_owned(),
                field: field_name.to_owned(),
                field_type: err.0,
            }];
        }
    };

    match field_type {
        FieldType::Enum => {
            let values = field.enum_values.as_ref().map(|e| e.values.as_slice());
            match values {
                None | Some([]) => vec![invalid("is an enum without values")],
                Some(values) if values.iter().any(|value| value.key.trim().is_empty()) => {
                    vec![invalid("has an enum value with an empty key")]
                }
                Some(_) => Vec::new(),
            }
        }
        FieldType::Reference => {
            let Some(reference) = field.reference.as_ref().filter(|r| !r.refers_to.is_empty())
            else {
                return vec![invalid("is a reference without refers_to targets")];
            };
            reference
                .record_targets()
                .filter(|target| document.record_type(target).is_none())
                .map(|target| MetadataValidationError::UnknownReferenceTarget {
                    record_type: record_type.to_owned(),
                    field: field_name.to_owned(),
                    target: target.to_owned(),
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Checks a record type's stage diagram, if it has one.
#[must_use]
pub fn stage_diagram_errors(
    record_type_name: &str,
    record_type: &RecordType,
) -> Vec<MetadataValidationError> {
    let Some(diagram) = record_type.stage_diagram.as_ref() else {
        return Vec::new();
    };
    let invalid =
        |reason: String| MetadataValidationError::invalid_stage_diagram(record_type_name, reason);
    let mut errors = Vec::new();

    match record_type.fields.get(&diagram.controlling_field) {
        None => errors.push(invalid(format!(
            "controlling field '{}' is not declared",
            diagram.controlling_field
        ))),
        Some(field) if !matches!(field.parsed_type(), Ok(FieldType::Enum)) => {
            errors.push(invalid(format!(
                "controlling field '{}' is not an enum field",
                diagram.controlling_field
            )));
        }
        Some(field) => errors.extend(
            diagram
                .stages
                .keys()
                .filter(|stage| !field.allows_enum_value(stage))
                .map(|stage| {
                    invalid(format!(
                        "stage '{stage}' is not a value of '{}'",
                        diagram.controlling_field
                    ))
                }),
        ),
    }

    if diagram.stages.is_empty() {
        errors.push(invalid("declares no stages".to_owned()));
    }
    if !diagram.stages.contains_key(&diagram.starting_stage) {
        errors.push(invalid(format!(
            "starting stage '{}' is not a declared stage",
            diagram.starting_stage
        )));
    }

    for (name, stage) in &diagram.stages {
        if !diagram.states.contains_key(&stage.state) {
            errors.push(invalid(format!(
                "stage '{name}' belongs to undeclared state '{}'",
                stage.state
            )));
        }
        errors.extend(
            stage
                .transitions_to
                .iter()
                .filter(|target| !diagram.stages.contains_key(*target))
                .map(|target| {
                    invalid(format!(
                        "stage '{name}' transitions to undeclared stage '{target}'"
                    ))
                }),
        );
    }

    errors
}

/// Collects non-fatal findings for a structurally valid stage diagram.
#[must_use]
pub fn stage_diagram_lints(record_type: &str, diagram: &StageDiagram) -> Vec<MetadataLint> {
    let reachable = diagram.reachable_stages();
    let mut lints: Vec<MetadataLint> = diagram
        .stages
        .keys()
        .filter(|stage| !reachable.contains(stage.as_str()))
        .map(|stage| MetadataLint::UnreachableStage {
            record_type: record_type.to_owned(),
            stage: stage.clone(),
        })
        .collect();

    if !diagram.has_reachable_end_state() {
        lints.push(MetadataLint::NoReachableEndState {
            record_type: record_type.to_owned(),
        });
    }
    lints
}
