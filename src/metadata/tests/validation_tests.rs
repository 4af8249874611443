//! Tests for the default metadata validator.

use crate::metadata::{
    domain::ExternalMetadataDocument,
    error::{MetadataLint, MetadataValidationError},
    ports::MetadataValidator,
    validation::DefaultMetadataValidator,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const SHIPPED_METADATA: &str = include_str!("../../../documents/external_domain_metadata.json");

#[fixture]
fn validator() -> DefaultMetadataValidator {
    DefaultMetadataValidator::new()
}

#[fixture]
fn shipped() -> Value {
    serde_json::from_str(SHIPPED_METADATA).expect("shipped metadata should be JSON")
}

fn document(value: Value) -> ExternalMetadataDocument {
    serde_json::from_value(value).expect("document should deserialize")
}

fn set(value: &mut Value, pointer: &str, replacement: Value) {
    *value
        .pointer_mut(pointer)
        .expect("pointer should exist in the fixture") = replacement;
}

fn single_error(
    validator: &DefaultMetadataValidator,
    value: Value,
) -> MetadataValidationError {
    let err = validator
        .validate(&document(value))
        .expect_err("document should be rejected");
    assert_eq!(err.errors().len(), 1, "unexpected errors: {err}");
    err
}

#[rstest]
fn shipped_document_is_valid_and_clean(validator: DefaultMetadataValidator, shipped: Value) {
    let report = validator
        .validate(&document(shipped))
        .expect("shipped metadata should be valid");
    assert!(report.is_clean(), "unexpected lints: {:?}", report.lints);
}

#[rstest]
fn rejects_empty_record_types(validator: DefaultMetadataValidator) {
    let value = json!({"schema_version": "v0.2.0", "record_types": {}});
    assert_eq!(
        validator.validate(&document(value)),
        Err(MetadataValidationError::NoRecordTypes)
    );
}

#[rstest]
fn rejects_undeclared_starting_stage(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/starting_stage",
        json!("Backlog"),
    );
    let err = single_error(&validator, shipped);
    assert!(err.to_string().contains("starting stage 'Backlog'"));
}

#[rstest]
fn rejects_transition_to_undeclared_stage(
    validator: DefaultMetadataValidator,
    mut shipped: Value,
) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/stages/Completed/transitions_to",
        json!(["Archived"]),
    );
    let err = single_error(&validator, shipped);
    assert!(err.to_string().contains("undeclared stage 'Archived'"));
}

#[rstest]
fn rejects_stage_with_undeclared_state(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/stages/Deferred/state",
        json!("parked"),
    );
    let err = single_error(&validator, shipped);
    assert!(matches!(
        err,
        MetadataValidationError::InvalidStageDiagram { ref record_type, .. } if record_type == "tasks"
    ));
}

#[rstest]
fn rejects_non_enum_controlling_field(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/controlling_field",
        json!("title"),
    );
    let err = single_error(&validator, shipped);
    assert!(err.to_string().contains("not an enum field"));
}

#[rstest]
fn rejects_stage_outside_controlling_enum(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/fields/status/enum/values",
        json!([
            {"key": "Active", "name": "Active"},
            {"key": "Completed", "name": "Completed"},
            {"key": "Cancelled", "name": "Cancelled"}
        ]),
    );
    let err = single_error(&validator, shipped);
    assert!(err.to_string().contains("stage 'Deferred' is not a value of 'status'"));
}

#[rstest]
fn rejects_unknown_field_type(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/users/fields/email/type",
        json!("string"),
    );
    assert_eq!(
        single_error(&validator, shipped),
        MetadataValidationError::UnknownFieldType {
            record_type: "users".to_owned(),
            field: "email".to_owned(),
            field_type: "string".to_owned(),
        }
    );
}

#[rstest]
fn rejects_dangling_record_reference(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/fields/responsible_ids/reference/refers_to",
        json!({"#record:members": {}}),
    );
    assert_eq!(
        single_error(&validator, shipped),
        MetadataValidationError::UnknownReferenceTarget {
            record_type: "tasks".to_owned(),
            field: "responsible_ids".to_owned(),
            target: "members".to_owned(),
        }
    );
}

#[rstest]
fn collects_every_problem(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/fields/importance/enum/values",
        json!([]),
    );
    set(
        &mut shipped,
        "/record_types/tasks/fields/responsible_ids/reference/refers_to",
        json!({}),
    );
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/starting_stage",
        json!("Backlog"),
    );

    let err = validator
        .validate(&document(shipped))
        .expect_err("document should be rejected");
    assert!(matches!(err, MetadataValidationError::Multiple(_)));
    assert_eq!(err.errors().len(), 3);
}

#[rstest]
fn diagram_without_end_state_is_accepted_with_lint(
    validator: DefaultMetadataValidator,
    mut shipped: Value,
) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/states/closed/is_end_state",
        json!(false),
    );
    let report = validator
        .validate(&document(shipped))
        .expect("missing end state is not fatal");
    assert_eq!(
        report.lints,
        vec![MetadataLint::NoReachableEndState {
            record_type: "tasks".to_owned()
        }]
    );
}

#[rstest]
fn unreachable_stages_are_linted(validator: DefaultMetadataValidator, mut shipped: Value) {
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/stages/Active/transitions_to",
        json!(["Deferred"]),
    );
    set(
        &mut shipped,
        "/record_types/tasks/stage_diagram/stages/Deferred/transitions_to",
        json!(["Active"]),
    );
    let report = validator
        .validate(&document(shipped))
        .expect("unreachable stages are not fatal");

    assert!(report.lints.contains(&MetadataLint::UnreachableStage {
        record_type: "tasks".to_owned(),
        stage: "Completed".to_owned(),
    }));
    assert!(report.lints.contains(&MetadataLint::NoReachableEndState {
        record_type: "tasks".to_owned(),
    }));
    assert_eq!(report.lints.len(), 3);
}
