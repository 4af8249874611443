//! Tests for the metadata document model.

use crate::metadata::domain::{ExternalMetadataDocument, FieldType};
use rstest::rstest;

const SHIPPED_METADATA: &str = include_str!("../../../documents/external_domain_metadata.json");

fn shipped() -> ExternalMetadataDocument {
    ExternalMetadataDocument::from_json(SHIPPED_METADATA).expect("shipped metadata should parse")
}

#[rstest]
fn field_type_round_trips_through_canonical_name() {
    for field_type in FieldType::ALL {
        assert_eq!(FieldType::try_from(field_type.as_str()), Ok(field_type));
    }
}

#[rstest]
#[case("")]
#[case("Text")]
#[case("string")]
fn unknown_field_types_are_rejected(#[case] name: &str) {
    let err = FieldType::try_from(name).expect_err("name should be rejected");
    assert_eq!(err.0, name);
}

#[rstest]
fn shipped_document_exposes_record_types() {
    let document = shipped();
    assert_eq!(document.schema_version, "v0.2.0");

    let tasks = document.record_type("tasks").expect("tasks should exist");
    let status = tasks.fields.get("status").expect("status should exist");
    assert_eq!(status.parsed_type(), Ok(FieldType::Enum));
    assert!(status.is_required);
    assert!(status.allows_enum_value("Deferred"));
    assert!(!status.allows_enum_value("Done"));

    let assignees = tasks
        .fields
        .get("responsible_ids")
        .and_then(|field| field.reference.as_ref())
        .expect("responsible_ids should be a reference");
    assert_eq!(assignees.record_targets().collect::<Vec<_>>(), vec!["users"]);
}

#[rstest]
fn shipped_stage_diagram_allows_reopening() {
    let document = shipped();
    let diagram = document
        .record_type("tasks")
        .and_then(|tasks| tasks.stage_diagram.as_ref())
        .expect("tasks should have a stage diagram");

    assert!(diagram.allows_transition("Completed", "Active"));
    assert!(!diagram.allows_transition("Completed", "Deferred"));
    assert!(diagram.is_end_stage("Cancelled"));
    assert!(!diagram.is_end_stage("Deferred"));
}

#[rstest]
fn field_type_key_is_serialized_as_type() {
    let document = shipped();
    let value = serde_json::to_value(&document).expect("document should serialize");
    assert_eq!(
        value.pointer("/record_types/users/fields/email/type"),
        Some(&serde_json::json!("text"))
    );
    assert!(value.pointer("/record_types/users/stage_diagram").is_none());
}
