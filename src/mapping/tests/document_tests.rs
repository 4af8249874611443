//! Tests for the mapping document model and transformation vocabulary.

use crate::mapping::domain::{
    DomainMappingDocument, Transformation, TransformationMethod, TransformationSpec,
};
use rstest::{fixture, rstest};
use serde_json::json;

const SHIPPED_MAPPING: &str = include_str!("../../../documents/initial_domain_mapping.json");

#[fixture]
fn shipped() -> DomainMappingDocument {
    DomainMappingDocument::from_json(SHIPPED_MAPPING).expect("shipped mapping should parse")
}

#[rstest]
fn vocabulary_round_trips_through_canonical_names() {
    for method in TransformationMethod::ALL {
        assert_eq!(TransformationMethod::try_from(method.as_str()), Ok(method));
    }
}

#[rstest]
#[case("bogus_method")]
#[case("USE_DIRECTLY")]
#[case("")]
fn vocabulary_is_closed(#[case] name: &str) {
    assert!(TransformationMethod::try_from(name).is_err());
}

#[rstest]
fn shipped_document_exposes_record_types(shipped: DomainMappingDocument) {
    let tasks = shipped
        .record_type_mapping("tasks")
        .expect("tasks mapping should exist");
    assert_eq!(tasks.default_mapping.object_type, "issue");
    assert!(shipped.record_type_mapping("users").is_some());
    assert!(shipped.record_type_mapping("projects").is_none());
}

#[rstest]
fn field_mappings_are_located(shipped: DomainMappingDocument) {
    let stage = shipped
        .field_mappings()
        .find(|field| field.record_type == "tasks" && field.field == "stage")
        .expect("stage mapping should exist");

    assert_eq!(stage.leaf_type, "issue");
    assert_eq!(
        stage.mapping.primary_external_field.as_deref(),
        Some("status")
    );
}

#[rstest]
fn every_shipped_enum_mapping_inverts(shipped: DomainMappingDocument) {
    let enum_tables: Vec<_> = shipped
        .field_mappings()
        .filter_map(|field| field.mapping.transformation_method_for_set.as_ref())
        .filter_map(|spec| match spec.resolve() {
            Ok(Transformation::MapEnum(tables)) => Some(tables),
            _ => None,
        })
        .collect();

    assert!(!enum_tables.is_empty());
    for tables in enum_tables {
        for (source, target) in &tables.forward {
            let reverse = tables
                .reverse
                .get(&target.value)
                .expect("reverse entry should exist");
            assert_eq!(&reverse.value, source);
        }
    }
}

#[rstest]
fn enum_mapping_translates_both_directions() {
    let spec: TransformationSpec = serde_json::from_value(json!({
        "transformation_method": "map_enum",
        "forward": {"Active": {"value": "in_development"}},
        "reverse": {"in_development": {"value": "Active"}}
    }))
    .expect("spec should deserialize");

    let Ok(Transformation::MapEnum(tables)) = spec.resolve() else {
        panic!("expected a map_enum transformation");
    };
    assert_eq!(tables.map_forward("Active"), Some("in_development"));
    assert_eq!(tables.map_reverse("in_development"), Some("Active"));
    assert_eq!(tables.map_forward("Deferred"), None);
}

#[rstest]
fn fixed_value_keeps_its_payload() {
    let spec: TransformationSpec = serde_json::from_value(json!({
        "transformation_method": "use_fixed_value",
        "value": "P2"
    }))
    .expect("spec should deserialize");

    assert_eq!(
        spec.resolve(),
        Ok(Transformation::UseFixedValue(json!("P2")))
    );
}

#[rstest]
fn document_serializes_back_with_method_payloads(shipped: DomainMappingDocument) {
    let value = serde_json::to_value(&shipped).expect("document should serialize");
    let method = value
        .pointer("/additional_mappings/record_type_mappings/tasks/possible_record_type_mappings/0/shard/stock_field_mappings/stage/transformation_method_for_set/forward/Active/value")
        .and_then(serde_json::Value::as_str);
    assert_eq!(method, Some("in_development"));
}
