//! Domain Mapping Document model.
//!
//! The document is deserialized permissively (transformation methods are
//! kept as strings) so that an unknown method is reported by the validator
//! with its location rather than as an opaque parse failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Declarative description of how source records become target records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMappingDocument {
    /// Mapping format version, e.g. `v1`.
    pub format_version: String,
    /// Version of the target metadata this mapping was written against.
    pub devrev_metadata_version: u32,
    /// Record type mappings.
    #[serde(default)]
    pub additional_mappings: AdditionalMappings,
}

/// Container for per-record-type mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalMappings {
    /// Mappings keyed by external record type name.
    #[serde(default)]
    pub record_type_mappings: BTreeMap<String, RecordTypeMapping>,
}

/// How one external record type maps onto the target model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTypeMapping {
    /// Target type used when no explicit choice is made.
    pub default_mapping: LeafType,
    /// Candidate target types with their field rules.
    #[serde(default)]
    pub possible_record_type_mappings: Vec<PossibleRecordTypeMapping>,
    /// Whether the record type may be mapped as a custom object instead.
    #[serde(default)]
    pub mapping_as_custom_object: bool,
}

/// A target object category and type pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafType {
    /// Category, e.g. `stock` or `custom`.
    pub object_category: String,
    /// Target object type, e.g. `issue`.
    pub object_type: String,
}

/// One candidate target type for an external record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleRecordTypeMapping {
    /// Target leaf type name.
    pub devrev_leaf_type: String,
    /// Whether records flow from the source to the target.
    pub forward: bool,
    /// Whether records flow from the target back to the source.
    pub reverse: bool,
    /// Field-level rules for this candidate.
    pub shard: MappingShard,
}

/// Field-level rules of a possible mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingShard {
    /// Shard mode, e.g. `create_shard`.
    pub mode: String,
    /// Target leaf type the shard applies to.
    pub devrev_leaf_type: LeafType,
    /// Rules keyed by target stock field name.
    #[serde(default)]
    pub stock_field_mappings: BTreeMap<String, FieldMapping>,
}

/// Rule for populating one target field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Whether the field is written from source to target.
    pub forward: bool,
    /// Whether the field is written from target to source.
    pub reverse: bool,
    /// Source field the value is read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_external_field: Option<String>,
    /// Transformation applied when setting the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_method_for_set: Option<TransformationSpec>,
}

/// Raw transformation entry: the method name plus its method-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationSpec {
    /// Method name; resolved against the closed vocabulary by the validator.
    pub transformation_method: String,
    /// Method-specific payload (`forward`, `reverse`, `value`, `jq`, ...).
    #[serde(flatten)]
    pub parameters: Map<String, Value>,
}

impl DomainMappingDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a structurally
    /// well-formed mapping document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns the mapping for an external record type.
    #[must_use]
    pub fn record_type_mapping(&self, record_type: &str) -> Option<&RecordTypeMapping> {
        self.additional_mappings
            .record_type_mappings
            .get(record_type)
    }

    /// Iterates every field mapping with its record type and leaf type.
    pub fn field_mappings(&self) -> impl Iterator<Item = FieldMappingRef<'_>> {
        self.additional_mappings
            .record_type_mappings
            .iter()
            .flat_map(|(record_type, mapping)| {
                mapping
                    .possible_record_type_mappings
                    .iter()
                    .flat_map(move |possible| {
                        possible.shard.stock_field_mappings.iter().map(
                            move |(field, field_mapping)| FieldMappingRef {
                                record_type,
                                leaf_type: &possible.devrev_leaf_type,
                                field,
                                mapping: field_mapping,
                            },
                        )
                    })
            })
    }
}

/// A field mapping located within its document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMappingRef<'a> {
    /// External record type name.
    pub record_type: &'a str,
    /// Target leaf type of the enclosing possible mapping.
    pub leaf_type: &'a str,
    /// Target field name.
    pub field: &'a str,
    /// The rule itself.
    pub mapping: &'a FieldMapping,
}
