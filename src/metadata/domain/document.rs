//! External Metadata Document model.

use super::{ParseFieldTypeError, StageDiagram};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Shape of every record type presented to the target system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalMetadataDocument {
    /// Metadata schema version, e.g. `v0.2.0`.
    pub schema_version: String,
    /// Record types keyed by name.
    #[serde(default)]
    pub record_types: BTreeMap<String, RecordType>,
}

/// One record type and its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    /// Display name.
    pub name: String,
    /// Fields keyed by name.
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    /// Lifecycle diagram for status-bearing record types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_diagram: Option<StageDiagram>,
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field type name; resolved against [`FieldType`] by the validator.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether every record must carry a value.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field is indexed for lookup.
    #[serde(default)]
    pub is_indexed: bool,
    /// Enum values, for `enum` fields.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<EnumValues>,
    /// Reference targets, for `reference` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// Allowed values of an enum field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValues {
    /// The values, in display order.
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// One allowed enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Stored key.
    pub key: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Record types a reference field may point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Targets keyed by `#record:<record type>` or a target-system type.
    #[serde(default)]
    pub refers_to: BTreeMap<String, Value>,
}

impl Reference {
    /// Prefix of reference targets that name a record type in this document.
    pub const RECORD_PREFIX: &'static str = "#record:";

    /// Record types of this document the field refers to.
    pub fn record_targets(&self) -> impl Iterator<Item = &str> {
        self.refers_to
            .keys()
            .filter_map(|key| key.strip_prefix(Self::RECORD_PREFIX))
    }
}

/// Field types understood by the target system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Floating point number.
    Float,
    /// Plain text.
    Text,
    /// Rich text.
    RichText,
    /// One of a declared set of values.
    Enum,
    /// Calendar date.
    Date,
    /// Point in time.
    Timestamp,
    /// Reference to another record.
    Reference,
    /// Permission descriptor.
    Permission,
    /// Nested structure.
    Struct,
}

impl FieldType {
    /// Every field type.
    pub const ALL: [Self; 11] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Text,
        Self::RichText,
        Self::Enum,
        Self::Date,
        Self::Timestamp,
        Self::Reference,
        Self::Permission,
        Self::Struct,
    ];

    /// Returns the canonical document representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::RichText => "rich_text",
            Self::Enum => "enum",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Reference => "reference",
            Self::Permission => "permission",
            Self::Struct => "struct",
        }
    }
}

impl TryFrom<&str> for FieldType {
    type Error = ParseFieldTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| ParseFieldTypeError(value.to_owned()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Field {
    /// Returns the parsed field type.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFieldTypeError`] for unknown type names.
    pub fn parsed_type(&self) -> Result<FieldType, ParseFieldTypeError> {
        FieldType::try_from(self.field_type.as_str())
    }

    /// Returns whether `key` is one of this field's enum values.
    #[must_use]
    pub fn allows_enum_value(&self, key: &str) -> bool {
        self.enum_values
            .as_ref()
            .is_some_and(|values| values.values.iter().any(|value| value.key == key))
    }
}

impl ExternalMetadataDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a structurally
    /// well-formed metadata document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns a record type by name.
    #[must_use]
    pub fn record_type(&self, name: &str) -> Option<&RecordType> {
        self.record_types.get(name)
    }
}
