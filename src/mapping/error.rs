//! Validation errors for the Domain Mapping Document.

use thiserror::Error;

/// Location of a field mapping inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLocation {
    /// External record type name.
    pub record_type: String,
    /// Target leaf type of the enclosing possible mapping.
    pub leaf_type: String,
    /// Target field name.
    pub field: String,
}

impl std::fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}.{}", self.record_type, self.leaf_type, self.field)
    }
}

/// Structural problems that make a mapping document unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingValidationError {
    /// The document maps no record types at all.
    #[error("domain mapping declares no record type mappings")]
    NoRecordTypeMappings,

    /// A record type mapping is structurally invalid.
    #[error("record type '{record_type}': {reason}")]
    InvalidRecordType {
        /// External record type name.
        record_type: String,
        /// Description of the problem.
        reason: String,
    },

    /// A field uses a method outside the closed vocabulary.
    #[error("field {location}: unknown transformation method '{method}'")]
    UnknownTransformationMethod {
        /// Where the field mapping lives.
        location: FieldLocation,
        /// The unrecognised method name.
        method: String,
    },

    /// A field mapping is missing required data.
    #[error("field {location}: {reason}")]
    InvalidFieldMapping {
        /// Where the field mapping lives.
        location: FieldLocation,
        /// Description of the problem.
        reason: String,
    },

    /// A `map_enum` table has one-way or dangling entries.
    #[error(
        "field {location}: map_enum tables are not inverses (forward keys [{}], reverse keys [{}])",
        .source_values.join(", "),
        .target_values.join(", ")
    )]
    NonInvertibleEnumMapping {
        /// Where the field mapping lives.
        location: FieldLocation,
        /// Forward keys whose reverse lookup does not lead back.
        source_values: Vec<String>,
        /// Reverse keys whose forward lookup does not lead back.
        target_values: Vec<String>,
    },

    /// Several problems were found.
    #[error("multiple domain mapping errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[MappingValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MappingValidationError {
    /// Combines collected errors, unwrapping a single error.
    ///
    /// Returns `None` when nothing was collected.
    #[must_use]
    pub fn multiple(mut errors: Vec<Self>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// Returns every individual error, flattening `Multiple`.
    #[must_use]
    pub fn errors(&self) -> Vec<&Self> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(Self::errors).collect(),
            other => vec![other],
        }
    }
}
