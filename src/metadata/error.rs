//! Validation errors and lints for the External Metadata Document.

use thiserror::Error;

/// Structural problems that make a metadata document unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataValidationError {
    /// The document declares no record types.
    #[error("external metadata declares no record types")]
    NoRecordTypes,

    /// A field declares a type outside the known set.
    #[error("record type '{record_type}': field '{field}' has unknown type '{field_type}'")]
    UnknownFieldType {
        /// Record type name.
        record_type: String,
        /// Field name.
        field: String,
        /// The unrecognised type name.
        field_type: String,
    },

    /// A field is missing type-specific data.
    #[error("record type '{record_type}': field '{field}' {reason}")]
    InvalidField {
        /// Record type name.
        record_type: String,
        /// Field name.
        field: String,
        /// Description of the problem.
        reason: String,
    },

    /// A reference field points at an undeclared record type.
    #[error("record type '{record_type}': field '{field}' refers to unknown record type '{target}'")]
    UnknownReferenceTarget {
        /// Record type name.
        record_type: String,
        /// Field name.
        field: String,
        /// The unresolved target.
        target: String,
    },

    /// A stage diagram is structurally invalid.
    #[error("record type '{record_type}': stage diagram {reason}")]
    InvalidStageDiagram {
        /// Record type name.
        record_type: String,
        /// Description of the problem.
        reason: String,
    },

    /// Several problems were found.
    #[error("multiple external metadata errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[MetadataValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MetadataValidationError {
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

    pub(crate) fn invalid_stage_diagram(record_type: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStageDiagram {
            record_type: record_type.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Non-fatal observations about an otherwise valid document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataLint {
    /// No end-state stage can be reached from the starting stage.
    #[error("record type '{record_type}': stage diagram has no reachable end state")]
    NoReachableEndState {
        /// Record type name.
        record_type: String,
    },

    /// A declared stage cannot be reached from the starting stage.
    #[error("record type '{record_type}': stage '{stage}' is unreachable from the starting stage")]
    UnreachableStage {
        /// Record type name.
        record_type: String,
        /// The unreachable stage.
        stage: String,
    },
}
