//! Closed transformation-method vocabulary and typed transformations.

use super::{MappingDomainError, ParseTransformationMethodError, TransformationSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Transformation applied when a target field is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationMethod {
    /// Copy the source value unchanged.
    UseDirectly,
    /// Treat the source value as rich text.
    UseRichText,
    /// Translate through forward/reverse enum tables.
    MapEnum,
    /// Ignore the source and write a constant.
    UseFixedValue,
    /// Keep only references of a given type.
    FilterTypedReference,
    /// Build an authorization target.
    MakeAuthorizationTarget,
    /// Build custom link records.
    MakeCustomLinks,
    /// Build custom stage records.
    MakeCustomStages,
    /// Translate roles.
    MapRoles,
    /// Wrap the source value in an array.
    UseAsArrayValue,
    /// Resolve to an existing target record.
    UseDevrevRecord,
    /// Take the first non-null of several source fields.
    UseFirstNonNull,
    /// Evaluate a raw jq expression.
    UseRawJq,
}

impl TransformationMethod {
    /// The complete vocabulary.
    pub const ALL: [Self; 13] = [
        Self::UseDirectly,
        Self::UseRichText,
        Self::MapEnum,
        Self::UseFixedValue,
        Self::FilterTypedReference,
        Self::MakeAuthorizationTarget,
        Self::MakeCustomLinks,
        Self::MakeCustomStages,
        Self::MapRoles,
        Self::UseAsArrayValue,
        Self::UseDevrevRecord,
        Self::UseFirstNonNull,
        Self::UseRawJq,
    ];

    /// Returns the canonical document representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UseDirectly => "use_directly",
            Self::UseRichText => "use_rich_text",
            Self::MapEnum => "map_enum",
            Self::UseFixedValue => "use_fixed_value",
            Self::FilterTypedReference => "filter_typed_reference",
            Self::MakeAuthorizationTarget => "make_authorization_target",
            Self::MakeCustomLinks => "make_custom_links",
            Self::MakeCustomStages => "make_custom_stages",
            Self::MapRoles => "map_roles",
            Self::UseAsArrayValue => "use_as_array_value",
            Self::UseDevrevRecord => "use_devrev_record",
            Self::UseFirstNonNull => "use_first_non_null",
            Self::UseRawJq => "use_raw_jq",
        }
    }

    /// Whether a forward mapping with this method must name its source field.
    #[must_use]
    pub const fn reads_primary_external_field(self) -> bool {
        matches!(
            self,
            Self::UseDirectly | Self::UseRichText | Self::UseAsArrayValue | Self::MapEnum
        )
    }
}

impl TryFrom<&str> for TransformationMethod {
    type Error = ParseTransformationMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| ParseTransformationMethodError(value.to_owned()))
    }
}

impl fmt::Display for TransformationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target side of one enum table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumTarget {
    /// Mapped enum value.
    pub value: String,
}

/// Forward and reverse enum translation tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMapping {
    /// Source value to target value.
    pub forward: BTreeMap<String, EnumTarget>,
    /// Target value to source value.
    pub reverse: BTreeMap<String, EnumTarget>,
}

impl EnumMapping {
    /// Translates a source value into its target value.
    #[must_use]
    pub fn map_forward(&self, source: &str) -> Option<&str> {
        self.forward.get(source).map(|target| target.value.as_str())
    }

    /// Translates a target value back into its source value.
    #[must_use]
    pub fn map_reverse(&self, target: &str) -> Option<&str> {
        self.reverse.get(target).map(|source| source.value.as_str())
    }

    /// Source values whose reverse translation does not lead back to them.
    #[must_use]
    pub fn non_invertible_keys(&self) -> Vec<String> {
        self.forward
            .iter()
            .filter(|(source, target)| self.map_reverse(&target.value) != Some(source.as_str()))
            .map(|(source, _)| source.clone())
            .collect()
    }

    /// Target values whose forward translation does not lead back to them.
    #[must_use]
    pub fn dangling_reverse_keys(&self) -> Vec<String> {
        self.reverse
            .iter()
            .filter(|(target, source)| self.map_forward(&source.value) != Some(target.as_str()))
            .map(|(target, _)| target.clone())
            .collect()
    }
}

/// A transformation resolved against the closed vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformation {
    /// `map_enum` with its tables.
    MapEnum(EnumMapping),
    /// `use_fixed_value` with its constant.
    UseFixedValue(Value),
    /// `use_raw_jq` with its expression.
    UseRawJq {
        /// The jq program.
        jq: String,
    },
    /// Any method that carries no payload this crate interprets.
    Plain(TransformationMethod),
}

impl Transformation {
    /// Returns the method of this transformation.
    #[must_use]
    pub const fn method(&self) -> TransformationMethod {
        match self {
            Self::MapEnum(_) => TransformationMethod::MapEnum,
            Self::UseFixedValue(_) => TransformationMethod::UseFixedValue,
            Self::UseRawJq { .. } => TransformationMethod::UseRawJq,
            Self::Plain(method) => *method,
        }
    }
}

impl TransformationSpec {
    /// Resolves the raw entry into a typed transformation.
    ///
    /// # Errors
    ///
    /// Returns [`MappingDomainError::UnknownTransformationMethod`] for methods
    /// outside the vocabulary and [`MappingDomainError::InvalidPayload`] when
    /// the method's required payload is missing or malformed.
    pub fn resolve(&self) -> Result<Transformation, MappingDomainError> {
        let method = TransformationMethod::try_from(self.transformation_method.as_str())?;
        match method {
            TransformationMethod::MapEnum => self.resolve_enum_mapping().map(Transformation::MapEnum),
            TransformationMethod::UseFixedValue => match self.parameters.get("value") {
                Some(value) if !value.is_null() => Ok(Transformation::UseFixedValue(value.clone())),
                _ => Err(MappingDomainError::invalid_payload(
                    method,
                    "a non-null `value` is required",
                )),
            },
            TransformationMethod::UseRawJq => match self.parameters.get("jq").and_then(Value::as_str)
            {
                Some(jq) if !jq.trim().is_empty() => Ok(Transformation::UseRawJq {
                    jq: jq.to_owned(),
                }),
                _ => Err(MappingDomainError::invalid_payload(
                    method,
                    "a non-empty `jq` expression is required",
                )),
            },
            other => Ok(Transformation::Plain(other)),
        }
    }

    fn resolve_enum_mapping(&self) -> Result<EnumMapping, MappingDomainError> {
        let method = TransformationMethod::MapEnum;
        let table = |direction: &str| -> Result<BTreeMap<String, EnumTarget>, MappingDomainError> {
            let raw = self.parameters.get(direction).ok_or_else(|| {
                MappingDomainError::invalid_payload(
                    method,
                    format!("the `{direction}` lookup table is required"),
                )
            })?;
            serde_json::from_value(raw.clone()).map_err(|err| {
                MappingDomainError::invalid_payload(
                    method,
                    format!("the `{direction}` lookup table is malformed: {err}"),
                )
            })
        };

        Ok(EnumMapping {
            forward: table("forward")?,
            reverse: table("reverse")?,
        })
    }
}
