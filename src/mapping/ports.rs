//! Validator port for Domain Mapping Documents.

use crate::mapping::{domain::DomainMappingDocument, error::MappingValidationError};

/// Result type for mapping validation.
pub type MappingValidationResult<T> = Result<T, MappingValidationError>;

/// Port for structural validation of mapping documents.
///
/// Implementations collect every problem before returning and must be
/// stateless, so a single validator can be shared across invocations.
pub trait MappingValidator: Send + Sync {
    /// Validates the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`MappingValidationError`] describing every problem found;
    /// several problems are combined into [`MappingValidationError::Multiple`].
    fn validate(&self, document: &DomainMappingDocument) -> MappingValidationResult<()>;
}

/// Tunables for mapping validation.
///
/// # Examples
///
/// ```
/// use workbridge::mapping::ports::MappingValidationConfig;
///
/// assert!(MappingValidationConfig::default().require_invertible_enums);
/// assert!(!MappingValidationConfig::lenient().require_invertible_enums);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingValidationConfig {
    /// Whether every `map_enum` forward entry must round-trip through the
    /// reverse table.
    pub require_invertible_enums: bool,
}

impl Default for MappingValidationConfig {
    fn default() -> Self {
        Self {
            require_invertible_enums: true,
        }
    }
}

impl MappingValidationConfig {
    /// Configuration that tolerates many-to-one enum tables.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            require_invertible_enums: false,
        }
    }
}
