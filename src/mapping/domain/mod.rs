//! Domain model for the Domain Mapping Document.

mod document;
mod error;
mod transformation;

pub use document::{
    AdditionalMappings, DomainMappingDocument, FieldMapping, FieldMappingRef, LeafType,
    MappingShard, PossibleRecordTypeMapping, RecordTypeMapping, TransformationSpec,
};
pub use error::{MappingDomainError, ParseTransformationMethodError};
pub use transformation::{EnumMapping, EnumTarget, Transformation, TransformationMethod};
