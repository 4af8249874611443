//! Domain model for the External Metadata Document.

mod document;
mod error;
mod stage_diagram;

pub use document::{
    EnumValue, EnumValues, ExternalMetadataDocument, Field, FieldType, RecordType, Reference,
};
pub use error::ParseFieldTypeError;
pub use stage_diagram::{Stage, StageDiagram, StageState};
