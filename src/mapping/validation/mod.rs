//! Domain mapping validation: individual rules and the composite validator.

pub mod rules;
pub mod service;

pub use service::DefaultMappingValidator;
