//! Domain Mapping Document: model, transformation vocabulary and validation.
//!
//! The mapping document is static configuration describing how source
//! records become target records. It is loaded once per invocation,
//! validated before any worker is spawned, and then shared read-only.
//!
//! - Document model and the closed transformation vocabulary in [`domain`]
//! - Validator port and configuration in [`ports`]
//! - Rules and the default validator in [`validation`]

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

#[cfg(test)]
mod tests;
