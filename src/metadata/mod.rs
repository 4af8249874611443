//! External Metadata Document: record types, fields and stage diagrams.
//!
//! The metadata document tells the target system what each extracted record
//! type looks like. Validation follows the same fail-fast posture as the
//! domain mapping: every structural problem is reported at once, while
//! questionable but legal stage diagrams are surfaced as lints.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

#[cfg(test)]
mod tests;
