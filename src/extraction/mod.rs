//! Extraction event routing.
//!
//! An invocation starts with a batch of raw lifecycle events from the host
//! platform. The router validates the first event into a
//! [`domain::ValidatedEvent`], loads and validates the Domain Mapping
//! Document, builds the phase's initial state and hands everything to a
//! [`ports::WorkerSpawner`]. The outcome is always a single
//! [`domain::RouteOutcome`].
//!
//! - Event model, validation and initial state in [`domain`]
//! - Spawner and document source contracts in [`ports`]
//! - In-process, filesystem and in-memory implementations in [`adapters`]
//! - The router in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
