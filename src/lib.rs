//! Workbridge: extraction adapter from a work-management API into a target
//! system's domain model.
//!
//! The crate routes platform lifecycle events to phase workers, builds the
//! state each worker starts from, and validates the static documents that
//! describe how source records map onto target records.
//!
//! # Architecture
//!
//! Workbridge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (filesystem, in-memory,
//!   in-process workers)
//!
//! # Modules
//!
//! - [`extraction`]: Event validation, initial state and routing
//! - [`mapping`]: Domain Mapping Document model and validation
//! - [`metadata`]: External Metadata Document model and validation
//! - [`worker`]: Phase workers and the terminal event contract
//! - [`config`]: Adapter configuration

pub mod config;
pub mod extraction;
pub mod mapping;
pub mod metadata;
mod panic;
pub mod worker;
