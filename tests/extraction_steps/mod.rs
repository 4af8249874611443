//! Step definitions for extraction routing scenarios.

mod given;
mod then;
mod when;
pub mod world;
