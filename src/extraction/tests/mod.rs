//! Unit tests for the extraction module.

mod fixtures;
