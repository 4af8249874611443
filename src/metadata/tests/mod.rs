//! Unit tests for the metadata module.

mod document_tests;
mod validation_tests;
