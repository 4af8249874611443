//! Unit tests for the mapping module.

mod document_tests;
