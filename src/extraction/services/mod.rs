//! Orchestration services for extraction.

pub mod router;

pub use router::ExtractionRouter;
