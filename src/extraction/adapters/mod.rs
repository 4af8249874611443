//! Adapter implementations for extraction ports.

pub mod fs;
pub mod in_process;
pub mod memory;

pub use fs::CapStdDocumentSource;
pub use in_process::InProcessSpawner;
