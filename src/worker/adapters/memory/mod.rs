//! In-memory worker adapters for tests and local runs.

mod monitor;
mod repository;
mod source_api;

pub use monitor::{RecordedEmission, TerminalContractMonitor, TerminalContractViolation};
pub use repository::InMemoryItemRepository;
pub use source_api::{InMemorySourceApi, SourceCall};
