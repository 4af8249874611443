//! Port contracts for phase workers.

pub mod phase;
pub mod repository;
pub mod source_api;
pub mod transport;

pub use phase::{PhaseWorker, WorkerAdapter, WorkerContext};
pub use repository::{ItemRepository, RepositoryError, RepositoryResult};
pub use source_api::{SourceApiClient, SourceApiError, SourceApiResult};
pub use transport::{EventTransport, TransportError, TransportResult};
