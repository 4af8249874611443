//! Ports for the extraction context.

pub mod documents;
pub mod spawner;

pub use documents::{DocumentKind, DocumentLoadError, DocumentSource, DocumentSourceResult};
pub use spawner::{SpawnError, SpawnReport, SpawnRequest, SpawnResult, WorkerSpawner};
