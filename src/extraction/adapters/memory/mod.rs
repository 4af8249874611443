//! In-memory extraction adapters for tests and local runs.

mod documents;
mod spawner;

pub use documents::StaticDocumentSource;
pub use spawner::RecordingSpawner;
