//! Phase workers and their registry.

mod attachments;
mod data;
mod external_sync_units;
mod metadata;
mod registry;
mod support;

pub use attachments::AttachmentsWorker;
pub use data::DataWorker;
pub use external_sync_units::ExternalSyncUnitsWorker;
pub use metadata::MetadataWorker;
pub use registry::WorkerRegistry;
