//! Phase-to-worker registry.

use super::{AttachmentsWorker, DataWorker, ExternalSyncUnitsWorker, MetadataWorker};
use crate::extraction::domain::ExtractionPhase;
use crate::worker::ports::PhaseWorker;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Workers keyed by the phase they handle.
#[derive(Clone, Default)]
pub struct WorkerRegistry {
    workers: BTreeMap<ExtractionPhase, Arc<dyn PhaseWorker>>,
}

impl std::fmt::Debug for WorkerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerRegistry")
            .field("phases", &self.workers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WorkerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the four built-in workers.
    #[must_use]
    pub fn with_default_workers() -> Self {
        Self::new()
            .with_worker(Arc::new(ExternalSyncUnitsWorker))
            .with_worker(Arc::new(MetadataWorker::default()))
            .with_worker(Arc::new(DataWorker))
            .with_worker(Arc::new(AttachmentsWorker))
    }

    /// Registers `worker` under its phase, returning the worker it replaced.
    pub fn register(&mut self, worker: Arc<dyn PhaseWorker>) -> Option<Arc<dyn PhaseWorker>> {
        self.workers.insert(worker.phase(), worker)
    }

    /// Builder form of [`WorkerRegistry::register`].
    #[must_use]
    pub fn with_worker(mut self, worker: Arc<dyn PhaseWorker>) -> Self {
        self.register(worker);
        self
    }

    /// Returns the worker for `phase`.
    #[must_use]
    pub fn get(&self, phase: ExtractionPhase) -> Option<Arc<dyn PhaseWorker>> {
        self.workers.get(&phase).cloned()
    }

    /// Returns the registered phases in run order.
    pub fn phases(&self) -> impl Iterator<Item = ExtractionPhase> + '_ {
        self.workers.keys().copied()
    }
}
