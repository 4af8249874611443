//! Phase worker contract.

use crate::extraction::domain::{ExtractionPhase, PhaseInitialState, ValidatedEvent};
use crate::extraction::ports::DocumentSource;
use crate::mapping::domain::DomainMappingDocument;
use crate::worker::{
    emitter::{Emitted, TerminalEmitter},
    ports::{ItemRepository, SourceApiClient},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborators available to a worker: repositories, the source API and the
/// packaged documents.
#[derive(Clone)]
pub struct WorkerAdapter {
    /// Destination for extracted items.
    pub repository: Arc<dyn ItemRepository>,
    /// Source work-management API.
    pub source: Arc<dyn SourceApiClient>,
    /// Packaged static documents.
    pub documents: Arc<dyn DocumentSource>,
}

impl std::fmt::Debug for WorkerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerAdapter").finish_non_exhaustive()
    }
}

/// Inputs of one worker invocation.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// The validated event that triggered the invocation.
    pub event: Arc<ValidatedEvent>,
    /// Validated Domain Mapping Document.
    pub initial_domain_mapping: Arc<DomainMappingDocument>,
    /// Phase state, mutated as the worker progresses.
    pub state: PhaseInitialState,
    /// Collaborators.
    pub adapter: WorkerAdapter,
}

/// One phase's worker.
///
/// `run` must close the invocation through `emitter`; returning [`Emitted`]
/// makes that visible in the signature. `on_timeout` is invoked by the
/// spawner after the platform deadline passed and the run was dropped.
#[async_trait]
pub trait PhaseWorker: Send + Sync {
    /// Returns the phase this worker handles.
    fn phase(&self) -> ExtractionPhase;

    /// Performs the phase's work and emits its terminal event.
    async fn run(&self, context: WorkerContext, emitter: TerminalEmitter) -> Emitted;

    /// Emits the phase's error event after a timeout.
    async fn on_timeout(&self, emitter: TerminalEmitter) -> Emitted {
        let message = self.phase().timeout_message();
        emitter.error(message).await
    }
}
