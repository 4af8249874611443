//! Worker spawn port.

use crate::extraction::domain::{ExtractionPhase, PhaseInitialState, ValidatedEvent};
use crate::mapping::domain::DomainMappingDocument;
use crate::worker::domain::{InvocationId, TerminalEventType};
use crate::worker::ports::TransportError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for spawn operations.
pub type SpawnResult<T> = Result<T, SpawnError>;

/// Everything a phase worker is started with.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    /// The validated inbound event.
    pub event: Arc<ValidatedEvent>,
    /// Validated Domain Mapping Document, shared read-only.
    pub initial_domain_mapping: Arc<DomainMappingDocument>,
    /// Fresh phase state, owned by the worker from here on.
    pub initial_state: PhaseInitialState,
    /// Which registered worker to run.
    pub worker: ExtractionPhase,
}

/// What the spawner observed once the worker finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnReport {
    /// Identifier of the invocation.
    pub invocation_id: InvocationId,
    /// Phase that ran.
    pub phase: ExtractionPhase,
    /// Terminal event the transport accepted for the invocation.
    pub terminal_event: Option<TerminalEventType>,
    /// Whether the worker was timed out.
    pub timed_out: bool,
}

/// Starts a phase worker and waits for it to finish or time out.
#[async_trait]
pub trait WorkerSpawner: Send + Sync {
    /// Runs the worker named by `request.worker`.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] when the worker cannot be started or dies
    /// without closing its invocation.
    async fn spawn(&self, request: SpawnRequest) -> SpawnResult<SpawnReport>;
}

/// Errors returned by spawner implementations.
#[derive(Debug, Clone, Error)]
pub enum SpawnError {
    /// No worker is registered for the phase.
    #[error("no worker registered for phase {0}")]
    WorkerNotRegistered(ExtractionPhase),

    /// The worker panicked.
    #[error("{phase} worker panicked: {message}")]
    WorkerPanicked {
        /// Phase that ran.
        phase: ExtractionPhase,
        /// Panic payload.
        message: String,
    },

    /// The worker's terminal event could not be delivered.
    #[error("terminal event was not delivered: {0}")]
    Transport(#[from] TransportError),

    /// Generic platform failure.
    #[error("spawn runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl SpawnError {
    /// Wraps a platform failure.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
