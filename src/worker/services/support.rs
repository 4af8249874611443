//! Helpers shared by the phase workers.

use crate::extraction::domain::{ExtractionPhase, PhaseEvent, SourceCredentials, ValidatedEvent};
use crate::worker::{
    emitter::{Emitted, TerminalEmitter},
    error::WorkerError,
};
use serde_json::Value;
use tracing::{error, info};

/// Closes the invocation with done or error depending on `result`.
pub(super) async fn finish(emitter: TerminalEmitter, result: Result<Value, WorkerError>) -> Emitted {
    match result {
        Ok(event_data) => {
            info!(phase = %emitter.phase(), "phase worker finished");
            emitter.done(event_data).await
        }
        Err(err) => {
            error!(phase = %emitter.phase(), error = %err, "phase worker failed");
            emitter.error(err.to_string()).await
        }
    }
}

/// Returns the source credentials carried by a non-metadata event.
pub(super) fn source_credentials(
    event: &ValidatedEvent,
    phase: ExtractionPhase,
) -> Result<&SourceCredentials, WorkerError> {
    match event.phase_event() {
        PhaseEvent::ExternalSyncUnits { credentials }
        | PhaseEvent::Data { credentials, .. }
        | PhaseEvent::Attachments { credentials, .. } => Ok(credentials),
        PhaseEvent::Metadata => Err(WorkerError::PhaseMismatch { phase }),
    }
}
