//! Attachments extraction worker.

use super::support::finish;
use crate::extraction::domain::ExtractionPhase;
use crate::worker::{
    emitter::{Emitted, TerminalEmitter},
    ports::{PhaseWorker, WorkerContext},
};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// The source exposes no attachment stream, so the phase completes at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentsWorker;

#[async_trait]
impl PhaseWorker for AttachmentsWorker {
    fn phase(&self) -> ExtractionPhase {
        ExtractionPhase::Attachments
    }

    async fn run(&self, mut context: WorkerContext, emitter: TerminalEmitter) -> Emitted {
        debug!(event_type = %context.event.event_type(), "no attachment stream to extract");
        context.state.mark_completed();
        finish(emitter, Ok(json!({}))).await
    }
}
