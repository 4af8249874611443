//! Metadata publication worker.

use super::support::finish;
use crate::extraction::domain::ExtractionPhase;
use crate::metadata::{ports::MetadataValidator, validation::DefaultMetadataValidator};
use crate::worker::{
    domain::METADATA_ITEM_TYPE,
    emitter::{Emitted, TerminalEmitter},
    error::WorkerError,
    ports::{PhaseWorker, WorkerContext},
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

/// Validates the packaged External Metadata Document and pushes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataWorker {
    validator: DefaultMetadataValidator,
}

impl MetadataWorker {
    /// Loads, validates and publishes the metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] when the document cannot be loaded, is
    /// invalid, or the repository rejects it.
    pub async fn extract(&self, context: &mut WorkerContext) -> Result<Value, WorkerError> {
        let document = context.adapter.documents.load_external_metadata().await?;
        let report = self.validator.validate(&document)?;
        for lint in &report.lints {
            warn!(lint = %lint, "external domain metadata lint");
        }

        let item = serde_json::to_value(&document)?;
        context
            .adapter
            .repository
            .push(METADATA_ITEM_TYPE, vec![item])
            .await?;

        context.state.mark_completed();
        Ok(json!({}))
    }
}

#[async_trait]
impl PhaseWorker for MetadataWorker {
    fn phase(&self) -> ExtractionPhase {
        ExtractionPhase::Metadata
    }

    async fn run(&self, mut context: WorkerContext, emitter: TerminalEmitter) -> Emitted {
        let result = self.extract(&mut context).await;
        finish(emitter, result).await
    }
}
