//! External sync units discovery worker.

use super::support::{finish, source_credentials};
use crate::extraction::domain::ExtractionPhase;
use crate::worker::{
    domain::{ExternalSyncUnit, TASKS_ITEM_TYPE},
    emitter::{Emitted, TerminalEmitter},
    error::WorkerError,
    ports::{PhaseWorker, WorkerContext},
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

/// Offers every project of the space as a sync unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalSyncUnitsWorker;

impl ExternalSyncUnitsWorker {
    /// Lists projects and counts their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] when the source API fails.
    pub async fn extract(&self, context: &mut WorkerContext) -> Result<Value, WorkerError> {
        let credentials = source_credentials(&context.event, self.phase())?;
        let source = &context.adapter.source;

        let projects = source.list_projects(credentials).await?;
        let mut units = Vec::with_capacity(projects.len());
        for project in projects {
            let item_count = source.list_tasks(credentials, &project.id).await?.len();
            debug!(project_id = %project.id, item_count, "counted project tasks");
            units.push(ExternalSyncUnit {
                id: project.id,
                name: project.title.unwrap_or_default(),
                description: project.description.unwrap_or_default(),
                item_count,
                item_type: TASKS_ITEM_TYPE.to_owned(),
            });
        }

        context.state.mark_completed();
        Ok(json!({ "external_sync_units": units }))
    }
}

#[async_trait]
impl PhaseWorker for ExternalSyncUnitsWorker {
    fn phase(&self) -> ExtractionPhase {
        ExtractionPhase::ExternalSyncUnits
    }

    async fn run(&self, mut context: WorkerContext, emitter: TerminalEmitter) -> Emitted {
        let result = self.extract(&mut context).await;
        finish(emitter, result).await
    }
}
