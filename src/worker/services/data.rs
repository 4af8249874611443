//! Users and tasks extraction worker.

use super::support::{finish, source_credentials};
use crate::extraction::domain::{ExtractionPhase, PhaseInitialState};
use crate::worker::{
    domain::{NormalizedItem, TASKS_ITEM_TYPE, USERS_ITEM_TYPE, normalize_contact, normalize_task},
    emitter::{Emitted, TerminalEmitter},
    error::WorkerError,
    ports::{PhaseWorker, WorkerContext},
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Extracts the space's users, then the sync unit's tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataWorker;

fn to_values(items: Vec<NormalizedItem>) -> Result<Vec<Value>, serde_json::Error> {
    items.into_iter().map(serde_json::to_value).collect()
}

impl DataWorker {
    /// Pushes users and tasks, marking each stream completed in turn.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] when the source API or the repository fails,
    /// or when the state is not data state.
    pub async fn extract(&self, context: &mut WorkerContext) -> Result<Value, WorkerError> {
        let event = Arc::clone(&context.event);
        let credentials = source_credentials(&event, self.phase())?;
        let adapter = context.adapter.clone();
        let PhaseInitialState::Data(state) = &mut context.state else {
            return Err(WorkerError::PhaseMismatch { phase: self.phase() });
        };

        let member_ids: Vec<String> = adapter
            .source
            .list_space_members(credentials)
            .await?
            .into_iter()
            .map(|member| member.id)
            .collect();
        let contacts = if member_ids.is_empty() {
            Vec::new()
        } else {
            adapter.source.list_contacts(credentials, &member_ids).await?
        };
        let users = to_values(contacts.iter().map(normalize_contact).collect())?;
        let users_pushed = adapter.repository.push(USERS_ITEM_TYPE, users).await?;
        state.users.completed = true;

        let tasks = adapter.source.list_tasks(credentials, &state.project_id).await?;
        let tasks = to_values(tasks.iter().map(normalize_task).collect())?;
        let tasks_pushed = adapter.repository.push(TASKS_ITEM_TYPE, tasks).await?;
        state.tasks.completed = true;
        state.completed = true;

        info!(
            project_id = %state.project_id,
            users = users_pushed,
            tasks = tasks_pushed,
            "data extraction pushed items"
        );
        Ok(json!({}))
    }
}

#[async_trait]
impl PhaseWorker for DataWorker {
    fn phase(&self) -> ExtractionPhase {
        ExtractionPhase::Data
    }

    async fn run(&self, mut context: WorkerContext, emitter: TerminalEmitter) -> Emitted {
        let result = self.extract(&mut context).await;
        finish(emitter, result).await
    }
}
