//! Spawner that records requests instead of running workers.

use crate::extraction::ports::{SpawnError, SpawnReport, SpawnRequest, SpawnResult, WorkerSpawner};
use crate::worker::domain::{InvocationId, TerminalEventType};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Records every spawn request and reports an immediate done event.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    requests: Arc<RwLock<Vec<SpawnRequest>>>,
    failure: Option<SpawnError>,
}

impl RecordingSpawner {
    /// Creates a spawner whose spawns succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every spawn fail with `err` after recording the request.
    #[must_use]
    pub fn failing(mut self, err: SpawnError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Returns the recorded requests, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<SpawnRequest> {
        self.requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WorkerSpawner for RecordingSpawner {
    async fn spawn(&self, request: SpawnRequest) -> SpawnResult<SpawnReport> {
        let phase = request.worker;
        self.requests
            .write()
            .map_err(|err| SpawnError::runtime(std::io::Error::other(err.to_string())))?
            .push(request);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(SpawnReport {
            invocation_id: InvocationId::new(),
            phase,
            terminal_event: Some(TerminalEventType::done(phase)),
            timed_out: false,
        })
    }
}
