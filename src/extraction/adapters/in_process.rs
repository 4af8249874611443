//! Spawner running registered phase workers on the Tokio runtime.

use crate::extraction::ports::{SpawnError, SpawnReport, SpawnRequest, SpawnResult, WorkerSpawner};
use crate::panic::panic_message;
use crate::worker::{
    domain::InvocationId,
    emitter::TerminalGate,
    ports::{EventTransport, TransportError, WorkerAdapter, WorkerContext},
    services::WorkerRegistry,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, error, info, info_span, warn};

/// Runs workers in-process, enforcing the platform deadline.
///
/// Each spawn gets a fresh [`InvocationId`] and [`TerminalGate`]. When the
/// deadline passes the run task is aborted and the worker's timeout callback
/// receives a new emitter on the same gate, so at most one terminal event
/// is delivered per invocation. A send the worker started before the
/// deadline is awaited rather than dropped.
#[derive(Clone)]
pub struct InProcessSpawner {
    registry: WorkerRegistry,
    adapter: WorkerAdapter,
    transport: Arc<dyn EventTransport>,
    timeout: Duration,
}

impl std::fmt::Debug for InProcessSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessSpawner")
            .field("registry", &self.registry)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl InProcessSpawner {
    /// Creates a spawner handing `adapter` to every worker it runs.
    #[must_use]
    pub fn new(
        registry: WorkerRegistry,
        adapter: WorkerAdapter,
        transport: Arc<dyn EventTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            adapter,
            transport,
            timeout,
        }
    }
}

#[async_trait]
impl WorkerSpawner for InProcessSpawner {
    async fn spawn(&self, request: SpawnRequest) -> SpawnResult<SpawnReport> {
        let phase = request.worker;
        let worker = self
            .registry
            .get(phase)
            .ok_or(SpawnError::WorkerNotRegistered(phase))?;

        let invocation_id = InvocationId::new();
        let gate = TerminalGate::new(invocation_id, phase, Arc::clone(&self.transport));
        let context = WorkerContext {
            event: request.event,
            initial_domain_mapping: request.initial_domain_mapping,
            state: request.initial_state,
            adapter: self.adapter.clone(),
        };

        let span = info_span!("phase_worker", %phase, %invocation_id);
        let run_worker = Arc::clone(&worker);
        let emitter = gate.emitter();
        let mut handle = tokio::spawn(
            async move { run_worker.run(context, emitter).await }.instrument(span.clone()),
        );

        let timed_out = match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(Ok(_emitted)) => false,
            Ok(Err(join_err)) => {
                let message = if join_err.is_panic() {
                    panic_message(join_err.into_panic().as_ref())
                } else {
                    join_err.to_string()
                };
                error!(%phase, %invocation_id, %message, "phase worker died");
                if gate.emitted().is_none() {
                    let emitted = gate.emitter().error(phase.failure_message(&message)).await;
                    info!(delivered = emitted.is_delivered(), "closed invocation after worker died");
                } else {
                    gate.settle().await;
                }
                return Err(SpawnError::WorkerPanicked { phase, message });
            }
            Err(_elapsed) => {
                handle.abort();
                warn!(%phase, %invocation_id, timeout = ?self.timeout, "phase worker timed out");
                let emitted = worker.on_timeout(gate.emitter()).instrument(span).await;
                info!(
                    event_type = %emitted.event_type(),
                    delivered = emitted.is_delivered(),
                    "timeout callback finished"
                );
                true
            }
        };

        // A send claimed by the aborted worker is still in flight.
        if let Some(Err(err @ TransportError::Delivery(_))) = gate.settle().await {
            return Err(SpawnError::Transport(err));
        }

        Ok(SpawnReport {
            invocation_id,
            phase,
            terminal_event: gate.delivered(),
            timed_out,
        })
    }
}
