//! Extraction event router.

use crate::extraction::{
    domain::{
        EventType, EventValidationError, PhaseInitialState, RouteOutcome, ValidatedEvent,
    },
    ports::{DocumentSource, SpawnRequest, WorkerSpawner},
};
use crate::mapping::{
    domain::DomainMappingDocument, ports::MappingValidator, validation::DefaultMappingValidator,
};
use crate::panic::panic_message;
use futures::FutureExt;
use serde_json::{Value, json};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Classifies inbound lifecycle events, builds phase state and hands the
/// invocation to a phase worker.
///
/// Every failure is reported through the returned [`RouteOutcome`]; the
/// router never returns an error or unwinds past [`ExtractionRouter::route`].
#[derive(Debug)]
pub struct ExtractionRouter<S, D>
where
    S: WorkerSpawner,
    D: DocumentSource,
{
    spawner: Arc<S>,
    documents: Arc<D>,
    validator: DefaultMappingValidator,
}

impl<S, D> ExtractionRouter<S, D>
where
    S: WorkerSpawner,
    D: DocumentSource,
{
    /// Creates a router with the default mapping validator.
    #[must_use]
    pub fn new(spawner: Arc<S>, documents: Arc<D>) -> Self {
        Self {
            spawner,
            documents,
            validator: DefaultMappingValidator::new(),
        }
    }

    /// Replaces the mapping validator.
    #[must_use]
    pub fn with_validator(mut self, validator: DefaultMappingValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Routes the first event of `events`.
    ///
    /// Checks run in a fixed order and stop at the first failure, before
    /// any document is loaded or worker spawned.
    pub async fn route(&self, events: &[Value]) -> RouteOutcome {
        match AssertUnwindSafe(self.route_first(events))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%message, "extraction routing panicked");
                RouteOutcome::failed(format!("Error during extraction: {message}"))
            }
        }
    }

    async fn route_first(&self, events: &[Value]) -> RouteOutcome {
        let Some(first) = events.first() else {
            return rejected(EventValidationError::NoEvents);
        };
        if events.len() > 1 {
            debug!(ignored = events.len() - 1, "routing only the first event");
        }

        let event = match ValidatedEvent::from_value(first) {
            Ok(event) => event,
            Err(err) => return rejected(err),
        };

        let span = info_span!(
            "route_extraction_event",
            event_type = %event.event_type(),
            sync_run_id = event.sync_run_id().unwrap_or_default(),
        );
        self.dispatch(event).instrument(span).await
    }

    async fn dispatch(&self, event: ValidatedEvent) -> RouteOutcome {
        let phase = event.phase();

        let mapping = match self.load_mapping().await {
            Ok(mapping) => mapping,
            Err(outcome) => return outcome,
        };

        let initial_state = PhaseInitialState::for_event(&event);
        let request = SpawnRequest {
            event: Arc::new(event),
            initial_domain_mapping: Arc::new(mapping),
            initial_state,
            worker: phase,
        };

        match self.spawner.spawn(request).await {
            Ok(report) => {
                info!(
                    %phase,
                    invocation_id = %report.invocation_id,
                    terminal_event = ?report.terminal_event,
                    timed_out = report.timed_out,
                    "phase worker finished"
                );
                RouteOutcome::succeeded(phase.success_message())
            }
            Err(err) => {
                error!(%phase, error = %err, "phase worker failed");
                RouteOutcome::failed(phase.failure_message(&err))
                    .with_details(json!({ "error": err.to_string() }))
            }
        }
    }

    async fn load_mapping(&self) -> Result<DomainMappingDocument, RouteOutcome> {
        let mapping = self.documents.load_domain_mapping().await.map_err(|err| {
            error!(error = %err, "failed to load domain mapping");
            RouteOutcome::failed(format!("Failed to read {}", err.document()))
                .with_details(json!({ "error": err.to_string() }))
        })?;

        self.validator.validate(&mapping).map_err(|err| {
            error!(error = %err, "domain mapping failed validation");
            let errors: Vec<String> = err.errors().iter().map(ToString::to_string).collect();
            RouteOutcome::failed(format!("Initial domain mapping is invalid: {err}"))
                .with_details(json!({ "errors": errors }))
        })?;
        Ok(mapping)
    }
}

fn rejected(err: EventValidationError) -> RouteOutcome {
    warn!(error = %err, "rejected extraction event");
    let outcome = RouteOutcome::failed(err.to_string());
    match err {
        EventValidationError::UnsupportedEventType(event_type) => outcome.with_details(json!({
            "event_type": event_type,
            "supported_event_types": EventType::supported_wire_names(),
        })),
        _ => outcome,
    }
}
