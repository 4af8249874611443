//! Domain model for lifecycle event routing.
//!
//! Raw events are parsed into [`ValidatedEvent`], a closed sum over the four
//! phases, before any phase logic runs. Initial worker state is derived from
//! the validated event by pure builders.

mod error;
mod event;
mod outcome;
mod phase;
mod state;
mod validated;

pub use error::EventValidationError;
pub use event::{
    ConnectionData, EventContext, EventPayload, InvocationContext, LifecycleEvent, Secrets,
};
pub use outcome::RouteOutcome;
pub use phase::{EventType, ExtractionPhase, SUPPORTED_EVENT_TYPES};
pub use state::{
    AttachmentsState, DataState, ExternalSyncUnitsState, MetadataState, PhaseInitialState,
    StreamProgress, attachments_state, data_state, external_sync_units_state, metadata_state,
};
pub use validated::{PhaseEvent, ServiceAccountToken, SourceCredentials, ValidatedEvent};
