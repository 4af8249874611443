//! Initial worker state, one shape per phase.
//!
//! The serialized form is keyed by phase, e.g.
//! `{"metadata": {"completed": false}}`, and is exactly what the spawned
//! worker receives. Builders are pure and never touch the source API.

use super::{PhaseEvent, SourceCredentials, ValidatedEvent};
use serde::{Deserialize, Serialize};

/// Completion flag for one stream inside a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamProgress {
    /// Whether the stream has been fully extracted.
    pub completed: bool,
}

/// State for the external sync units phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSyncUnitsState {
    /// Whether the phase finished.
    pub completed: bool,
    /// Source space identifier.
    pub space_id: String,
    /// Source API key.
    pub api_key: String,
}

/// State for the metadata phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataState {
    /// Whether the phase finished.
    pub completed: bool,
}

/// State for the data phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataState {
    /// Whether the phase finished.
    pub completed: bool,
    /// Source space identifier.
    pub space_id: String,
    /// Source API key.
    pub api_key: String,
    /// Project being extracted.
    pub project_id: String,
    /// Progress of the users stream.
    pub users: StreamProgress,
    /// Progress of the tasks stream.
    pub tasks: StreamProgress,
}

/// State for the attachments phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentsState {
    /// Whether the phase finished.
    pub completed: bool,
    /// Source space identifier.
    pub space_id: String,
    /// Source API key.
    pub api_key: String,
    /// Project whose attachments are extracted.
    pub project_id: String,
}

/// Initial state handed to a spawned phase worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseInitialState {
    /// External sync units phase.
    ExternalSyncUnits(ExternalSyncUnitsState),
    /// Metadata phase.
    Metadata(MetadataState),
    /// Data phase.
    Data(DataState),
    /// Attachments phase.
    Attachments(AttachmentsState),
}

impl PhaseInitialState {
    /// Builds the initial state for a validated event.
    #[must_use]
    pub fn for_event(event: &ValidatedEvent) -> Self {
        match event.phase_event() {
            PhaseEvent::ExternalSyncUnits { credentials } => external_sync_units_state(credentials),
            PhaseEvent::Metadata => metadata_state(),
            PhaseEvent::Data {
                credentials,
                external_sync_unit_id,
            } => data_state(credentials, external_sync_unit_id),
            PhaseEvent::Attachments {
                credentials,
                external_sync_unit_id,
            } => attachments_state(credentials, external_sync_unit_id),
        }
    }

    /// Returns whether the phase is marked completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        match self {
            Self::ExternalSyncUnits(state) => state.completed,
            Self::Metadata(state) => state.completed,
            Self::Data(state) => state.completed,
            Self::Attachments(state) => state.completed,
        }
    }

    /// Marks the phase as completed.
    pub const fn mark_completed(&mut self) {
        match self {
            Self::ExternalSyncUnits(state) => state.completed = true,
            Self::Metadata(state) => state.completed = true,
            Self::Data(state) => state.completed = true,
            Self::Attachments(state) => state.completed = true,
        }
    }
}

/// State for the external sync units phase.
#[must_use]
pub fn external_sync_units_state(credentials: &SourceCredentials) -> PhaseInitialState {
    PhaseInitialState::ExternalSyncUnits(ExternalSyncUnitsState {
        completed: false,
        space_id: credentials.space_id().to_owned(),
        api_key: credentials.api_key().to_owned(),
    })
}

/// State for the metadata phase. Metadata is static per external system, so
/// nothing from the event is carried.
#[must_use]
pub const fn metadata_state() -> PhaseInitialState {
    PhaseInitialState::Metadata(MetadataState { completed: false })
}

/// State for the data phase.
#[must_use]
pub fn data_state(credentials: &SourceCredentials, project_id: &str) -> PhaseInitialState {
    PhaseInitialState::Data(DataState {
        completed: false,
        space_id: credentials.space_id().to_owned(),
        api_key: credentials.api_key().to_owned(),
        project_id: project_id.to_owned(),
        users: StreamProgress::default(),
        tasks: StreamProgress::default(),
    })
}

/// State for the attachments phase.
#[must_use]
pub fn attachments_state(credentials: &SourceCredentials, project_id: &str) -> PhaseInitialState {
    PhaseInitialState::Attachments(AttachmentsState {
        completed: false,
        space_id: credentials.space_id().to_owned(),
        api_key: credentials.api_key().to_owned(),
        project_id: project_id.to_owned(),
    })
}
