//! Parse-and-validate step that turns a raw event into a closed sum type.

use super::{EventContext, EventType, EventValidationError, ExtractionPhase, LifecycleEvent};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Platform service account token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountToken(String);

impl ServiceAccountToken {
    /// Wraps a token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for handing to the platform.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceAccountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceAccountToken(<redacted>)")
    }
}

/// Source system credentials: the API key and the space it addresses.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceCredentials {
    api_key: String,
    space_id: String,
}

impl SourceCredentials {
    /// Creates credentials from connection data.
    #[must_use]
    pub fn new(api_key: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            space_id: space_id.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the space (organisation) identifier.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }
}

impl fmt::Debug for SourceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCredentials")
            .field("api_key", &"<redacted>")
            .field("space_id", &self.space_id)
            .finish()
    }
}

/// Phase-specific data extracted from a validated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// External sync units discovery.
    ExternalSyncUnits {
        /// Source credentials.
        credentials: SourceCredentials,
    },
    /// Metadata publication. Needs nothing from the source.
    Metadata,
    /// Data extraction for one sync unit.
    Data {
        /// Source credentials.
        credentials: SourceCredentials,
        /// Sync unit (project) to extract.
        external_sync_unit_id: String,
    },
    /// Attachments extraction for one sync unit.
    Attachments {
        /// Source credentials.
        credentials: SourceCredentials,
        /// Sync unit (project) to extract.
        external_sync_unit_id: String,
    },
}

impl PhaseEvent {
    /// Returns the phase of this variant.
    #[must_use]
    pub const fn phase(&self) -> ExtractionPhase {
        match self {
            Self::ExternalSyncUnits { .. } => ExtractionPhase::ExternalSyncUnits,
            Self::Metadata => ExtractionPhase::Metadata,
            Self::Data { .. } => ExtractionPhase::Data,
            Self::Attachments { .. } => ExtractionPhase::Attachments,
        }
    }
}

/// A lifecycle event that passed every structural and phase precondition.
///
/// Downstream code matches on [`PhaseEvent`] instead of re-checking
/// optional fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    event_type: EventType,
    service_account_token: ServiceAccountToken,
    phase_event: PhaseEvent,
    source: LifecycleEvent,
}

impl ValidatedEvent {
    /// Parses and validates one raw JSON event.
    ///
    /// # Errors
    ///
    /// Returns [`EventValidationError::Malformed`] when the value is not a
    /// JSON object, and otherwise the first failing precondition
    /// as described on [`ValidatedEvent::from_lifecycle_event`].
    pub fn from_value(value: &Value) -> Result<Self, EventValidationError> {
        let event = LifecycleEvent::deserialize(value)
            .map_err(|err| EventValidationError::Malformed(err.to_string()))?;
        Self::from_lifecycle_event(event)
    }

    /// Validates a deserialized lifecycle event.
    ///
    /// Checks run in order: event type present, authentication context
    /// present, event type routable, connection data present (all phases
    /// except metadata), external sync unit present (data and attachments).
    ///
    /// # Errors
    ///
    /// Returns the [`EventValidationError`] of the first failing check.
    pub fn from_lifecycle_event(event: LifecycleEvent) -> Result<Self, EventValidationError> {
        let event_type = event
            .event_type()
            .map(EventType::from)
            .ok_or(EventValidationError::MissingEventType)?;
        let service_account_token = event
            .service_account_token()
            .map(ServiceAccountToken::new)
            .ok_or(EventValidationError::MissingAuthenticationContext)?;
        let phase = event_type
            .phase()
            .ok_or_else(|| EventValidationError::UnsupportedEventType(event_type.to_string()))?;

        let phase_event = match phase {
            ExtractionPhase::Metadata => PhaseEvent::Metadata,
            ExtractionPhase::ExternalSyncUnits => PhaseEvent::ExternalSyncUnits {
                credentials: require_credentials(&event)?,
            },
            ExtractionPhase::Data => PhaseEvent::Data {
                credentials: require_credentials(&event)?,
                external_sync_unit_id: require_sync_unit(&event)?,
            },
            ExtractionPhase::Attachments => PhaseEvent::Attachments {
                credentials: require_credentials(&event)?,
                external_sync_unit_id: require_sync_unit(&event)?,
            },
        };

        Ok(Self {
            event_type,
            service_account_token,
            phase_event,
            source: event,
        })
    }

    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Returns the phase this event belongs to.
    #[must_use]
    pub const fn phase(&self) -> ExtractionPhase {
        self.phase_event.phase()
    }

    /// Returns the phase-specific data.
    #[must_use]
    pub const fn phase_event(&self) -> &PhaseEvent {
        &self.phase_event
    }

    /// Returns the platform service account token.
    #[must_use]
    pub const fn service_account_token(&self) -> &ServiceAccountToken {
        &self.service_account_token
    }

    /// Returns the per-run event context, if the event carried one.
    #[must_use]
    pub fn event_context(&self) -> Option<&EventContext> {
        self.source.event_context()
    }

    /// Returns the sync run identifier, if any.
    #[must_use]
    pub fn sync_run_id(&self) -> Option<&str> {
        self.source.sync_run_id()
    }

    /// Returns the event exactly as received.
    #[must_use]
    pub const fn source(&self) -> &LifecycleEvent {
        &self.source
    }
}

fn require_credentials(event: &LifecycleEvent) -> Result<SourceCredentials, EventValidationError> {
    match (event.connection_key(), event.connection_org_id()) {
        (Some(key), Some(org_id)) => Ok(SourceCredentials::new(key, org_id)),
        _ => Err(EventValidationError::MissingConnectionData),
    }
}

fn require_sync_unit(event: &LifecycleEvent) -> Result<String, EventValidationError> {
    event
        .external_sync_unit_id()
        .map(str::to_owned)
        .ok_or(EventValidationError::MissingExternalSyncUnitId)
}
