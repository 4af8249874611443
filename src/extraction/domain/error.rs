//! Error types for lifecycle event validation.

use thiserror::Error;

/// Reasons an inbound lifecycle event is rejected before any phase logic runs.
///
/// Variants are ordered the way the router checks them; the first failing
/// check wins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventValidationError {
    /// The invocation carried no events.
    #[error("No events provided: expected a non-empty array of events")]
    NoEvents,

    /// The event could not be read as a lifecycle event object.
    #[error("Invalid event structure: {0}")]
    Malformed(String),

    /// The payload or its `event_type` is absent.
    #[error("Event payload or event_type is missing")]
    MissingEventType,

    /// `context.secrets.service_account_token` is absent.
    #[error("Event is missing required authentication context")]
    MissingAuthenticationContext,

    /// The event type is outside the routable set.
    #[error("Unsupported event type")]
    UnsupportedEventType(String),

    /// `payload.connection_data.key` or `.org_id` is absent.
    #[error("Event is missing required connection data")]
    MissingConnectionData,

    /// `payload.event_context.external_sync_unit_id` is absent.
    #[error("Event is missing required external_sync_unit_id")]
    MissingExternalSyncUnitId,
}
