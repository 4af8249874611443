//! Raw lifecycle event as delivered by the host platform.
//!
//! Every field is optional here: the event is untrusted until it has been
//! turned into a [`super::ValidatedEvent`]. Fields of the wrong JSON type
//! read as absent, so a stray value never pre-empts the ordered checks.
//! Numeric identifiers read as their decimal text.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Inbound lifecycle event, one per invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Event payload carrying the type, credentials and run context.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<EventPayload>,
    /// Invocation context carrying platform secrets.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<InvocationContext>,
    /// Platform execution metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_metadata: Option<Value>,
}

/// The `payload` object of a lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Wire event type, e.g. `EXTRACTION_DATA_START`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_type: Option<String>,
    /// Source system credentials.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_data: Option<ConnectionData>,
    /// Per-run context.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_context: Option<EventContext>,
    /// Fields this adapter does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source system credentials supplied with the event.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionData {
    /// API key for the source system.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
    /// Organisation (space) identifier in the source system.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub org_id: Option<String>,
    /// Organisation display name.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub org_name: Option<String>,
    /// Kind of key, e.g. `token`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_type: Option<String>,
}

impl std::fmt::Debug for ConnectionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionData")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("org_id", &self.org_id)
            .field("org_name", &self.org_name)
            .field("key_type", &self.key_type)
            .finish()
    }
}

/// Per-run context attached to the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    /// Callback URL for the platform's asynchronous channel.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub callback_url: Option<String>,
    /// Sync unit (project) being extracted.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_sync_unit_id: Option<String>,
    /// Sync mode, e.g. `INITIAL` or `INCREMENTAL`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<String>,
    /// Identifier of the sync run.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sync_run_id: Option<String>,
    /// Fields this adapter does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The top-level `context` object of a lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Platform-issued secrets.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub secrets: Option<Secrets>,
    /// Fields this adapter does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Platform-issued secrets.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secrets {
    /// Token the worker uses to call back into the platform.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_account_token: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field(
                "service_account_token",
                &self.service_account_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.trim().is_empty())
}

impl LifecycleEvent {
    /// Returns the wire event type when present and non-blank.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        non_blank(self.payload.as_ref()?.event_type.as_ref())
    }

    /// Returns the service account token when present and non-blank.
    #[must_use]
    pub fn service_account_token(&self) -> Option<&str> {
        let secrets = self.context.as_ref()?.secrets.as_ref()?;
        non_blank(secrets.service_account_token.as_ref())
    }

    /// Returns the source API key when present and non-blank.
    #[must_use]
    pub fn connection_key(&self) -> Option<&str> {
        non_blank(self.connection_data()?.key.as_ref())
    }

    /// Returns the source organisation identifier when present and non-blank.
    #[must_use]
    pub fn connection_org_id(&self) -> Option<&str> {
        non_blank(self.connection_data()?.org_id.as_ref())
    }

    /// Returns the external sync unit identifier when present and non-blank.
    #[must_use]
    pub fn external_sync_unit_id(&self) -> Option<&str> {
        non_blank(self.event_context()?.external_sync_unit_id.as_ref())
    }

    /// Returns the sync run identifier when present and non-blank.
    #[must_use]
    pub fn sync_run_id(&self) -> Option<&str> {
        non_blank(self.event_context()?.sync_run_id.as_ref())
    }

    /// Returns the payload's event context, if any.
    #[must_use]
    pub fn event_context(&self) -> Option<&EventContext> {
        self.payload.as_ref()?.event_context.as_ref()
    }

    fn connection_data(&self) -> Option<&ConnectionData> {
        self.payload.as_ref()?.connection_data.as_ref()
    }
}
