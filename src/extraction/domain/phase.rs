//! Extraction phases and the lifecycle event types that select them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A distinct stage of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionPhase {
    /// Discovery of the units (projects) that can be synchronised.
    ExternalSyncUnits,
    /// Publication of the external metadata document.
    Metadata,
    /// Extraction of users and tasks for one sync unit.
    Data,
    /// Extraction of attachments for one sync unit.
    Attachments,
}

impl ExtractionPhase {
    /// Every phase, in run order.
    pub const ALL: [Self; 4] = [
        Self::ExternalSyncUnits,
        Self::Metadata,
        Self::Data,
        Self::Attachments,
    ];

    /// Returns the key used for this phase in initial worker state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExternalSyncUnits => "externalSyncUnits",
            Self::Metadata => "metadata",
            Self::Data => "data",
            Self::Attachments => "attachments",
        }
    }

    /// Returns the lower-case label used in human-readable messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExternalSyncUnits => "external sync units",
            Self::Metadata => "metadata",
            Self::Data => "data",
            Self::Attachments => "attachments",
        }
    }

    /// Message reported to the caller after the phase worker finished.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::ExternalSyncUnits => "External sync units extraction completed successfully",
            Self::Metadata => "Metadata extraction completed successfully",
            Self::Data => "Data extraction completed successfully",
            Self::Attachments => "Attachments extraction completed successfully",
        }
    }

    /// Message reported to the caller when the worker could not be run.
    #[must_use]
    pub fn failure_message(self, error: &impl fmt::Display) -> String {
        format!("Failed to execute {} extraction: {error}", self.label())
    }

    /// Error message emitted when the platform times the worker out.
    #[must_use]
    pub const fn timeout_message(self) -> &'static str {
        match self {
            Self::ExternalSyncUnits => "External sync units extraction timed out",
            Self::Metadata => "Metadata extraction timed out",
            Self::Data => "Data extraction timed out",
            Self::Attachments => "Attachments extraction timed out",
        }
    }
}

impl fmt::Display for ExtractionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle event type as sent by the host platform.
///
/// Every wire value the platform is known to send has a variant; anything
/// else is preserved in [`EventType::Unknown`] so it can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// `EXTRACTION_EXTERNAL_SYNC_UNITS_START`
    ExternalSyncUnitsStart,
    /// `EXTRACTION_METADATA_START`
    MetadataStart,
    /// `EXTRACTION_DATA_START`
    DataStart,
    /// `EXTRACTION_DATA_CONTINUE`
    DataContinue,
    /// `EXTRACTION_DATA_DELETE`
    DataDelete,
    /// `EXTRACTION_ATTACHMENTS_START`
    AttachmentsStart,
    /// `EXTRACTION_ATTACHMENTS_CONTINUE`
    AttachmentsContinue,
    /// `EXTRACTION_ATTACHMENTS_DELETE`
    AttachmentsDelete,
    /// Any value outside the known vocabulary.
    Unknown(String),
}

/// Event types the router accepts, in the order they are reported.
pub static SUPPORTED_EVENT_TYPES: [EventType; 5] = [
    EventType::ExternalSyncUnitsStart,
    EventType::MetadataStart,
    EventType::DataStart,
    EventType::AttachmentsStart,
    EventType::AttachmentsContinue,
];

impl EventType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ExternalSyncUnitsStart => "EXTRACTION_EXTERNAL_SYNC_UNITS_START",
            Self::MetadataStart => "EXTRACTION_METADATA_START",
            Self::DataStart => "EXTRACTION_DATA_START",
            Self::DataContinue => "EXTRACTION_DATA_CONTINUE",
            Self::DataDelete => "EXTRACTION_DATA_DELETE",
            Self::AttachmentsStart => "EXTRACTION_ATTACHMENTS_START",
            Self::AttachmentsContinue => "EXTRACTION_ATTACHMENTS_CONTINUE",
            Self::AttachmentsDelete => "EXTRACTION_ATTACHMENTS_DELETE",
            Self::Unknown(value) => value,
        }
    }

    /// Returns the phase this event starts or resumes, if it is routable.
    ///
    /// `EXTRACTION_DATA_CONTINUE` and the delete events are recognised but
    /// not routable.
    #[must_use]
    pub const fn phase(&self) -> Option<ExtractionPhase> {
        match self {
            Self::ExternalSyncUnitsStart => Some(ExtractionPhase::ExternalSyncUnits),
            Self::MetadataStart => Some(ExtractionPhase::Metadata),
            Self::DataStart => Some(ExtractionPhase::Data),
            Self::AttachmentsStart | Self::AttachmentsContinue => {
                Some(ExtractionPhase::Attachments)
            }
            Self::DataContinue
            | Self::DataDelete
            | Self::AttachmentsDelete
            | Self::Unknown(_) => None,
        }
    }

    /// Returns `true` when the router accepts this event type.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.phase().is_some()
    }

    /// Wire names of [`SUPPORTED_EVENT_TYPES`].
    #[must_use]
    pub fn supported_wire_names() -> Vec<&'static str> {
        SUPPORTED_EVENT_TYPES.iter().map(Self::as_str).collect()
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "EXTRACTION_EXTERNAL_SYNC_UNITS_START" => Self::ExternalSyncUnitsStart,
            "EXTRACTION_METADATA_START" => Self::MetadataStart,
            "EXTRACTION_DATA_START" => Self::DataStart,
            "EXTRACTION_DATA_CONTINUE" => Self::DataContinue,
            "EXTRACTION_DATA_DELETE" => Self::DataDelete,
            "EXTRACTION_ATTACHMENTS_START" => Self::AttachmentsStart,
            "EXTRACTION_ATTACHMENTS_CONTINUE" => Self::AttachmentsContinue,
            "EXTRACTION_ATTACHMENTS_DELETE" => Self::AttachmentsDelete,
            _ => Self::Unknown(value.to_owned()),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
