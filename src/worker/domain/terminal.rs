//! Terminal events closing a phase worker invocation.

use crate::extraction::domain::ExtractionPhase;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Event type of a terminal emission: one done and one error per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalEventType {
    /// External sync units were listed.
    #[serde(rename = "EXTRACTION_EXTERNAL_SYNC_UNITS_DONE")]
    ExternalSyncUnitsDone,
    /// External sync units listing failed.
    #[serde(rename = "EXTRACTION_EXTERNAL_SYNC_UNITS_ERROR")]
    ExternalSyncUnitsError,
    /// Metadata was published.
    #[serde(rename = "EXTRACTION_METADATA_DONE")]
    MetadataDone,
    /// Metadata publication failed.
    #[serde(rename = "EXTRACTION_METADATA_ERROR")]
    MetadataError,
    /// Data extraction finished.
    #[serde(rename = "EXTRACTION_DATA_DONE")]
    DataDone,
    /// Data extraction failed.
    #[serde(rename = "EXTRACTION_DATA_ERROR")]
    DataError,
    /// Attachments extraction finished.
    #[serde(rename = "EXTRACTION_ATTACHMENTS_DONE")]
    AttachmentsDone,
    /// Attachments extraction failed.
    #[serde(rename = "EXTRACTION_ATTACHMENTS_ERROR")]
    AttachmentsError,
}

impl TerminalEventType {
    /// The success event of `phase`.
    #[must_use]
    pub const fn done(phase: ExtractionPhase) -> Self {
        match phase {
            ExtractionPhase::ExternalSyncUnits => Self::ExternalSyncUnitsDone,
            ExtractionPhase::Metadata => Self::MetadataDone,
            ExtractionPhase::Data => Self::DataDone,
            ExtractionPhase::Attachments => Self::AttachmentsDone,
        }
    }

    /// The failure event of `phase`.
    #[must_use]
    pub const fn error(phase: ExtractionPhase) -> Self {
        match phase {
            ExtractionPhase::ExternalSyncUnits => Self::ExternalSyncUnitsError,
            ExtractionPhase::Metadata => Self::MetadataError,
            ExtractionPhase::Data => Self::DataError,
            ExtractionPhase::Attachments => Self::AttachmentsError,
        }
    }

    /// Returns the phase this event closes.
    #[must_use]
    pub const fn phase(self) -> ExtractionPhase {
        match self {
            Self::ExternalSyncUnitsDone | Self::ExternalSyncUnitsError => {
                ExtractionPhase::ExternalSyncUnits
            }
            Self::MetadataDone | Self::MetadataError => ExtractionPhase::Metadata,
            Self::DataDone | Self::DataError => ExtractionPhase::Data,
            Self::AttachmentsDone | Self::AttachmentsError => ExtractionPhase::Attachments,
        }
    }

    /// Whether this is an error event.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::ExternalSyncUnitsError
                | Self::MetadataError
                | Self::DataError
                | Self::AttachmentsError
        )
    }

    /// Returns the platform wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExternalSyncUnitsDone => "EXTRACTION_EXTERNAL_SYNC_UNITS_DONE",
            Self::ExternalSyncUnitsError => "EXTRACTION_EXTERNAL_SYNC_UNITS_ERROR",
            Self::MetadataDone => "EXTRACTION_METADATA_DONE",
            Self::MetadataError => "EXTRACTION_METADATA_ERROR",
            Self::DataDone => "EXTRACTION_DATA_DONE",
            Self::DataError => "EXTRACTION_DATA_ERROR",
            Self::AttachmentsDone => "EXTRACTION_ATTACHMENTS_DONE",
            Self::AttachmentsError => "EXTRACTION_ATTACHMENTS_ERROR",
        }
    }
}

impl fmt::Display for TerminalEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal event as handed to the platform transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalEvent {
    /// Done or error, per phase.
    pub event_type: TerminalEventType,
    /// Phase-specific payload; errors carry `{"error": {"message": ..}}`.
    #[serde(default)]
    pub event_data: Value,
}

impl TerminalEvent {
    /// Success event for `phase` with the given payload.
    #[must_use]
    pub const fn done(phase: ExtractionPhase, event_data: Value) -> Self {
        Self {
            event_type: TerminalEventType::done(phase),
            event_data,
        }
    }

    /// Error event for `phase` carrying `message`.
    #[must_use]
    pub fn error(phase: ExtractionPhase, message: &str) -> Self {
        Self {
            event_type: TerminalEventType::error(phase),
            event_data: json!({ "error": { "message": message } }),
        }
    }

    /// Returns the error message of an error event.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.event_data.pointer("/error/message")?.as_str()
    }
}
