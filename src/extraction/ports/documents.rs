//! Document source port for the packaged static documents.

use crate::mapping::domain::DomainMappingDocument;
use crate::metadata::domain::ExternalMetadataDocument;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document loading.
pub type DocumentSourceResult<T> = Result<T, DocumentLoadError>;

/// Loads the static documents shipped with the adapter.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Loads and parses the Domain Mapping Document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentLoadError`] when the document is missing, unreadable
    /// or not well-formed.
    async fn load_domain_mapping(&self) -> DocumentSourceResult<DomainMappingDocument>;

    /// Loads and parses the External Metadata Document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentLoadError`] when the document is missing, unreadable
    /// or not well-formed.
    async fn load_external_metadata(&self) -> DocumentSourceResult<ExternalMetadataDocument>;
}

/// The static documents a source can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// The Domain Mapping Document.
    DomainMapping,
    /// The External Metadata Document.
    ExternalMetadata,
}

impl DocumentKind {
    /// Returns the human-readable document name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomainMapping => "initial domain mapping",
            Self::ExternalMetadata => "external domain metadata",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while loading a static document.
#[derive(Debug, Clone, Error)]
pub enum DocumentLoadError {
    /// The document file does not exist.
    #[error("{document} not found at '{path}'")]
    NotFound {
        /// Which document.
        document: DocumentKind,
        /// Path relative to the documents directory.
        path: String,
    },

    /// The document is not well-formed.
    #[error("{document} is malformed: {reason}")]
    Parse {
        /// Which document.
        document: DocumentKind,
        /// Parser message.
        reason: String,
    },

    /// Reading failed.
    #[error("failed to read {document}: {source}")]
    Io {
        /// Which document.
        document: DocumentKind,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl DocumentLoadError {
    /// Wraps a read failure.
    pub fn io(document: DocumentKind, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io {
            document,
            source: Arc::new(err),
        }
    }

    /// Wraps a parse failure.
    #[must_use]
    pub fn parse(document: DocumentKind, err: &serde_json::Error) -> Self {
        Self::Parse {
            document,
            reason: err.to_string(),
        }
    }

    /// Returns which document failed.
    #[must_use]
    pub const fn document(&self) -> DocumentKind {
        match self {
            Self::NotFound { document, .. }
            | Self::Parse { document, .. }
            | Self::Io { document, .. } => *document,
        }
    }
}
