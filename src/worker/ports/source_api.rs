//! Source work-management API port.

use crate::extraction::domain::SourceCredentials;
use crate::worker::domain::{SourceContact, SourceProject, SourceTask, SpaceMember};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for source API calls.
pub type SourceApiResult<T> = Result<T, SourceApiError>;

/// Typed fetch contract of the source API.
#[async_trait]
pub trait SourceApiClient: Send + Sync {
    /// Lists the projects of the credentials' space.
    async fn list_projects(
        &self,
        credentials: &SourceCredentials,
    ) -> SourceApiResult<Vec<SourceProject>>;

    /// Lists the tasks of one project.
    async fn list_tasks(
        &self,
        credentials: &SourceCredentials,
        project_id: &str,
    ) -> SourceApiResult<Vec<SourceTask>>;

    /// Lists the members of the credentials' space.
    async fn list_space_members(
        &self,
        credentials: &SourceCredentials,
    ) -> SourceApiResult<Vec<SpaceMember>>;

    /// Fetches contacts by identifier. Unknown identifiers are skipped.
    async fn list_contacts(
        &self,
        credentials: &SourceCredentials,
        contact_ids: &[String],
    ) -> SourceApiResult<Vec<SourceContact>>;
}

/// Classified source API failures.
#[derive(Debug, Clone, Error)]
pub enum SourceApiError {
    /// The API key was rejected.
    #[error("source API rejected the credentials: {0}")]
    Unauthorized(String),

    /// The API key lacks access to the resource.
    #[error("source API denied access: {0}")]
    Forbidden(String),

    /// The resource does not exist.
    #[error("source API resource not found: {0}")]
    NotFound(String),

    /// Any other client error.
    #[error("source API client error {status}: {message}")]
    Client {
        /// HTTP status code.
        status: u16,
        /// Response message.
        message: String,
    },

    /// Server-side failure.
    #[error("source API server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response message.
        message: String,
    },

    /// The request never produced a response.
    #[error("source API network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceApiError {
    /// Classifies an HTTP error status.
    ///
    /// Statuses outside the 4xx range are treated as server errors.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            400..=499 => Self::Client { status, message },
            _ => Self::Server { status, message },
        }
    }

    /// Wraps a transport-level failure.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Whether a later attempt could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network(_))
    }
}
