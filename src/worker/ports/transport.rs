//! Platform event transport port.

use crate::worker::domain::{InvocationId, TerminalEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Delivers terminal events to the platform.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Sends one terminal event for `invocation`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Delivery`] when the platform cannot be
    /// reached.
    async fn send(&self, invocation: InvocationId, event: &TerminalEvent) -> TransportResult<()>;
}

/// Errors surfaced while emitting terminal events.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The invocation already emitted its terminal event.
    #[error("invocation {0} already emitted its terminal event")]
    AlreadyEmitted(InvocationId),

    /// The event could not be delivered.
    #[error("terminal event delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a delivery failure.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
