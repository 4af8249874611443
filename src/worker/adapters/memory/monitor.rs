//! Terminal-contract monitor: an event transport that checks the
//! exactly-one terminal event rule.

use crate::worker::{
    domain::{InvocationId, TerminalEvent, TerminalEventType},
    ports::{EventTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};
use thiserror::Error;

/// A terminal event as received, with its arrival time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEmission {
    /// The event.
    pub event: TerminalEvent,
    /// When the transport received it.
    pub received_at: DateTime<Utc>,
}

/// Ways an invocation can break the terminal event contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TerminalContractViolation {
    /// The invocation closed without any terminal event.
    #[error("invocation {invocation_id} emitted no terminal event")]
    NoTerminalEvent {
        /// Invocation checked.
        invocation_id: InvocationId,
    },

    /// The same terminal event was emitted more than once.
    #[error("invocation {invocation_id} emitted {event_type} {count} times")]
    MultipleTerminalEvents {
        /// Invocation checked.
        invocation_id: InvocationId,
        /// Repeated event.
        event_type: TerminalEventType,
        /// Number of emissions.
        count: usize,
    },

    /// Both a done and an error event were emitted.
    #[error("invocation {invocation_id} emitted both {done} and {error}")]
    DoneAndError {
        /// Invocation checked.
        invocation_id: InvocationId,
        /// The done event.
        done: TerminalEventType,
        /// The error event.
        error: TerminalEventType,
    },
}

/// Records terminal events per invocation.
#[derive(Debug, Clone)]
pub struct TerminalContractMonitor<C = DefaultClock> {
    clock: C,
    emissions: Arc<RwLock<BTreeMap<InvocationId, Vec<RecordedEmission>>>>,
    failing: Arc<AtomicBool>,
}

impl Default for TerminalContractMonitor {
    fn default() -> Self {
        Self::new(DefaultClock)
    }
}

impl<C: Clock + Send + Sync> TerminalContractMonitor<C> {
    /// Creates a monitor stamping arrivals with `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            emissions: Arc::default(),
            failing: Arc::default(),
        }
    }

    /// Makes later deliveries fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the invocations that emitted at least once.
    #[must_use]
    pub fn invocations(&self) -> Vec<InvocationId> {
        self.emissions
            .read()
            .map(|emissions| emissions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Returns what `invocation_id` emitted, in arrival order.
    #[must_use]
    pub fn emissions(&self, invocation_id: InvocationId) -> Vec<RecordedEmission> {
        self.emissions
            .read()
            .ok()
            .and_then(|emissions| emissions.get(&invocation_id).cloned())
            .unwrap_or_default()
    }

    /// Checks that `invocation_id` emitted exactly one terminal event.
    ///
    /// # Errors
    ///
    /// Returns the [`TerminalContractViolation`] found.
    pub fn verify(
        &self,
        invocation_id: InvocationId,
    ) -> Result<RecordedEmission, TerminalContractViolation> {
        let emissions = self.emissions(invocation_id);
        let done = emissions.iter().find(|e| !e.event.event_type.is_error());
        let error = emissions.iter().find(|e| e.event.event_type.is_error());
        if let (Some(done), Some(error)) = (done, error) {
            return Err(TerminalContractViolation::DoneAndError {
                invocation_id,
                done: done.event.event_type,
                error: error.event.event_type,
            });
        }

        let Some(first) = emissions.first() else {
            return Err(TerminalContractViolation::NoTerminalEvent { invocation_id });
        };
        if emissions.len() > 1 {
            return Err(TerminalContractViolation::MultipleTerminalEvents {
                invocation_id,
                event_type: first.event.event_type,
                count: emissions.len(),
            });
        }
        Ok(first.clone())
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> EventTransport for TerminalContractMonitor<C> {
    async fn send(&self, invocation: InvocationId, event: &TerminalEvent) -> TransportResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::delivery(std::io::Error::other(
                "platform unreachable",
            )));
        }
        let recorded = RecordedEmission {
            event: event.clone(),
            received_at: self.clock.utc(),
        };
        self.emissions
            .write()
            .map_err(|err| TransportError::delivery(std::io::Error::other(err.to_string())))?
            .entry(invocation)
            .or_default()
            .push(recorded);
        Ok(())
    }
}
