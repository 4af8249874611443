//! One-shot terminal event emission.
//!
//! Every invocation owns a [`TerminalGate`]. Emitters handed to the worker
//! (and, on timeout, to its timeout callback) are consumed by
//! [`TerminalEmitter::done`] or [`TerminalEmitter::error`], which return an
//! [`Emitted`] proof. Only the first emission through a gate reaches the
//! transport.
//!
//! The send runs on its own task, so cancelling the worker that claimed the
//! gate does not cancel delivery. [`TerminalGate::settle`] waits for the
//! outcome of a claimed send.

use crate::extraction::domain::ExtractionPhase;
use crate::panic::panic_message;
use crate::worker::{
    domain::{InvocationId, TerminalEvent, TerminalEventType},
    ports::{EventTransport, TransportError, TransportResult},
};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
enum Delivery {
    Delivered(TerminalEventType),
    Failed(TransportError),
}

/// Shared per-invocation latch admitting a single terminal event.
pub struct TerminalGate {
    invocation_id: InvocationId,
    phase: ExtractionPhase,
    emitted: OnceLock<TerminalEventType>,
    delivery: watch::Sender<Option<Delivery>>,
    transport: Arc<dyn EventTransport>,
}

impl std::fmt::Debug for TerminalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalGate")
            .field("invocation_id", &self.invocation_id)
            .field("phase", &self.phase)
            .field("emitted", &self.emitted.get())
            .field("delivery", &*self.delivery.borrow())
            .finish_non_exhaustive()
    }
}

impl TerminalGate {
    /// Opens a gate for one invocation.
    #[must_use]
    pub fn new(
        invocation_id: InvocationId,
        phase: ExtractionPhase,
        transport: Arc<dyn EventTransport>,
    ) -> Arc<Self> {
        Arc::new(Self {
            invocation_id,
            phase,
            emitted: OnceLock::new(),
            delivery: watch::Sender::new(None),
            transport,
        })
    }

    /// Creates an emitter bound to this gate.
    #[must_use]
    pub fn emitter(self: &Arc<Self>) -> TerminalEmitter {
        TerminalEmitter {
            gate: Arc::clone(self),
        }
    }

    /// Returns the event that claimed the gate, delivered or not.
    #[must_use]
    pub fn emitted(&self) -> Option<TerminalEventType> {
        self.emitted.get().copied()
    }

    /// Returns the event the transport accepted, once its send finished.
    #[must_use]
    pub fn delivered(&self) -> Option<TerminalEventType> {
        match &*self.delivery.borrow() {
            Some(Delivery::Delivered(event_type)) => Some(*event_type),
            Some(Delivery::Failed(_)) | None => None,
        }
    }

    /// Waits for the send of the claimed event to finish.
    ///
    /// Returns `None` when nothing has claimed the gate.
    pub async fn settle(&self) -> Option<TransportResult<TerminalEventType>> {
        self.emitted.get()?;
        let mut receiver = self.delivery.subscribe();
        let outcome = receiver.wait_for(Option::is_some).await.ok()?.clone();
        outcome.map(|delivery| match delivery {
            Delivery::Delivered(event_type) => Ok(event_type),
            Delivery::Failed(err) => Err(err),
        })
    }

    async fn deliver(&self, event: TerminalEvent) -> TransportResult<()> {
        let event_type = event.event_type;
        let delivery = AssertUnwindSafe(self.transport.send(self.invocation_id, &event))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(TransportError::delivery(std::io::Error::other(format!(
                    "transport panicked: {}",
                    panic_message(payload.as_ref())
                ))))
            });
        let outcome = match &delivery {
            Ok(()) => Delivery::Delivered(event_type),
            Err(err) => {
                error!(
                    invocation_id = %self.invocation_id,
                    event_type = %event_type,
                    error = %err,
                    "terminal event delivery failed"
                );
                Delivery::Failed(err.clone())
            }
        };
        self.delivery.send_replace(Some(outcome));
        delivery
    }

    /// Returns the invocation this gate belongs to.
    #[must_use]
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }
}

/// Handle a worker uses to close its invocation.
#[derive(Debug)]
pub struct TerminalEmitter {
    gate: Arc<TerminalGate>,
}

impl TerminalEmitter {
    /// Returns the phase being closed.
    #[must_use]
    pub fn phase(&self) -> ExtractionPhase {
        self.gate.phase
    }

    /// Returns the invocation being closed.
    #[must_use]
    pub fn invocation_id(&self) -> InvocationId {
        self.gate.invocation_id
    }

    /// Emits the phase's done event with `event_data`.
    pub async fn done(self, event_data: Value) -> Emitted {
        let event = TerminalEvent::done(self.phase(), event_data);
        self.emit(event).await
    }

    /// Emits the phase's error event carrying `message`.
    pub async fn error(self, message: impl AsRef<str>) -> Emitted {
        let event = TerminalEvent::error(self.phase(), message.as_ref());
        self.emit(event).await
    }

    async fn emit(self, event: TerminalEvent) -> Emitted {
        let invocation_id = self.gate.invocation_id;
        let event_type = event.event_type;

        if self.gate.emitted.set(event_type).is_err() {
            warn!(
                invocation_id = %invocation_id,
                event_type = %event_type,
                first = ?self.gate.emitted(),
                "terminal event refused; invocation already closed"
            );
            return Emitted {
                event_type,
                delivery: Err(TransportError::AlreadyEmitted(invocation_id)),
            };
        }

        info!(invocation_id = %invocation_id, event_type = %event_type, "emitting terminal event");
        let gate = Arc::clone(&self.gate);
        let send = tokio::spawn(async move { gate.deliver(event).await });
        let delivery = match send.await {
            Ok(delivery) => delivery,
            Err(join_err) => Err(TransportError::delivery(join_err)),
        };
        Emitted {
            event_type,
            delivery,
        }
    }
}

/// Proof that a worker went through its emitter.
///
/// Only [`TerminalEmitter`] can build one.
#[derive(Debug)]
#[must_use]
pub struct Emitted {
    event_type: TerminalEventType,
    delivery: TransportResult<()>,
}

impl Emitted {
    /// Returns the event the worker attempted to emit.
    #[must_use]
    pub const fn event_type(&self) -> TerminalEventType {
        self.event_type
    }

    /// Returns the delivery outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AlreadyEmitted`] when the gate had already
    /// closed, or the transport's own error.
    pub fn delivery(&self) -> Result<(), &TransportError> {
        self.delivery.as_ref().copied()
    }

    /// Whether the event reached the transport successfully.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        self.delivery.is_ok()
    }
}
