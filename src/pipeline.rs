//! Handoff of enriched events to the host telemetry pipeline.
//!
//! The core does not transmit anything itself; it pushes fully enriched
//! events into a bounded channel the host drains. Losing telemetry is
//! acceptable, breaking the caller is not: every failure path here logs a
//! diagnostic and drops the event.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{error, warn};

use crate::enrich::TelemetryEvent;

/// Stable diagnostic codes attached to internal log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    CannotParseDataAttribute = 507,
    PipelineNotAvailable = 508,
    DroppedEvent = 509,
}

impl DiagnosticCode {
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Dispatcher pushing enriched events to the host pipeline.
pub struct EventDispatcher {
    sender: Option<Sender<TelemetryEvent>>,
}

impl EventDispatcher {
    /// Create a dispatcher with a bounded handoff queue, returning the
    /// receiver the host pipeline drains.
    pub fn with_capacity(capacity: usize) -> (Self, Receiver<TelemetryEvent>) {
        let (sender, receiver) = bounded(capacity);
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Create a dispatcher with no downstream pipeline attached.
    ///
    /// Every dispatch logs a critical diagnostic and drops the event.
    pub fn disconnected() -> Self {
        Self { sender: None }
    }

    /// Whether a downstream pipeline is attached.
    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    /// Hand an enriched event to the host pipeline.
    ///
    /// Returns true when the event was accepted. Failures never propagate to
    /// the caller.
    pub fn dispatch(&self, event: TelemetryEvent) -> bool {
        let Some(sender) = &self.sender else {
            error!(
                code = DiagnosticCode::PipelineNotAvailable.code(),
                event_id = %event.id,
                "no telemetry pipeline attached, dropping event"
            );
            return false;
        };

        match sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(
                    code = DiagnosticCode::DroppedEvent.code(),
                    event_id = %event.id,
                    "handoff queue full, dropping event"
                );
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                error!(
                    code = DiagnosticCode::DroppedEvent.code(),
                    event_id = %event.id,
                    "telemetry pipeline went away, dropping event"
                );
                false
            }
        }
    }
}
