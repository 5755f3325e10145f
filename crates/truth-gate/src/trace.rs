// crates/truth-gate/src/trace.rs
// ============================================================================
// Module: Gate Trace Hooks
// Description: Observation hooks for gate state changes.
// Purpose: Let callers record or inspect propagation without touching handlers.
// Dependencies: crate::address, serde
// ============================================================================

//! ## Overview
//! A gate reports each `set` to its attached [`GateTrace`]. Tracing is
//! separate from output handlers: it sees redundant writes and suppressed
//! deliveries that handlers never observe. One trace may be shared by every
//! gate of a circuit to get a single ordered event log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::address::Signals;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Something a gate did in response to `set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GateEvent {
    /// `set` wrote the value already cached; nothing else happened.
    RedundantSet {
        /// Gate label.
        gate: String,
        /// Input channel written.
        channel: usize,
        /// Value written.
        value: bool,
    },
    /// An input channel changed value.
    InputChanged {
        /// Gate label.
        gate: String,
        /// Input channel that changed.
        channel: usize,
        /// New value.
        value: bool,
    },
    /// The gate evaluated after an input change.
    OutputsEvaluated {
        /// Gate label.
        gate: String,
        /// Evaluated output vector.
        outputs: Signals,
        /// False when the output-enable strategy held delivery back.
        delivered: bool,
    },
}

impl GateEvent {
    /// Label of the gate that produced the event.
    #[must_use]
    pub fn gate(&self) -> &str {
        match self {
            Self::RedundantSet {
                gate,
                ..
            }
            | Self::InputChanged {
                gate,
                ..
            }
            | Self::OutputsEvaluated {
                gate,
                ..
            } => gate,
        }
    }
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Trace hook for gate activity.
pub trait GateTrace {
    /// Called for every event a traced gate produces.
    fn on_event(&mut self, event: &GateEvent);
}

/// No-op trace hook.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default)]
pub struct NoopTrace;

impl GateTrace for NoopTrace {
    fn on_event(&mut self, _event: &GateEvent) {}
}

/// Trace hook that keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct EventLog {
    /// Recorded events, oldest first.
    events: Vec<GateEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GateEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<GateEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GateTrace for EventLog {
    fn on_event(&mut self, event: &GateEvent) {
        self.events.push(event.clone());
    }
}
