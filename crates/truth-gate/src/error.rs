// crates/truth-gate/src/error.rs
// ============================================================================
// Module: Gate Error Definitions
// Description: Structured diagnostics for truth-table gates.
// Purpose: Provide stable error variants for table, channel, and wiring faults.
// Dependencies: serde::{Serialize, Deserialize}, thiserror
// ============================================================================

//! ## Overview
//! Every gate operation fails immediately with a [`GateError`]. The variants
//! describe configuration and programming defects (malformed tables, channel
//! indices out of range, incomplete tables), never transient conditions, so
//! callers are expected to treat them as fatal for the circuit being built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::address::Signals;

// ============================================================================
// SECTION: Channel Direction
// ============================================================================

/// Which side of a gate a channel index refers to.
///
/// # Invariants
/// - Closed set: a channel is either an input or an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelDirection {
    /// Input channel (driven through `set`).
    Input,
    /// Output channel (observed through `on`).
    Output,
}

impl fmt::Display for ChannelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

// ============================================================================
// SECTION: Gate Errors
// ============================================================================

/// Errors raised by truth tables, gates, and wiring.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateError {
    /// The truth table is malformed or empty.
    #[error("invalid truth table: {reason}")]
    InvalidTable {
        /// What made the table unusable.
        reason: String,
    },

    /// A row's input or output width differs from the first row's.
    #[error(
        "inconsistent truth table shape at row {row}: expected {expected_inputs} inputs and \
         {expected_outputs} outputs, found {actual_inputs} and {actual_outputs}"
    )]
    InconsistentShape {
        /// Index of the offending row.
        row: usize,
        /// Input width of the first row.
        expected_inputs: usize,
        /// Input width of the offending row.
        actual_inputs: usize,
        /// Output width of the first row.
        expected_outputs: usize,
        /// Output width of the offending row.
        actual_outputs: usize,
    },

    /// A channel index is out of range for the gate.
    #[error("invalid {direction} channel {channel} (gate has {count})")]
    InvalidChannel {
        /// Input or output side.
        direction: ChannelDirection,
        /// Requested channel index.
        channel: usize,
        /// Number of channels on that side.
        count: usize,
    },

    /// No table row matches the cached inputs.
    #[error("no truth table row matches inputs {}", render_signals(.inputs))]
    NoMatchingRow {
        /// Cached inputs at the time of evaluation.
        inputs: Signals,
    },

    /// An N-input generator was asked for an unsupported channel count.
    #[error("invalid arity {arity}: expected a channel count between {min} and {max}")]
    InvalidArity {
        /// Requested channel count.
        arity: usize,
        /// Smallest supported channel count.
        min: usize,
        /// Largest supported channel count.
        max: usize,
    },

    /// A gate was driven again while it was still notifying its handlers.
    #[error("re-entrant set on gate `{gate}`: wiring forms a cycle")]
    ReentrantSet {
        /// Label of the gate that was re-entered.
        gate: String,
    },
}

/// Renders a signal vector as a compact `0`/`1` string, channel 0 first.
fn render_signals(signals: &Signals) -> String {
    signals.iter().map(|value| if *value { '1' } else { '0' }).collect()
}

// ============================================================================
// SECTION: Convenience Helpers
// ============================================================================

impl GateError {
    /// Creates an invalid table error with the given reason.
    pub fn invalid_table(reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input channel error.
    #[must_use]
    pub const fn invalid_input(channel: usize, count: usize) -> Self {
        Self::InvalidChannel {
            direction: ChannelDirection::Input,
            channel,
            count,
        }
    }

    /// Creates an invalid output channel error.
    #[must_use]
    pub const fn invalid_output(channel: usize, count: usize) -> Self {
        Self::InvalidChannel {
            direction: ChannelDirection::Output,
            channel,
            count,
        }
    }

    /// Returns a short message suitable for people wiring circuits by hand.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidTable {
                ..
            }
            | Self::InconsistentShape {
                ..
            } => "The gate's truth table is malformed".to_string(),
            Self::InvalidChannel {
                direction,
                channel,
                count,
            } => {
                let max = count.saturating_sub(1);
                format!("There is no {direction} {channel} on this gate (use 0 to {max})")
            }
            Self::NoMatchingRow {
                ..
            } => "The gate's truth table does not cover its current inputs".to_string(),
            Self::InvalidArity {
                min,
                max,
                ..
            } => format!("Gates need between {min} and {max} inputs"),
            Self::ReentrantSet {
                gate,
            } => format!("Gate `{gate}` feeds back into itself"),
        }
    }
}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Convenient result type for gate operations.
pub type GateResult<T = ()> = Result<T, GateError>;
