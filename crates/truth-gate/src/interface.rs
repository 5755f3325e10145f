// crates/truth-gate/src/interface.rs
// ============================================================================
// Module: Gate Interface
// Description: Common contract for plain and composite gates.
// Purpose: Let wiring and circuits treat every gate-like unit uniformly.
// Dependencies: crate::{address, error, gate}
// ============================================================================

//! ## Overview
//! [`LogicGate`] is the surface [`crate::wiring::connect`] needs: write an
//! input, subscribe to an output, evaluate. [`Gate`] implements it directly;
//! [`crate::composite::ComposedGate`] implements it by routing inputs to one
//! inner gate and outputs from another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::address::Signals;
use crate::error::GateResult;
use crate::gate::Gate;
use crate::gate::OutputHandler;

// ============================================================================
// SECTION: Logic Gate Trait
// ============================================================================

/// Gate-like unit with input channels, output channels, and handlers.
pub trait LogicGate {
    /// Writes an input channel; `Ok(None)` when nothing changed.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GateError`] for invalid channels, evaluation
    /// failures, or failing handlers.
    fn set(&self, value: bool, channel: usize) -> GateResult<Option<Signals>>;

    /// Registers a handler on an output channel.
    ///
    /// The handler's `&Gate` argument is the plain gate that actually produced
    /// the value. For a composite that is its inner output gate, not the
    /// composite itself.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GateError::InvalidChannel`] for an out-of-range channel.
    fn on_handler(&self, handler: OutputHandler, channel: usize) -> GateResult;

    /// Unregisters the most recent registration of `handler` (by identity).
    /// Returns false when it is not registered on `channel`.
    fn remove_handler(&self, handler: &OutputHandler, channel: usize) -> bool;

    /// Evaluates the current outputs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GateError::NoMatchingRow`] for incomplete tables.
    fn evaluate(&self) -> GateResult<Signals>;

    /// Reads the cached value of an input channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GateError::InvalidChannel`] for an out-of-range channel.
    fn get_input(&self, channel: usize) -> GateResult<bool>;

    /// Number of input channels.
    fn input_count(&self) -> usize;

    /// Number of output channels.
    fn output_count(&self) -> usize;

    /// Whether outputs are delivered to handlers.
    fn output_enabled(&self) -> bool {
        true
    }
}

impl LogicGate for Gate {
    fn set(&self, value: bool, channel: usize) -> GateResult<Option<Signals>> {
        Self::set(self, value, channel)
    }

    fn on_handler(&self, handler: OutputHandler, channel: usize) -> GateResult {
        Self::on_handler(self, handler, channel)
    }

    fn remove_handler(&self, handler: &OutputHandler, channel: usize) -> bool {
        Self::remove_handler(self, handler, channel)
    }

    fn evaluate(&self) -> GateResult<Signals> {
        Self::evaluate(self)
    }

    fn get_input(&self, channel: usize) -> GateResult<bool> {
        Self::get_input(self, channel)
    }

    fn input_count(&self) -> usize {
        Self::input_count(self)
    }

    fn output_count(&self) -> usize {
        Self::output_count(self)
    }

    fn output_enabled(&self) -> bool {
        Self::output_enabled(self)
    }
}
