// crates/truth-gate/src/composite.rs
// ============================================================================
// Module: Composite Gates
// Description: Gates assembled from wired inner gates.
// Purpose: Present a small wired network through the single-gate interface.
// Dependencies: crate::{address, error, factory, gate, interface, wiring}
// ============================================================================

//! ## Overview
//! A [`ComposedGate`] owns an input gate and an output gate that are already
//! wired together. Inputs are written to the input gate; handlers and
//! evaluation come from the output gate. Because the composite implements
//! [`LogicGate`], it can itself be wired with [`connect`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use crate::address::Signals;
use crate::error::GateResult;
use crate::factory;
use crate::gate::Gate;
use crate::gate::OutputHandler;
use crate::interface::LogicGate;
use crate::wiring::connect;

// ============================================================================
// SECTION: Composed Gate
// ============================================================================

/// Two wired gates exposed as one.
///
/// # Invariants
/// - Changes on `input` reach `output` through wiring set up by the caller.
#[derive(Debug, Clone)]
pub struct ComposedGate {
    /// Gate receiving the composite's inputs.
    input: Rc<Gate>,
    /// Gate providing the composite's outputs.
    output: Rc<Gate>,
}

impl ComposedGate {
    /// Wraps an input gate and an output gate that are already wired.
    #[must_use]
    pub const fn new(input: Rc<Gate>, output: Rc<Gate>) -> Self {
        Self {
            input,
            output,
        }
    }

    /// NAND built from an AND gate driving a NOT gate.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GateError`] if wiring the inner gates fails.
    pub fn nand() -> GateResult<Self> {
        let input = Rc::new(factory::and().with_label("nand.and"));
        let output = Rc::new(factory::not().with_label("nand.not"));
        connect(input.as_ref(), 0, &output, 0)?;
        Ok(Self::new(input, output))
    }

    /// Gate receiving the composite's inputs.
    #[must_use]
    pub const fn input_gate(&self) -> &Rc<Gate> {
        &self.input
    }

    /// Gate providing the composite's outputs.
    #[must_use]
    pub const fn output_gate(&self) -> &Rc<Gate> {
        &self.output
    }
}

impl LogicGate for ComposedGate {
    fn set(&self, value: bool, channel: usize) -> GateResult<Option<Signals>> {
        match self.input.set(value, channel)? {
            Some(_) => self.output.evaluate().map(Some),
            None => Ok(None),
        }
    }

    /// Registers on the inner output gate, which is also the `&Gate` the
    /// handler receives.
    fn on_handler(&self, handler: OutputHandler, channel: usize) -> GateResult {
        self.output.on_handler(handler, channel)
    }

    fn remove_handler(&self, handler: &OutputHandler, channel: usize) -> bool {
        self.output.remove_handler(handler, channel)
    }

    fn evaluate(&self) -> GateResult<Signals> {
        self.output.evaluate()
    }

    fn get_input(&self, channel: usize) -> GateResult<bool> {
        self.input.get_input(channel)
    }

    fn input_count(&self) -> usize {
        self.input.input_count()
    }

    fn output_count(&self) -> usize {
        self.output.output_count()
    }

    fn output_enabled(&self) -> bool {
        self.output.output_enabled()
    }
}
