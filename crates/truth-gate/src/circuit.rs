// crates/truth-gate/src/circuit.rs
// ============================================================================
// Module: Circuits
// Description: Named gates wired together from a circuit description.
// Purpose: Assemble and drive circuits by gate name.
// Dependencies: crate::{address, config, error, gate, wiring}
// ============================================================================

//! ## Overview
//! A [`Circuit`] owns named gates and applies wires with [`connect`], so every
//! wired input starts in sync with its source. Driving a gate by name runs the
//! usual synchronous propagation through everything downstream.
//!
//! ```
//! use truth_gate::{Circuit, CircuitConfig};
//!
//! let config = CircuitConfig::from_toml_str(
//!     r#"
//!     [[gates]]
//!     name = "and"
//!     kind = "and"
//!
//!     [[gates]]
//!     name = "out"
//!     kind = "not"
//!
//!     [[wires]]
//!     from = "and"
//!     to = "out"
//!     "#,
//! )?;
//! let circuit = Circuit::from_config(&config)?;
//! circuit.set("and", true, 0)?;
//! circuit.set("and", true, 1)?;
//! assert_eq!(circuit.evaluate("out")?.as_slice(), &[false]);
//! # Ok::<(), truth_gate::CircuitError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::address::Signals;
use crate::config::CircuitConfig;
use crate::config::CircuitError;
use crate::config::MAX_GATES;
use crate::config::validate_gate_name;
use crate::gate::Gate;
use crate::gate::SharedTrace;
use crate::wiring::connect;

// ============================================================================
// SECTION: Circuit
// ============================================================================

/// Named, wired gates.
///
/// # Invariants
/// - Gate names are unique and valid per the circuit naming rules.
/// - At most `MAX_GATES` gates.
#[derive(Default)]
pub struct Circuit {
    /// Gates by name.
    gates: BTreeMap<String, Rc<Gate>>,
    /// Trace hook attached to gates built from configuration.
    trace: Option<SharedTrace>,
}

impl Circuit {
    /// Creates an empty circuit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty circuit whose configured gates share `trace`.
    #[must_use]
    pub fn traced(trace: SharedTrace) -> Self {
        Self {
            gates: BTreeMap::new(),
            trace: Some(trace),
        }
    }

    /// Builds gates and wires from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError`] when validation, gate construction, or wiring
    /// fails.
    pub fn from_config(config: &CircuitConfig) -> Result<Self, CircuitError> {
        let mut circuit = Self::new();
        circuit.apply(config)?;
        Ok(circuit)
    }

    /// Adds the gates and wires of `config` to this circuit.
    ///
    /// The configured gates are built and wired on their own first and only
    /// join the circuit once every wire is in place, so a failed `apply`
    /// leaves the circuit unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Circuit::from_config`], plus [`CircuitError::DuplicateGate`]
    /// when a configured name already exists here and [`CircuitError::Invalid`]
    /// when the merged circuit would exceed the gate limit.
    pub fn apply(&mut self, config: &CircuitConfig) -> Result<(), CircuitError> {
        config.validate()?;
        if self.gates.len() + config.gates.len() > MAX_GATES {
            return Err(CircuitError::Invalid(format!("too many gates (max {MAX_GATES})")));
        }

        let mut staged = BTreeMap::new();
        for entry in &config.gates {
            if self.gates.contains_key(&entry.name) {
                return Err(CircuitError::DuplicateGate(entry.name.clone()));
            }
            let mut gate = entry.kind.build()?.with_label(entry.name.clone());
            if let Some(trace) = &self.trace {
                gate = gate.with_trace(Rc::clone(trace));
            }
            staged.insert(entry.name.clone(), Rc::new(gate));
        }
        for wire in &config.wires {
            let source = require(&staged, &wire.from)?;
            let dest = require(&staged, &wire.to)?;
            connect(source.as_ref(), wire.from_channel, dest, wire.to_channel)?;
        }

        self.gates.append(&mut staged);
        Ok(())
    }

    /// Adds a gate under `name` and returns the shared handle.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::Invalid`] for bad names or when the circuit is
    /// full, and [`CircuitError::DuplicateGate`] when `name` is taken.
    pub fn add_gate(&mut self, name: impl Into<String>, gate: Gate) -> Result<Rc<Gate>, CircuitError> {
        let name = name.into();
        validate_gate_name(&name)?;
        if self.gates.contains_key(&name) {
            return Err(CircuitError::DuplicateGate(name));
        }
        if self.gates.len() >= MAX_GATES {
            return Err(CircuitError::Invalid(format!("too many gates (max {MAX_GATES})")));
        }
        let gate = Rc::new(gate);
        self.gates.insert(name, Rc::clone(&gate));
        Ok(gate)
    }

    /// Wires `from`'s output channel to `to`'s input channel.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::UnknownGate`] for undefined names and
    /// [`CircuitError::Gate`] for wiring failures.
    pub fn connect(
        &self,
        from: &str,
        from_channel: usize,
        to: &str,
        to_channel: usize,
    ) -> Result<(), CircuitError> {
        let source = require(&self.gates, from)?;
        let dest = require(&self.gates, to)?;
        connect(source.as_ref(), from_channel, dest, to_channel)?;
        Ok(())
    }

    /// Writes an input channel of the named gate.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::UnknownGate`] for undefined names and
    /// [`CircuitError::Gate`] when the write fails.
    pub fn set(&self, name: &str, value: bool, channel: usize) -> Result<Option<Signals>, CircuitError> {
        Ok(require(&self.gates, name)?.set(value, channel)?)
    }

    /// Evaluates the named gate.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::UnknownGate`] for undefined names and
    /// [`CircuitError::Gate`] when evaluation fails.
    pub fn evaluate(&self, name: &str) -> Result<Signals, CircuitError> {
        Ok(require(&self.gates, name)?.evaluate()?)
    }

    /// Looks up a gate by name.
    #[must_use]
    pub fn gate(&self, name: &str) -> Option<&Rc<Gate>> {
        self.gates.get(name)
    }

    /// Gate names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gates.keys().map(String::as_str)
    }

    /// Number of gates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circuit")
            .field("gates", &self.gates)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

/// Looks up a gate or reports it as unknown.
fn require<'a>(gates: &'a BTreeMap<String, Rc<Gate>>, name: &str) -> Result<&'a Rc<Gate>, CircuitError> {
    gates.get(name).ok_or_else(|| CircuitError::UnknownGate(name.to_string()))
}
