// crates/truth-gate/src/gate.rs
// ============================================================================
// Module: Truth-Table Gate
// Description: Stateful gate evaluated by truth-table lookup.
// Purpose: Cache inputs, detect changes, and fan outputs out to handlers.
// Dependencies: crate::{address, enable, error, table, trace}
// ============================================================================

//! ## Overview
//! A [`Gate`] owns a [`TruthTable`], the last value written to each input
//! channel, and one handler list per output channel. Writing an input with
//! [`Gate::set`] is the only way state changes:
//!
//! - writing the value already cached is a no-op (no evaluation, no handlers);
//! - writing a new value re-evaluates the table and, when output is enabled,
//!   calls every handler of every output channel with that channel's value,
//!   channel by channel and in registration order, before `set` returns.
//!
//! Outputs are not diffed: a real input change notifies even when the output
//! vector did not change.
//!
//! Gates use interior mutability and are shared as `Rc<Gate>` so that wiring
//! handlers can hold on to their destination. They are `!Sync`; propagation is
//! a plain synchronous call chain.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use truth_gate::factory;
//!
//! let gate = factory::and();
//! let last = Rc::new(Cell::new(None));
//! let seen = Rc::clone(&last);
//! gate.on(move |value, _channel, _gate| {
//!     seen.set(Some(value));
//!     Ok(())
//! }, 0)?;
//!
//! gate.set(true, 0)?;
//! gate.set(true, 1)?;
//! assert_eq!(last.get(), Some(true));
//! # Ok::<(), truth_gate::GateError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::address::Signals;
use crate::enable::AlwaysEnabled;
use crate::enable::OutputEnable;
use crate::error::GateError;
use crate::error::GateResult;
use crate::table::TruthRow;
use crate::table::TruthTable;
use crate::trace::GateEvent;
use crate::trace::GateTrace;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output handler: receives `(value, output_channel, reporting_gate)`.
///
/// Returning an error stops delivery and fails the `set` that triggered it.
pub type OutputHandler = Rc<dyn Fn(bool, usize, &Gate) -> GateResult>;

/// Trace hook shared between gates.
pub type SharedTrace = Rc<RefCell<dyn GateTrace>>;

/// Label given to gates that are not labelled explicitly.
const DEFAULT_LABEL: &str = "gate";

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Truth-table driven logic gate.
///
/// # Invariants
/// - `inputs.len() == table.input_count()` at all times.
/// - `handlers.len() == table.output_count()`.
/// - `propagating` is true only while this gate is delivering outputs.
pub struct Gate {
    /// Human-readable label used in traces and errors.
    label: String,
    /// Immutable truth table.
    table: TruthTable,
    /// Last value written to each input channel.
    inputs: RefCell<Signals>,
    /// Registered handlers, one list per output channel.
    handlers: RefCell<Vec<Vec<OutputHandler>>>,
    /// Decides whether outputs are delivered.
    enable: Box<dyn OutputEnable>,
    /// Optional trace hook.
    trace: Option<SharedTrace>,
    /// Set while handlers are running; guards against wiring cycles.
    propagating: Cell<bool>,
}

impl Gate {
    /// Creates a gate whose inputs start at the first row's inputs.
    #[must_use]
    pub fn new(table: TruthTable) -> Self {
        let inputs = table.initial_inputs();
        let handlers = (0 .. table.output_count()).map(|_| Vec::new()).collect();
        Self {
            label: DEFAULT_LABEL.to_string(),
            table,
            inputs: RefCell::new(inputs),
            handlers: RefCell::new(handlers),
            enable: Box::new(AlwaysEnabled),
            trace: None,
            propagating: Cell::new(false),
        }
    }

    /// Validates `rows` and creates a gate from them.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidTable`] or [`GateError::InconsistentShape`]
    /// when the rows do not form a valid table.
    pub fn from_rows(rows: Vec<TruthRow>) -> GateResult<Self> {
        TruthTable::new(rows).map(Self::new)
    }

    /// Sets the label reported in traces and errors.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replaces the output-enable strategy.
    #[must_use]
    pub fn with_output_enable(mut self, enable: impl OutputEnable + 'static) -> Self {
        self.enable = Box::new(enable);
        self
    }

    /// Attaches a trace hook.
    #[must_use]
    pub fn with_trace(mut self, trace: SharedTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Gate label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The gate's truth table.
    #[must_use]
    pub const fn table(&self) -> &TruthTable {
        &self.table
    }

    /// Number of input channels.
    #[must_use]
    pub const fn input_count(&self) -> usize {
        self.table.input_count()
    }

    /// Number of output channels.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        self.table.output_count()
    }

    /// Copy of the cached input vector.
    #[must_use]
    pub fn inputs(&self) -> Signals {
        self.inputs.borrow().clone()
    }

    /// Cached value of an input channel.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidChannel`] when `channel` is out of range.
    pub fn get_input(&self, channel: usize) -> GateResult<bool> {
        self.inputs
            .borrow()
            .get(channel)
            .copied()
            .ok_or_else(|| GateError::invalid_input(channel, self.input_count()))
    }

    /// Number of handlers registered on an output channel (0 when out of range).
    #[must_use]
    pub fn handler_count(&self, channel: usize) -> usize {
        self.handlers.borrow().get(channel).map_or(0, Vec::len)
    }

    /// Whether outputs are currently delivered to handlers.
    #[must_use]
    pub fn output_enabled(&self) -> bool {
        self.enable.is_output_enabled()
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Looks up the outputs for the cached inputs.
    ///
    /// The returned vector is a copy; the table itself cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::NoMatchingRow`] when the table has no row for the
    /// cached inputs.
    pub fn evaluate(&self) -> GateResult<Signals> {
        let inputs = self.inputs.borrow();
        self.table.lookup(&inputs).map(|row| row.outputs.clone()).ok_or_else(|| {
            GateError::NoMatchingRow {
                inputs: inputs.clone(),
            }
        })
    }

    /// Writes an input channel.
    ///
    /// Returns `Ok(None)` when `value` is already cached. Otherwise updates the
    /// cache, evaluates, delivers outputs if enabled, and returns the outputs.
    /// Handlers registered while delivery is running are first called on the
    /// next change.
    ///
    /// # Errors
    ///
    /// - [`GateError::InvalidChannel`] when `channel` is out of range.
    /// - [`GateError::ReentrantSet`] when a handler of this gate changes one of
    ///   its inputs again (the wiring forms a cycle). This holds even for
    ///   feedback that would settle: the nested write is refused, so the fed
    ///   back input keeps its old value while the outputs already reflect the
    ///   first write. An OR gate wired from its output to input 1 ends up with
    ///   inputs `[true, false]` and output `[true]` after `set(true, 0)`.
    /// - [`GateError::NoMatchingRow`] from evaluation.
    /// - Any error returned by a handler; remaining handlers are skipped and
    ///   the new input value stays cached.
    pub fn set(&self, value: bool, channel: usize) -> GateResult<Option<Signals>> {
        if self.get_input(channel)? == value {
            self.emit(|| GateEvent::RedundantSet {
                gate: self.label.clone(),
                channel,
                value,
            });
            return Ok(None);
        }
        if self.propagating.get() {
            return Err(GateError::ReentrantSet {
                gate: self.label.clone(),
            });
        }

        if let Some(slot) = self.inputs.borrow_mut().get_mut(channel) {
            *slot = value;
        }
        self.emit(|| GateEvent::InputChanged {
            gate: self.label.clone(),
            channel,
            value,
        });

        let outputs = self.evaluate()?;
        let delivered = self.output_enabled();
        self.emit(|| GateEvent::OutputsEvaluated {
            gate: self.label.clone(),
            outputs: outputs.clone(),
            delivered,
        });
        if delivered {
            let _guard = PropagationGuard::enter(&self.propagating);
            self.deliver(&outputs)?;
        }
        Ok(Some(outputs))
    }

    // ------------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------------

    /// Registers a handler on an output channel.
    ///
    /// Handlers run in registration order; registering the same closure twice
    /// calls it twice.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidChannel`] when `channel` is out of range.
    pub fn on<F>(&self, handler: F, channel: usize) -> GateResult
    where
        F: Fn(bool, usize, &Self) -> GateResult + 'static,
    {
        self.on_handler(Rc::new(handler), channel)
    }

    /// Registers a handler on output channel 0.
    ///
    /// # Errors
    ///
    /// Same as [`Gate::on`].
    pub fn on_default<F>(&self, handler: F) -> GateResult
    where
        F: Fn(bool, usize, &Self) -> GateResult + 'static,
    {
        self.on(handler, 0)
    }

    /// Registers an already shared handler on an output channel.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidChannel`] when `channel` is out of range.
    pub fn on_handler(&self, handler: OutputHandler, channel: usize) -> GateResult {
        let mut handlers = self.handlers.borrow_mut();
        let count = handlers.len();
        let slot = handlers.get_mut(channel).ok_or(GateError::invalid_output(channel, count))?;
        slot.push(handler);
        Ok(())
    }

    /// Unregisters the most recent registration of `handler` on a channel.
    ///
    /// Handlers are matched by identity (`Rc` pointer), not by behavior.
    /// Returns false when the handler is not registered there.
    pub fn remove_handler(&self, handler: &OutputHandler, channel: usize) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(slot) = handlers.get_mut(channel) else {
            return false;
        };
        let found = slot
            .iter()
            .rposition(|registered| std::ptr::addr_eq(Rc::as_ptr(registered), Rc::as_ptr(handler)));
        let Some(position) = found else {
            return false;
        };
        slot.remove(position);
        true
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Calls every handler with its channel's value.
    fn deliver(&self, outputs: &[bool]) -> GateResult {
        for (channel, value) in outputs.iter().copied().enumerate() {
            // Snapshot so handlers may register more handlers on this gate.
            let handlers: Vec<OutputHandler> =
                self.handlers.borrow().get(channel).cloned().unwrap_or_default();
            for handler in handlers {
                handler(value, channel, self)?;
            }
        }
        Ok(())
    }

    /// Reports an event to the trace hook, building it only when traced.
    fn emit(&self, event: impl FnOnce() -> GateEvent) {
        if let Some(trace) = &self.trace {
            let event = event();
            trace.borrow_mut().on_event(&event);
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<usize> = self.handlers.borrow().iter().map(Vec::len).collect();
        f.debug_struct("Gate")
            .field("label", &self.label)
            .field("inputs", &self.inputs.borrow())
            .field("output_count", &self.output_count())
            .field("handlers", &handlers)
            .field("output_enabled", &self.output_enabled())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Propagation Guard
// ============================================================================

/// Marks a gate as delivering outputs until dropped.
struct PropagationGuard<'a> {
    /// The gate's propagation flag.
    flag: &'a Cell<bool>,
}

impl<'a> PropagationGuard<'a> {
    /// Raises the flag.
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self {
            flag,
        }
    }
}

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
