// crates/truth-gate/src/wiring.rs
// ============================================================================
// Module: Gate Wiring
// Description: Push connections from one gate's output to another's input.
// Purpose: Compose gates into circuits without a separate connection object.
// Dependencies: crate::{error, gate, interface}
// ============================================================================

//! ## Overview
//! [`connect`] registers a handler on the source that forwards each delivered
//! value into the destination, then copies the source's current output across
//! once so the destination starts consistent. The handler holds the
//! destination weakly: dropping the last `Rc` to a destination silently
//! retires its incoming wires.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;

use crate::error::GateError;
use crate::error::GateResult;
use crate::gate::Gate;
use crate::gate::OutputHandler;
use crate::interface::LogicGate;

// ============================================================================
// SECTION: Connect
// ============================================================================

/// Drives `dest`'s input `dest_channel` from `source`'s output `source_channel`.
///
/// ```
/// use std::rc::Rc;
///
/// use truth_gate::{connect, factory};
///
/// let and = factory::and();
/// let not = Rc::new(factory::not());
/// connect(&and, 0, &not, 0)?;
///
/// and.set(true, 0)?;
/// and.set(true, 1)?;
/// assert_eq!(not.evaluate()?.as_slice(), &[false]);
/// # Ok::<(), truth_gate::GateError>(())
/// ```
///
/// # Errors
///
/// - [`GateError::InvalidChannel`] when `dest_channel` is not an input of
///   `dest` (checked before anything is registered) or `source_channel` is not
///   an output of `source`.
/// - Any error from evaluating `source` or from the initial `dest.set`. When
///   the initial `dest.set` fails the forwarding handler is removed again, so
///   a failed `connect` leaves no wire behind. State already changed by the
///   partial propagation (cached inputs along the way) is not rolled back.
pub fn connect<S, D>(source: &S, source_channel: usize, dest: &Rc<D>, dest_channel: usize) -> GateResult
where
    S: LogicGate + ?Sized,
    D: LogicGate + ?Sized + 'static,
{
    let dest_inputs = dest.input_count();
    if dest_channel >= dest_inputs {
        return Err(GateError::invalid_input(dest_channel, dest_inputs));
    }

    let current = source.evaluate()?;
    let target = Rc::downgrade(dest);
    let forward: OutputHandler = Rc::new(move |value: bool, _channel: usize, _gate: &Gate| {
        target.upgrade().map_or(Ok(()), |dest| dest.set(value, dest_channel).map(|_| ()))
    });
    source.on_handler(Rc::clone(&forward), source_channel)?;

    let synced = current
        .get(source_channel)
        .copied()
        .ok_or_else(|| GateError::invalid_output(source_channel, current.len()))
        .and_then(|value| dest.set(value, dest_channel));
    if let Err(err) = synced {
        source.remove_handler(&forward, source_channel);
        return Err(err);
    }
    Ok(())
}
