// crates/truth-gate/tests/wiring.rs
// ============================================================================
// Module: Wiring Tests
// Description: Push connections between gates.
// Purpose: Validate initial sync, propagation, and cycle detection.
// Dependencies: truth_gate::wiring
// ============================================================================
//! ## Overview
//! Integration tests for `connect`.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::rc::Rc;

use support::TestResult;
use support::ensure;
use truth_gate::ChannelDirection;
use truth_gate::Gate;
use truth_gate::GateError;
use truth_gate::TruthRow;
use truth_gate::connect;
use truth_gate::factory;

/// Tests that the destination adopts the source's current output.
#[test]
fn test_connect_syncs_destination() -> TestResult {
    let nor = factory::nor();
    let and = Rc::new(factory::and());
    ensure(!and.get_input(1)?, "Expected AND input 1 low before wiring")?;

    connect(&nor, 0, &and, 1)?;
    ensure(and.get_input(1)?, "Expected AND input 1 to follow NOR's high output")?;
    ensure(!and.get_input(0)?, "Expected other inputs untouched")?;
    ensure(nor.handler_count(0) == 1, "Expected one forwarding handler")?;
    Ok(())
}

/// Tests AND driving NOT over every input combination.
#[test]
fn test_and_into_not_behaves_as_nand() -> TestResult {
    let and = factory::and();
    let not = Rc::new(factory::not());
    connect(&and, 0, &not, 0)?;

    for (a, b) in [(false, false), (true, false), (false, true), (true, true)] {
        and.set(a, 0)?;
        and.set(b, 1)?;
        let expected = !(a && b);
        ensure(
            not.evaluate()?.to_vec() == vec![expected],
            format!("Expected NAND({a}, {b}) = {expected}"),
        )?;
    }
    Ok(())
}

/// Tests that the chosen source channel is the one forwarded.
#[test]
fn test_connect_uses_source_channel() -> TestResult {
    // Outputs: [a, !a].
    let split = Gate::from_rows(vec![
        TruthRow::new([false], [false, true]),
        TruthRow::new([true], [true, false]),
    ])?;
    let follower = Rc::new(factory::not());
    connect(&split, 1, &follower, 0)?;

    ensure(follower.get_input(0)?, "Expected initial sync from channel 1")?;
    ensure(split.handler_count(0) == 0, "Expected nothing on channel 0")?;
    ensure(split.handler_count(1) == 1, "Expected the handler on channel 1")?;

    split.set(true, 0)?;
    ensure(!follower.get_input(0)?, "Expected channel 1 to go low")?;
    Ok(())
}

/// Tests that bad channels fail before anything is registered.
#[test]
fn test_connect_rejects_bad_channels() -> TestResult {
    let source = factory::and();
    let dest = Rc::new(factory::not());

    let bad_dest = connect(&source, 0, &dest, 1);
    ensure(
        bad_dest
            == Err(GateError::InvalidChannel {
                direction: ChannelDirection::Input,
                channel: 1,
                count: 1,
            }),
        "Expected invalid destination channel",
    )?;
    ensure(source.handler_count(0) == 0, "Expected no handler after a rejected wire")?;

    let bad_source = connect(&source, 3, &dest, 0);
    ensure(
        matches!(
            bad_source,
            Err(GateError::InvalidChannel {
                direction: ChannelDirection::Output,
                channel: 3,
                ..
            })
        ),
        "Expected invalid source channel",
    )?;
    Ok(())
}

/// Tests fan-out to several destinations.
#[test]
fn test_fan_out() -> TestResult {
    let source = factory::or();
    let left = Rc::new(factory::not());
    let right = Rc::new(factory::not());
    connect(&source, 0, &left, 0)?;
    connect(&source, 0, &right, 0)?;

    source.set(true, 1)?;
    ensure(left.get_input(0)? && right.get_input(0)?, "Expected both destinations driven")?;
    Ok(())
}

/// Tests that a NOT feeding itself is reported as a cycle and left unwired.
#[test]
fn test_self_loop_is_reentrant() -> TestResult {
    let not = Rc::new(factory::not().with_label("loop"));
    let result = connect(not.as_ref(), 0, &not, 0);
    ensure(
        result
            == Err(GateError::ReentrantSet {
                gate: "loop".to_string(),
            }),
        "Expected ReentrantSet for an oscillating loop",
    )?;
    ensure(not.get_input(0)?, "Expected the first write to stay cached")?;
    ensure(not.handler_count(0) == 0, "Expected the failed wire to be removed")?;

    ensure(not.set(false, 0)?.is_some(), "Expected the gate to work unwired")?;
    Ok(())
}

/// Tests that feedback which would settle is still refused.
#[test]
fn test_settling_feedback_leaves_stale_input() -> TestResult {
    let or = Rc::new(factory::or().with_label("latch"));
    // Output 0 into input 1: the initial sync writes the cached low value.
    connect(or.as_ref(), 0, &or, 1)?;
    ensure(or.handler_count(0) == 1, "Expected the feedback wire in place")?;

    let result = or.set(true, 0);
    ensure(
        matches!(result, Err(GateError::ReentrantSet { .. })),
        "Expected the nested write to be refused",
    )?;
    ensure(or.inputs().to_vec() == vec![true, false], "Expected input 1 to stay low")?;
    ensure(or.evaluate()?.to_vec() == vec![true], "Expected the output of the first write")?;
    Ok(())
}

/// Tests that a failed initial sync leaves no live wire behind.
#[test]
fn test_failed_sync_removes_wire() -> TestResult {
    let source = factory::not();
    let partial = Rc::new(Gate::from_rows(vec![TruthRow::new([false], [false])])?);
    let result = connect(&source, 0, &partial, 0);
    ensure(
        matches!(&result, Err(GateError::NoMatchingRow { inputs }) if inputs.to_vec() == vec![true]),
        "Expected the sync to hit the missing row",
    )?;
    ensure(source.handler_count(0) == 0, "Expected the forwarding handler to be removed")?;

    ensure(source.set(true, 0)?.is_some(), "Expected the source to keep working")?;
    ensure(partial.get_input(0)?, "Expected no forwarding after the failed connect")?;
    Ok(())
}

/// Tests that dropping a destination retires its wire.
#[test]
fn test_dropped_destination_is_inert() -> TestResult {
    let source = factory::and();
    let dest = Rc::new(factory::not());
    connect(&source, 0, &dest, 0)?;
    drop(dest);

    source.set(true, 0)?;
    ensure(source.set(true, 1)?.is_some(), "Expected source to keep working")?;
    Ok(())
}
