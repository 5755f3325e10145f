// crates/truth-gate/tests/composite.rs
// ============================================================================
// Module: Composite Gate Tests
// Description: Wired gate pairs behind the single-gate interface.
// Purpose: Validate composite routing and wiring of composites.
// Dependencies: truth_gate::composite
// ============================================================================
//! ## Overview
//! Integration tests for `ComposedGate`.

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

use std::cell::RefCell;
use std::rc::Rc;

use support::TestResult;
use support::ensure;
use truth_gate::ComposedGate;
use truth_gate::Gate;
use truth_gate::GateResult;
use truth_gate::LogicGate;
use truth_gate::OutputHandler;
use truth_gate::connect;
use truth_gate::factory;

/// Tests the composed NAND over every input combination.
#[test]
fn test_composed_nand_truth_table() -> TestResult {
    let nand = ComposedGate::nand()?;
    ensure(nand.input_count() == 2 && nand.output_count() == 1, "Expected a 2x1 composite")?;
    ensure(nand.evaluate()?.to_vec() == vec![true], "Expected NAND(0, 0) = 1 after wiring")?;

    for (a, b) in [(true, false), (true, true), (false, true), (false, false)] {
        nand.set(a, 0)?;
        nand.set(b, 1)?;
        let expected = !(a && b);
        ensure(
            nand.evaluate()?.to_vec() == vec![expected],
            format!("Expected NAND({a}, {b}) = {expected}"),
        )?;
        ensure(nand.get_input(0)? == a, "Expected inputs read from the input gate")?;
    }
    Ok(())
}

/// Tests the composite's `set` return value.
#[test]
fn test_composed_set_reports_outer_outputs() -> TestResult {
    let nand = ComposedGate::nand()?;
    ensure(nand.set(false, 0)?.is_none(), "Expected redundant write to report None")?;
    let outputs = nand.set(true, 0)?.ok_or("expected outputs")?;
    ensure(outputs.to_vec() == vec![true], "Expected NAND(1, 0) = 1")?;
    let outputs = nand.set(true, 1)?.ok_or("expected outputs")?;
    ensure(outputs.to_vec() == vec![false], "Expected NAND(1, 1) = 0")?;
    Ok(())
}

/// Tests that handlers attach to the output gate.
#[test]
fn test_composed_handlers_observe_output_gate() -> TestResult {
    let nand = ComposedGate::nand()?;
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    nand.output_gate().on_default(move |value, _, gate: &Gate| {
        sink.borrow_mut().push((gate.label().to_string(), value));
        Ok(())
    })?;

    nand.set(true, 0)?;
    nand.set(true, 1)?;
    ensure(
        *seen.borrow() == vec![("nand.not".to_string(), false)],
        "Expected one notification from the inner NOT",
    )?;
    ensure(nand.input_gate().label() == "nand.and", "Expected labelled input gate")?;
    Ok(())
}

/// Tests that trait-level handlers see the inner output gate and can be removed.
#[test]
fn test_trait_handlers_report_inner_gate() -> TestResult {
    let nand = ComposedGate::nand()?;
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let handler: OutputHandler = Rc::new(move |value: bool, _: usize, gate: &Gate| -> GateResult {
        sink.borrow_mut().push((gate.label().to_string(), value));
        Ok(())
    });
    nand.on_handler(Rc::clone(&handler), 0)?;

    nand.set(true, 0)?;
    nand.set(true, 1)?;
    ensure(
        *seen.borrow() == vec![("nand.not".to_string(), false)],
        "Expected the inner NOT as reporting gate",
    )?;

    ensure(nand.remove_handler(&handler, 0), "Expected the handler removed")?;
    nand.set(false, 1)?;
    ensure(seen.borrow().len() == 1, "Expected no calls after removal")?;
    Ok(())
}

/// Tests wiring composites into and out of plain gates.
#[test]
fn test_connect_with_composites() -> TestResult {
    let nand = Rc::new(ComposedGate::nand()?);
    let not = Rc::new(factory::not());

    // NAND feeding NOT gives AND.
    connect(nand.as_ref(), 0, &not, 0)?;
    ensure(not.get_input(0)?, "Expected NOT to start from NAND's high output")?;

    // Plain gate feeding the composite.
    let driver = factory::or();
    connect(&driver, 0, &nand, 1)?;

    nand.set(true, 0)?;
    driver.set(true, 0)?;
    ensure(not.evaluate()?.to_vec() == vec![true], "Expected AND(1, 1) = 1 downstream")?;
    Ok(())
}
