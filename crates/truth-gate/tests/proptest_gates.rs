//! Truth-gate property-based tests.
//!
//! ## Purpose
//! These tests drive gates with randomized input sequences and check them
//! against the boolean functions they model.
//!
//! ## What is covered
//! - Address decoding and encoding are inverse on the decoded width.
//! - N-input AND/OR/NAND/NOR agree with their definitions for every arity.
//! - Redundant writes never change state or notify handlers.
//!
//! ## What is intentionally out of scope
//! - Wiring cycles (covered by the wiring integration tests).
// crates/truth-gate/tests/proptest_gates.rs
// ============================================================================
// Module: Truth Gate Property-Based Tests
// Description: Randomized checks for address coding and gate behavior.
// Purpose: Ensure generated tables match their rules for arbitrary inputs.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use truth_gate::MIN_GENERATED_ARITY;
use truth_gate::decode_address;
use truth_gate::encode_address;
use truth_gate::factory;

/// Widest arity sampled per case.
const SAMPLED_MAX_ARITY: usize = 8;

/// Input vector with a supported arity.
fn arity_and_inputs() -> impl Strategy<Value = Vec<bool>> {
    (MIN_GENERATED_ARITY ..= SAMPLED_MAX_ARITY)
        .prop_flat_map(|arity| proptest::collection::vec(any::<bool>(), arity))
}

proptest! {
    #[test]
    fn decode_then_encode_is_identity(address in any::<u64>(), width in 0_usize ..= 64) {
        let mask = if width == 64 { u64::MAX } else { (1_u64 << width) - 1 };
        let decoded = decode_address(address, width);
        prop_assert_eq!(decoded.len(), width);
        prop_assert_eq!(encode_address(&decoded), address & mask);
    }

    #[test]
    fn n_input_gates_follow_their_rules(inputs in arity_and_inputs()) {
        let arity = inputs.len();
        let all = inputs.iter().all(|value| *value);
        let any = inputs.iter().any(|value| *value);
        let cases = [
            (factory::and_n(arity).unwrap(), all),
            (factory::or_n(arity).unwrap(), any),
            (factory::nand_n(arity).unwrap(), !all),
            (factory::nor_n(arity).unwrap(), !any),
        ];
        for (gate, expected) in cases {
            for (channel, value) in inputs.iter().copied().enumerate() {
                gate.set(value, channel).unwrap();
            }
            prop_assert_eq!(gate.evaluate().unwrap().to_vec(), vec![expected]);
        }
    }

    #[test]
    fn redundant_writes_never_notify(writes in proptest::collection::vec((any::<bool>(), 0_usize .. 3), 0 .. 32)) {
        let gate = factory::and_n(3).unwrap();
        let calls = Rc::new(Cell::new(0_usize));
        let counter = Rc::clone(&calls);
        gate.on_default(move |_, _, _| {
            counter.set(counter.get() + 1);
            Ok(())
        }).unwrap();

        let mut changes = 0_usize;
        for (value, channel) in writes {
            let before = gate.get_input(channel).unwrap();
            let result = gate.set(value, channel).unwrap();
            prop_assert_eq!(result.is_some(), before != value);
            prop_assert_eq!(gate.get_input(channel).unwrap(), value);
            if before != value {
                changes += 1;
            }
        }
        prop_assert_eq!(calls.get(), changes);
    }
}
