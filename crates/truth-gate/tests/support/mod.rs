// crates/truth-gate/tests/support/mod.rs
// ============================================================================
// Module: Gate Test Support
// Description: Result alias and assertion helper shared by gate tests.
// Dependencies: thiserror
// ============================================================================
//! ## Overview
//! Gate tests return [`TestResult`] so that library errors propagate with `?`
//! and failed expectations surface as [`Unmet`] errors instead of panics.

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

use thiserror::Error;

/// Result of a gate test; any error type converts with `?`.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// A test expectation that did not hold.
#[derive(Debug, Error)]
#[error("expectation failed: {0}")]
struct Unmet(String);

/// Fails the test with `message` unless `condition` holds.
///
/// # Errors
/// Returns [`Unmet`] carrying `message` when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        return Ok(());
    }
    Err(Unmet(message.into()).into())
}
