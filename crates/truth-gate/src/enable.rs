// crates/truth-gate/src/enable.rs
// ============================================================================
// Module: Output Enable
// Description: Strategies deciding whether a gate delivers notifications.
// Purpose: Let any gate hold back its output (tri-state, gated enable).
// Dependencies: std::{cell, rc}
// ============================================================================

//! ## Overview
//! A gate asks its [`OutputEnable`] strategy before fanning out new outputs.
//! A disabled gate still updates its cached inputs and still evaluates; it only
//! skips handler delivery.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

// ============================================================================
// SECTION: Strategy Trait
// ============================================================================

/// Decides whether a gate's handlers receive new outputs.
pub trait OutputEnable {
    /// Returns true when output handlers should be called.
    fn is_output_enabled(&self) -> bool;
}

/// Default strategy: output is always enabled.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEnabled;

impl OutputEnable for AlwaysEnabled {
    fn is_output_enabled(&self) -> bool {
        true
    }
}

// ============================================================================
// SECTION: Enable Line
// ============================================================================

/// Shared on/off switch for one or more gates.
///
/// Clones share the same state, so a controller can keep one clone and hand
/// others to the gates it gates.
///
/// # Invariants
/// - All clones observe the same value.
#[derive(Clone, Default)]
pub struct EnableLine {
    /// Current enable state shared by all clones.
    enabled: Rc<Cell<bool>>,
}

impl EnableLine {
    /// Creates a line in the given state.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Rc::new(Cell::new(enabled)),
        }
    }

    /// Drives the line.
    pub fn set(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Reads the line.
    #[must_use]
    pub fn get(&self) -> bool {
        self.enabled.get()
    }
}

impl fmt::Debug for EnableLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnableLine").field("enabled", &self.get()).finish()
    }
}

impl OutputEnable for EnableLine {
    fn is_output_enabled(&self) -> bool {
        self.get()
    }
}
