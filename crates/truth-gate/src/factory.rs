// crates/truth-gate/src/factory.rs
// ============================================================================
// Module: Gate Factory
// Description: Truth tables and constructors for the standard gate variants.
// Purpose: Turn a gate kind into table data handed to the gate core.
// Dependencies: crate::{address, error, gate, table}, serde, smallvec
// ============================================================================

//! ## Overview
//! Every standard variant is just a truth table. Fixed two-input variants (and
//! the one-input NOT) cannot fail to build; N-input variants validate their
//! arity through [`TruthTable::generate`]. [`GateKind`] names a variant as data
//! so circuits can be described in configuration files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::smallvec;

use crate::error::GateResult;
use crate::gate::Gate;
use crate::table::TruthTable;

// ============================================================================
// SECTION: Gate Kinds
// ============================================================================

/// Gate variant described as data.
///
/// Serialized with the variant name in snake case: `"and"`, `{ and_n = 3 }`,
/// `{ table = [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// One-input complement.
    Not,
    /// Two-input AND.
    And,
    /// Two-input OR.
    Or,
    /// Two-input XOR.
    Xor,
    /// Two-input NAND.
    Nand,
    /// Two-input NOR.
    Nor,
    /// N-input AND.
    AndN(usize),
    /// N-input OR.
    OrN(usize),
    /// N-input NAND.
    NandN(usize),
    /// N-input NOR.
    NorN(usize),
    /// Caller-supplied truth table.
    Table(TruthTable),
}

impl GateKind {
    /// Short name used as the default gate label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::AndN(_) => "and_n",
            Self::OrN(_) => "or_n",
            Self::NandN(_) => "nand_n",
            Self::NorN(_) => "nor_n",
            Self::Table(_) => "table",
        }
    }

    /// Produces the variant's truth table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GateError::InvalidArity`] for N-input kinds with an
    /// unsupported input count.
    pub fn truth_table(&self) -> GateResult<TruthTable> {
        match self {
            Self::Not => Ok(TruthTable::single_output(1, not_all)),
            Self::And => Ok(TruthTable::single_output(2, all)),
            Self::Or => Ok(TruthTable::single_output(2, any)),
            Self::Xor => Ok(TruthTable::single_output(2, exactly_one)),
            Self::Nand => Ok(TruthTable::single_output(2, not_all)),
            Self::Nor => Ok(TruthTable::single_output(2, not_any)),
            Self::AndN(arity) => generated(*arity, all),
            Self::OrN(arity) => generated(*arity, any),
            Self::NandN(arity) => generated(*arity, not_all),
            Self::NorN(arity) => generated(*arity, not_any),
            Self::Table(table) => Ok(table.clone()),
        }
    }

    /// Builds a gate of this kind, labelled with [`GateKind::name`].
    ///
    /// # Errors
    ///
    /// Same as [`GateKind::truth_table`].
    pub fn build(&self) -> GateResult<Gate> {
        Ok(Gate::new(self.truth_table()?).with_label(self.name()))
    }
}

// ============================================================================
// SECTION: Fixed Variants
// ============================================================================

/// One-input NOT gate.
#[must_use]
pub fn not() -> Gate {
    fixed(&GateKind::Not, 1, not_all)
}

/// Two-input AND gate.
#[must_use]
pub fn and() -> Gate {
    fixed(&GateKind::And, 2, all)
}

/// Two-input OR gate.
#[must_use]
pub fn or() -> Gate {
    fixed(&GateKind::Or, 2, any)
}

/// Two-input XOR gate.
#[must_use]
pub fn xor() -> Gate {
    fixed(&GateKind::Xor, 2, exactly_one)
}

/// Two-input NAND gate.
#[must_use]
pub fn nand() -> Gate {
    fixed(&GateKind::Nand, 2, not_all)
}

/// Two-input NOR gate.
#[must_use]
pub fn nor() -> Gate {
    fixed(&GateKind::Nor, 2, not_any)
}

// ============================================================================
// SECTION: N-Input Variants
// ============================================================================

/// N-input AND gate: high only when every input is high.
///
/// # Errors
///
/// Returns [`crate::GateError::InvalidArity`] when `arity` is unsupported.
pub fn and_n(arity: usize) -> GateResult<Gate> {
    GateKind::AndN(arity).build()
}

/// N-input OR gate: high when any input is high.
///
/// # Errors
///
/// Returns [`crate::GateError::InvalidArity`] when `arity` is unsupported.
pub fn or_n(arity: usize) -> GateResult<Gate> {
    GateKind::OrN(arity).build()
}

/// N-input NAND gate: low only when every input is high.
///
/// # Errors
///
/// Returns [`crate::GateError::InvalidArity`] when `arity` is unsupported.
pub fn nand_n(arity: usize) -> GateResult<Gate> {
    GateKind::NandN(arity).build()
}

/// N-input NOR gate: high only when every input is low.
///
/// # Errors
///
/// Returns [`crate::GateError::InvalidArity`] when `arity` is unsupported.
pub fn nor_n(arity: usize) -> GateResult<Gate> {
    GateKind::NorN(arity).build()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a fixed-arity single-output gate labelled after `kind`.
fn fixed(kind: &GateKind, arity: usize, rule: fn(&[bool]) -> bool) -> Gate {
    Gate::new(TruthTable::single_output(arity, rule)).with_label(kind.name())
}

/// Generates an N-input single-output table from `rule`.
fn generated(arity: usize, rule: fn(&[bool]) -> bool) -> GateResult<TruthTable> {
    TruthTable::generate(arity, |inputs| smallvec![rule(inputs)])
}

/// True when every channel is high.
fn all(inputs: &[bool]) -> bool {
    inputs.iter().all(|value| *value)
}

/// True when at least one channel is high.
fn any(inputs: &[bool]) -> bool {
    inputs.iter().any(|value| *value)
}

/// False when every channel is high.
fn not_all(inputs: &[bool]) -> bool {
    !all(inputs)
}

/// True when every channel is low.
fn not_any(inputs: &[bool]) -> bool {
    !any(inputs)
}

/// True when exactly one channel is high.
fn exactly_one(inputs: &[bool]) -> bool {
    inputs.iter().filter(|value| **value).count() == 1
}
