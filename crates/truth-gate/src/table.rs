// crates/truth-gate/src/table.rs
// ============================================================================
// Module: Truth Tables
// Description: Validated, immutable truth tables with packed-address lookup.
// Purpose: Hold the declarative input/output relation a gate evaluates.
// Dependencies: crate::{address, error}, serde, serde_json, ron
// ============================================================================

//! ## Overview
//! A [`TruthTable`] is an ordered list of [`TruthRow`]s sharing one input width
//! and one output width. Construction validates the row shapes and builds an
//! index from each row's packed input address to its position, so evaluation
//! is a single map lookup. When two rows share the same inputs the earlier row
//! wins, matching a top-to-bottom scan of the table.
//!
//! Tables can be read from JSON or RON documents holding a list of rows:
//!
//! ```
//! use truth_gate::TruthTable;
//!
//! let table = TruthTable::from_json(
//!     r#"[
//!         { "inputs": [false], "outputs": [true] },
//!         { "inputs": [true], "outputs": [false] }
//!     ]"#,
//! )?;
//! assert_eq!(table.input_count(), 1);
//! assert!(table.is_complete());
//! # Ok::<(), truth_gate::GateError>(())
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::address::Address;
use crate::address::MAX_ADDRESS_BITS;
use crate::address::Signals;
use crate::address::decode_address;
use crate::address::encode_address;
use crate::error::GateError;
use crate::error::GateResult;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum input width of a table row.
pub const MAX_INPUT_CHANNELS: usize = MAX_ADDRESS_BITS;
/// Smallest channel count accepted by [`TruthTable::generate`].
pub const MIN_GENERATED_ARITY: usize = 2;
/// Largest channel count accepted by [`TruthTable::generate`] (65 536 rows).
pub const MAX_GENERATED_ARITY: usize = 16;
/// Maximum size of a JSON or RON table document in bytes.
const MAX_TABLE_DOCUMENT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Rows
// ============================================================================

/// One line of a truth table.
///
/// # Invariants
/// - None on its own; [`TruthTable::new`] checks widths across rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthRow {
    /// Input channel values that select this row.
    pub inputs: Signals,
    /// Output channel values reported when this row matches.
    pub outputs: Signals,
}

impl TruthRow {
    /// Creates a row from input and output channel values.
    pub fn new(
        inputs: impl IntoIterator<Item = bool>,
        outputs: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().collect(),
        }
    }
}

// ============================================================================
// SECTION: Table
// ============================================================================

/// Validated truth table.
///
/// # Invariants
/// - At least one row.
/// - Every row has `input_count` inputs and `output_count` outputs, both > 0.
/// - `input_count <= MAX_INPUT_CHANNELS`.
/// - `index` maps each distinct packed input address to its first row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<TruthRow>", into = "Vec<TruthRow>")]
pub struct TruthTable {
    /// Rows in declaration order.
    rows: Vec<TruthRow>,
    /// Input width shared by all rows.
    input_count: usize,
    /// Output width shared by all rows.
    output_count: usize,
    /// Packed input address to row position.
    index: HashMap<Address, usize>,
}

impl TruthTable {
    /// Validates `rows` and builds the lookup index.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidTable`] when the table is empty, a row has
    /// no inputs or no outputs, or rows are wider than [`MAX_INPUT_CHANNELS`].
    /// Returns [`GateError::InconsistentShape`] when a row's widths differ
    /// from the first row's.
    pub fn new(rows: Vec<TruthRow>) -> GateResult<Self> {
        let Some(first) = rows.first() else {
            return Err(GateError::invalid_table("table has no rows"));
        };
        let input_count = first.inputs.len();
        let output_count = first.outputs.len();
        if input_count > MAX_INPUT_CHANNELS {
            return Err(GateError::invalid_table(format!(
                "{input_count} input channels exceeds the limit of {MAX_INPUT_CHANNELS}"
            )));
        }

        for (position, row) in rows.iter().enumerate() {
            if row.inputs.is_empty() {
                return Err(GateError::invalid_table(format!(
                    "row {position} defines no input channels"
                )));
            }
            if row.outputs.is_empty() {
                return Err(GateError::invalid_table(format!(
                    "row {position} defines no output channels"
                )));
            }
            if row.inputs.len() != input_count || row.outputs.len() != output_count {
                return Err(GateError::InconsistentShape {
                    row: position,
                    expected_inputs: input_count,
                    actual_inputs: row.inputs.len(),
                    expected_outputs: output_count,
                    actual_outputs: row.outputs.len(),
                });
            }
        }

        Ok(Self::assemble(rows, input_count, output_count))
    }

    /// Builds the complete single-output table for `arity` inputs.
    ///
    /// Every row has `arity` inputs and one output, so the shape invariants
    /// hold by construction. Callers pass small fixed arities.
    pub(crate) fn single_output<F>(arity: usize, output_for: F) -> Self
    where
        F: Fn(&[bool]) -> bool,
    {
        let combinations: Address = 1 << arity;
        let rows = (0 .. combinations)
            .map(|address| {
                let inputs = decode_address(address, arity);
                let output = output_for(&inputs);
                TruthRow::new(inputs, [output])
            })
            .collect();
        Self::assemble(rows, arity, 1)
    }

    /// Indexes rows whose shapes are already known to be consistent.
    fn assemble(rows: Vec<TruthRow>, input_count: usize, output_count: usize) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            index.entry(encode_address(&row.inputs)).or_insert(position);
        }
        Self {
            rows,
            input_count,
            output_count,
            index,
        }
    }

    /// Builds a table covering every combination of `arity` inputs.
    ///
    /// Row `i` has the inputs `decode_address(i, arity)`, so channel 0 is the
    /// least significant bit of the row index. `outputs_for` receives each
    /// input vector in row order and returns that row's outputs.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidArity`] when `arity` is outside
    /// [`MIN_GENERATED_ARITY`]..=[`MAX_GENERATED_ARITY`], and the errors of
    /// [`TruthTable::new`] when `outputs_for` returns inconsistent widths.
    pub fn generate<F>(arity: usize, mut outputs_for: F) -> GateResult<Self>
    where
        F: FnMut(&[bool]) -> Signals,
    {
        if !(MIN_GENERATED_ARITY ..= MAX_GENERATED_ARITY).contains(&arity) {
            return Err(GateError::InvalidArity {
                arity,
                min: MIN_GENERATED_ARITY,
                max: MAX_GENERATED_ARITY,
            });
        }

        let combinations: Address = 1 << arity;
        let rows = (0 .. combinations)
            .map(|address| {
                let inputs = decode_address(address, arity);
                let outputs = outputs_for(&inputs);
                TruthRow {
                    inputs,
                    outputs,
                }
            })
            .collect();
        Self::new(rows)
    }

    /// Parses a JSON list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidTable`] when the document is too large, is
    /// not a list of rows, or a row lacks list-valued `inputs`/`outputs`;
    /// otherwise the errors of [`TruthTable::new`].
    pub fn from_json(document: &str) -> GateResult<Self> {
        check_document_size(document)?;
        let rows: Vec<TruthRow> = serde_json::from_str(document)
            .map_err(|err| GateError::invalid_table(format!("json: {err}")))?;
        Self::new(rows)
    }

    /// Parses a RON list of rows, e.g. `[(inputs: [true], outputs: [false])]`.
    ///
    /// # Errors
    ///
    /// Same as [`TruthTable::from_json`].
    pub fn from_ron(document: &str) -> GateResult<Self> {
        check_document_size(document)?;
        let rows: Vec<TruthRow> = ron::from_str(document)
            .map_err(|err| GateError::invalid_table(format!("ron: {err}")))?;
        Self::new(rows)
    }

    /// Returns the first row whose inputs equal `inputs`.
    #[must_use]
    pub fn lookup(&self, inputs: &[bool]) -> Option<&TruthRow> {
        if inputs.len() != self.input_count {
            return None;
        }
        self.index.get(&encode_address(inputs)).and_then(|position| self.rows.get(*position))
    }

    /// Returns true when every combination of input values has a row.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        u128::try_from(self.index.len()).is_ok_and(|distinct| distinct == 1u128 << self.input_count)
    }

    /// Rows in declaration order.
    #[must_use]
    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a validated table has at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of input channels.
    #[must_use]
    pub const fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of output channels.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        self.output_count
    }

    /// Inputs of the first row, used as a gate's initial state.
    #[must_use]
    pub fn initial_inputs(&self) -> Signals {
        self.rows.first().map(|row| row.inputs.clone()).unwrap_or_default()
    }
}

impl PartialEq for TruthTable {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for TruthTable {}

// ============================================================================
// SECTION: Serde Conversions
// ============================================================================

impl TryFrom<Vec<TruthRow>> for TruthTable {
    type Error = GateError;

    fn try_from(rows: Vec<TruthRow>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<TruthTable> for Vec<TruthRow> {
    fn from(table: TruthTable) -> Self {
        table.rows
    }
}

/// Rejects table documents above [`MAX_TABLE_DOCUMENT_BYTES`].
fn check_document_size(document: &str) -> GateResult {
    if document.len() > MAX_TABLE_DOCUMENT_BYTES {
        return Err(GateError::invalid_table(format!(
            "document exceeds size limit: {} bytes (max {MAX_TABLE_DOCUMENT_BYTES})",
            document.len()
        )));
    }
    Ok(())
}
