// crates/truth-gate/src/config.rs
// ============================================================================
// Module: Circuit Configuration
// Description: Declarative TOML description of gates and wires.
// Purpose: Provide strict, fail-closed circuit parsing with hard limits.
// Dependencies: crate::{error, factory}, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A circuit file lists named gates and the wires between them:
//!
//! ```toml
//! [[gates]]
//! name = "and"
//! kind = "and"
//!
//! [[gates]]
//! name = "out"
//! kind = "not"
//!
//! [[wires]]
//! from = "and"
//! to = "out"
//! ```
//!
//! `kind` is a [`GateKind`]: a bare name for fixed variants, `{ and_n = 3 }`
//! for N-input variants, or `{ table = [...] }` for custom tables. Channels
//! default to 0. Validation checks names and references; channel ranges are
//! checked when the circuit is assembled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::error::GateError;
use crate::factory::GateKind;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum circuit file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum number of gates in one circuit.
pub(crate) const MAX_GATES: usize = 4096;
/// Maximum number of wires in one circuit.
pub(crate) const MAX_WIRES: usize = 16_384;
/// Maximum length of a gate name in bytes.
pub(crate) const MAX_GATE_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Circuit configuration and assembly errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// The circuit file could not be read.
    #[error("circuit config io error: {0}")]
    Io(String),
    /// The circuit file is not valid TOML for the circuit schema.
    #[error("circuit config parse error: {0}")]
    Parse(String),
    /// The circuit description breaks a limit or naming rule.
    #[error("invalid circuit config: {0}")]
    Invalid(String),
    /// A gate name is not defined in the circuit.
    #[error("unknown gate `{0}`")]
    UnknownGate(String),
    /// A gate name is defined more than once.
    #[error("duplicate gate `{0}`")]
    DuplicateGate(String),
    /// A gate operation failed.
    #[error(transparent)]
    Gate(#[from] GateError),
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Declarative circuit description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircuitConfig {
    /// Gates in declaration order.
    #[serde(default)]
    pub gates: Vec<GateConfig>,
    /// Wires, applied in declaration order.
    #[serde(default)]
    pub wires: Vec<WireConfig>,
}

/// One named gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Unique gate name.
    pub name: String,
    /// Gate variant.
    pub kind: GateKind,
}

/// One wire from a gate output to a gate input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireConfig {
    /// Source gate name.
    pub from: String,
    /// Source output channel.
    #[serde(default)]
    pub from_channel: usize,
    /// Destination gate name.
    pub to: String,
    /// Destination input channel.
    #[serde(default)]
    pub to_channel: usize,
}

impl CircuitConfig {
    /// Loads and validates a circuit file.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError`] when reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, CircuitError> {
        let bytes = fs::read(path).map_err(|err| CircuitError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CircuitError::Invalid("circuit file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| CircuitError::Invalid("circuit file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates a circuit description.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, CircuitError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CircuitError::Invalid("circuit file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| CircuitError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks limits, gate names, and wire endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError::Invalid`] for limit or naming violations,
    /// [`CircuitError::DuplicateGate`] for repeated names, and
    /// [`CircuitError::UnknownGate`] for wires naming undefined gates.
    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.gates.len() > MAX_GATES {
            return Err(CircuitError::Invalid(format!(
                "too many gates: {} (max {MAX_GATES})",
                self.gates.len()
            )));
        }
        if self.wires.len() > MAX_WIRES {
            return Err(CircuitError::Invalid(format!(
                "too many wires: {} (max {MAX_WIRES})",
                self.wires.len()
            )));
        }

        let mut names = BTreeSet::new();
        for gate in &self.gates {
            validate_gate_name(&gate.name)?;
            if !names.insert(gate.name.as_str()) {
                return Err(CircuitError::DuplicateGate(gate.name.clone()));
            }
        }
        for wire in &self.wires {
            for endpoint in [&wire.from, &wire.to] {
                if !names.contains(endpoint.as_str()) {
                    return Err(CircuitError::UnknownGate(endpoint.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Gate names are 1..=64 bytes of ASCII letters, digits, `_`, `-`, or `.`.
pub(crate) fn validate_gate_name(name: &str) -> Result<(), CircuitError> {
    if name.is_empty() {
        return Err(CircuitError::Invalid("gate name must not be empty".to_string()));
    }
    if name.len() > MAX_GATE_NAME_LENGTH {
        return Err(CircuitError::Invalid(format!(
            "gate name `{name}` exceeds {MAX_GATE_NAME_LENGTH} bytes"
        )));
    }
    if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')) {
        return Err(CircuitError::Invalid(format!(
            "gate name `{name}` may only contain letters, digits, `_`, `-`, and `.`"
        )));
    }
    Ok(())
}
