// crates/truth-gate/src/lib.rs
// ============================================================================
// Module: Truth Gate Root
// Description: Public API surface for truth-table logic gates.
// Purpose: Wire together core modules and re-exports.
// Dependencies: crate::{address, circuit, composite, config, enable, error, factory, gate,
//              interface, table, trace, wiring}
// ============================================================================

//! ## Overview
//! Combinational logic simulation built from truth tables. A [`Gate`] caches
//! its inputs, looks its outputs up in a [`TruthTable`], and pushes new
//! outputs to registered handlers whenever an input actually changes.
//! [`connect`] turns one gate's output into another gate's input, so wired
//! gates form a synchronous push-based dataflow graph.
//!
//! The standard variants live in [`factory`]; circuits can also be described
//! declaratively with [`CircuitConfig`] and assembled into a [`Circuit`].

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod address;
pub mod circuit;
pub mod composite;
pub mod config;
pub mod enable;
pub mod error;
pub mod factory;
pub mod gate;
pub mod interface;
pub mod table;
pub mod trace;
pub mod wiring;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use address::Address;
pub use address::Signals;
pub use address::decode_address;
pub use address::encode_address;
pub use circuit::Circuit;
pub use composite::ComposedGate;
pub use config::CircuitConfig;
pub use config::CircuitError;
pub use config::GateConfig;
pub use config::WireConfig;
pub use enable::AlwaysEnabled;
pub use enable::EnableLine;
pub use enable::OutputEnable;
pub use error::ChannelDirection;
pub use error::GateError;
pub use error::GateResult;
pub use factory::GateKind;
pub use gate::Gate;
pub use gate::OutputHandler;
pub use gate::SharedTrace;
pub use interface::LogicGate;
pub use table::MAX_GENERATED_ARITY;
pub use table::MAX_INPUT_CHANNELS;
pub use table::MIN_GENERATED_ARITY;
pub use table::TruthRow;
pub use table::TruthTable;
pub use trace::EventLog;
pub use trace::GateEvent;
pub use trace::GateTrace;
pub use trace::NoopTrace;
pub use wiring::connect;
