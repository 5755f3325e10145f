// crates/truth-gate/src/address.rs
// ============================================================================
// Module: Channel Addresses
// Description: Bit-vector packing for gate channel values.
// Purpose: Map input vectors to integer addresses and back, channel 0 first.
// Dependencies: smallvec
// ============================================================================

//! ## Overview
//! A gate's input vector is addressed as a little-endian bit pattern: channel
//! `i` is bit `i` of the address. The same decoding drives the N-input table
//! generator and the packed lookup used by evaluation, so both agree on the
//! channel order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use smallvec::SmallVec;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Ordered channel values of a gate, channel 0 first.
pub type Signals = SmallVec<[bool; 8]>;

/// Packed channel address (bit `i` = channel `i`).
pub type Address = u64;

/// Maximum number of channels that fit in an [`Address`].
pub const MAX_ADDRESS_BITS: usize = 64;

// ============================================================================
// SECTION: Encoding
// ============================================================================

/// Decodes `address` into `count` channel values.
///
/// Bit `i` of the address becomes channel `i`; bits at or above
/// [`MAX_ADDRESS_BITS`] read as low.
#[must_use]
pub fn decode_address(address: Address, count: usize) -> Signals {
    (0 .. count)
        .map(|bit| bit < MAX_ADDRESS_BITS && (address >> bit) & 1 == 1)
        .collect()
}

/// Packs channel values into an address, channel 0 as the least significant bit.
///
/// Channels beyond [`MAX_ADDRESS_BITS`] are ignored; truth tables never hold
/// rows that wide.
#[must_use]
pub fn encode_address(signals: &[bool]) -> Address {
    signals
        .iter()
        .take(MAX_ADDRESS_BITS)
        .enumerate()
        .filter(|(_, value)| **value)
        .fold(0, |address, (bit, _)| address | (1 << bit))
}
