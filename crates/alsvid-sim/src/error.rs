//! Error types for the simulation crate.

use alsvid_ir::CircuitError;
use alsvid_net::NetError;
use thiserror::Error;

/// Errors that can occur while driving a device.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A name failed to resolve against the circuit.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Integer packing requested on a bus wider than 64 bits.
    #[error("bus {bus} is wider than a u64 ({width} bits)")]
    BusTooWide {
        /// The offending bus prefix.
        bus: String,
        /// Its declared width.
        width: u32,
    },

    /// A slice transfer did not match the bus width.
    #[error("slice for bus {bus} has length {got}, expected {expected}")]
    SliceLength {
        /// The bus prefix.
        bus: String,
        /// The bus width.
        expected: usize,
        /// The slice length supplied.
        got: usize,
    },

    /// A learned gate mapping failed to train.
    #[error("gate mapping failed to train: {0}")]
    Training(#[from] NetError),
}

/// Result type for device operations.
pub type SimResult<T> = Result<T, SimError>;
