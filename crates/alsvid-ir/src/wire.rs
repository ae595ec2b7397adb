//! Wire types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single wire in a circuit.
///
/// Wires are identified by a unique string name and addressed in device
/// memory by a dense index assigned at creation time. The nominal value is
/// the wire's contribution to the circuit's blank state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    /// Unique name within the circuit.
    pub name: String,
    /// Boolean value of the wire in the blank state.
    pub nominal: bool,
    /// Dense index into device memory, assigned at creation.
    pub index: u32,
    /// Influence rank; zero until [`compute_ranks`] has run.
    ///
    /// [`compute_ranks`]: crate::Circuit::compute_ranks
    pub rank: f64,
}

impl Wire {
    /// Create a wire with a zero rank.
    pub fn new(name: impl Into<String>, nominal: bool, index: u32) -> Self {
        Self {
            name: name.into(),
            nominal,
            index,
            rank: 0.0,
        }
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}
