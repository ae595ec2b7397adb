//! Reversible gate types.

use serde::{Deserialize, Serialize};

/// A gate over the Toffoli family, tapping up to three wires by index.
///
/// Each variant carries exactly the taps it uses. The boolean semantics of
/// every variant is an involution, which is what makes a gate list
/// reversible by traversing it backward with the same per-gate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// NOT: flip the tapped wire.
    Not {
        /// The wire being flipped.
        a: u32,
    },
    /// CNOT: flip `target` iff `control` is 1.
    CNot {
        /// The control wire (read only).
        control: u32,
        /// The target wire (flipped).
        target: u32,
    },
    /// CCNOT (Toffoli): flip `target` iff both controls are 1.
    CCNot {
        /// The two control wires (read only).
        controls: [u32; 2],
        /// The target wire (flipped).
        target: u32,
    },
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Not { .. } => "not",
            Gate::CNot { .. } => "cnot",
            Gate::CCNot { .. } => "ccnot",
        }
    }

    /// The wire index this gate mutates.
    #[inline]
    pub fn target(&self) -> u32 {
        match *self {
            Gate::Not { a } => a,
            Gate::CNot { target, .. } => target,
            Gate::CCNot { target, .. } => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        assert_eq!(Gate::Not { a: 0 }.name(), "not");
        assert_eq!(
            Gate::CNot {
                control: 0,
                target: 1
            }
            .name(),
            "cnot"
        );
        assert_eq!(
            Gate::CCNot {
                controls: [0, 1],
                target: 2
            }
            .name(),
            "ccnot"
        );
    }

    #[test]
    fn test_gate_target() {
        assert_eq!(
            Gate::CCNot {
                controls: [4, 5],
                target: 6
            }
            .target(),
            6
        );
    }
}
