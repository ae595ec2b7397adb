//! CLI command implementations.

pub mod common;
pub mod factor;
pub mod graph;
pub mod preimage;
pub mod sweep;

use clap::ValueEnum;
use std::fmt;

/// Which search driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Greedy single-bit descent with tabu hills and an annealing kick.
    Forward,
    /// Continuous momentum descent over the learned gate mapping.
    Neural,
    /// Garbage-space descent on the reversed circuit.
    Reverse,
    /// Softmax-sampled single-bit flips.
    Prob,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Forward => "forward",
            Mode::Neural => "neural",
            Mode::Reverse => "reverse",
            Mode::Prob => "prob",
        };
        write!(f, "{name}")
    }
}
