//! Shared driver plumbing.

use anyhow::Result;
use rand::Rng;

use alsvid_ir::Circuit;
use alsvid_search::{FactorOutcome, GreedySearch, MomentumSearch, ReverseSearch, SoftmaxSearch};
use alsvid_sim::Learned;
use alsvid_synth::{full_adder_a1, half_adder_a1, multiplier};

use super::Mode;

/// Build the multiplier circuit every driver runs against.
pub fn build_circuit(bits: u32) -> Result<Circuit> {
    Ok(multiplier(bits, full_adder_a1, half_adder_a1)?)
}

/// A constructed driver, reusable across targets.
///
/// Constructing the neural driver trains its gate networks once; a sweep
/// over many composites reuses them.
pub enum Driver<'c> {
    Greedy(GreedySearch<'c>),
    Softmax(SoftmaxSearch<'c>),
    Momentum(MomentumSearch<'c, Learned>),
    Reverse(ReverseSearch<'c>),
}

impl<'c> Driver<'c> {
    /// Instantiate the driver for a mode.
    pub fn new<R: Rng>(circuit: &'c Circuit, mode: Mode, rng: &mut R) -> Result<Self> {
        Ok(match mode {
            Mode::Forward => Self::Greedy(GreedySearch::new(circuit)),
            Mode::Prob => Self::Softmax(SoftmaxSearch::new(circuit)),
            Mode::Neural => Self::Momentum(MomentumSearch::with_mapping(
                circuit,
                Learned::train_with_rng(rng)?,
            )),
            Mode::Reverse => Self::Reverse(ReverseSearch::new(circuit)),
        })
    }

    /// Run one factoring attempt.
    pub fn factor<R: Rng>(&self, target: u64, rng: &mut R) -> Result<FactorOutcome> {
        Ok(match self {
            Self::Greedy(driver) => driver.factor_with_rng(target, rng)?,
            Self::Softmax(driver) => driver.factor_with_rng(target, rng)?,
            Self::Momentum(driver) => driver.factor_with_rng(target, rng)?,
            Self::Reverse(driver) => driver.factor_with_rng(target, rng)?,
        })
    }
}
