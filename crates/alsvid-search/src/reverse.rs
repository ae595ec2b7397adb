//! Reverse descent: search the garbage space of the inverted circuit.

use rand::Rng;
use tracing::{debug, info, warn};

use alsvid_dual::Dual;
use alsvid_ir::Circuit;
use alsvid_sim::{Direction, DualDevice};

use crate::cost::{decode, largest_product};
use crate::error::{SearchError, SearchResult};
use crate::outcome::FactorOutcome;

/// Greedy descent over the garbage bus of the reversed circuit.
///
/// The product bus is pinned to the target and the circuit runs backward
/// from a candidate final state spelled by bus `G` (the inputs plus the
/// adder garbage). In any valid preimage of a true product, every partial
/// product and scratch carry returns to zero, so the cost is
/// `Σ A_i² + Σ Z_i²` after the reverse execution. Each sweep seeds every
/// G bit in turn and clamps it against the gradient sign.
#[derive(Debug, Clone)]
pub struct ReverseSearch<'c> {
    circuit: &'c Circuit,
    budget: usize,
}

impl<'c> ReverseSearch<'c> {
    /// Create a driver over the given multiplier circuit.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            budget: 100,
        }
    }

    /// Set the sweep budget. Every sweep costs one reverse execution per
    /// G bit.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Attempt to factor `target` using the thread-local RNG.
    pub fn factor(&self, target: u64) -> SearchResult<FactorOutcome> {
        self.factor_with_rng(target, &mut rand::thread_rng())
    }

    /// Attempt to factor `target` using the given random source; the RNG
    /// draws the initial garbage assignment.
    pub fn factor_with_rng<R: Rng>(&self, target: u64, rng: &mut R) -> SearchResult<FactorOutcome> {
        let bits = self.circuit.bus_width("X")?;
        let max = largest_product(bits);
        if target > max {
            return Err(SearchError::TargetOutOfRange { target, bits, max });
        }

        let mut device = DualDevice::new(self.circuit);
        let a_indices = device.bus_indices("A")?;
        let z_indices = device.bus_indices("Z")?;
        let y_indices = device.bus_indices("Y")?;
        let x_indices = device.bus_indices("X")?;

        let mut garbage = device.allocate_slice("G")?;
        for slot in &mut garbage {
            *slot = if rng.r#gen::<bool>() {
                Dual::ONE
            } else {
                Dual::ZERO
            };
        }
        let (mut y, mut x) = (0u64, 0u64);

        for sweep in 0..self.budget {
            for j in 0..garbage.len() {
                garbage[j].der = 1.0;
                device.reset();
                device.set_slice("G", &garbage)?;
                garbage[j].der = 0.0;
                device.set_uint64("P", target)?;
                device.execute(Direction::Reverse);

                let mut cost = Dual::ZERO;
                for &index in a_indices.iter().chain(z_indices.iter()) {
                    let wire = device.get_at(index);
                    cost = cost + wire * wire;
                }
                y = decode(&device, &y_indices);
                x = decode(&device, &x_indices);

                if cost.val == 0.0 {
                    info!(target, y, x, iterations = sweep + 1, "factored in reverse");
                    return Ok(FactorOutcome::found(y, x, sweep + 1));
                }
                if cost.der.is_nan() {
                    warn!(target, sweep, "gradient diverged");
                    return Ok(FactorOutcome::diverged(y, x, sweep + 1));
                }

                if cost.der > 0.0 {
                    garbage[j] = Dual::ZERO;
                } else if cost.der < 0.0 {
                    garbage[j] = Dual::ONE;
                }
            }
            debug!(sweep, y, x, "reverse sweep");
        }

        info!(target, "budget exhausted");
        Ok(FactorOutcome::exhausted(y, x, self.budget))
    }
}
