//! Forward probabilistic descent: softmax sampling by gradient magnitude.

use rand::Rng;
use tracing::{debug, info, warn};

use alsvid_dual::Dual;
use alsvid_ir::Circuit;
use alsvid_sim::{Direction, DualDevice};

use crate::cost::{CostSurface, decode};
use crate::error::SearchResult;
use crate::outcome::FactorOutcome;

/// Probabilistic single-bit descent.
///
/// Each iteration measures the cost gradient of *every* input bit with one
/// forward execution per bit, forms a softmax distribution over the
/// gradient magnitudes, samples one index, and flips that bit. The stuck
/// counter is maintained for observability but no tabu hill is appended;
/// the sampling itself is the escape mechanism.
#[derive(Debug, Clone)]
pub struct SoftmaxSearch<'c> {
    circuit: &'c Circuit,
    budget: usize,
    stuck_limit: usize,
}

impl<'c> SoftmaxSearch<'c> {
    /// Create a driver over the given multiplier circuit.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            budget: 1000,
            stuck_limit: 16,
        }
    }

    /// Set the iteration budget. Every iteration costs one forward
    /// execution per input bit.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Attempt to factor `target` using the thread-local RNG.
    pub fn factor(&self, target: u64) -> SearchResult<FactorOutcome> {
        self.factor_with_rng(target, &mut rand::thread_rng())
    }

    /// Attempt to factor `target` using the given random source.
    pub fn factor_with_rng<R: Rng>(&self, target: u64, rng: &mut R) -> SearchResult<FactorOutcome> {
        let surface = CostSurface::new(self.circuit, target)?;
        let mut device = DualDevice::new(self.circuit);
        let y_indices = device.bus_indices("Y")?;
        let x_indices = device.bus_indices("X")?;

        let mut inputs = device.allocate_slice("I")?;
        for slot in &mut inputs {
            *slot = Dual::ONE;
        }
        let mut grads = vec![0.0f32; inputs.len()];
        let mut stuck = 0usize;
        let mut last = (u64::MAX, u64::MAX);
        let (mut y, mut x) = (0u64, 0u64);

        for iteration in 0..self.budget {
            let mut cost_val = f32::INFINITY;
            for i in 0..inputs.len() {
                inputs[i].der = 1.0;
                device.set_slice("I", &inputs)?;
                inputs[i].der = 0.0;
                device.execute(Direction::Forward);
                let cost = surface.evaluate(&device);
                grads[i] = cost.der;
                if i == 0 {
                    cost_val = cost.val;
                    y = decode(&device, &y_indices);
                    x = decode(&device, &x_indices);
                }
                device.reset();
            }

            debug!(iteration, cost = cost_val, y, x, "softmax step");
            if cost_val == 0.0 {
                info!(target, y, x, iterations = iteration + 1, "factored");
                return Ok(FactorOutcome::found(y, x, iteration + 1));
            }
            if grads.iter().any(|g| g.is_nan()) {
                warn!(target, iteration, "gradient diverged");
                return Ok(FactorOutcome::diverged(y, x, iteration + 1));
            }

            let pick = sample_softmax(&grads, rng);
            inputs[pick] = if inputs[pick].val > 0.5 {
                Dual::ZERO
            } else {
                Dual::ONE
            };

            // Stuck is tracked but deliberately not acted on here.
            if (y, x) == last {
                stuck += 1;
                if stuck >= self.stuck_limit {
                    debug!(y, x, "stuck");
                    stuck = 0;
                }
            } else {
                last = (y, x);
                stuck = 0;
            }
        }

        info!(target, "budget exhausted");
        Ok(FactorOutcome::exhausted(y, x, self.budget))
    }
}

/// Sample an index from the softmax of gradient magnitudes (CDF method).
fn sample_softmax<R: Rng>(grads: &[f32], rng: &mut R) -> usize {
    let max = grads.iter().fold(0.0f32, |m, g| m.max(g.abs()));
    let weights: Vec<f32> = grads.iter().map(|g| (g.abs() - max).exp()).collect();
    let total: f32 = weights.iter().sum();
    let mut u = rng.r#gen::<f32>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if u < w {
            return i;
        }
        u -= w;
    }
    // Floating-point rounding: return last index.
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn softmax_prefers_large_magnitudes() {
        let mut rng = SmallRng::seed_from_u64(5);
        let grads = [0.0f32, 0.0, 8.0, 0.0];
        let mut counts = [0usize; 4];
        for _ in 0..200 {
            counts[sample_softmax(&grads, &mut rng)] += 1;
        }
        assert!(counts[2] > 150, "counts: {counts:?}");
    }

    #[test]
    fn softmax_is_uniform_on_flat_gradients() {
        let mut rng = SmallRng::seed_from_u64(5);
        let grads = [1.0f32, 1.0, 1.0, 1.0];
        let mut counts = [0usize; 4];
        for _ in 0..400 {
            counts[sample_softmax(&grads, &mut rng)] += 1;
        }
        for &count in &counts {
            assert!(count > 50, "counts: {counts:?}");
        }
    }
}
