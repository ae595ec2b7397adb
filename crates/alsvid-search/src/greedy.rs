//! Forward greedy descent with tabu hills and an annealing kick.

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use alsvid_dual::Dual;
use alsvid_ir::Circuit;
use alsvid_sim::{Direction, DualDevice};

use crate::cost::{CostSurface, decode};
use crate::error::SearchResult;
use crate::outcome::FactorOutcome;

/// One-coordinate-at-a-time greedy descent on the forward cost surface.
///
/// Each iteration seeds the derivative of one randomly chosen input bit,
/// executes forward, and clamps that bit against the gradient sign. Two
/// escape mechanisms keep it out of basins: a visit-count kick that flips
/// the chosen bit instead of clamping with probability proportional to how
/// long the current input image has been occupied, and a tabu hill appended
/// at the decoded (Y, X) whenever the decode has not moved for
/// [`stuck_limit`](Self::with_stuck_limit) iterations.
#[derive(Debug, Clone)]
pub struct GreedySearch<'c> {
    circuit: &'c Circuit,
    budget: usize,
    stuck_limit: usize,
}

impl<'c> GreedySearch<'c> {
    /// Create a driver over the given multiplier circuit.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            budget: 1000,
            stuck_limit: 16,
        }
    }

    /// Set the iteration budget.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Set how many unchanged decodes count as stuck.
    #[must_use]
    pub fn with_stuck_limit(mut self, stuck_limit: usize) -> Self {
        self.stuck_limit = stuck_limit;
        self
    }

    /// Attempt to factor `target` using the thread-local RNG.
    pub fn factor(&self, target: u64) -> SearchResult<FactorOutcome> {
        self.factor_with_rng(target, &mut rand::thread_rng())
    }

    /// Attempt to factor `target` using the given random source.
    ///
    /// Seeding `rng` makes the run reproducible.
    pub fn factor_with_rng<R: Rng>(&self, target: u64, rng: &mut R) -> SearchResult<FactorOutcome> {
        let mut surface = CostSurface::new(self.circuit, target)?;
        let mut device = DualDevice::new(self.circuit);
        let y_indices = device.bus_indices("Y")?;
        let x_indices = device.bus_indices("X")?;

        let mut inputs = device.allocate_slice("I")?;
        for slot in &mut inputs {
            *slot = Dual::ONE;
        }
        let kick_cap = inputs.len();
        let mut visits: FxHashMap<String, usize> = FxHashMap::default();
        let mut stuck = 0usize;
        let mut last = (u64::MAX, u64::MAX);
        let (mut y, mut x) = (0u64, 0u64);

        for iteration in 0..self.budget {
            let pick = rng.gen_range(0..inputs.len());
            inputs[pick].der = 1.0;
            device.set_slice("I", &inputs)?;
            inputs[pick].der = 0.0;
            device.execute(Direction::Forward);

            let cost = surface.evaluate(&device);
            y = decode(&device, &y_indices);
            x = decode(&device, &x_indices);
            debug!(
                iteration,
                bit = pick,
                cost = cost.val,
                der = cost.der,
                y,
                x,
                "greedy step"
            );

            if cost.val == 0.0 {
                info!(target, y, x, iterations = iteration + 1, "factored");
                return Ok(FactorOutcome::found(y, x, iteration + 1));
            }
            if cost.der.is_nan() {
                warn!(target, iteration, "gradient diverged");
                return Ok(FactorOutcome::diverged(y, x, iteration + 1));
            }

            // Annealing kick: residence time raises the flip probability.
            let image = device.string("I")?;
            let count = visits.entry(image).or_insert(0);
            if *count < kick_cap {
                *count += 1;
            }
            if rng.r#gen::<f32>() < *count as f32 / kick_cap as f32 {
                inputs[pick] = if inputs[pick].val > 0.5 {
                    Dual::ZERO
                } else {
                    Dual::ONE
                };
            } else if cost.der > 0.0 {
                inputs[pick] = Dual::ZERO;
            } else if cost.der < 0.0 {
                inputs[pick] = Dual::ONE;
            }

            if (y, x) == last {
                stuck += 1;
                if stuck >= self.stuck_limit {
                    debug!(y, x, hills = surface.num_hills(), "stuck, appending tabu hill");
                    surface.push_hill(y, x);
                    stuck = 0;
                }
            } else {
                last = (y, x);
                stuck = 0;
            }

            device.reset();
        }

        info!(target, "budget exhausted");
        Ok(FactorOutcome::exhausted(y, x, self.budget))
    }
}
