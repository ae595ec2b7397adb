//! Continuous momentum descent over the relaxed cost surface.

use rand::Rng;
use tracing::{debug, info, warn};

use alsvid_dual::Dual;
use alsvid_ir::Circuit;
use alsvid_sim::{Direction, DualDevice, GateMapping, Paraboloid};

use crate::cost::{CostSurface, decode};
use crate::error::SearchResult;
use crate::outcome::FactorOutcome;

/// Gradient descent with momentum over inputs held continuously in
/// `[0, 1]`.
///
/// Unlike the bit-clamping drivers, each iteration collects the full
/// gradient vector and applies `δ ← α·δ − η·∇; x ← clamp(x + δ, 0, 1)`.
/// Success is an exact packed-product match rather than a zero cost, since
/// interior inputs never zero the hills exactly. In the CLI this driver
/// runs over the learned gate mapping.
#[derive(Debug, Clone)]
pub struct MomentumSearch<'c, M = Paraboloid> {
    circuit: &'c Circuit,
    mapping: M,
    budget: usize,
    alpha: f32,
    eta: f32,
}

impl<'c> MomentumSearch<'c> {
    /// Create a driver with the closed-form gate mapping.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self::with_mapping(circuit, Paraboloid)
    }
}

impl<'c, M: GateMapping + Clone> MomentumSearch<'c, M> {
    /// Create a driver with an explicit gate mapping.
    pub fn with_mapping(circuit: &'c Circuit, mapping: M) -> Self {
        Self {
            circuit,
            mapping,
            budget: 1000,
            alpha: 0.5,
            eta: 0.1,
        }
    }

    /// Set the iteration budget. Every iteration costs one forward
    /// execution per input bit.
    #[must_use]
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Set the momentum coefficient and learning rate.
    #[must_use]
    pub fn with_hyperparams(mut self, alpha: f32, eta: f32) -> Self {
        self.alpha = alpha;
        self.eta = eta;
        self
    }

    /// Attempt to factor `target` using the thread-local RNG.
    pub fn factor(&self, target: u64) -> SearchResult<FactorOutcome> {
        self.factor_with_rng(target, &mut rand::thread_rng())
    }

    /// Attempt to factor `target` using the given random source; the RNG
    /// draws the continuous starting point.
    pub fn factor_with_rng<R: Rng>(&self, target: u64, rng: &mut R) -> SearchResult<FactorOutcome> {
        let surface = CostSurface::new(self.circuit, target)?;
        let mut device = DualDevice::with_mapping(self.circuit, self.mapping.clone());
        let p_indices = device.bus_indices("P")?;
        let y_indices = device.bus_indices("Y")?;
        let x_indices = device.bus_indices("X")?;

        let mut inputs = device.allocate_slice("I")?;
        for slot in &mut inputs {
            *slot = Dual::constant(rng.r#gen::<f32>());
        }
        let mut deltas = vec![0.0f32; inputs.len()];
        let mut grads = vec![0.0f32; inputs.len()];
        let (mut y, mut x) = (0u64, 0u64);

        for iteration in 0..self.budget {
            let mut cost_val = f32::INFINITY;
            let mut product = u64::MAX;
            for i in 0..inputs.len() {
                inputs[i].der = 1.0;
                device.set_slice("I", &inputs)?;
                inputs[i].der = 0.0;
                device.execute(Direction::Forward);
                let cost = surface.evaluate(&device);
                grads[i] = cost.der;
                if i == 0 {
                    cost_val = cost.val;
                    product = decode(&device, &p_indices);
                    y = decode(&device, &y_indices);
                    x = decode(&device, &x_indices);
                }
                device.reset();
            }

            debug!(iteration, cost = cost_val, product, y, x, "momentum step");
            if product == target {
                info!(target, y, x, iterations = iteration + 1, "factored");
                return Ok(FactorOutcome::found(y, x, iteration + 1));
            }
            if grads.iter().any(|g| g.is_nan()) {
                warn!(target, iteration, "gradient diverged");
                return Ok(FactorOutcome::diverged(y, x, iteration + 1));
            }

            for (i, slot) in inputs.iter_mut().enumerate() {
                deltas[i] = self.alpha * deltas[i] - self.eta * grads[i];
                *slot = Dual::constant((slot.val + deltas[i]).clamp(0.0, 1.0));
            }
        }

        info!(target, "budget exhausted");
        Ok(FactorOutcome::exhausted(y, x, self.budget))
    }
}
