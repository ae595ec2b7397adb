//! Gate-mapping strategies for the dual-number device.
//!
//! A [`GateMapping`] supplies the NOT/CNOT/CCNOT semantics the dual device
//! applies per gate. [`Paraboloid`] is the closed-form relaxation: the
//! hyperbolic-paraboloid surfaces that agree with the boolean gates on
//! {0, 1} corners and stay smooth in between. [`Learned`] substitutes tiny
//! sigmoid networks trained on the gate truth tables for the two controlled
//! gates; it is only expected to match the closed form on the corners, with
//! the interior being whatever continuous extension training found.

use rand::Rng;
use tracing::{debug, warn};

use alsvid_dual::Dual;
use alsvid_net::{NetError, NetState, Network, TrainingSample, ccnot_table, xor_table};

use crate::error::SimResult;

/// NOT/CNOT/CCNOT semantics over dual scalars.
///
/// Chosen at device construction and fixed for the device's lifetime.
/// Methods take `&mut self` because learned mappings run inference through
/// scratch activation state.
pub trait GateMapping {
    /// Relaxed NOT of `a`.
    fn not(&mut self, a: Dual) -> Dual;
    /// Relaxed CNOT: the new target value given `(control, target)`.
    fn cnot(&mut self, control: Dual, target: Dual) -> Dual;
    /// Relaxed CCNOT: the new target value given `(c0, c1, target)`.
    fn ccnot(&mut self, c0: Dual, c1: Dual, target: Dual) -> Dual;
}

/// The closed-form relaxation. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paraboloid;

impl GateMapping for Paraboloid {
    #[inline]
    fn not(&mut self, a: Dual) -> Dual {
        Dual::ONE - a
    }

    #[inline]
    fn cnot(&mut self, control: Dual, target: Dual) -> Dual {
        (Dual::ONE - control) * target + (Dual::ONE - target) * control
    }

    #[inline]
    fn ccnot(&mut self, c0: Dual, c1: Dual, target: Dual) -> Dual {
        (Dual::ONE - c0 * c1) * target + (Dual::ONE - target) * c0 * c1
    }
}

/// Epoch loss target for the gate networks.
const LOSS_TARGET: f64 = 1e-3;
/// Momentum coefficient.
const ALPHA: f32 = 0.5;
/// Learning rate.
const ETA: f32 = 0.6;
/// Epoch cap per training attempt.
const MAX_EPOCHS: usize = 20_000;
/// Fresh-initialization attempts before giving up.
const RESTARTS: usize = 16;

/// A learned mapping: a 2-2-1 network reproducing the CNOT target column
/// and a 3-3-1 network reproducing the CCNOT target column. NOT stays
/// closed-form. Networks are trained once at construction and then run in
/// inference mode on every gate.
#[derive(Debug, Clone)]
pub struct Learned {
    cnot_net: Network,
    cnot_state: NetState,
    ccnot_net: Network,
    ccnot_state: NetState,
}

impl Learned {
    /// Train both gate networks using the given random source.
    pub fn train_with_rng<R: Rng>(rng: &mut R) -> SimResult<Self> {
        let cnot_net = fit(&[2, 2, 1], &xor_table(), rng)?;
        let ccnot_net = fit(&[3, 3, 1], &ccnot_table(), rng)?;
        let cnot_state = cnot_net.state();
        let ccnot_state = ccnot_net.state();
        Ok(Self {
            cnot_net,
            cnot_state,
            ccnot_net,
            ccnot_state,
        })
    }

    /// Train both gate networks with the thread-local RNG.
    pub fn train() -> SimResult<Self> {
        Self::train_with_rng(&mut rand::thread_rng())
    }
}

/// Train one gate network, reinitializing on non-convergence; sigmoid nets
/// this small occasionally start in a dead basin.
fn fit<R: Rng>(sizes: &[usize], data: &[TrainingSample], rng: &mut R) -> SimResult<Network> {
    let mut last = NetError::NoConvergence {
        epochs: 0,
        loss: f64::INFINITY,
        target: LOSS_TARGET,
    };
    for attempt in 0..RESTARTS {
        let mut network = Network::random(sizes, rng);
        match network.train(data, LOSS_TARGET, ALPHA, ETA, MAX_EPOCHS, rng) {
            Ok(epochs) => {
                debug!(?sizes, attempt, epochs, "gate network trained");
                return Ok(network);
            }
            Err(err) => {
                warn!(?sizes, attempt, %err, "gate network did not converge, reinitializing");
                last = err;
            }
        }
    }
    Err(last.into())
}

impl GateMapping for Learned {
    #[inline]
    fn not(&mut self, a: Dual) -> Dual {
        Dual::ONE - a
    }

    fn cnot(&mut self, control: Dual, target: Dual) -> Dual {
        self.cnot_net.eval(&mut self.cnot_state, &[control, target])
    }

    fn ccnot(&mut self, c0: Dual, c1: Dual, target: Dual) -> Dual {
        self.ccnot_net
            .eval(&mut self.ccnot_state, &[c0, c1, target])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn paraboloid_matches_boolean_corners() {
        let mut m = Paraboloid;
        for a in [0.0f32, 1.0] {
            assert_eq!(m.not(Dual::constant(a)).val, 1.0 - a);
            for b in [0.0f32, 1.0] {
                let expected = if (a > 0.5) ^ (b > 0.5) { 1.0 } else { 0.0 };
                assert_eq!(m.cnot(Dual::constant(a), Dual::constant(b)).val, expected);
                for c in [0.0f32, 1.0] {
                    let expected = if ((a > 0.5) && (b > 0.5)) ^ (c > 0.5) {
                        1.0
                    } else {
                        0.0
                    };
                    assert_eq!(
                        m.ccnot(Dual::constant(a), Dual::constant(b), Dual::constant(c))
                            .val,
                        expected
                    );
                }
            }
        }
    }

    #[test]
    fn paraboloid_is_smooth_between_corners() {
        let mut m = Paraboloid;
        // ∂/∂control cnot(control, 0) = 1 − 2·target = 1 at target = 0.
        let seeded = Dual { val: 0.5, der: 1.0 };
        let out = m.cnot(seeded, Dual::ZERO);
        assert_eq!(out.val, 0.5);
        assert_eq!(out.der, 1.0);
    }

    #[test]
    fn learned_matches_corners_after_training() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut m = Learned::train_with_rng(&mut rng).unwrap();
        for a in [0.0f32, 1.0] {
            for b in [0.0f32, 1.0] {
                let expected = (a > 0.5) ^ (b > 0.5);
                let out = m.cnot(Dual::constant(a), Dual::constant(b));
                assert_eq!(out.val > 0.5, expected, "cnot({a},{b}) = {}", out.val);
                for c in [0.0f32, 1.0] {
                    let expected = ((a > 0.5) && (b > 0.5)) ^ (c > 0.5);
                    let out = m.ccnot(Dual::constant(a), Dual::constant(b), Dual::constant(c));
                    assert_eq!(out.val > 0.5, expected, "ccnot({a},{b},{c}) = {}", out.val);
                }
            }
        }
    }
}
