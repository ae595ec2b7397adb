//! Tiny dense sigmoid networks trained by dual-number gradient descent.
//!
//! The networks here are small enough (a handful of neurons) that the
//! gradient of every weight can be obtained by brute-force forward-mode
//! autodiff: seed one weight's derivative to 1, run inference, and read the
//! derivative of the half-sum-of-squares loss. Training is stochastic
//! momentum descent over a shuffled epoch, terminating when the epoch loss
//! sum drops below a target.
//!
//! Activations live in a separate [`NetState`] so that inference can write
//! scratch state while the trained weights stay put. Weights are stored as
//! [`Dual`]s: the derivative field doubles as the seeding slot during
//! training and stays zero in inference, which lets gradients of *network
//! inputs* flow through a trained network unimpeded.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

use alsvid_dual::Dual;

/// Errors from network training.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetError {
    /// The epoch cap was reached before the loss target.
    #[error("no convergence after {epochs} epochs (loss {loss:.6}, target {target:.6})")]
    NoConvergence {
        /// Epochs actually run.
        epochs: usize,
        /// Final epoch loss sum.
        loss: f64,
        /// The loss target that was not reached.
        target: f64,
    },
}

/// Result type for network operations.
pub type NetResult<T> = Result<T, NetError>;

/// One trainable parameter with its momentum and gradient scratch.
#[derive(Debug, Clone, Default)]
struct Weight {
    weight: Dual,
    delta: f32,
    gradient: f32,
}

/// A dense feed-forward network with sigmoid activation at every layer.
#[derive(Debug, Clone)]
pub struct Network {
    /// Layer sizes, input first.
    sizes: Vec<usize>,
    /// Per layer: `fan_in · fan_out` weights, row-major by neuron.
    layers: Vec<Vec<Weight>>,
    /// Per layer: one bias per neuron.
    biases: Vec<Vec<Weight>>,
}

/// One training row: inputs and expected outputs.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    /// Input activations.
    pub inputs: Vec<f32>,
    /// Expected outputs.
    pub outputs: Vec<f32>,
}

/// Activation storage for one network, separate from the weights.
#[derive(Debug, Clone)]
pub struct NetState {
    state: Vec<Vec<Dual>>,
}

impl Network {
    /// Create a network with weights and biases initialized uniformly in
    /// `[-1, 1) / √fan_in`.
    pub fn random<R: Rng>(sizes: &[usize], rng: &mut R) -> Self {
        let mut layers = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        let mut fan_in = sizes[0];
        for &size in &sizes[1..] {
            let scale = 1.0 / (fan_in as f32).sqrt();
            let mut layer = vec![Weight::default(); fan_in * size];
            for w in &mut layer {
                w.weight.val = rng.gen_range(-1.0f32..1.0) * scale;
            }
            let mut bias = vec![Weight::default(); size];
            for b in &mut bias {
                b.weight.val = rng.gen_range(-1.0f32..1.0) * scale;
            }
            layers.push(layer);
            biases.push(bias);
            fan_in = size;
        }
        Self {
            sizes: sizes.to_vec(),
            layers,
            biases,
        }
    }

    /// Allocate an activation state sized for this network.
    pub fn state(&self) -> NetState {
        NetState {
            state: self.sizes.iter().map(|&size| vec![Dual::ZERO; size]).collect(),
        }
    }

    /// Forward pass over the given activation state.
    pub fn infer(&self, state: &mut NetState) {
        for (i, layer) in self.layers.iter().enumerate() {
            let mut w = 0;
            for j in 0..self.sizes[i + 1] {
                let mut sum = self.biases[i][j].weight;
                for k in 0..self.sizes[i] {
                    sum = sum + state.state[i][k] * layer[w].weight;
                    w += 1;
                }
                state.state[i + 1][j] = sum.sigmoid();
            }
        }
    }

    /// Convenience forward pass for single-output networks: load `inputs`,
    /// infer, return the lone output neuron.
    ///
    /// Input derivative seeds propagate through to the output, so a trained
    /// network remains differentiable in its inputs.
    pub fn eval(&self, state: &mut NetState, inputs: &[Dual]) -> Dual {
        state.state[0].copy_from_slice(inputs);
        self.infer(state);
        state.state[self.sizes.len() - 1][0]
    }

    /// Train by stochastic momentum descent until the epoch loss sum drops
    /// below `target`, shuffling the samples each epoch.
    ///
    /// `alpha` is the momentum coefficient, `eta` the learning rate. Returns
    /// the number of epochs run, or [`NetError::NoConvergence`] once
    /// `max_epochs` is exceeded.
    pub fn train<R: Rng>(
        &mut self,
        data: &[TrainingSample],
        target: f64,
        alpha: f32,
        eta: f32,
        max_epochs: usize,
        rng: &mut R,
    ) -> NetResult<usize> {
        let mut state = self.state();
        let mut randomized = data.to_vec();
        let mut epochs = 0;
        loop {
            randomized.shuffle(rng);

            let mut total = 0.0f64;
            for sample in &randomized {
                // Gradient of every parameter by one seeded forward pass each.
                for i in 0..self.layers.len() {
                    for j in 0..self.layers[i].len() {
                        self.layers[i][j].weight.der = 1.0;
                        let loss = self.sample_loss(&mut state, sample);
                        self.layers[i][j].weight.der = 0.0;
                        self.layers[i][j].gradient = loss.der;
                    }
                }
                for i in 0..self.biases.len() {
                    for j in 0..self.biases[i].len() {
                        self.biases[i][j].weight.der = 1.0;
                        let loss = self.sample_loss(&mut state, sample);
                        self.biases[i][j].weight.der = 0.0;
                        self.biases[i][j].gradient = loss.der;
                    }
                }
                let loss = self.sample_loss(&mut state, sample);
                total += f64::from(loss.val);

                for layer in self.layers.iter_mut().chain(self.biases.iter_mut()) {
                    for w in layer {
                        w.delta = alpha * w.delta - eta * w.gradient;
                        w.weight.val += w.delta;
                    }
                }
            }

            epochs += 1;
            if total < target {
                debug!(epochs, loss = total, "network training converged");
                return Ok(epochs);
            }
            if epochs >= max_epochs {
                return Err(NetError::NoConvergence {
                    epochs,
                    loss: total,
                    target,
                });
            }
        }
    }

    /// Half-sum-of-squares loss of one sample under the current seeds.
    fn sample_loss(&self, state: &mut NetState, sample: &TrainingSample) -> Dual {
        for (slot, &input) in state.state[0].iter_mut().zip(&sample.inputs) {
            *slot = Dual::constant(input);
        }
        self.infer(state);
        let last = &state.state[self.sizes.len() - 1];
        let mut sum = Dual::ZERO;
        for (k, &expected) in sample.outputs.iter().enumerate() {
            let sub = last[k] - Dual::constant(expected);
            sum = sum + sub * sub;
        }
        Dual::HALF * sum
    }
}

impl NetState {
    /// Read an output neuron of the last layer.
    pub fn output(&self, k: usize) -> Dual {
        self.state[self.state.len() - 1][k]
    }
}

/// The XOR truth table (the CNOT target column).
pub fn xor_table() -> Vec<TrainingSample> {
    [(0., 0.), (0., 1.), (1., 0.), (1., 1.)]
        .into_iter()
        .map(|(a, b): (f32, f32)| TrainingSample {
            inputs: vec![a, b],
            outputs: vec![if (a > 0.5) ^ (b > 0.5) { 1.0 } else { 0.0 }],
        })
        .collect()
}

/// The CCNOT target column: `(a ∧ b) ⊕ c` over all eight input rows.
pub fn ccnot_table() -> Vec<TrainingSample> {
    (0..8u32)
        .map(|v| {
            let (a, b, c) = (v & 1, (v >> 1) & 1, (v >> 2) & 1);
            TrainingSample {
                inputs: vec![a as f32, b as f32, c as f32],
                outputs: vec![((a & b) ^ c) as f32],
            }
        })
        .collect()
}
