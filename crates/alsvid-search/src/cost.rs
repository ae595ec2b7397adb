//! The differentiable cost surface shared by the forward drivers.
//!
//! Cost is read off a dual device after a forward execution:
//!
//! - a target-match term `Σ (F_i − P_i)²` over the product bits, zero
//!   exactly when the product bus spells the target, and
//! - one indicator polynomial per forbidden point ("hill"), the product of
//!   `w_i` or `1 − w_i` factors that peaks at 1 on the forbidden assignment
//!   and vanishes on every other crisp assignment.
//!
//! Hills for Y = 0, Y = 1, X = 0 and X = 1 are installed unconditionally so
//! the trivial factorizations never read as success; the greedy driver
//! appends further hills as tabu marks when it wedges.

use alsvid_dual::Dual;
use alsvid_ir::Circuit;
use alsvid_sim::{Device, Signal};

use crate::error::{SearchError, SearchResult};

/// A forbidden assignment over the input buses. Either side may be absent;
/// a Y-only hill forbids every point with that Y value.
#[derive(Debug, Clone, Copy)]
pub struct Hill {
    y: Option<u64>,
    x: Option<u64>,
}

/// Precomputed cost-surface state for one circuit and target.
#[derive(Debug, Clone)]
pub struct CostSurface {
    target: u64,
    bits: u32,
    /// Memory indices of the product bus, bit order.
    p: Vec<usize>,
    /// Memory indices of the Y bus.
    y: Vec<usize>,
    /// Memory indices of the X bus.
    x: Vec<usize>,
    hills: Vec<Hill>,
}

impl CostSurface {
    /// Build the surface for `target` over the circuit's `Y`/`X`/`P` buses,
    /// with the four trivial-factor hills installed.
    ///
    /// Fails when `target` exceeds `(2^bits − 1)²` for the circuit's input
    /// width.
    pub fn new(circuit: &Circuit, target: u64) -> SearchResult<Self> {
        let bits = circuit.bus_width("X")?;
        let max = largest_product(bits);
        if target > max {
            return Err(SearchError::TargetOutOfRange { target, bits, max });
        }

        let indices = |prefix: &str| -> SearchResult<Vec<usize>> {
            let width = circuit.bus_width(prefix)?;
            (0..width)
                .map(|i| Ok(circuit.wire_index(&format!("{prefix}{i}"))? as usize))
                .collect()
        };

        Ok(Self {
            target,
            bits,
            p: indices("P")?,
            y: indices("Y")?,
            x: indices("X")?,
            hills: vec![
                Hill { y: Some(0), x: None },
                Hill { y: Some(1), x: None },
                Hill { y: None, x: Some(0) },
                Hill { y: None, x: Some(1) },
            ],
        })
    }

    /// The target product.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// The input width n.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Forbid a specific (Y, X) point (a tabu mark).
    pub fn push_hill(&mut self, y: u64, x: u64) {
        self.hills.push(Hill {
            y: Some(y),
            x: Some(x),
        });
    }

    /// Hills currently installed, the four trivial ones included.
    pub fn num_hills(&self) -> usize {
        self.hills.len()
    }

    /// Read the cost off a device that has just executed forward.
    pub fn evaluate<M>(&self, device: &Device<'_, Dual, M>) -> Dual {
        let mut cost = Dual::ZERO;
        for (i, &index) in self.p.iter().enumerate() {
            let expected = Dual::constant(((self.target >> i) & 1) as f32);
            let sub = expected - device.get_at(index);
            cost = cost + sub * sub;
        }
        for hill in &self.hills {
            cost = cost + self.hill_term(device, hill);
        }
        cost
    }

    fn hill_term<M>(&self, device: &Device<'_, Dual, M>, hill: &Hill) -> Dual {
        let mut term = Dual::ONE;
        if let Some(value) = hill.y {
            term = term * bus_indicator(device, &self.y, value);
        }
        if let Some(value) = hill.x {
            term = term * bus_indicator(device, &self.x, value);
        }
        term
    }
}

/// The largest product of two `bits`-wide factors.
pub(crate) fn largest_product(bits: u32) -> u64 {
    let side = (1u128 << bits) - 1;
    u64::try_from(side * side).unwrap_or(u64::MAX)
}

/// `∏ (w_i if bit else 1 − w_i)` over the bus: 1 at `value`, 0 at every
/// other crisp assignment.
fn bus_indicator<M>(device: &Device<'_, Dual, M>, indices: &[usize], value: u64) -> Dual {
    let mut term = Dual::ONE;
    for (i, &index) in indices.iter().enumerate() {
        let wire = device.get_at(index);
        term = term * if (value >> i) & 1 == 1 {
            wire
        } else {
            Dual::ONE - wire
        };
    }
    term
}

/// Threshold-decode a bus from precomputed indices.
pub(crate) fn decode<T: Signal, M>(device: &Device<'_, T, M>, indices: &[usize]) -> u64 {
    let mut value = 0u64;
    for (i, &index) in indices.iter().enumerate() {
        if device.get_at(index).bit() {
            value |= 1 << i;
        }
    }
    value
}
