//! Reverse-preimage enumeration: a correctness probe for reversibility.
//!
//! With the product bus pinned to a target, every assignment of bus `G`
//! (inputs plus adder garbage) spells one candidate final state. Running
//! the circuit backward from it either returns the partial-product and
//! scratch wires to zero (a valid preimage, whose decoded inputs must
//! multiply to the target) or leaves residue. Enumerating all `2^|G|`
//! assignments exhausts the preimage space.

use tracing::debug;

use alsvid_ir::Circuit;
use alsvid_sim::{BoolDevice, Direction, SimError};

use crate::cost::decode;
use crate::error::SearchResult;

/// One valid reverse preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preimage {
    /// The G-bus assignment, packed little-endian.
    pub garbage: u64,
    /// Decoded Y after the reverse run.
    pub y: u64,
    /// Decoded X after the reverse run.
    pub x: u64,
}

struct Prober<'c> {
    device: BoolDevice<'c>,
    g: Vec<usize>,
    p: Vec<usize>,
    a: Vec<usize>,
    z: Vec<usize>,
    y: Vec<usize>,
    x: Vec<usize>,
    target: u64,
}

impl<'c> Prober<'c> {
    fn new(circuit: &'c Circuit, target: u64) -> SearchResult<Self> {
        let width = circuit.bus_width("G")?;
        if width >= 64 {
            return Err(SimError::BusTooWide {
                bus: "G".to_string(),
                width,
            }
            .into());
        }
        let device = BoolDevice::new(circuit);
        Ok(Self {
            g: device.bus_indices("G")?,
            p: device.bus_indices("P")?,
            a: device.bus_indices("A")?,
            z: device.bus_indices("Z")?,
            y: device.bus_indices("Y")?,
            x: device.bus_indices("X")?,
            device,
            target,
        })
    }

    /// Reverse-execute from one G assignment. `Some` iff A and Z come back
    /// all zero.
    ///
    /// No reset is needed between probes: G and P together cover every
    /// wire, so each probe overwrites the previous state completely.
    fn probe(&mut self, garbage: u64) -> Option<Preimage> {
        for (i, &index) in self.g.iter().enumerate() {
            self.device.set_at(index, (garbage >> i) & 1 == 1);
        }
        for (i, &index) in self.p.iter().enumerate() {
            self.device.set_at(index, (self.target >> i) & 1 == 1);
        }
        self.device.execute(Direction::Reverse);

        let clean = self
            .a
            .iter()
            .chain(self.z.iter())
            .all(|&index| !self.device.get_at(index));
        clean.then(|| Preimage {
            garbage,
            y: decode(&self.device, &self.y),
            x: decode(&self.device, &self.x),
        })
    }
}

/// Check a single G assignment against the target.
pub fn preimage_probe(
    circuit: &Circuit,
    target: u64,
    garbage: u64,
) -> SearchResult<Option<Preimage>> {
    Ok(Prober::new(circuit, target)?.probe(garbage))
}

/// Enumerate every G assignment and collect the valid preimages.
///
/// Exhausts `2^|G|` reverse executions; at the 4-bit multiplier's 28
/// garbage bits this is a long release-mode run, not a unit-test workload.
pub fn preimage_scan(circuit: &Circuit, target: u64) -> SearchResult<Vec<Preimage>> {
    let mut prober = Prober::new(circuit, target)?;
    let width = circuit.bus_width("G")?;
    let mut hits = Vec::new();
    for garbage in 0..(1u64 << width) {
        if let Some(preimage) = prober.probe(garbage) {
            debug!(
                garbage,
                y = preimage.y,
                x = preimage.x,
                "valid reverse preimage"
            );
            hits.push(preimage);
        }
    }
    Ok(hits)
}
