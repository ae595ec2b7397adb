//! Search-space diagnostics: rank-weighted grid scan.
//!
//! For every (x, y) input pair, execute forward, pin the product bus to a
//! probe target, execute in reverse, and sum the influence ranks of the
//! partial-product and scratch wires left non-zero. High scores mark
//! regions whose garbage profile is far from any valid preimage. A simple
//! `|target − x·y|` fitness is emitted alongside for comparison.

use std::io::{self, Write};

use alsvid_ir::Circuit;
use alsvid_sim::{BoolDevice, Direction};

use crate::error::SearchResult;

/// One grid point of the diagnostic scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    /// The X input.
    pub x: u64,
    /// The Y input.
    pub y: u64,
    /// Rank sum over non-zero A and Z wires after the pinned reverse run.
    pub score: f64,
    /// `|target − x·y|`.
    pub fitness: u64,
}

/// Scan the full (x, y) grid of the circuit's input width against `target`.
///
/// The caller is expected to have run
/// [`compute_ranks`](alsvid_ir::Circuit::compute_ranks); unranked wires
/// contribute zero score.
pub fn scan_grid(circuit: &Circuit, target: u64) -> SearchResult<Vec<ScanPoint>> {
    let bits = circuit.bus_width("X")?;
    let mut device = BoolDevice::new(circuit);
    let a_indices = device.bus_indices("A")?;
    let z_indices = device.bus_indices("Z")?;

    let mut ranks = vec![0.0f64; circuit.num_wires()];
    for wire in circuit.wires() {
        ranks[wire.index as usize] = wire.rank;
    }

    let side = 1u64 << bits;
    let mut points = Vec::with_capacity((side * side) as usize);
    for y in 0..side {
        for x in 0..side {
            device.set_uint64("Y", y)?;
            device.set_uint64("X", x)?;
            device.execute(Direction::Forward);
            device.set_uint64("P", target)?;
            device.execute(Direction::Reverse);

            let mut score = 0.0;
            for &index in a_indices.iter().chain(z_indices.iter()) {
                if device.get_at(index) {
                    score += ranks[index];
                }
            }
            device.reset();

            points.push(ScanPoint {
                x,
                y,
                score,
                fitness: target.abs_diff(x * y),
            });
        }
    }
    Ok(points)
}

/// Emit `x y score` lines.
pub fn write_scores<W: Write>(points: &[ScanPoint], mut writer: W) -> io::Result<()> {
    for point in points {
        writeln!(writer, "{} {} {:.6}", point.x, point.y, point.score)?;
    }
    Ok(())
}

/// Emit `x y fitness` lines.
pub fn write_fitness<W: Write>(points: &[ScanPoint], mut writer: W) -> io::Result<()> {
    for point in points {
        writeln!(writer, "{} {} {}", point.x, point.y, point.fitness)?;
    }
    Ok(())
}
