//! Emit the search-space diagnostic files.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use tracing::{debug, info};

use alsvid_search::{scan_grid, write_fitness, write_scores};
use alsvid_synth::multiplier4;

/// The probe product for the 4-bit grid.
const TARGET: u64 = 225;

pub fn execute() -> Result<()> {
    let mut circuit = multiplier4()?;
    circuit.compute_ranks();
    for wire in circuit.ranked_wires() {
        debug!(wire = %wire.name, rank = wire.rank, "wire rank");
    }

    let points = scan_grid(&circuit, TARGET)?;

    let scores = File::create("points.dat").context("creating points.dat")?;
    write_scores(&points, BufWriter::new(scores)).context("writing points.dat")?;
    let fitness = File::create("simple.dat").context("creating simple.dat")?;
    write_fitness(&points, BufWriter::new(fitness)).context("writing simple.dat")?;

    info!(points = points.len(), target = TARGET, "diagnostic scan done");
    println!("wrote points.dat and simple.dat ({} grid points)", points.len());
    Ok(())
}
