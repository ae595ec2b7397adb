//! Exhaustive reverse-preimage probe for a fixed 4-bit target.

use anyhow::Result;
use tracing::info;

use alsvid_search::preimage_scan;
use alsvid_synth::multiplier4;

/// The probe product.
const TARGET: u64 = 81;

pub fn execute() -> Result<()> {
    let circuit = multiplier4()?;
    let width = circuit.bus_width("G")? as usize;
    info!(width, target = TARGET, "enumerating reverse preimages");
    println!("enumerating 2^{width} garbage assignments against {TARGET}");

    let hits = preimage_scan(&circuit, TARGET)?;
    for hit in &hits {
        println!(
            "G={:0width$b}  Y={} X={}  Y·X={}",
            hit.garbage,
            hit.y,
            hit.x,
            hit.y * hit.x,
        );
    }
    println!("{} valid preimages", hits.len());
    Ok(())
}
