//! Factor a single target.

use anyhow::Result;
use rand::Rng;
use tracing::info;

use super::Mode;
use super::common::{Driver, build_circuit};

pub fn execute<R: Rng>(bits: u32, mode: Mode, target: u64, rng: &mut R) -> Result<()> {
    info!(bits, target, ?mode, "factoring");
    let circuit = build_circuit(bits)?;
    let driver = Driver::new(&circuit, mode, rng)?;
    let outcome = driver.factor(target, rng)?;

    if outcome.factored {
        println!(
            "{target} = {} × {}  ({} iterations)",
            outcome.y, outcome.x, outcome.iterations
        );
    } else if outcome.diverged {
        println!("{target} not factored (gradient diverged)");
    } else {
        println!("{target} not factored (budget exhausted)");
    }
    Ok(())
}
