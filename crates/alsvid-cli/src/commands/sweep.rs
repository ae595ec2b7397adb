//! Factor every composite in range and report the success rate.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::debug;

use super::Mode;
use super::common::{Driver, build_circuit};

pub fn execute<R: Rng>(bits: u32, mode: Mode, rng: &mut R) -> Result<()> {
    let circuit = build_circuit(bits)?;
    let driver = Driver::new(&circuit, mode, rng)?;
    let max = ((1u64 << bits) - 1).pow(2);

    let bar = ProgressBar::new(max - 1)
        .with_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let mut primes: Vec<u64> = Vec::new();
    let (mut factored, mut total) = (0u64, 0u64);

    for value in 2..=max {
        bar.inc(1);
        if push_if_prime(value, &mut primes) {
            continue;
        }
        total += 1;
        let outcome = driver.factor(value, rng)?;
        if outcome.factored {
            factored += 1;
            bar.set_message(format!("{value} = {} × {}", outcome.y, outcome.x));
        } else {
            debug!(value, diverged = outcome.diverged, "not factored");
        }
    }
    bar.finish_and_clear();

    println!("factored {factored}/{total} composites up to {max}");
    Ok(())
}

/// Trial division against the primes accumulated so far. Iterating the
/// range in order keeps the list complete below every probe.
fn push_if_prime(value: u64, primes: &mut Vec<u64>) -> bool {
    for &p in primes.iter() {
        if p * p > value {
            break;
        }
        if value % p == 0 {
            return false;
        }
    }
    primes.push(value);
    true
}
