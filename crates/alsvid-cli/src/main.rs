//! Alsvid Command-Line Interface
//!
//! The main entry point for the Alsvid factoring explorer.
//!
//! ```text
//!                  A L S V I D
//!       Reversible-Circuit Factoring Explorer
//!
//!         "The second of the eternal steeds"
//! ```

use clap::Parser;
use console::style;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Mode, factor, graph, preimage, sweep};

/// Alsvid - gradient-guided factoring over reversible multiplier circuits
#[derive(Parser)]
#[command(name = "alsvid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit the diagnostic grid files points.dat and simple.dat, then exit
    #[arg(long)]
    graph: bool,

    /// Exhaustively enumerate reverse preimages of the 4-bit probe target
    #[arg(long)]
    test: bool,

    /// Factor every composite in range and report the success rate
    #[arg(long)]
    all: bool,

    /// The target product to factor
    #[arg(long, default_value_t = 77)]
    factor: u64,

    /// Search driver
    #[arg(long, value_enum, default_value_t = Mode::Forward)]
    mode: Mode,

    /// Input width in bits
    #[arg(long, default_value_t = 5)]
    bits: u32,

    /// Seed for the random source (entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Handle errors
    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    if cli.graph {
        return graph::execute();
    }
    if cli.test {
        return preimage::execute();
    }
    if cli.all {
        return sweep::execute(cli.bits, cli.mode, &mut rng);
    }
    factor::execute(cli.bits, cli.mode, cli.factor, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_parses_the_four_driver_names() {
        for (name, mode) in [
            ("forward", Mode::Forward),
            ("neural", Mode::Neural),
            ("reverse", Mode::Reverse),
            ("prob", Mode::Prob),
        ] {
            let cli = Cli::try_parse_from(["alsvid", "--mode", name]).unwrap();
            assert_eq!(cli.mode, mode);
        }
        assert!(Cli::try_parse_from(["alsvid", "--mode", "sideways"]).is_err());
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["alsvid"]).unwrap();
        assert_eq!(cli.factor, 77);
        assert_eq!(cli.bits, 5);
        assert_eq!(cli.mode, Mode::Forward);
        assert!(!cli.graph && !cli.all && !cli.test);
    }
}
