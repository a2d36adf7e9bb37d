//! Reads a 24-puzzle instance from standard input and solves it with IDA* against
//! two precomputed pattern databases.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dpdb24::dpdb::Database;
use dpdb24::ida::Solver;

/// Solves a 24-puzzle instance read from standard input.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Database file for the regular pattern `{1,2,5,6,7,12}` and its reflection.
    #[arg(long, default_value = "pat24.1256712.tab")]
    db0: PathBuf,

    /// Database file for the regular pattern `{3,4,8,9,13,14}`, its rotations, and
    /// their reflections.
    #[arg(long, default_value = "pat24.34891314.tab")]
    db1: PathBuf,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let h0 = Database::load(&cli.db0)
        .with_context(|| format!("loading {}", cli.db0.display()))?;
    log::info!("read {}", cli.db0.display());
    let h1 = Database::load(&cli.db1)
        .with_context(|| format!("loading {}", cli.db1.display()))?;
    log::info!("read {}", cli.db1.display());

    let initial = read_initial_state()?;
    let solver = Solver::new(&h0, &h1);

    let solution = solver.solve(&initial, |stats| {
        println!("{} {}", stats.threshold, stats.nodes_generated);
    })?;

    println!(
        "{} {}",
        solution.threshold, solution.total_nodes
    );
    for tile in &solution.path {
        print!("{tile} ");
    }
    println!();

    Ok(())
}

fn read_initial_state() -> Result<Vec<u8>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading initial state from stdin")?;

    let values: Result<Vec<u8>, _> = input.split_whitespace().map(str::parse::<u8>).collect();
    let values = values.context("initial state must be 25 whitespace-separated integers")?;

    if values.len() != 25 {
        bail!(
            "initial state has {} entries, expected 25",
            values.len()
        );
    }

    Ok(values)
}
