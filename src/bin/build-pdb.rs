//! Builds one disjoint pattern database via external-memory retrograde BFS and
//! writes it to a `pat24.<tiles>.tab` file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dpdb24::bfs;
use dpdb24::dpdb::Database;
use dpdb24::pattern::Pattern;

/// Builds a 6-tile disjoint pattern database for the 24-puzzle.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The six pattern tiles, in table order. Defaults to the two patterns
    /// `solve24` consumes if omitted entirely.
    #[arg(num_args = 0..=6)]
    tiles: Vec<u8>,

    /// Output database file. Defaults to `pat24.<tiles>.tab` in the working
    /// directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the temporary `q1`/`q2` frontier files.
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,
}

const DEFAULT_PATTERN: [u8; 6] = [1, 2, 5, 6, 7, 12];

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let tiles = if cli.tiles.is_empty() {
        DEFAULT_PATTERN
    } else {
        cli.tiles
            .as_slice()
            .try_into()
            .context("expected exactly 6 pattern tiles")?
    };
    let pattern = Pattern::new(tiles).context("invalid pattern")?;

    let output = cli.output.unwrap_or_else(|| {
        let digits: String = pattern.tiles().iter().map(u8::to_string).collect();
        PathBuf::from(format!("pat24.{digits}.tab"))
    });
    let q1 = cli.work_dir.join("q1");
    let q2 = cli.work_dir.join("q2");

    log::info!(
        "building database for pattern {:?} -> {}",
        pattern.tiles(),
        output.display()
    );

    let table = bfs::build(&pattern, &q1, &q2, |stats| {
        log::info!(
            "layer {:3} finished: {:>10} new, {:>12} total visited",
            stats.depth,
            stats.new_count,
            stats.total
        );
    })
    .context("BFS construction failed")?;

    let database = Database::from_table(table);
    database
        .write(&output)
        .with_context(|| format!("writing database to {}", output.display()))?;

    log::info!("wrote {}", output.display());
    Ok(())
}
