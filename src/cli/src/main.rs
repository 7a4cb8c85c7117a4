use std::{fs, path::PathBuf, time::Instant};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use env_logger::TimestampPrecision;
use facelet_cube::Cube;
use log::{info, LevelFilter};

/// Solves a 3x3x3 cube with a two-phase search
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File holding the 9-line sticker grid to solve
    input: PathBuf,
    /// File the move sequence is written to
    output: PathBuf,
    /// Write `U2` and `U'` tokens instead of repeated quarter turns
    #[arg(long)]
    compact: bool,
    /// Log verbosity; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let text = fs::read_to_string(&cli.input)
        .wrap_err_with(|| format!("could not read {}", cli.input.display()))?;
    let cube = Cube::from_grid(&text)
        .wrap_err_with(|| format!("{} does not hold a valid cube", cli.input.display()))?;

    two_phase::initialize_tables();

    let begin = Instant::now();
    let solution = two_phase::solve(&cube)?;
    info!(
        "solved in {:.3}s with {} moves",
        begin.elapsed().as_secs_f64(),
        solution.len()
    );

    let formatted = if cli.compact {
        two_phase::format_compact(&solution)
    } else {
        two_phase::format_expanded(&solution)
    };
    fs::write(&cli.output, formatted)
        .wrap_err_with(|| format!("could not write {}", cli.output.display()))?;
    Ok(())
}
