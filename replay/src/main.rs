use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use colored::Colorize;
use serde_json::json;
use snake_core::{Legality, StrategyKind, Turn};

mod report;

use report::Report;

#[derive(Parser)]
#[command(name = "snake-replay")]
#[command(about = "Replays recorded move requests and shows which move the snake would pick")]
#[command(version)]
struct Cli {
    /// Recorded move request bodies (JSON)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Move selection strategy (priority, random)
    #[arg(short, long, default_value = "priority")]
    strategy: StrategyKind,

    /// Legality rule for the priority strategy (boundary, occupancy)
    #[arg(short, long, default_value = "boundary")]
    legality: Legality,

    /// Output one JSON object per file
    #[arg(long)]
    json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let strategy = cli.strategy.build(cli.legality);

    let mut failures = 0usize;
    for path in &cli.files {
        match load(path) {
            Ok(turn) => {
                let report = Report::new(path, &turn, strategy.as_ref());
                if cli.json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    report.print_summary(&turn.board);
                }
            }
            Err(e) => {
                failures += 1;
                if cli.json {
                    let error = json!({
                        "file": path.display().to_string(),
                        "error": format!("{e:#}"),
                    });
                    println!("{error}");
                } else {
                    eprintln!("{} {}: {e:#}", "error".red().bold(), path.display());
                }
            }
        }
    }

    if failures > 0 {
        bail!(
            "{failures} of {} snapshots could not be replayed",
            cli.files.len()
        );
    }
    Ok(())
}

fn load(path: &Path) -> color_eyre::Result<Turn> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    Ok(snake_core::parse_str(&raw)?)
}
