//! Tournament bracket engine CLI.
//!
//! Reads a JSON request, runs one engine operation and prints the result.

use anyhow::{Context, Error};
use bracket_cli::{Args, run};
use bracket_engine::config::EngineConfig;
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run tournament engine operations on JSON documents

USAGE:
  bracket_cli <COMMAND> --input FILE [OPTIONS]

COMMANDS:
  standings          Rank teams from match results
  round-robin        Generate a round-robin schedule for one group
  schedule-groups    Generate round-robin schedules for many groups
  validate           Validate a format configuration
  estimate           Estimate the number of matches for a format
  advancement        Map knockout matches to their winner/loser targets
  resolve            Resolve placeholders and rewrite match slots
  knockout           Generate a knockout bracket

OPTIONS:
  --input      FILE        JSON request document, '-' for stdin
  --output     FILE        Write the result here instead of stdout
  --points-win   N         Points for a win (overrides POINTS_WIN)
  --points-draw  N         Points for a draw (overrides POINTS_DRAW)
  --points-loss  N         Points for a loss (overrides POINTS_LOSS)
  --tiebreakers  RULES     Comma-separated rules (overrides TIEBREAKERS)

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  POINTS_WIN               Points for a win   [default: 3]
  POINTS_DRAW              Points for a draw  [default: 1]
  POINTS_LOSS              Points for a loss  [default: 0]
  TIEBREAKERS              Comma-separated rules [default: points,goal_difference,goals_for]
  RUST_LOG                 Log level (e.g., debug)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args::parse(pargs)?;

    env_logger::builder().format_target(false).init();

    let config = EngineConfig::from_env_with(args.overrides.clone())?;
    info!("Running '{}' with {:?}", args.command, config.points);

    let input = if args.input.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?
    };

    let output = run(args.command, &input, &config)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, output + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote result to {}", path.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}
