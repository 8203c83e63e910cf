//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bracket_engine::config::{ConfigOverrides, parse_tiebreakers};
use pico_args::Arguments;

use crate::commands::Command;

/// Parsed command line
#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Flags that replace environment configuration
    pub overrides: ConfigOverrides,
}

impl Args {
    /// Parse everything after the binary name. Unknown arguments are an error.
    pub fn parse(mut pargs: Arguments) -> Result<Self> {
        let args = Args {
            command: pargs
                .subcommand()?
                .context("Missing command (see --help)")?
                .parse()?,
            input: pargs.value_from_str("--input")?,
            output: pargs.opt_value_from_str("--output")?,
            overrides: ConfigOverrides {
                points_win: pargs.opt_value_from_str("--points-win")?,
                points_draw: pargs.opt_value_from_str("--points-draw")?,
                points_loss: pargs.opt_value_from_str("--points-loss")?,
                tiebreakers: pargs.opt_value_from_fn("--tiebreakers", parse_tiebreakers)?,
            },
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            anyhow::bail!("Unexpected arguments: {:?}", remaining);
        }
        Ok(args)
    }
}
