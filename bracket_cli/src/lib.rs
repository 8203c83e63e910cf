//! Command-line front end for the bracket engine.
//!
//! Every subcommand reads one JSON document and prints one JSON document,
//! so the CLI can sit behind a job runner or be scripted from a shell.

pub mod args;
pub mod commands;

pub use args::Args;
pub use commands::{Command, run};
