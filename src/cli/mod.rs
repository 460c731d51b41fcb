//! Command-line interface.

pub mod commands;

use clap::Parser;
pub use commands::Cli;

use crate::error::SpanpaperError;

/// Parses the command line and executes the selected command.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> Result<(), SpanpaperError> { Cli::parse().execute() }
