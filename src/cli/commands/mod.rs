//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `apply` - Composite and install wallpapers
//! - `cache_cmd` - Composite cache management commands
//! - `list` - Wallpaper discovery commands
//! - `monitors` - Monitor enumeration commands

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::error::SpanpaperError;

pub mod apply;
pub mod cache_cmd;
pub mod list;
pub mod monitors;

pub use apply::ApplyArgs;
pub use cache_cmd::CacheCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Spanpaper CLI - per-monitor wallpapers composited into one spanning
/// desktop background.
#[derive(Parser, Debug)]
#[command(name = "spanpaper")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file location.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// List the connected monitors and their layout.
    Monitors {
        /// Output as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// List available wallpaper images.
    ///
    /// Scans the given directory, or the configured wallpaper directories
    /// when none is given.
    List {
        /// Directory to scan instead of the configured ones.
        #[arg(value_name = "DIR")]
        directory: Option<String>,

        /// Output as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Composite wallpapers into one spanning image and set it.
    Apply(ApplyArgs),

    /// Composite cache management commands.
    ///
    /// Manage the directory of previously composited wallpapers.
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(spanpaper completions --shell zsh)"
    ///   spanpaper completions --shell bash > ~/.local/share/bash-completion/completions/spanpaper
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), SpanpaperError> {
        if let Some(ref path) = self.config {
            let path_buf = std::path::PathBuf::from(path);
            if !path_buf.exists() {
                return Err(SpanpaperError::Config(format!(
                    "configuration file not found: {path}"
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        match &self.command {
            Commands::Monitors { json } => monitors::execute(*json),
            Commands::List { directory, json } => list::execute(directory.as_deref(), *json),
            Commands::Apply(args) => apply::execute(args),
            Commands::Cache(cmd) => cache_cmd::execute(cmd),

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "spanpaper", &mut io::stdout());
    }
}
