//! Composite cache management commands.

use clap::Subcommand;

use crate::cache;
use crate::error::SpanpaperError;

/// Cache subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum CacheCommands {
    /// Print the composite cache directory path.
    Path,

    /// Remove all cached composites.
    Clear,
}

/// Execute cache subcommands.
pub fn execute(cmd: &CacheCommands) -> Result<(), SpanpaperError> {
    match cmd {
        CacheCommands::Path => {
            println!("{}", cache::composites_dir().display());
            Ok(())
        }
        CacheCommands::Clear => {
            let bytes_freed = cache::clear_cache()?;
            println!("Cache cleared, {} freed.", cache::format_bytes(bytes_freed));
            Ok(())
        }
    }
}
