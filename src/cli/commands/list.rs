//! Wallpaper discovery command.

use std::path::PathBuf;

use crate::error::SpanpaperError;
use crate::{config, wallpapers};

/// Execute the list command.
///
/// Scans the given directory, or the configured wallpaper directories when
/// none is given.
pub fn execute(directory: Option<&str>, json: bool) -> Result<(), SpanpaperError> {
    let directories = directory.map_or_else(
        || config::get_config().wallpaper_dirs(),
        |dir| vec![PathBuf::from(shellexpand::tilde(dir).into_owned())],
    );

    let images = wallpapers::list_wallpapers(&directories);

    if json {
        let output = serde_json::to_string_pretty(&images)
            .map_err(|err| SpanpaperError::Io(std::io::Error::other(err)))?;
        println!("{output}");
        return Ok(());
    }

    if images.is_empty() {
        println!("No wallpapers found.");
        return Ok(());
    }

    for image in &images {
        println!("{}", image.display());
    }

    Ok(())
}
