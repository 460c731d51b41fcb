//! Top-level error type for the CLI boundary.

use std::io;

use thiserror::Error;

use crate::compositor::ComposeError;
use crate::monitor::RegistryError;
use crate::setter::SetterError;

/// Aggregated error type returned by CLI command execution.
#[derive(Debug, Error)]
pub enum SpanpaperError {
    /// Invalid command-line arguments or assignment syntax.
    #[error("{0}")]
    InvalidArguments(String),

    /// Monitor enumeration failed.
    #[error("monitor error: {0}")]
    Monitor(#[from] RegistryError),

    /// Compositing failed.
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// Installing the background failed.
    #[error("wallpaper error: {0}")]
    Wallpaper(#[from] SetterError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// No usable wallpaper images were found.
    #[error("no wallpaper images found in the configured directories")]
    NoWallpapers,

    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
