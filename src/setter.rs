//! Desktop background installation.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur when installing the background.
#[derive(Debug, Error)]
pub enum SetterError {
    /// The composite file does not exist.
    #[error("wallpaper file not found: {0}")]
    FileNotFound(String),

    /// The desktop environment rejected the wallpaper.
    #[error("failed to set wallpaper: {0}")]
    SetFailed(String),
}

/// Installs the given image as the desktop background on every monitor.
///
/// The composite already spans the whole virtual desktop, so the desktop
/// environment only needs to display it in spanned mode.
///
/// # Errors
///
/// Returns [`SetterError::FileNotFound`] if the path does not exist and
/// [`SetterError::SetFailed`] if the desktop environment rejects it.
pub fn set_background(path: &Path) -> Result<(), SetterError> {
    if !path.exists() {
        return Err(SetterError::FileNotFound(path.display().to_string()));
    }

    tracing::info!(path = %path.display(), "setting desktop background");

    wallpaper::set_from_path(&path.display().to_string())
        .map_err(|err| SetterError::SetFailed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_background_missing_file() {
        let err = set_background(Path::new("/nonexistent/composite.png")).unwrap_err();
        assert!(matches!(err, SetterError::FileNotFound(_)));
    }

    #[test]
    fn test_setter_error_display() {
        let err = SetterError::FileNotFound("/tmp/x.png".to_string());
        assert_eq!(err.to_string(), "wallpaper file not found: /tmp/x.png");

        let err = SetterError::SetFailed("dbus timeout".to_string());
        assert_eq!(err.to_string(), "failed to set wallpaper: dbus timeout");
    }
}
