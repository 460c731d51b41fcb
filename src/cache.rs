//! Composite cache directory utilities.
//!
//! Finished composites live in a directory under the user's picture storage
//! so they survive reboots and can be reused by the content-addressed namer.
//! Falls back to `/tmp/spanpaper` if no picture directory can be determined.

use std::path::PathBuf;

/// Directory name for composited wallpapers inside the picture storage.
const COMPOSITES_DIR_NAME: &str = "Spanpaper";

/// Returns the directory where finished composites are stored.
///
/// Prefers the user's picture directory, then `~/Pictures`, then
/// `/tmp/spanpaper` as a last resort.
#[must_use]
pub fn composites_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .map_or_else(|| PathBuf::from("/tmp/spanpaper"), |dir| dir.join(COMPOSITES_DIR_NAME))
}

/// Ensures the composites directory exists and returns it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_composites_dir() -> std::io::Result<PathBuf> {
    let dir = composites_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Removes every cached composite.
///
/// # Returns
///
/// The approximate number of bytes freed. A missing cache directory is not
/// an error and frees zero bytes.
///
/// # Errors
///
/// Returns an error if files cannot be removed.
pub fn clear_cache() -> std::io::Result<u64> {
    let dir = composites_dir();

    if !dir.exists() {
        return Ok(0);
    }

    let bytes_freed = calculate_dir_size(&dir)?;
    std::fs::remove_dir_all(&dir)?;

    Ok(bytes_freed)
}

/// Calculates the total size of a directory in bytes.
fn calculate_dir_size(path: &PathBuf) -> std::io::Result<u64> {
    let mut total = 0u64;

    if path.is_dir() {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                total += calculate_dir_size(&path)?;
            } else {
                total += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }
    }

    Ok(total)
}

/// Formats a byte count as a human-readable string.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composites_dir_is_namespaced() {
        let path = composites_dir();
        let path_str = path.to_string_lossy().to_lowercase();
        assert!(path_str.contains("spanpaper"), "path should be namespaced: {path_str}");
    }

    #[test]
    fn test_calculate_dir_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("b.bin"), vec![0u8; 50]).unwrap();

        assert_eq!(calculate_dir_size(&dir.path().to_path_buf()).unwrap(), 150);
    }

    #[test]
    fn test_format_bytes_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
    }

    #[test]
    fn test_format_bytes_kb() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_format_bytes_mb() {
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 + 512 * 1024), "1.50 MB");
    }

    #[test]
    fn test_format_bytes_gb() {
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }
}
