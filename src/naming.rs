//! Deterministic output naming for composited wallpapers.
//!
//! The composite file name is a SHA-256 digest over a fixed namespace tag and
//! the assigned source paths in monitor order. The same assignment always maps
//! to the same file name, so an existing composite can be reused instead of
//! recomposited. The digest keys on paths, not pixel content: editing an image
//! in place reuses the stale composite until the cache is cleared.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Namespace tag mixed into every digest so names cannot collide with other
/// tools hashing the same path strings.
const NAMESPACE: &str = "spanpaper";

/// Derives the composite file name for an ordered wallpaper assignment.
///
/// # Arguments
///
/// * `sources` - The assigned source paths, in monitor order.
///
/// # Returns
///
/// A lowercase hex digest with a `.png` extension. Reordering the sources
/// produces a different name.
#[must_use]
pub fn composite_file_name<P: AsRef<Path>>(sources: &[P]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(NAMESPACE.as_bytes());

    for source in sources {
        hasher.update(source.as_ref().as_os_str().as_encoded_bytes());
    }

    format!("{:x}.png", hasher.finalize())
}

/// Derives the full output path for an ordered wallpaper assignment inside
/// the given cache directory.
#[must_use]
pub fn composite_path<P: AsRef<Path>>(directory: &Path, sources: &[P]) -> PathBuf {
    directory.join(composite_file_name(sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_file_name_is_deterministic() {
        let first = composite_file_name(&["/tmp/a.png", "/tmp/b.png"]);
        let second = composite_file_name(&["/tmp/a.png", "/tmp/b.png"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_composite_file_name_is_order_sensitive() {
        let forward = composite_file_name(&["a.png", "b.png"]);
        let reversed = composite_file_name(&["b.png", "a.png"]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_composite_file_name_shape() {
        let name = composite_file_name(&["/tmp/a.png"]);
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 64 + 4);
        assert!(name[..64].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_composite_file_name_depends_on_every_source() {
        let base = composite_file_name(&["/tmp/a.png", "/tmp/b.png"]);
        let changed = composite_file_name(&["/tmp/a.png", "/tmp/c.png"]);
        assert_ne!(base, changed);
    }

    #[test]
    fn test_composite_path_joins_directory() {
        let path = composite_path(Path::new("/cache"), &["a.png"]);
        assert_eq!(path.parent(), Some(Path::new("/cache")));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), composite_file_name(&["a.png"]));
    }
}
