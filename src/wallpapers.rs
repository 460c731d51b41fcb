//! Wallpaper source image discovery.

use std::fs;
use std::path::{Path, PathBuf};

use natord::compare;

/// Supported image file extensions.
///
/// SVG files are listed as candidates but are not rasterized by the engine;
/// assigning one fails at decode time.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "svg"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Lists all supported image files in a directory, in natural sort order.
///
/// A missing or unreadable directory yields an empty list.
#[must_use]
pub fn list_images_in_directory(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut images = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                images.push(path);
            }
        }
    }

    images.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    images
}

/// Aggregates the images of several wallpaper directories, preserving the
/// directory order.
#[must_use]
pub fn list_wallpapers(directories: &[PathBuf]) -> Vec<PathBuf> {
    directories.iter().flat_map(|dir| list_images_in_directory(dir)).collect()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("test.jpg")));
        assert!(is_supported_image(Path::new("test.jpeg")));
        assert!(is_supported_image(Path::new("test.png")));
        assert!(is_supported_image(Path::new("test.tiff")));
        assert!(is_supported_image(Path::new("test.svg")));
        assert!(!is_supported_image(Path::new("test.webp")));
        assert!(!is_supported_image(Path::new("test.bmp")));
        assert!(!is_supported_image(Path::new("test.txt")));
    }

    #[test]
    fn test_is_supported_image_mixed_case() {
        assert!(is_supported_image(Path::new("test.JpG")));
        assert!(is_supported_image(Path::new("test.PNG")));
        assert!(is_supported_image(Path::new("test.JPEG")));
    }

    #[test]
    fn test_is_supported_image_no_extension() {
        assert!(!is_supported_image(Path::new("imagefile")));
        assert!(!is_supported_image(Path::new(".")));
    }

    #[test]
    fn test_is_supported_image_double_extension() {
        assert!(is_supported_image(Path::new("test.tar.jpg")));
        assert!(!is_supported_image(Path::new("test.jpg.tar")));
    }

    #[test]
    fn test_list_images_in_directory_filters_and_sorts_naturally() {
        let dir = tempdir().unwrap();
        for name in ["photo10.png", "photo2.png", "photo1.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let images = list_images_in_directory(dir.path());
        let names: Vec<_> =
            images.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();

        assert_eq!(names, vec!["photo1.jpg", "photo2.png", "photo10.png"]);
    }

    #[test]
    fn test_list_images_in_missing_directory_is_empty() {
        assert!(list_images_in_directory(Path::new("/nonexistent/dir")).is_empty());
    }

    #[test]
    fn test_list_wallpapers_aggregates_directories() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("a.png"), b"x").unwrap();
        fs::write(second.path().join("b.jpg"), b"x").unwrap();

        let images =
            list_wallpapers(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(images.len(), 2);
        assert!(images[0].ends_with("a.png"));
        assert!(images[1].ends_with("b.jpg"));
    }
}
