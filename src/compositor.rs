//! N-ary wallpaper compositing engine.
//!
//! Draws one source image per monitor onto a single canvas sized to the
//! virtual-desktop bounding box. Each source is cover-scaled and center-cropped
//! to its monitor rectangle, so no region is ever letterboxed or distorted.
//! The canvas is written as lossless PNG through a temp-file-then-rename step,
//! so a failed run never leaves a partial composite at the output path.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{DynamicImage, GenericImageView, ImageError, ImageReader, RgbImage, imageops};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::monitor::{Monitor, bounding_box};

/// Errors that can occur while compositing.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Degenerate monitor geometry or an empty composite request.
    #[error("invalid geometry: {0}")]
    Geometry(String),

    /// A source image could not be read or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// A monitor in the request has no wallpaper assigned.
    #[error("monitor {0} has no wallpaper assigned")]
    IncompleteAssignment(String),

    /// Writing the composite failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Composites one wallpaper per monitor into a single spanning image.
///
/// The canvas is sized to the bounding box of all monitor rectangles and
/// filled black; each source image is cover-scaled, center-cropped to its
/// monitor, and placed at the monitor's offset translated so the canvas
/// origin is the bounding box's top-left corner. Desktop regions not covered
/// by any monitor stay black.
///
/// The whole request is validated before any image I/O, and the finished
/// canvas is renamed into place atomically.
///
/// # Arguments
///
/// * `monitors` - The monitors to composite, each with a wallpaper assigned.
/// * `output_path` - Destination for the PNG composite.
///
/// # Errors
///
/// Returns [`ComposeError::Geometry`] for an empty request or a monitor with
/// zero width or height, [`ComposeError::IncompleteAssignment`] if any monitor
/// has no wallpaper, [`ComposeError::ImageLoad`] if a source fails to decode,
/// and [`ComposeError::Io`] if the composite cannot be written.
pub fn compose(monitors: &[Monitor], output_path: &Path) -> Result<(), ComposeError> {
    let pairs = validate_request(monitors)?;

    let Some(bbox) = bounding_box(monitors) else {
        return Err(ComposeError::Geometry("empty composite request".to_string()));
    };

    tracing::info!(
        width = bbox.width,
        height = bbox.height,
        monitors = monitors.len(),
        "compositing spanning wallpaper"
    );

    let tiles: Vec<(&Monitor, RgbImage)> = pairs
        .par_iter()
        .map(|(monitor, path)| {
            let tile = load_cover(path, monitor.width, monitor.height)?;
            Ok((*monitor, tile))
        })
        .collect::<Result<_, ComposeError>>()?;

    let mut canvas = RgbImage::new(bbox.width, bbox.height);

    for (monitor, tile) in tiles {
        let x = i64::from(monitor.offset_x) - i64::from(bbox.x);
        let y = i64::from(monitor.offset_y) - i64::from(bbox.y);
        tracing::debug!(monitor = %monitor.name, x, y, "placing tile");
        imageops::replace(&mut canvas, &tile, x, y);
    }

    write_png_atomically(&canvas, output_path)
}

/// Validates a composite request before any decode work happens.
///
/// Every monitor must have non-degenerate geometry and a wallpaper assigned.
fn validate_request(monitors: &[Monitor]) -> Result<Vec<(&Monitor, &Path)>, ComposeError> {
    if monitors.is_empty() {
        return Err(ComposeError::Geometry("empty composite request".to_string()));
    }

    let mut pairs = Vec::with_capacity(monitors.len());

    for monitor in monitors {
        if monitor.width == 0 || monitor.height == 0 {
            return Err(ComposeError::Geometry(format!(
                "monitor {} has degenerate size {}x{}",
                monitor.name, monitor.width, monitor.height
            )));
        }

        let Some(wallpaper) = monitor.wallpaper.as_deref() else {
            return Err(ComposeError::IncompleteAssignment(monitor.name.clone()));
        };

        pairs.push((monitor, wallpaper));
    }

    Ok(pairs)
}

/// Loads a source image and fits it to the target rectangle with cover
/// scaling.
fn load_cover(path: &Path, target_width: u32, target_height: u32) -> Result<RgbImage, ComposeError> {
    let img = ImageReader::open(path)
        .map_err(|err| ComposeError::ImageLoad {
            path: path.to_path_buf(),
            source: ImageError::IoError(err),
        })?
        .decode()
        .map_err(|source| ComposeError::ImageLoad { path: path.to_path_buf(), source })?;

    Ok(resize_cover(&img, target_width, target_height).to_rgb8())
}

/// Resizes an image to cover the target dimensions while keeping its aspect
/// ratio, then center-crops to the exact target size.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn resize_cover(img: &DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    let (img_width, img_height) = img.dimensions();

    let scale_x = f64::from(target_width) / f64::from(img_width);
    let scale_y = f64::from(target_height) / f64::from(img_height);

    // Cover scaling: fill the whole target, cropping the overflow axis.
    let scale = scale_x.max(scale_y);

    let scaled_width = ((f64::from(img_width) * scale).ceil() as u32).max(target_width);
    let scaled_height = ((f64::from(img_height) * scale).ceil() as u32).max(target_height);

    let resized =
        img.resize_exact(scaled_width, scaled_height, image::imageops::FilterType::CatmullRom);

    let crop_x = (scaled_width - target_width) / 2;
    let crop_y = (scaled_height - target_height) / 2;

    resized.crop_imm(crop_x, crop_y, target_width, target_height)
}

/// Writes the canvas as PNG next to the destination, then renames it into
/// place. The temp file is removed automatically if anything fails.
fn write_png_atomically(canvas: &RgbImage, output_path: &Path) -> Result<(), ComposeError> {
    let directory = output_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)?;

    let tmp = NamedTempFile::new_in(directory)?;

    let mut writer = BufWriter::new(tmp.as_file());
    canvas
        .write_with_encoder(PngEncoder::new(&mut writer))
        .map_err(|err| match err {
            ImageError::IoError(io_err) => ComposeError::Io(io_err),
            other => ComposeError::Io(io::Error::other(other)),
        })?;
    writer.flush()?;
    drop(writer);

    tmp.persist(output_path).map_err(|err| ComposeError::Io(err.error))?;

    tracing::info!(path = %output_path.display(), "composite written");
    Ok(())
}
