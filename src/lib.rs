//! Spanpaper - per-monitor wallpapers composited into one spanning background.
//!
//! This library provides the monitor-geometry model and the compositing
//! engine behind the `spanpaper` binary. The pipeline:
//!
//! 1. [`monitor`] enumerates the connected displays and their layout in the
//!    shared virtual-desktop coordinate space.
//! 2. The caller assigns one source image per monitor.
//! 3. [`compositor`] draws every image, cover-scaled and center-cropped, onto
//!    a single canvas sized to the virtual-desktop bounding box.
//! 4. [`naming`] derives a deterministic file name from the assignment so
//!    identical assignments reuse a previously composited file.
//! 5. [`setter`] installs the finished composite as the desktop background.

pub mod cache;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod monitor;
pub mod naming;
pub mod setter;
pub mod wallpapers;
