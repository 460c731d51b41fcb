//! Monitor geometry model and registry.
//!
//! A [`Monitor`] describes one physical display: its resolution, its position
//! in the shared virtual-desktop coordinate space, and the source image
//! currently assigned to it. Monitors are built once per session from a
//! [`GeometrySource`] and their geometry is never mutated afterwards; only
//! the `wallpaper` assignment changes.

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

/// One physical display in the virtual desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monitor {
    /// Unique human-readable identifier, stable for the session.
    pub name: String,
    /// Resolution in virtual-desktop pixels.
    pub width: u32,
    /// Resolution in virtual-desktop pixels.
    pub height: u32,
    /// Top-left corner in the virtual desktop. May be negative.
    pub offset_x: i32,
    /// Top-left corner in the virtual desktop. May be negative.
    pub offset_y: i32,
    /// Source image assigned to this monitor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallpaper: Option<PathBuf>,
}

impl Monitor {
    /// Creates a monitor with no wallpaper assigned.
    #[must_use]
    pub const fn new(name: String, width: u32, height: u32, offset_x: i32, offset_y: i32) -> Self {
        Self { name, width, height, offset_x, offset_y, wallpaper: None }
    }

    /// Right edge of the monitor rectangle in virtual-desktop coordinates.
    #[must_use]
    pub const fn right(&self) -> i64 { self.offset_x as i64 + self.width as i64 }

    /// Bottom edge of the monitor rectangle in virtual-desktop coordinates.
    #[must_use]
    pub const fn bottom(&self) -> i64 { self.offset_y as i64 + self.height as i64 }
}

/// The minimal axis-aligned rectangle covering all monitor rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Top-left corner in virtual-desktop coordinates.
    pub x: i32,
    /// Top-left corner in virtual-desktop coordinates.
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Computes the virtual-desktop bounding box of a set of monitors.
///
/// Returns `None` for an empty set.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bounding_box(monitors: &[Monitor]) -> Option<BoundingBox> {
    let min_x = monitors.iter().map(|m| i64::from(m.offset_x)).min()?;
    let min_y = monitors.iter().map(|m| i64::from(m.offset_y)).min()?;
    let max_right = monitors.iter().map(Monitor::right).max()?;
    let max_bottom = monitors.iter().map(Monitor::bottom).max()?;

    Some(BoundingBox {
        x: min_x as i32,
        y: min_y as i32,
        width: (max_right - min_x) as u32,
        height: (max_bottom - min_y) as u32,
    })
}

/// Errors that can occur while building the monitor registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The geometry command could not be executed.
    #[error("failed to run {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: io::Error,
    },
    /// A line of geometry output could not be parsed.
    #[error("could not parse monitor geometry: {0}")]
    Parse(String),
    /// Two monitors reported the same name.
    #[error("duplicate monitor name: {0}")]
    DuplicateName(String),
    /// The geometry source reported no monitors at all.
    #[error("no monitors reported by the geometry source")]
    NoMonitors,
}

/// Source of monitor geometry.
///
/// Abstracted as an injected capability so the registry is testable with
/// synthetic geometry and never reaches into global display-server state.
pub trait GeometrySource {
    /// Yields the connected monitors in the order the source reports them.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying display query fails.
    fn monitors(&self) -> Result<Vec<Monitor>, RegistryError>;
}

/// Builds the session's ordered monitor set from a geometry source.
///
/// The order is the source's order and is deterministic for a fixed display
/// configuration. Duplicate names and an empty source are fatal configuration
/// errors.
///
/// # Errors
///
/// Returns [`RegistryError::NoMonitors`] for an empty source and
/// [`RegistryError::DuplicateName`] if two monitors share a name.
pub fn build_monitors(source: &dyn GeometrySource) -> Result<Vec<Monitor>, RegistryError> {
    let monitors = source.monitors()?;

    if monitors.is_empty() {
        return Err(RegistryError::NoMonitors);
    }

    let mut seen = HashSet::new();
    for monitor in &monitors {
        if !seen.insert(monitor.name.as_str()) {
            return Err(RegistryError::DuplicateName(monitor.name.clone()));
        }
    }

    Ok(monitors)
}

/// Geometry source backed by `xrandr --listactivemonitors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XrandrSource;

impl GeometrySource for XrandrSource {
    fn monitors(&self) -> Result<Vec<Monitor>, RegistryError> {
        let output = Command::new("xrandr").arg("--listactivemonitors").output().map_err(
            |source| RegistryError::CommandFailed {
                command: "xrandr --listactivemonitors".to_string(),
                source,
            },
        )?;

        if !output.status.success() {
            return Err(RegistryError::CommandFailed {
                command: "xrandr --listactivemonitors".to_string(),
                source: io::Error::other(format!("exited with {}", output.status)),
            });
        }

        parse_active_monitors(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses `xrandr --listactivemonitors` output.
///
/// Expected shape, one monitor per line after the count header:
///
/// ```text
/// Monitors: 2
///  0: +*eDP-1 1920/309x1080/174+0+0  eDP-1
///  1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
/// ```
pub(crate) fn parse_active_monitors(output: &str) -> Result<Vec<Monitor>, RegistryError> {
    let mut monitors = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Monitors:") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(RegistryError::Parse(line.to_string()));
        }

        let name = (*fields.last().unwrap_or(&"")).to_string();
        let (width, height, offset_x, offset_y) =
            parse_geometry(fields[2]).ok_or_else(|| RegistryError::Parse(line.to_string()))?;

        monitors.push(Monitor::new(name, width, height, offset_x, offset_y));
    }

    Ok(monitors)
}

/// Parses a geometry field of the form `W[/MMW]xH[/MMH]+X+Y`.
///
/// Negative offsets appear as `+-N`.
fn parse_geometry(geometry: &str) -> Option<(u32, u32, i32, i32)> {
    let plus = geometry.find('+')?;
    let (dimensions, offsets) = geometry.split_at(plus);

    let mut dimension_parts = dimensions.split('x');
    let width = dimension_parts.next()?.split('/').next()?.parse().ok()?;
    let height = dimension_parts.next()?.split('/').next()?.parse().ok()?;

    let mut offset_parts = offsets.split('+').filter(|part| !part.is_empty());
    let offset_x = offset_parts.next()?.parse().ok()?;
    let offset_y = offset_parts.next()?.parse().ok()?;

    Some((width, height, offset_x, offset_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Synthetic geometry source for tests.
    struct FakeSource(Vec<Monitor>);

    impl GeometrySource for FakeSource {
        fn monitors(&self) -> Result<Vec<Monitor>, RegistryError> { Ok(self.0.clone()) }
    }

    fn monitor(name: &str, width: u32, height: u32, x: i32, y: i32) -> Monitor {
        Monitor::new(name.to_string(), width, height, x, y)
    }

    #[test]
    fn test_bounding_box_single_monitor() {
        let monitors = vec![monitor("A", 1920, 1080, 0, 0)];
        let bbox = bounding_box(&monitors).unwrap();
        assert_eq!(bbox, BoundingBox { x: 0, y: 0, width: 1920, height: 1080 });
    }

    #[test]
    fn test_bounding_box_side_by_side() {
        // A is 1920x1080, B is a portrait 1080x1920 to its right.
        let monitors = vec![monitor("A", 1920, 1080, 0, 0), monitor("B", 1080, 1920, 1920, 0)];
        let bbox = bounding_box(&monitors).unwrap();
        assert_eq!(bbox, BoundingBox { x: 0, y: 0, width: 3000, height: 1920 });
    }

    #[test]
    fn test_bounding_box_negative_offsets() {
        let monitors = vec![monitor("A", 1920, 1080, -1920, 0), monitor("B", 1920, 1080, 0, 0)];
        let bbox = bounding_box(&monitors).unwrap();
        assert_eq!(bbox, BoundingBox { x: -1920, y: 0, width: 3840, height: 1080 });
    }

    #[test]
    fn test_bounding_box_matches_union_formula() {
        let monitors = vec![
            monitor("A", 2560, 1440, -2560, -200),
            monitor("B", 1920, 1080, 0, 0),
            monitor("C", 1024, 768, 1920, 400),
        ];
        let bbox = bounding_box(&monitors).unwrap();

        let min_x = monitors.iter().map(|m| i64::from(m.offset_x)).min().unwrap();
        let max_right = monitors.iter().map(Monitor::right).max().unwrap();
        assert_eq!(i64::from(bbox.width), max_right - min_x);

        let min_y = monitors.iter().map(|m| i64::from(m.offset_y)).min().unwrap();
        let max_bottom = monitors.iter().map(Monitor::bottom).max().unwrap();
        assert_eq!(i64::from(bbox.height), max_bottom - min_y);
    }

    #[test]
    fn test_bounding_box_empty_is_none() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_build_monitors_preserves_source_order() {
        let source =
            FakeSource(vec![monitor("HDMI-1", 1920, 1080, 1920, 0), monitor("eDP-1", 1920, 1080, 0, 0)]);
        let monitors = build_monitors(&source).unwrap();
        assert_eq!(monitors[0].name, "HDMI-1");
        assert_eq!(monitors[1].name, "eDP-1");
        assert!(monitors.iter().all(|m| m.wallpaper.is_none()));
    }

    #[test]
    fn test_build_monitors_rejects_duplicate_names() {
        let source =
            FakeSource(vec![monitor("eDP-1", 1920, 1080, 0, 0), monitor("eDP-1", 1920, 1080, 1920, 0)]);
        let err = build_monitors(&source).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "eDP-1"));
    }

    #[test]
    fn test_build_monitors_rejects_empty_source() {
        let err = build_monitors(&FakeSource(Vec::new())).unwrap_err();
        assert!(matches!(err, RegistryError::NoMonitors));
    }

    #[test]
    fn test_parse_active_monitors() {
        let output = "Monitors: 2\n 0: +*eDP-1 1920/309x1080/174+0+0  eDP-1\n 1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1\n";
        let monitors = parse_active_monitors(output).unwrap();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[0].name, "eDP-1");
        assert_eq!(monitors[0].width, 1920);
        assert_eq!(monitors[0].height, 1080);
        assert_eq!(monitors[0].offset_x, 0);
        assert_eq!(monitors[1].name, "HDMI-1");
        assert_eq!(monitors[1].width, 2560);
        assert_eq!(monitors[1].offset_x, 1920);
        assert_eq!(monitors[1].offset_y, 0);
    }

    #[test]
    fn test_parse_active_monitors_negative_offset() {
        let output = "Monitors: 2\n 0: +*DP-1 2560/597x1440/336+0+0  DP-1\n 1: +HDMI-1 1920/510x1080/290+-1920+0  HDMI-1\n";
        let monitors = parse_active_monitors(output).unwrap();
        assert_eq!(monitors[1].offset_x, -1920);
        assert_eq!(monitors[1].offset_y, 0);
    }

    #[test]
    fn test_parse_active_monitors_without_physical_size() {
        let output = "Monitors: 1\n 0: +*VIRTUAL-1 1280x800+0+0  VIRTUAL-1\n";
        let monitors = parse_active_monitors(output).unwrap();
        assert_eq!(monitors[0].width, 1280);
        assert_eq!(monitors[0].height, 800);
    }

    #[test]
    fn test_parse_active_monitors_rejects_garbage() {
        let output = "Monitors: 1\n 0: not-a-geometry\n";
        assert!(matches!(parse_active_monitors(output), Err(RegistryError::Parse(_))));
    }

    #[test]
    fn test_monitor_edges() {
        let m = monitor("A", 1920, 1080, -1920, -100);
        assert_eq!(m.right(), 0);
        assert_eq!(m.bottom(), 980);
    }
}
