//! Composite-and-set command.
//!
//! Resolves the wallpaper assignment (explicit pairs, positional paths, or
//! random picks), composites the spanning image, and installs it as the
//! desktop background. A previously composited file with the same assignment
//! is reused unless `--force` is given.

use std::path::PathBuf;

use clap::Args;
use rand::Rng;

use crate::compositor::{ComposeError, compose};
use crate::error::SpanpaperError;
use crate::monitor::{Monitor, XrandrSource, build_monitors};
use crate::{cache, config, naming, setter, wallpapers};

/// Arguments for the apply command.
#[derive(Args, Debug)]
#[command(after_long_help = r"Examples:
  spanpaper apply eDP-1=~/walls/a.png HDMI-1=~/walls/b.png  # By monitor name
  spanpaper apply ~/walls/a.png ~/walls/b.png               # In monitor order
  spanpaper apply --random                                  # Random picks
  spanpaper apply --random --no-set                         # Composite only")]
pub struct ApplyArgs {
    /// Wallpaper assignments: NAME=PATH pairs, or bare paths in monitor
    /// order.
    #[arg(value_name = "ASSIGNMENT")]
    pub assignments: Vec<String>,

    /// Assign a random image from the configured wallpaper directories to
    /// every monitor.
    #[arg(long, short)]
    pub random: bool,

    /// Write the composite to this path instead of the cache directory.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Composite without setting the desktop background.
    #[arg(long)]
    pub no_set: bool,

    /// Recomposite even if a cached composite exists.
    #[arg(long, short)]
    pub force: bool,
}

/// Execute the apply command.
pub fn execute(args: &ApplyArgs) -> Result<(), SpanpaperError> {
    let mut monitors = build_monitors(&XrandrSource)?;

    if args.random {
        if !args.assignments.is_empty() {
            return Err(SpanpaperError::InvalidArguments(
                "cannot combine --random with explicit assignments".to_string(),
            ));
        }
        assign_random(&mut monitors)?;
    } else {
        if args.assignments.is_empty() {
            return Err(SpanpaperError::InvalidArguments(
                "provide NAME=PATH assignments, bare paths in monitor order, or --random"
                    .to_string(),
            ));
        }
        assign_explicit(&mut monitors, &args.assignments)?;
    }

    if let Some(unassigned) = monitors.iter().find(|m| m.wallpaper.is_none()) {
        return Err(ComposeError::IncompleteAssignment(unassigned.name.clone()).into());
    }

    let sources: Vec<PathBuf> = monitors.iter().filter_map(|m| m.wallpaper.clone()).collect();

    let output = match &args.output {
        Some(path) => path.clone(),
        None => naming::composite_path(&cache::ensure_composites_dir()?, &sources),
    };

    if args.output.is_none() && !args.force && output.exists() {
        tracing::info!(path = %output.display(), "reusing cached composite");
    } else {
        compose(&monitors, &output)?;
    }

    if args.no_set {
        println!("{}", output.display());
        return Ok(());
    }

    setter::set_background(&output)?;
    println!("Wallpaper set: {}", output.display());

    Ok(())
}

/// Applies explicit assignments to the monitor set.
///
/// All assignments must be either `NAME=PATH` pairs or bare paths; a bare
/// path list must name one path per monitor, in monitor order.
fn assign_explicit(monitors: &mut [Monitor], assignments: &[String]) -> Result<(), SpanpaperError> {
    let named = assignments.iter().filter(|a| a.contains('=')).count();

    if named == assignments.len() {
        for assignment in assignments {
            let Some((name, path)) = assignment.split_once('=') else {
                return Err(SpanpaperError::InvalidArguments(format!(
                    "invalid assignment: {assignment}"
                )));
            };

            let Some(monitor) = monitors.iter_mut().find(|m| m.name == name) else {
                return Err(SpanpaperError::InvalidArguments(format!(
                    "unknown monitor: {name}"
                )));
            };

            if monitor.wallpaper.is_some() {
                return Err(SpanpaperError::InvalidArguments(format!(
                    "monitor {name} assigned more than once"
                )));
            }

            monitor.wallpaper = Some(expand(path));
        }

        return Ok(());
    }

    if named > 0 {
        return Err(SpanpaperError::InvalidArguments(
            "cannot mix NAME=PATH assignments with bare paths".to_string(),
        ));
    }

    if assignments.len() != monitors.len() {
        return Err(SpanpaperError::InvalidArguments(format!(
            "expected {} paths for {} monitors, got {}",
            monitors.len(),
            monitors.len(),
            assignments.len()
        )));
    }

    for (monitor, path) in monitors.iter_mut().zip(assignments) {
        monitor.wallpaper = Some(expand(path));
    }

    Ok(())
}

/// Assigns a random image from the configured directories to every monitor.
fn assign_random(monitors: &mut [Monitor]) -> Result<(), SpanpaperError> {
    let candidates = wallpapers::list_wallpapers(&config::get_config().wallpaper_dirs());

    if candidates.is_empty() {
        return Err(SpanpaperError::NoWallpapers);
    }

    let mut rng = rand::rng();
    for monitor in monitors.iter_mut() {
        let pick = rng.random_range(0..candidates.len());
        monitor.wallpaper = Some(candidates[pick].clone());
    }

    Ok(())
}

fn expand(path: &str) -> PathBuf { PathBuf::from(shellexpand::tilde(path).into_owned()) }
