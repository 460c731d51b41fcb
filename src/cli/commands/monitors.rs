//! Monitor enumeration command.

use colored::Colorize;

use crate::error::SpanpaperError;
use crate::monitor::{XrandrSource, build_monitors};

/// Execute the monitors command.
pub fn execute(json: bool) -> Result<(), SpanpaperError> {
    let monitors = build_monitors(&XrandrSource)?;

    if json {
        let output = serde_json::to_string_pretty(&monitors)
            .map_err(|err| SpanpaperError::Io(std::io::Error::other(err)))?;
        println!("{output}");
        return Ok(());
    }

    for monitor in &monitors {
        println!(
            "{} {}x{}+{}+{}",
            monitor.name.bold(),
            monitor.width,
            monitor.height,
            monitor.offset_x,
            monitor.offset_y
        );
    }

    Ok(())
}
