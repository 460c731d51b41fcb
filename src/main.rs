//! Spanpaper - multi-monitor wallpaper compositor.
//!
//! Enumerates the connected monitors, composites one source image per monitor
//! onto a single canvas spanning the whole virtual desktop, and installs the
//! result as the desktop background.

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = spanpaper::cli::run() {
        eprintln!("spanpaper: {err}");
        std::process::exit(1);
    }
}
