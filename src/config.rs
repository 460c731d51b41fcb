//! Configuration loading.
//!
//! The configuration file lives at `~/.config/spanpaper/config.jsonc` and
//! supports JSONC format (JSON with comments). Both single-line (`//`) and
//! multi-line (`/* */`) comments are allowed. A template file is created on
//! first run when none exists.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// Template written to the default location on first run.
const CONFIG_TEMPLATE: &str = r#"{
  // Directories scanned for wallpaper images. Tilde expansion is supported.
  "wallpaper_dirs": ["~/Pictures"]
}
"#;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file found at the expected location.
    #[error("no configuration file found")]
    NotFound,
    /// The file exists but could not be read.
    #[error("failed to read configuration: {0}")]
    Read(String),
    /// The file content is not valid JSONC.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpanpaperConfig {
    /// Directories scanned for wallpaper images.
    pub wallpaper_dirs: Vec<String>,
}

impl Default for SpanpaperConfig {
    fn default() -> Self {
        Self { wallpaper_dirs: vec!["~/Pictures".to_string()] }
    }
}

impl SpanpaperConfig {
    /// Returns the configured wallpaper directories with tilde expansion
    /// applied.
    #[must_use]
    pub fn wallpaper_dirs(&self) -> Vec<PathBuf> {
        self.wallpaper_dirs
            .iter()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()))
            .collect()
    }
}

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<SpanpaperConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via the CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default
/// location.
///
/// Must be called before [`get_config`] to take effect.
///
/// # Returns
///
/// `true` if the path was set, `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the default configuration file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("spanpaper").join("config.jsonc"))
}

/// Parses JSONC configuration content.
fn parse_config(content: &str) -> Result<SpanpaperConfig, ConfigError> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    serde_json::from_reader(stripped).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Loads the configuration from the given path.
fn load_config_from_path(path: &PathBuf) -> Result<SpanpaperConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read(err.to_string()))?;
    parse_config(&content)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// If no configuration file exists at the default location, a template is
/// created there for the next run.
fn load_or_default() -> SpanpaperConfig {
    let path = CUSTOM_CONFIG_PATH.get().cloned().or_else(default_config_path);

    let Some(path) = path else {
        return SpanpaperConfig::default();
    };

    match load_config_from_path(&path) {
        Ok(config) => {
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            create_default_config_file();
            SpanpaperConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            SpanpaperConfig::default()
        }
    }
}

/// Creates a template configuration file at the default location.
fn create_default_config_file() {
    let Some(path) = default_config_path() else {
        tracing::debug!("no config path available for creating template");
        return;
    };

    if path.exists() {
        return;
    }

    let result = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(&path, CONFIG_TEMPLATE));

    match result {
        Ok(()) => {
            let _ = CONFIG_PATH.set(path.clone());
            tracing::info!(path = %path.display(), "created default configuration file");
        }
        Err(err) => {
            tracing::debug!(
                error = %err,
                path = %path.display(),
                "failed to create default configuration file"
            );
        }
    }
}

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static SpanpaperConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }
