//! Application configuration for the imsakia converter.
//!
//! User config lives at `~/.imsakia/imsakia.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ImsakiaError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "imsakia.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".imsakia";

// ---------------------------------------------------------------------------
// Config structs (matching imsakia.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Conversion settings.
    #[serde(default)]
    pub convert: ConvertSection,
}

/// `[convert]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertSection {
    /// Spreadsheet to read.
    #[serde(default = "default_source_path")]
    pub source_path: String,

    /// JSON file to write. Its directory must already exist.
    #[serde(default = "default_dest_path")]
    pub dest_path: String,

    /// Rewrite times to 24-hour `HH:MM` and dates to ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub normalize: bool,
}

impl Default for ConvertSection {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            dest_path: default_dest_path(),
            normalize: false,
        }
    }
}

fn default_source_path() -> String {
    "imsakia.xlsx".into()
}
fn default_dest_path() -> String {
    "data/imsakia.json".into()
}

// ---------------------------------------------------------------------------
// Convert config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime conversion configuration, merged from config file + CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Spreadsheet to read.
    pub source_path: PathBuf,
    /// JSON file to write.
    pub dest_path: PathBuf,
    /// Whether to normalize time and date text.
    pub normalize: bool,
}

impl ConvertConfig {
    /// Config with explicit paths and normalization off.
    pub fn new(source_path: impl Into<PathBuf>, dest_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            dest_path: dest_path.into(),
            normalize: false,
        }
    }
}

impl From<&AppConfig> for ConvertConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_path: PathBuf::from(&config.convert.source_path),
            dest_path: PathBuf::from(&config.convert.dest_path),
            normalize: config.convert.normalize,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.imsakia/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ImsakiaError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.imsakia/imsakia.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ImsakiaError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ImsakiaError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ImsakiaError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ImsakiaError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ImsakiaError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
