//! Application configuration for handbookgen.
//!
//! User config lives at `~/.handbookgen/handbookgen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HandbookError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "handbookgen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".handbookgen";

// ---------------------------------------------------------------------------
// Config structs (matching handbookgen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory of Markdown sources to scan.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Destination directory the handbook is assembled into.
    #[serde(default = "default_handbook_dir")]
    pub handbook_dir: String,

    /// Prefix prepended to every reference path emitted in the summary.
    #[serde(default = "default_summary_prefix")]
    pub summary_prefix: String,

    /// Display title for the reference section of the summary.
    #[serde(default = "default_reference_title")]
    pub reference_title: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            handbook_dir: default_handbook_dir(),
            summary_prefix: default_summary_prefix(),
            reference_title: default_reference_title(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".into()
}
fn default_handbook_dir() -> String {
    "handbook".into()
}
fn default_summary_prefix() -> String {
    "reference".into()
}
fn default_reference_title() -> String {
    "API Reference".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config directory (`~/.handbookgen/`).
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or_else(|| HandbookError::config("could not determine home directory"))
}

/// Path of the config file (`~/.handbookgen/handbookgen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the user config, falling back to defaults when no file exists.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.is_file() {
        load_config_from(&path)
    } else {
        tracing::debug!(?path, "no config file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load config from an explicit file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| HandbookError::io(path, e))?;
    toml::from_str(&raw)
        .map_err(|e| HandbookError::config(format!("invalid config {}: {e}", path.display())))
}

/// Write a default config file under the config directory, creating it if
/// needed, and return the file path.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| HandbookError::io(&dir, e))?;

    let rendered = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| HandbookError::config(e.to_string()))?;
    let path = dir.join(CONFIG_FILE_NAME);
    std::fs::write(&path, rendered).map_err(|e| HandbookError::io(&path, e))?;

    tracing::info!(?path, "wrote default config");
    Ok(path)
}
