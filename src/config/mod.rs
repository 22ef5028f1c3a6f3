//! Configuration file management
//!
//! Loads TOML configuration files and provides font directory settings.
//! Default config path: ~/.config/oled-fonts/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR, DEFAULT_FONT_EXTENSION, FONT_SUBDIR};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font directory settings
    pub fonts: FontsConfig,
}

/// Font directory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Font directory (uses ~/.local/share/oled-fonts/fonts if empty)
    pub dir: String,
    /// Marker identifying font files, also used as the file extension
    pub extension: String,
    /// How badly named files are treated: "lenient" (skip) or "strict" (fail)
    pub scan_mode: ScanMode,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            extension: DEFAULT_FONT_EXTENSION.to_string(),
            scan_mode: ScanMode::default(),
        }
    }
}

impl FontsConfig {
    /// Resolved font directory
    pub fn font_dir(&self) -> PathBuf {
        if !self.dir.is_empty() {
            return expand_home(&self.dir);
        }
        default_font_dir()
    }
}

/// Handling of font files without a `<number>_` prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Skip the file and log a warning
    #[default]
    Lenient,
    /// Abort the directory scan
    Strict,
}

impl Config {
    /// Load config file (returns default if not found)
    pub fn load() -> Self {
        if let Some(path) = default_config_path() {
            if !path.exists() {
                info!("No config file at {}, using defaults", path.display());
                return Self::default();
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write a commented config template to the default config path
    pub fn write_default_config() -> Result<PathBuf> {
        let config_path =
            default_config_path().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let body = toml::to_string_pretty(&Self::default())?;
        let template = format!(
            r#"# oled-fonts configuration
#
# [fonts]
# dir = ""              # Font directory (empty = {})
# extension = ".bin"    # Files must contain this to be indexed
# scan_mode = "lenient" # "lenient" skips badly named files, "strict" fails

{}"#,
            default_font_dir().display(),
            body
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default font directory: `<data dir>/oled-fonts/fonts`, or `./fonts`
pub fn default_font_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join(FONT_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(FONT_SUBDIR))
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
