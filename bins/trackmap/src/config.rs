//! Configuration file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use trackmap_telemetry::TelemetryConfig;
use trackmap_track::PanelOptions;

/// File names searched in the working directory, in order
const LOCAL_CANDIDATES: [&str; 2] = [".trackmap.toml", "trackmap.toml"];

/// Contents of a `trackmap.toml` file.
///
/// `[panel]` keys use the host's camelCase names (`lineColor`,
/// `windIndicatorLengthM`, ...) so a panel's saved JSON maps one to one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub panel: PanelOptions,
    pub telemetry: TelemetryConfig,
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, else the first file found in the standard
    /// locations, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let file = match &path {
            Some(p) => load_config_file(p)?,
            None => ConfigFile::default(),
        };
        file.panel
            .validate()
            .with_context(|| match &path {
                Some(p) => format!("Invalid panel options in {}", p.display()),
                None => "Invalid default panel options".to_string(),
            })?;

        Ok(Self { file, path })
    }

    /// Panel options in effect
    pub fn panel(&self) -> &PanelOptions {
        &self.file.panel
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = LOCAL_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file());

    local.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("trackmap").join("trackmap.toml"))
            .filter(|p| p.is_file())
    })
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
