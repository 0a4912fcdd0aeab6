use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PipectlError, Result};

const CANDIDATES: [&str; 4] = ["pipectl.toml", "pipectl.json", "pipectl.yaml", "pipectl.yml"];

/// Configuration file structure for pipectl.
///
/// Holds the same settings as the global command-line flags. Values given on
/// the command line (or through their environment variables) take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Control plane address
    pub server: Option<String>,

    /// Control plane access token
    pub token: Option<String>,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub skip_verify: bool,

    /// SOCKS proxy address
    pub socks_proxy: Option<String>,

    /// Disable all proxies
    #[serde(default)]
    pub socks_proxy_off: bool,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./pipectl.toml
    /// 3. ./pipectl.json
    /// 4. ./pipectl.yaml
    /// 5. ./pipectl.yml
    /// 6. `<config dir>/pipectl/config.toml`
    ///
    /// Returns default configuration if no file is found. A specified path
    /// that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        if let Some(config) = Self::load_from_dir(Path::new("."))? {
            return Ok(config);
        }

        if let Some(path) = user_config_path().filter(|p| p.exists()) {
            return Self::load_from_path(&path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        for candidate in &CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                return Self::load_from_path(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading config from: {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipectlError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let parsed: std::result::Result<Self, String> = match extension {
            "toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .map_err(|e| e.to_string()),
        };

        parsed.map_err(|e| {
            PipectlError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pipectl").join("config.toml"))
}
