use std::path::{Path, PathBuf};

use schemasync_common::{Error, Result};
use tracing::{debug, info};

use crate::model::AppConfig;

/// Locates and parses the schemasync config file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.config/schemasync/config.yml` (platform config dir).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("schemasync").join("config.yml"))
    }

    /// Load the config. An explicit path must exist; the default path is
    /// optional and falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_file(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<AppConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let config = Self::parse(path, &contents)?;
        info!("config loaded from {}", path.display());
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<AppConfig> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yml" | "yaml" => serde_yaml::from_str(contents)
                .map_err(|e| Error::Config(format!("YAML parse error: {e}"))),
            "toml" => {
                toml::from_str(contents).map_err(|e| Error::Config(format!("TOML parse error: {e}")))
            }
            other => Err(Error::Config(format!(
                "unsupported config extension: {other}"
            ))),
        }
    }
}
