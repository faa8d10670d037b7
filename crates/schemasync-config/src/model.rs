use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `config.yml` / `config.toml`.
///
/// Every field has a default so an absent or partial file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tool: ToolConfig,
    /// Directory for generated migration files when `--output` is not given.
    pub output_dir: Option<PathBuf>,
}

/// The external schema-diff program and how to install it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub program: String,
    pub install: InstallConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "migra".to_string(),
            install: InstallConfig::default(),
        }
    }
}

/// Command run when the diff tool is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        Self {
            program: python.to_string(),
            args: ["-m", "pip", "install", "migra[pg]"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
