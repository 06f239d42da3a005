use crate::error::{Result, TallyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// Which persistence backend holds the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Dedicated `daily-stats.json`.
    #[default]
    File,
    /// `counts` key inside a shared `data.json`.
    Settings,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Settings => write!(f, "settings"),
        }
    }
}

impl FromStr for Backend {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "settings" => Ok(Backend::Settings),
            other => Err(TallyError::Config(format!(
                "Unknown backend '{}' (expected 'file' or 'settings')",
                other
            ))),
        }
    }
}

/// Configuration for wordtally, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyConfig {
    /// Persistence backend for the history
    #[serde(default)]
    pub backend: Backend,

    /// File extensions the watcher observes (e.g. ".md", ".txt")
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec![".md".to_string(), ".txt".to_string(), ".markdown".to_string()]
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            extensions: default_extensions(),
        }
    }
}

impl TallyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TallyConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "backend" => Some(self.backend.to_string()),
            "extensions" => Some(self.extensions.join(",")),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "backend" => {
                self.backend = value.parse().map_err(|e: TallyError| e.to_string())?;
                Ok(())
            }
            "extensions" => {
                self.set_extensions(value);
                if self.extensions.is_empty() {
                    return Err("At least one extension is required".to_string());
                }
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Set the extensions from a comma separated list (normalizes to start with a dot)
    pub fn set_extensions(&mut self, list: &str) {
        self.extensions = list
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty() && *ext != ".")
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();
    }

    pub fn keys() -> &'static [&'static str] {
        &["backend", "extensions"]
    }
}
