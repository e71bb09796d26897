//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use canvass_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// ```toml
/// [settings]
/// color = true
/// format = "table"
/// preset = "lenient"
///
/// [engine]
/// minimum_beachhead_interviews = 3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Engine thresholds, applied over the preset
    #[serde(default)]
    pub engine: Option<toml::Table>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Threshold preset the `[engine]` table starts from
    #[serde(default)]
    pub preset: Preset,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Named engine threshold presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Standard thresholds
    #[default]
    Default,
    /// Fewer interviews, lower bars
    Lenient,
    /// More interviews, higher bars
    Strict,
}

impl Preset {
    fn engine_config(self) -> EngineConfig {
        match self {
            Preset::Default => EngineConfig::default(),
            Preset::Lenient => EngineConfig::lenient(),
            Preset::Strict => EngineConfig::strict(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".canvass").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional and falls
    /// back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Engine configuration: the preset, overridden field by field by `[engine]`.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let base = self.settings.preset.engine_config();
        let Some(overrides) = &self.engine else {
            return Ok(base);
        };

        let encoded = toml::Value::try_from(&base)
            .map_err(|e| CliError::Config(format!("Failed to encode preset: {}", e)))?;
        let toml::Value::Table(mut merged) = encoded else {
            return Err(CliError::Config("Preset did not encode as a table".into()));
        };
        for (key, value) in overrides {
            if !merged.contains_key(key) {
                return Err(CliError::Config(format!("Unknown engine setting '{}'", key)));
            }
            merged.insert(key.clone(), value.clone());
        }

        let config: EngineConfig = toml::Value::Table(merged).try_into()?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            preset: Preset::Default,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
