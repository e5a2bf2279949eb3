//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/qrange/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for generation
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Rejection sampler settings
    #[serde(default)]
    pub sampler: SamplerConfig,

    /// Artifact output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Inclusive minimum
    #[serde(default = "default_min")]
    pub min: i64,

    /// Inclusive maximum
    #[serde(default = "default_max")]
    pub max: i64,

    /// Qubits in the rendered circuit diagram
    #[serde(default = "default_qubits")]
    pub qubits: usize,

    /// Benchmark sample count
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Bit source backend
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Rejection sampler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Give up after this many draws per value (0 = never)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,
}

/// Artifact output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for circuit diagrams and histograms
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// ANU QRNG API key
    #[serde(default)]
    pub anu: String,
}

// Default value functions for serde
fn default_min() -> i64 {
    DEFAULT_MIN
}
fn default_max() -> i64 {
    DEFAULT_MAX
}
fn default_qubits() -> usize {
    DEFAULT_QUBITS
}
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_max_attempts() -> u64 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_image_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            qubits: default_qubits(),
            iterations: default_iterations(),
            backend: default_backend(),
            format: default_format(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
        }
    }
}

/// Parse a config value, naming the key on failure
fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "min"] => Some(self.defaults.min.to_string()),
            ["defaults", "max"] => Some(self.defaults.max.to_string()),
            ["defaults", "qubits"] => Some(self.defaults.qubits.to_string()),
            ["defaults", "iterations"] => Some(self.defaults.iterations.to_string()),
            ["defaults", "backend"] => Some(self.defaults.backend.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["sampler", "max_attempts"] => Some(self.sampler.max_attempts.to_string()),

            ["output", "image_dir"] => Some(self.output.image_dir.display().to_string()),

            ["api_keys", "anu"] => Some(self.api_keys.anu.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "min"] => self.defaults.min = parse_value(key, value)?,
            ["defaults", "max"] => self.defaults.max = parse_value(key, value)?,
            ["defaults", "qubits"] => self.defaults.qubits = parse_value(key, value)?,
            ["defaults", "iterations"] => self.defaults.iterations = parse_value(key, value)?,
            ["defaults", "backend"] => self.defaults.backend = value.to_string(),
            ["defaults", "format"] => self.defaults.format = value.to_string(),

            ["sampler", "max_attempts"] => {
                self.sampler.max_attempts = parse_value(key, value)?;
            }

            ["output", "image_dir"] => self.output.image_dir = PathBuf::from(value),

            ["api_keys", "anu"] => self.api_keys.anu = value.to_string(),

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.min",
            "defaults.max",
            "defaults.qubits",
            "defaults.iterations",
            "defaults.backend",
            "defaults.format",
            "sampler.max_attempts",
            "output.image_dir",
            "api_keys.anu",
        ]
    }

    /// ANU API key, if one is configured
    pub fn anu_api_key(&self) -> Option<&str> {
        Some(self.api_keys.anu.as_str()).filter(|key| !key.is_empty())
    }
}
