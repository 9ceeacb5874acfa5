//! Configuration loading and resolution
//!
//! Every setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! The resolved [`Config`] is built once at startup and handed to the
//! service explicitly; nothing reads process-wide state after that.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment variable naming the serialized classifier artifact
pub const ENV_MODEL_PATH: &str = "MODEL_PATH";
/// Environment variable naming the serialized vectorizer artifact
pub const ENV_VECTORIZER_PATH: &str = "VECTORIZER_PATH";
/// Environment variable holding the flash-cookie signing key
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
/// Environment variable for the HTTP listen address
pub const ENV_BIND_ADDR: &str = "JOBSCREEN_BIND";
/// Environment variable for the URL fetch timeout in seconds
pub const ENV_FETCH_TIMEOUT: &str = "JOBSCREEN_FETCH_TIMEOUT";
/// Environment variable pointing at an explicit TOML config file
pub const ENV_CONFIG_FILE: &str = "JOBSCREEN_CONFIG";

/// Compiled fallback values used when no other source provides a setting
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub secret_key: String,
    pub bind_addr: String,
    pub fetch_timeout_secs: u64,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/model.json"),
            vectorizer_path: PathBuf::from("model/vectorizer.json"),
            secret_key: "dev-secret".to_string(),
            bind_addr: "0.0.0.0:5002".to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

/// Settings that may appear in the TOML config file
///
/// All fields are optional; anything omitted falls through to the
/// compiled default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub model_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
    pub secret_key: Option<String>,
    pub bind_addr: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Load a TOML config file
    ///
    /// A missing file is not an error: it yields an empty config and a
    /// warning. A file that exists but does not parse is a configuration
    /// error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        info!("Loaded config file {}", path.display());
        Ok(config)
    }
}

/// Highest-priority values, typically parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
    pub secret_key: Option<String>,
    pub bind_addr: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
    /// Explicit TOML file; replaces the platform default location
    pub config_file: Option<PathBuf>,
}

/// Filesystem locations of the two model artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

/// Resolved process configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub secret_key: String,
    pub bind_addr: String,
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Resolve configuration from overrides, environment, TOML and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let toml_path = overrides
            .config_file
            .clone()
            .or_else(|| env_var(ENV_CONFIG_FILE).map(PathBuf::from))
            .or_else(default_config_path);

        let toml_config = match toml_path {
            Some(path) => TomlConfig::load(&path)?,
            None => {
                debug!("No config directory available on this platform");
                TomlConfig::default()
            }
        };

        Self::resolve_with(overrides, toml_config, CompiledDefaults::default())
    }

    /// Resolve against an already-loaded TOML config
    pub fn resolve_with(
        overrides: ConfigOverrides,
        toml_config: TomlConfig,
        defaults: CompiledDefaults,
    ) -> Result<Self> {
        let env_timeout = match env_var(ENV_FETCH_TIMEOUT) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{} must be a whole number of seconds: {}", ENV_FETCH_TIMEOUT, e))
            })?),
            None => None,
        };

        let config = Config {
            model_path: overrides
                .model_path
                .or_else(|| env_var(ENV_MODEL_PATH).map(PathBuf::from))
                .or(toml_config.model_path)
                .unwrap_or(defaults.model_path),
            vectorizer_path: overrides
                .vectorizer_path
                .or_else(|| env_var(ENV_VECTORIZER_PATH).map(PathBuf::from))
                .or(toml_config.vectorizer_path)
                .unwrap_or(defaults.vectorizer_path),
            secret_key: overrides
                .secret_key
                .or_else(|| env_var(ENV_SECRET_KEY))
                .or(toml_config.secret_key)
                .unwrap_or(defaults.secret_key),
            bind_addr: overrides
                .bind_addr
                .or_else(|| env_var(ENV_BIND_ADDR))
                .or(toml_config.bind_addr)
                .unwrap_or(defaults.bind_addr),
            fetch_timeout_secs: overrides
                .fetch_timeout_secs
                .or(env_timeout)
                .or(toml_config.fetch_timeout_secs)
                .unwrap_or(defaults.fetch_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(Error::Config("secret key must not be empty".to_string()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config("fetch timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    /// Paths of the classifier and vectorizer artifacts
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            vectorizer: self.vectorizer_path.clone(),
        }
    }

    /// Timeout applied to outbound job-posting fetches
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// True when the signing key is still the compiled development value
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == CompiledDefaults::default().secret_key
    }
}

/// Platform config file location (`~/.config/jobscreen/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jobscreen").join("config.toml"))
}

/// Non-empty environment variable value
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
