//! Configuration loading and precedence for Super Agent.
//!
//! Settings are resolved once, lowest to highest precedence:
//!
//! 1. built-in defaults (`max_steps = 8`, `mode_default = "direct"`)
//! 2. `~/.super-agent/config.toml`, if present
//! 3. environment (`SUPER_AGENT_MAX_STEPS`, `SUPER_AGENT_MODE_DEFAULT`)
//! 4. runtime overrides supplied by the caller
//!
//! Every layer above the defaults is a [`ConfigOverrides`] whose fields are
//! `Option`s: a field that is `Some` wins, a field that is `None` leaves the
//! lower layer alone. Setting a field explicitly to its default value is
//! therefore still an override. [`ConfigOverrides::non_default`] reproduces
//! the older rule where a fully populated config only overrides the fields
//! that differ from the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable for the step budget.
pub const ENV_MAX_STEPS: &str = "SUPER_AGENT_MAX_STEPS";
/// Environment variable for the fallback mode.
pub const ENV_MODE_DEFAULT: &str = "SUPER_AGENT_MODE_DEFAULT";

/// The resolved orchestrator configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Hard upper bound on loop iterations per run
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Mode used when the router returns an empty one
    #[serde(default = "default_mode")]
    pub mode_default: String,
}

fn default_max_steps() -> usize {
    8
}
fn default_mode() -> String {
    "direct".into()
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            mode_default: default_mode(),
        }
    }
}

/// One configuration layer. `None` means "not set by this layer".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_default: Option<String>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_mode_default(mut self, mode: impl Into<String>) -> Self {
        self.mode_default = Some(mode.into());
        self
    }

    /// True when this layer sets nothing.
    pub fn is_empty(&self) -> bool {
        self.max_steps.is_none() && self.mode_default.is_none()
    }

    /// Read the environment layer from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the environment layer through an arbitrary lookup.
    ///
    /// Empty values count as unset. A `SUPER_AGENT_MAX_STEPS` that is not a
    /// non-negative integer is an error rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_steps = match read(ENV_MAX_STEPS) {
            Some(raw) => Some(raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnv {
                var: ENV_MAX_STEPS.into(),
                value: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            max_steps,
            mode_default: read(ENV_MODE_DEFAULT),
        })
    }

    /// Read a TOML file layer. A missing file is an empty layer.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, skipping file layer", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Overrides holding only the fields of `config` that differ from the defaults.
    pub fn non_default(config: &OrchestratorConfig) -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            max_steps: (config.max_steps != defaults.max_steps).then_some(config.max_steps),
            mode_default: (config.mode_default != defaults.mode_default)
                .then(|| config.mode_default.clone()),
        }
    }
}

impl OrchestratorConfig {
    /// Resolve defaults plus `layers`, later layers winning.
    pub fn resolve<I>(layers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ConfigOverrides>,
    {
        let mut config = Self::default();
        for layer in layers {
            config.apply(layer);
        }
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve([ConfigOverrides::from_env()?])
    }

    /// Full resolution from the default file path: defaults < file < env < runtime.
    pub fn load(runtime: Option<ConfigOverrides>) -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path(), runtime)
    }

    /// Full resolution with an explicit config file path.
    pub fn load_from(path: &Path, runtime: Option<ConfigOverrides>) -> Result<Self, ConfigError> {
        let file = ConfigOverrides::load_file(path)?;
        let env = ConfigOverrides::from_env()?;
        Self::resolve([file, env, runtime.unwrap_or_default()])
    }

    fn apply(&mut self, layer: ConfigOverrides) {
        if let Some(max_steps) = layer.max_steps {
            self.max_steps = max_steps;
        }
        if let Some(mode) = layer.mode_default {
            self.mode_default = mode;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "max_steps must be at least 1".into(),
            ));
        }

        if self.mode_default.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mode_default must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".super-agent")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Generate a default config TOML string (for `config --default-toml`).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
