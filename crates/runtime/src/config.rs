//! Runtime configuration and loaders.
//!
//! [`RuntimeConfig`] wraps the engine's [`SimConfig`] with the knobs only the
//! tick driver needs. It can be built from defaults, read from a TOML file via
//! [`ConfigLoader`], and overridden from the process environment.
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sim_core::{ErrorSeverity, SimConfig, SimError};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub sim: SimConfig,
    /// Fixed RNG seed. `None` draws a fresh seed per simulation.
    pub rng_seed: Option<u64>,
    /// Upper bound on a single frame's wall delta, in seconds.
    pub max_frame_seconds: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            rng_seed: None,
            max_frame_seconds: SimConfig::MAX_FRAME_SECONDS,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_RNG_SEED` - Fixed RNG seed (default: random)
    /// - `SIM_AUDIO_ENABLED` - Enable scripted sound verbs (default: true)
    /// - `SIM_MAX_FRAME_SECONDS` - Frame delta clamp in seconds (default: 0.2)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = read_env::<u64>("SIM_RNG_SEED") {
            self.rng_seed = Some(seed);
        }
        if let Some(enabled) = read_env_bool("SIM_AUDIO_ENABLED") {
            self.sim.audio_enabled = enabled;
        }
        if let Some(seconds) = read_env::<f64>("SIM_MAX_FRAME_SECONDS") {
            if seconds.is_finite() && seconds > 0.0 {
                self.max_frame_seconds = seconds;
            }
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

// ============================================================================
// File loading
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML")]
    Parse(#[from] toml::de::Error),
}

impl SimError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Read { .. } => ErrorSeverity::Recoverable,
            Self::Parse(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ",
            Self::Parse(_) => "CONFIG_PARSE",
        }
    }
}

/// Loader for runtime configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`RuntimeConfig`] from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<RuntimeConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<RuntimeConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Color, ScoreBucket};

    #[test]
    fn empty_document_yields_defaults() {
        let config = ConfigLoader::parse("").expect("empty TOML parses");
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn partial_sim_table_keeps_other_defaults() {
        let config = ConfigLoader::parse(
            r#"
            rng_seed = 7

            [sim]
            audio_enabled = false
            default_bucket = { Color = "blue" }
            "#,
        )
        .expect("config parses");

        assert_eq!(config.rng_seed, Some(7));
        assert!(!config.sim.audio_enabled);
        assert_eq!(config.sim.default_bucket, ScoreBucket::Color(Color::Blue));
        assert_eq!(config.sim.kill_magnitude, SimConfig::DEFAULT_KILL_MAGNITUDE);
        assert_eq!(config.max_frame_seconds, SimConfig::MAX_FRAME_SECONDS);
    }

    #[test]
    fn malformed_document_is_a_validation_error() {
        let err = ConfigLoader::parse("rng_seed = \"seven\"").unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "CONFIG_PARSE");
    }

    #[test]
    fn bool_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
