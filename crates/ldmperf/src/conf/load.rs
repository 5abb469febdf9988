//! Load: config loading from file and environment variables, and validation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{AnalysisConfig, ErrorPolicy};
use crate::parser::LineClassifier;

pub const CONFIG_FILE_ENV: &str = "LDMPERF_CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ldmperf/ldmperf.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

impl AnalysisConfig {
    /// Load configuration.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist. Otherwise `LDMPERF_CONFIG_FILE` or the
    /// default location is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Self::from_file(path)?
            }
            None => {
                let config_path = std::env::var(CONFIG_FILE_ENV)
                    .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
                if Path::new(&config_path).exists() {
                    tracing::info!("Loading configuration from: {}", config_path);
                    Self::from_file(Path::new(&config_path))?
                } else {
                    tracing::debug!("Config file not found at {}, using defaults", config_path);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LDMPERF_*` overrides. Unparsable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = parsed::<f64, _>(&lookup, "LDMPERF_RATE_BPS") {
            self.channel.rate_bps = rate;
        }
        if let Some(rtt) = parsed::<f64, _>(&lookup, "LDMPERF_RTT_SECS") {
            self.channel.rtt_secs = rtt;
        }
        if let Some(drain) = parsed::<f64, _>(&lookup, "LDMPERF_DRAIN_SECS") {
            self.channel.drain_allowance_secs = drain;
        }
        if let Some(bytes) = parsed::<u64, _>(&lookup, "LDMPERF_AGGREGATE_BYTES") {
            self.throughput.aggregate_bytes = bytes;
        }
        if let Some(policy) = parsed::<ErrorPolicy, _>(&lookup, "LDMPERF_ERROR_POLICY") {
            self.error_policy = policy;
        }
    }

    /// Validate that configuration values are sane and marker patterns compile
    pub fn validate(&self) -> Result<(), ConfigError> {
        let channel = &self.channel;
        if !(channel.rate_bps.is_finite() && channel.rate_bps > 0.0) {
            return Err(ConfigError::Invalid("channel.rate_bps must be > 0".to_string()));
        }
        if !(channel.rtt_secs.is_finite() && channel.rtt_secs >= 0.0) {
            return Err(ConfigError::Invalid("channel.rtt_secs must be >= 0".to_string()));
        }
        if !(channel.drain_allowance_secs.is_finite() && channel.drain_allowance_secs >= 0.0) {
            return Err(ConfigError::Invalid(
                "channel.drain_allowance_secs must be >= 0".to_string(),
            ));
        }
        if self.throughput.aggregate_bytes == 0 {
            return Err(ConfigError::Invalid(
                "throughput.aggregate_bytes must be > 0".to_string(),
            ));
        }
        if self.throughput.log_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "throughput.log_kinds must name at least one line kind".to_string(),
            ));
        }

        let all_kinds = Self::CBR_KINDS
            .iter()
            .chain(self.throughput.log_kinds.iter())
            .copied();
        LineClassifier::from_profiles(all_kinds.map(|kind| (kind, self.parsers.get(kind))))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
