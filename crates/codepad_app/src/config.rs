//! Layered configuration: defaults, an optional JSON file, then env overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use compile_api::CompileApiConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::app::{RunPolicy, DEFAULT_LISTING_WIDTH};

pub const CONFIG_PATH_ENV_VAR: &str = "CODEPAD_CONFIG_PATH";
pub const BASE_URL_ENV_VAR: &str = "CODEPAD_BASE_URL";
pub const TIMEOUT_ENV_VAR: &str = "CODEPAD_TIMEOUT_SEC";
pub const RUN_POLICY_ENV_VAR: &str = "CODEPAD_RUN_POLICY";
pub const COLUMNS_ENV_VAR: &str = "COLUMNS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin}: timeout_sec must be a positive integer, got '{value}'")]
    InvalidTimeout { origin: &'static str, value: String },

    #[error("{origin}: {message}")]
    InvalidRunPolicy {
        origin: &'static str,
        message: String,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_sec: Option<u64>,
    run_policy: Option<RunPolicy>,
    user_agent: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: CompileApiConfig,
    pub run_policy: RunPolicy,
    pub listing_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: CompileApiConfig::default(),
            run_policy: RunPolicy::default(),
            listing_width: DEFAULT_LISTING_WIDTH,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration with `lookup` standing in for the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match lookup(CONFIG_PATH_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(path.trim()))?,
            None => Self::default(),
        };

        if let Some(base_url) = lookup(BASE_URL_ENV_VAR) {
            config.api.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV_VAR) {
            let seconds = parse_timeout(TIMEOUT_ENV_VAR, raw.trim())?;
            config.api.timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(raw) = lookup(RUN_POLICY_ENV_VAR) {
            config.run_policy = raw
                .parse()
                .map_err(|message| ConfigError::InvalidRunPolicy {
                    origin: RUN_POLICY_ENV_VAR,
                    message,
                })?;
        }

        if let Some(width) = lookup(COLUMNS_ENV_VAR).and_then(|raw| raw.trim().parse::<usize>().ok())
        {
            if width > 0 {
                config.listing_width = width;
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.api.base_url = base_url;
        }
        if let Some(seconds) = file.timeout_sec {
            if seconds == 0 {
                return Err(ConfigError::InvalidTimeout {
                    origin: "config file",
                    value: seconds.to_string(),
                });
            }
            config.api.timeout = Some(Duration::from_secs(seconds));
        }
        if let Some(policy) = file.run_policy {
            config.run_policy = policy;
        }
        if let Some(user_agent) = file.user_agent {
            config.api.user_agent = Some(user_agent);
        }
        config.api.extra_headers = file.headers;

        Ok(config)
    }
}

fn parse_timeout(origin: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(ConfigError::InvalidTimeout {
            origin,
            value: raw.to_string(),
        }),
    }
}
