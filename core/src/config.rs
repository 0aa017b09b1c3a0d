//! Client configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

/// Base URL used when `API_URL` is unset or blank.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

pub const API_URL_VAR: &str = "API_URL";
pub const API_TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Where the collection lives and how long a host may wait on it.
///
/// `timeout` is a host-side hardening knob; the core itself never times out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup(API_TIMEOUT_VAR) {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                    var: API_TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                // Zero means "wait forever", matching the unset case.
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        Ok(Self { api_url, timeout })
    }
}
