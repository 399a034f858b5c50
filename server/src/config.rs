//! Host configuration from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host serves the SSR shell and the WASM bundle. Its only runtime knobs
//! are the listen port and the analysis backend address, which is handed to
//! the client through the rendered shell.
//!
//! ERROR HANDLING
//! ==============
//! A malformed value aborts startup instead of silently falling back, so a
//! typo in deployment config is noticed immediately.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::num::ParseIntError;

use client::config::ApiConfig;

/// Listen port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid VISION_API_URL {0:?}: expected an http(s) or ws(s) address")]
    InvalidApiUrl(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub api: ApiConfig,
}

impl HostConfig {
    /// Read `PORT` and `VISION_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_value("PORT");
        let api_url = env_value("VISION_API_URL");
        Self::from_values(port.as_deref(), api_url.as_deref())
    }

    /// Build from raw values; unset or blank values take the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-numeric port or a backend address
    /// with an unsupported scheme.
    pub fn from_values(port: Option<&str>, api_url: Option<&str>) -> Result<Self, ConfigError> {
        let port = parse_port(port)?;
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            if !has_supported_scheme(url) {
                return Err(ConfigError::InvalidApiUrl(url.to_owned()));
            }
        }
        Ok(Self { port, api: ApiConfig::resolve(api_url, None) })
    }
}

/// Parse a listen port; unset or blank means [`DEFAULT_PORT`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPort`] if the value is not a `u16`.
pub fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort { value: value.to_owned(), source }),
    }
}

/// Trimmed value of `key`, treating blank as unset.
pub fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn has_supported_scheme(url: &str) -> bool {
    ["http://", "https://", "ws://", "wss://"].iter().any(|scheme| url.starts_with(scheme))
}
