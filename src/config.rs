//! Search backend configuration from the process environment.
//!
//! Read once at startup and immutable afterwards. Missing or malformed
//! required values abort startup before any window appears.

use thiserror::Error;

pub const ENV_API_KEY: &str = "SEARCH_API_KEY";
pub const ENV_HOST: &str = "SEARCH_HOST";
pub const ENV_PORT: &str = "SEARCH_PORT";
pub const ENV_PROTOCOL: &str = "SEARCH_PROTOCOL";
pub const ENV_QUERY_BY: &str = "SEARCH_QUERY_BY";
pub const ENV_NUM_TYPOS: &str = "SEARCH_NUM_TYPOS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            _ => None,
        }
    }
}

/// Connection settings for the hosted search service.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
    /// Document field the backend matches the query against.
    pub query_by: String,
    pub num_typos: u32,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = require(&lookup, ENV_API_KEY)?;
        let host = require(&lookup, ENV_HOST)?;

        let port_raw = require(&lookup, ENV_PORT)?;
        let port = port_raw
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port > 0)
            .ok_or_else(|| {
                ConfigError::invalid(ENV_PORT, port_raw.clone(), "expected a positive integer")
            })?;

        let protocol_raw = require(&lookup, ENV_PROTOCOL)?;
        let protocol = Protocol::parse(&protocol_raw).ok_or_else(|| {
            ConfigError::invalid(
                ENV_PROTOCOL,
                protocol_raw.clone(),
                "expected \"http\" or \"https\"",
            )
        })?;

        let query_by = lookup(ENV_QUERY_BY)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "name".to_string());

        let num_typos = match lookup(ENV_NUM_TYPOS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                ConfigError::invalid(ENV_NUM_TYPOS, raw.clone(), "expected a non-negative integer")
            })?,
            None => 1,
        };

        Ok(Config {
            api_key,
            host,
            port,
            protocol,
            query_by,
            num_typos,
        })
    }

    /// Base URL of the search service, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol.as_str(), self.host, self.port)
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}
