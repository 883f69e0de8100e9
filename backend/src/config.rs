//! Server configuration from the environment.

use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable holding the listen address
pub const BIND_ADDR_VAR: &str = "SOLVER_BIND_ADDR";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: '{value}'")]
    InvalidAddress { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            let parsed = value.trim().parse::<SocketAddr>();
            config.bind_addr = parsed.map_err(|_| ConfigError::InvalidAddress {
                var: BIND_ADDR_VAR,
                value,
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_address_override() {
        let config = ServerConfig::from_lookup(|key| {
            (key == BIND_ADDR_VAR).then(|| "0.0.0.0:8080".to_string())
        })
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_address() {
        let result = ServerConfig::from_lookup(|_| Some("not-an-address".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidAddress { .. })));
    }
}
