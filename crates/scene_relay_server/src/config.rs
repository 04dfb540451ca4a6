//! Server configuration.
//!
//! Loaded once at startup, either from defaults or from a TOML file:
//!
//! ```toml
//! bind_address = "0.0.0.0:3000"
//! max_body_bytes = 16777216
//! kick_queue_warn_len = 1024
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use scene_relay_shared::DEFAULT_PORT;

/// Relay configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// Largest accepted request body. Scenes with thousands of parts are a
    /// few megabytes of JSON.
    pub max_body_bytes: usize,
    /// Queue length at which a warning is logged. The queue is never capped.
    pub kick_queue_warn_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_body_bytes: 16 * 1024 * 1024,
            kick_queue_warn_len: 1024,
        }
    }
}

impl ServerConfig {
    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Replaces the port, keeping the interface.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_address.set_port(port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), scene_relay_shared::DEFAULT_BIND);
        assert_eq!(config.kick_queue_warn_len, 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("bind_address = \"127.0.0.1:8080\"").unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.max_body_bytes, ServerConfig::default().max_body_bytes);
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::default().with_port(4000);
        assert_eq!(config.bind_address.port(), 4000);
    }

    #[test]
    fn test_bad_toml() {
        assert!(ServerConfig::from_toml("max_body_bytes = \"lots\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
