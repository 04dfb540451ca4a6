//! # Relay Error Types
//!
//! Request handling itself cannot fail; everything here happens at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path:?}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::ServerConfig`].
    #[error("invalid config {path:?}: {source}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Errors that stop the relay.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Listening socket could not be opened.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("relay terminated: {0}")]
    Serve(#[source] std::io::Error),

    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for relay startup.
pub type ServerResult<T> = Result<T, ServerError>;
