//! # Client Error Types
//!
//! None of these are fatal to a viewing session: a failed poll leaves the
//! last reconciled scene on screen and the next tick tries again.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the viewer configuration.
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

    /// The configuration file is not valid TOML for [`crate::ViewerConfig`].
    #[error("invalid config {path:?}: {source}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Errors talking to the relay.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, timeout, non-success status or undecodable body.
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay base URL cannot carry path segments.
    #[error("invalid relay url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The fetched document is not a list of parts.
    #[error("snapshot is not an array (got {0})")]
    MalformedSnapshot(&'static str),

    /// Kick requested for an id the roster does not list.
    #[error("{0} is not a listed player")]
    UnknownPlayer(String),

    /// A snapshot file could not be read or is not JSON.
    #[error("cannot load snapshot {path:?}: {reason}")]
    SnapshotFile {
        /// File that was requested.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
