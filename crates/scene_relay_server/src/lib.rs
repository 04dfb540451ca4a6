//! # Scene Relay Server
//!
//! Pass-through relay between an external simulation and any number of
//! viewers.
//!
//! ## Architecture
//!
//! ```text
//! PRODUCER                    RELAY                        VIEWER / OPERATOR
//!    |                          |                                 |
//!    |-- POST /parts ---------->| SnapshotStore.replace           |
//!    |                          |<--------------- GET /parts -----|
//!    |                          |<------------ POST /kick/:id ----|
//!    |                          | KickQueue.enqueue               |
//!    |-- GET /kickqueue ------->| KickQueue.drain                 |
//! ```
//!
//! Both stores are owned by a [`RelayState`] that is handed to every request
//! handler. There is no authentication: the relay trusts a single producer
//! and a single operator.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scene_relay_server::{RelayServer, ServerConfig};
//!
//! let server = RelayServer::new(ServerConfig::default());
//! server.run(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! }).await?;
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError, ServerResult};
pub use server::{RelayHandle, RelayServer};
pub use state::{KickQueue, RelayState, SnapshotStore};
pub use scene_relay_shared::KickAck;
