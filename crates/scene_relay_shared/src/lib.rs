//! # Scene Relay Shared
//!
//! Common types used by both the relay server and the viewer.
//!
//! ## Contents
//!
//! - [`Part`]: one renderable entity of a pushed snapshot
//! - [`Vec3`] / [`Color`]: the value types a part is made of
//! - [`constants`]: routes, ports and cadences both sides agree on
//!
//! This crate must NEVER depend on an HTTP stack or a renderer.

#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;
pub mod part;

pub use color::Color;
pub use constants::{
    DEFAULT_BIND, DEFAULT_PORT, DEFAULT_SERVER_URL, HEALTH_ROUTE, KICK_QUEUE_ROUTE, KICK_ROUTE,
    PARTS_ROUTE, POLL_INTERVAL_MS,
};
pub use math::Vec3;
pub use part::{KickAck, Part, PartId, PartType};
