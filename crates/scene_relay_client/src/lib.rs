//! # Scene Relay Client
//!
//! Viewer side of the scene relay: polls the latest snapshot, keeps a set of
//! rendered objects in step with it, and animates them every frame.
//!
//! ## Architecture
//!
//! ```text
//! RelayClient ──JSON──► SceneReconciler ──create/update/release──► SceneBackend
//!                              ▲                                       ▲
//!                              │ advance, labels                       │ draw
//!                         RenderLoop ──────────────────────────────────┘
//! ```
//!
//! The renderer sits behind [`SceneBackend`]. [`HeadlessBackend`] ships with
//! the crate and records what a real renderer would be asked to do.

#![deny(unsafe_code)]

pub mod backend;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod reconciler;
pub mod relay_client;
pub mod render_loop;
pub mod roster;
pub mod snapshot;
pub mod viewer;

pub use backend::{HeadlessBackend, LabelHandle, Material, MeshHandle, SceneBackend, Transform};
pub use camera::{Camera, ScreenPoint};
pub use config::ViewerConfig;
pub use error::{ClientError, ClientResult, ConfigError};
pub use geometry::ShapeGeometry;
pub use reconciler::{ReconcileStats, RenderedObject, SceneReconciler};
pub use relay_client::RelayClient;
pub use render_loop::{FrameStats, RenderLoop, Smoothing};
pub use roster::{status_text, PlayerRoster, RosterChanges};
pub use snapshot::ParsedSnapshot;
pub use viewer::Viewer;
