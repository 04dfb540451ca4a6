//! # Viewer
//!
//! Ties the relay client, the reconciler and the render loop together.
//!
//! ```text
//! poll tick ──► fetch (background task) ──► apply_snapshot ──► SceneReconciler
//!                                                   │
//!                                                   └─► PlayerRoster, status line
//! frame tick ──► RenderLoop::frame ──► SceneBackend
//! ```
//!
//! Polling and rendering run on separate cadences. At most one fetch is in
//! flight; a tick that fires while one is pending is skipped. A failed
//! fetch is logged and the scene keeps its last reconciled state.

use std::future::Future;

use scene_relay_shared::{KickAck, Vec3};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::backend::SceneBackend;
use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::error::{ClientError, ClientResult};
use crate::reconciler::{ReconcileStats, SceneReconciler};
use crate::relay_client::RelayClient;
use crate::render_loop::{FrameStats, RenderLoop, Smoothing};
use crate::roster::{status_text, PlayerRoster};
use crate::snapshot::ParsedSnapshot;

/// A viewing session against one relay.
pub struct Viewer<B: SceneBackend> {
    config: ViewerConfig,
    client: RelayClient,
    scene: SceneReconciler,
    render_loop: RenderLoop,
    roster: PlayerRoster,
    camera: Camera,
    backend: B,
    status: String,
}

impl<B: SceneBackend> Viewer<B> {
    /// Creates a viewer with an empty scene.
    pub fn new(config: ViewerConfig, backend: B) -> ClientResult<Self> {
        let client = RelayClient::new(&config.server_url, config.request_timeout())?;

        let mut camera = Camera::new(config.viewport[0], config.viewport[1]);
        camera.look_from(
            Vec3::from_array(config.camera_position),
            config.camera_yaw_deg,
            config.camera_pitch_deg,
        );

        let render_loop = RenderLoop::new(
            Smoothing::per_sixtieth(config.smoothing_fraction),
            config.label_margin,
        );

        Ok(Self {
            config,
            client,
            scene: SceneReconciler::new(),
            render_loop,
            roster: PlayerRoster::new(),
            camera,
            backend,
            status: status_text(0),
        })
    }

    /// Reconciles the scene against a fetched document.
    ///
    /// A document that is not an array leaves everything untouched.
    pub fn apply_snapshot(&mut self, document: &Value) -> ClientResult<ReconcileStats> {
        let parsed = ParsedSnapshot::from_json(document)?;
        let stats = self.scene.reconcile(&parsed.parts, &mut self.backend);

        let changes = self.roster.reconcile(&parsed.parts);
        for id in &changes.joined {
            info!("Player joined: {}", id);
        }
        for id in &changes.left {
            info!("Player left: {}", id);
        }

        self.status = status_text(parsed.total);
        Ok(stats)
    }

    /// Fetches and applies one snapshot.
    pub async fn poll_once(&mut self) -> ClientResult<ReconcileStats> {
        let document = self.client.fetch_snapshot().await?;
        self.apply_snapshot(&document)
    }

    /// Renders one frame, `dt` seconds after the previous one.
    pub fn render_frame(&mut self, dt: f32) -> FrameStats {
        self.render_loop
            .frame(dt, &mut self.scene, &mut self.backend, &self.camera)
    }

    /// Requests a kick for a listed player.
    pub async fn kick_player(&self, id: &str) -> ClientResult<KickAck> {
        if !self.roster.contains(id) {
            return Err(ClientError::UnknownPlayer(id.to_owned()));
        }
        self.client.request_kick(id).await
    }

    /// Polls and renders until `shutdown` resolves, then releases the scene.
    pub async fn run<F>(&mut self, shutdown: F) -> ClientResult<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Viewing {} (poll every {:?}, {} fps)",
            self.client.base_url(),
            self.config.poll_interval(),
            self.config.frame_rate
        );

        let mut poll_tick = time::interval(self.config.poll_interval());
        poll_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frame_tick = time::interval(self.config.frame_interval());
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut status_tick = time::interval(time::Duration::from_secs(
            self.config.status_interval_secs.max(1),
        ));
        status_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let (fetched_tx, mut fetched_rx) = mpsc::channel::<ClientResult<Value>>(1);
        let mut fetch_pending = false;
        let mut last_frame = Instant::now();

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Viewer shutting down");
                    break;
                }

                _ = poll_tick.tick() => {
                    if !fetch_pending {
                        fetch_pending = true;
                        let client = self.client.clone();
                        let tx = fetched_tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(client.fetch_snapshot().await).await;
                        });
                    }
                }

                Some(fetched) = fetched_rx.recv() => {
                    fetch_pending = false;
                    match fetched.and_then(|document| self.apply_snapshot(&document)) {
                        Ok(stats) if stats.changed_membership() => {
                            debug!("Scene now holds {} objects", self.scene.len());
                        }
                        Ok(_) => {}
                        Err(err) => warn!("Failed to fetch parts: {}", err),
                    }
                }

                now = frame_tick.tick() => {
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;
                    self.render_frame(dt);
                }

                _ = status_tick.tick() => {
                    info!(
                        "{} | objects: {} | players: {} | frames: {}",
                        self.status,
                        self.scene.len(),
                        self.roster.players().len(),
                        self.render_loop.frames()
                    );
                }
            }
        }

        self.scene.clear(&mut self.backend);
        Ok(())
    }

    /// Status line for the last applied snapshot.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Tracked objects.
    #[must_use]
    pub fn scene(&self) -> &SceneReconciler {
        &self.scene
    }

    /// Listed players.
    #[must_use]
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    /// The render backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The camera, for repositioning between frames.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The relay client.
    #[must_use]
    pub fn client(&self) -> &RelayClient {
        &self.client
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }
}
