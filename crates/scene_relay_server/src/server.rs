//! # Relay Server
//!
//! Maps the four relay operations onto HTTP.
//!
//! | Route              | Operation                    |
//! |--------------------|------------------------------|
//! | `POST /parts`      | [`RelayState::push_snapshot`] |
//! | `GET /parts`       | [`RelayState::get_snapshot`]  |
//! | `POST /kick/:id`   | [`RelayState::request_kick`]  |
//! | `GET /kickqueue`   | [`RelayState::get_kick_queue`]|
//! | `GET /health`      | liveness                      |

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::state::RelayState;
use scene_relay_shared::{KickAck, HEALTH_ROUTE, KICK_QUEUE_ROUTE, KICK_ROUTE, PARTS_ROUTE};

/// The relay.
pub struct RelayServer {
    config: ServerConfig,
    state: RelayState,
}

impl RelayServer {
    /// Creates a relay with empty stores.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let state = RelayState::new(config.kick_queue_warn_len);
        Self { config, state }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the shared state.
    #[must_use]
    pub fn state(&self) -> &RelayState {
        &self.state
    }

    /// Builds the route table.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route(PARTS_ROUTE, post(push_parts).get(get_parts))
            .route(&format!("{KICK_ROUTE}/:id"), post(request_kick))
            .route(KICK_QUEUE_ROUTE, get(drain_kick_queue))
            .route(HEALTH_ROUTE, get(health))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .with_state(self.state.clone())
    }

    /// Binds the configured address.
    async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.config.bind_address;
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serves in the foreground until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!("Server running on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Binds and serves on a background task.
    ///
    /// The returned handle reports the actual bound address, so binding
    /// port 0 is fine.
    pub async fn spawn(self) -> ServerResult<RelayHandle> {
        let listener = self.bind().await?;
        let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
        let router = self.router();
        let state = self.state;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = server.await {
                tracing::error!("Relay server error: {}", err);
            }
        });

        tracing::info!("Server running on http://{}", local_addr);
        Ok(RelayHandle {
            join,
            shutdown_tx: Some(shutdown_tx),
            local_addr,
            state,
        })
    }
}

/// Handle to a relay running on a background task.
pub struct RelayHandle {
    join: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
    state: RelayState,
}

impl RelayHandle {
    /// Address the relay is listening on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// The state the running relay serves.
    #[must_use]
    pub fn state(&self) -> &RelayState {
        &self.state
    }

    /// Stops accepting requests and waits for the server task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.join.await;
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn push_parts(
    State(state): State<RelayState>,
    Json(snapshot): Json<Value>,
) -> impl IntoResponse {
    state.push_snapshot(snapshot);
    (StatusCode::OK, "OK")
}

async fn get_parts(State(state): State<RelayState>) -> Json<Value> {
    Json(Value::clone(&state.get_snapshot()))
}

async fn request_kick(State(state): State<RelayState>, Path(id): Path<String>) -> Json<KickAck> {
    Json(state.request_kick(&id))
}

async fn drain_kick_queue(State(state): State<RelayState>) -> Json<Vec<String>> {
    let drained = state.get_kick_queue();
    if !drained.is_empty() {
        tracing::debug!("Kick queue drained: {} ids", drained.len());
    }
    Json(drained)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
