//! # Scene Relay Server
//!
//! Holds the latest parts snapshot and the kick queue for the viewer and the
//! simulation.
//!
//! ## Usage
//!
//! ```bash
//! scene_relay_server --port 3000
//! scene_relay_server --config relay.toml
//! RUST_LOG=scene_relay_server=debug scene_relay_server
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scene_relay_server::{RelayServer, ServerConfig, ServerResult};

/// Command line options. Flags override the config file.
#[derive(Parser, Debug)]
#[command(name = "scene_relay_server", version, about = "Scene snapshot and kick relay")]
struct Args {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Full bind address, e.g. 127.0.0.1:3000.
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Port to bind on the configured interface.
    #[arg(short, long)]
    port: Option<u16>,
}

impl Args {
    fn resolve(self) -> ServerResult<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        Ok(config)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Args::parse().resolve() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Relay config: bind={} max_body={}B kick_warn={}",
        config.bind_address,
        config.max_body_bytes,
        config.kick_queue_warn_len
    );

    match RelayServer::new(config).run(shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
