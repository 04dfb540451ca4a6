//! # Scene Relay Viewer
//!
//! Headless viewer and operator tool for a running relay.
//!
//! ## Usage
//!
//! ```bash
//! scene_relay_viewer view                       # poll + render until Ctrl+C
//! scene_relay_viewer view --duration 30
//! scene_relay_viewer kick player-1              # only listed players
//! scene_relay_viewer drain                      # what the simulation would see
//! scene_relay_viewer push snapshot.json
//! scene_relay_viewer --server http://relay:3000 view
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scene_relay_client::{ClientError, ClientResult, HeadlessBackend, Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "scene_relay_viewer", version, about = "Scene relay viewer")]
struct Cli {
    /// TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Relay base URL, overriding the config file.
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll and render until interrupted.
    View {
        /// Stop after this many seconds.
        #[arg(short, long)]
        duration: Option<u64>,
    },
    /// Request a kick for a player in the current snapshot.
    Kick {
        /// Player part id.
        id: String,
    },
    /// Drain and print the kick queue.
    Drain,
    /// Push a snapshot file to the relay.
    Push {
        /// JSON file with the snapshot document.
        file: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_config(cli: &Cli) -> ClientResult<ViewerConfig> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(server) = &cli.server {
        config.server_url.clone_from(server);
    }
    Ok(config)
}

async fn stop_signal(duration: Option<u64>) {
    let timer = async {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::error!("Cannot listen for Ctrl+C: {}", err);
                std::future::pending::<()>().await;
            }
        }
        () = timer => {}
    }
}

fn read_snapshot(path: &Path) -> ClientResult<serde_json::Value> {
    let failed = |reason: String| ClientError::SnapshotFile {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|err| failed(err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| failed(err.to_string()))
}

async fn execute(cli: Cli) -> ClientResult<()> {
    let config = load_config(&cli)?;
    let mut viewer = Viewer::new(config, HeadlessBackend::new())?;

    match cli.command {
        Command::View { duration } => {
            viewer.run(stop_signal(duration)).await?;
            let stats = viewer.backend().stats();
            tracing::info!(
                "Viewer stopped after {} frames ({} meshes created, {} removed)",
                stats.frames_drawn,
                stats.meshes_created,
                stats.meshes_removed
            );
        }
        Command::Kick { id } => {
            viewer.poll_once().await?;
            let ack = viewer.kick_player(&id).await?;
            println!("{}", serde_json::json!({ "success": ack.success }));
        }
        Command::Drain => {
            let ids = viewer.client().drain_kick_queue().await?;
            for id in ids {
                println!("{id}");
            }
        }
        Command::Push { file } => {
            let document = read_snapshot(&file)?;
            viewer.client().push_snapshot(&document).await?;
            tracing::info!("Pushed {} to {}", file.display(), viewer.client().base_url());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match execute(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
