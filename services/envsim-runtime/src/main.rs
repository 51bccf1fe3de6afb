//! Environment runtime service.
//!
//! Drives a fixed-tick loop: reads each drone's pose, resolves its
//! spatial disturbance against a compiled environment, and writes the
//! result back, until `Ctrl-C`.
//!
//! ```bash
//! envsim-runtime --env-dir generated/ --roster robots.json --tick-msec 20
//! ```
//!
//! The shared-memory PDU transport is out of scope for this workspace
//! (see `DESIGN.md`); this binary drives [`envsim_transport::InMemoryTransport`]
//! as a stand-in so the loop itself is runnable and testable end to end.

mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use envsim_env::Environment;
use envsim_transport::{DroneManager, InMemoryTransport};
use scheduler::Scheduler;

#[derive(Parser, Debug)]
#[command(name = "envsim-runtime")]
#[command(about = "Fixed-tick environmental disturbance runtime")]
struct Args {
    /// Directory containing the compiled space_areas/area_properties/links tables
    #[arg(long)]
    env_dir: PathBuf,

    /// Drone roster config JSON (robots[].name, shm_pdu_readers, shm_pdu_writers)
    #[arg(long)]
    roster: PathBuf,

    /// Tick period in milliseconds
    #[arg(long, default_value = "20")]
    tick_msec: u64,

    /// BVH leaf capacity
    #[arg(long, default_value = "1")]
    leaf_capacity: usize,

    /// BVH max depth
    #[arg(long, default_value = "8")]
    max_depth: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    info!(env_dir = %args.env_dir.display(), "loading environment");
    let env = Arc::new(
        Environment::from_files(&args.env_dir, args.leaf_capacity, args.max_depth)
            .context("failed to load environment")?,
    );

    let integrity = env.validate_integrity();
    if !integrity.is_clean() {
        tracing::warn!(?integrity, "environment has dangling references");
    }

    info!(roster = %args.roster.display(), "loading drone roster");
    let roster = DroneManager::from_config(&args.roster).context("failed to load roster")?;
    info!(drones = roster.drones.len(), "roster loaded");

    let transport = Arc::new(InMemoryTransport::new());
    let scheduler = Scheduler::new(env, transport, roster.drones);

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal");
        shutdown_tx.send(()).ok();
    });

    let mut interval = tokio::time::interval(std::time::Duration::from_millis(args.tick_msec));
    info!(tick_msec = args.tick_msec, "entering tick loop");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                scheduler.tick();
            }
            _ = shutdown_rx.recv() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
