//! # urmoco Motion Coordinator
//!
//! Bridges a stop-motion animation control protocol (integer motor-step
//! targets per axis) onto a 6-axis robotic arm. Loads the bridge
//! configuration, applies tool/payload setup, captures the reference
//! origin from the arm's current pose, and then serves motion requests
//! through the coordinator until a shutdown signal arrives.
//!
//! Runs against the built-in simulation arm; the protocol dispatch loop
//! and a physical-arm transport attach through the same `ArmDriver` and
//! `Coordinator` surfaces.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use urmoco_common::config::load_config;
use urmoco_hal::SimulationArm;
use urmoco_motion::coordinator::{Coordinator, MotionParams};
use urmoco_motion::startup::initialize_arm;

/// urmoco Motion Coordinator — stop-motion protocol to 6-axis arm bridge
#[derive(Parser, Debug)]
#[command(name = "urmoco_motion")]
#[command(version)]
#[command(about = "Motion coordinator between a stop-motion control protocol and a 6-axis arm")]
struct Args {
    /// Path to the bridge configuration TOML.
    #[arg(default_value = "config/urmoco.toml")]
    config: PathBuf,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("urmoco motion coordinator v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("urmoco motion coordinator shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    info!(
        "Config OK: host={}, speed={} m/s, admit_interval={}s",
        config.robot.host, config.robot.speed, config.motion.admit_interval,
    );

    let mut arm = SimulationArm::default();
    info!("simulation arm attached (host {} not contacted)", config.robot.host);

    initialize_arm(&mut arm, &config)?;

    let scale = config.scale()?;
    let params = MotionParams::from_config(&config);
    let coordinator = Coordinator::new(arm, scale, params)?;
    info!("coordinator ready, origin captured");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
    }

    // A move may still be in flight; stopping all axes is safe either way.
    coordinator.stop(None)?;
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
