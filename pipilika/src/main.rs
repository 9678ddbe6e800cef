//! Pipilika - Ant Colony Simulator for Marga
//!
//! Generates a world, drops a colony of ants into it and lets each one walk
//! to a shared target with its own planner, knowing nothing of the terrain
//! in advance.
//!
//! ## Threads
//!
//! - **Ant threads** (one per ant): plan, sense, move, broadcast what they
//!   sensed to the rest of the colony
//! - **Main thread**: waits for reports, logs progress, prints the result

mod config;
mod error;
mod report;
mod shared;
mod threads;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use marga::core::Terrain;
use marga::network::ColonyNetwork;
use marga::world::TileMap;
use tracing::{error, info, warn};

use config::PipilikaConfig;
use error::Result;
use shared::{AntReport, SharedState};
use threads::spawn_colony;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/pipilika.toml")]
    config: String,

    /// World seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Moves allowed per ant (overrides config)
    #[arg(long)]
    steps: Option<usize>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pipilika=info,marga=warn")),
        )
        .init();

    let args = Args::parse();

    let config_path = Path::new(&args.config);
    let mut config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        PipilikaConfig::load(config_path)?
    } else {
        info!("Using default configuration");
        PipilikaConfig::default()
    };

    if let Some(steps) = args.steps {
        info!("Move budget per ant: {}", steps);
        config.simulation.max_steps = steps;
    }

    info!("Pipilika v{}", env!("CARGO_PKG_VERSION"));

    let world = Arc::new(build_world(&config, args.seed)?);
    info!(
        "World {}x{}: {} water cells, target {}",
        config.world.width,
        config.world.height,
        world.count(Terrain::Water),
        config.target
    );

    let network = ColonyNetwork::new();
    let shared_state = Arc::new(SharedState::new());

    info!("Releasing {} ants...", config.ants.len());
    let started = Instant::now();
    let handles = spawn_colony(&config, Arc::clone(&world), &network, Arc::clone(&shared_state))?;

    // Main thread: collect reports until every ant is done
    let check_interval = Duration::from_millis(500);
    let mut reports: Vec<AntReport> = Vec::with_capacity(config.ants.len());

    while reports.len() < config.ants.len() {
        match handles.reports.recv_timeout(check_interval) {
            Ok(report) => reports.push(report),
            Err(_) => {
                if handles.all_finished() && handles.reports.is_empty() {
                    warn!("An ant thread exited without reporting");
                    break;
                }
                info!(
                    "{} moves so far, {}/{} ants done, {} arrived",
                    shared_state.total_steps(),
                    shared_state.finished(),
                    config.ants.len(),
                    shared_state.arrivals()
                );
            }
        }
    }

    shared_state.signal_shutdown();

    for (name, handle) in handles.ants {
        if let Err(e) = handle.join() {
            error!("Ant thread {} panicked: {:?}", name, e);
        }
    }

    info!(
        "Simulation finished in {:.2?}: {}/{} ants arrived, {} moves",
        started.elapsed(),
        shared_state.arrivals(),
        config.ants.len(),
        shared_state.total_steps()
    );
    let order = shared_state.arrival_order();
    if !order.is_empty() {
        info!("Arrival order: {}", order.join(", "));
    }

    reports.sort_by(|a, b| a.name.cmp(&b.name));
    print!("{}", report::report_table(&reports));

    Ok(())
}

/// Generate the configured world and clear the cells ants must stand on.
fn build_world(config: &PipilikaConfig, seed: Option<u64>) -> Result<TileMap> {
    let generator = config.world.to_generator(seed)?;
    info!("Generating world with seed {}", generator.seed());
    let mut world = generator.generate(config.world.bounds());

    let required = config
        .ants
        .iter()
        .map(|ant| ant.start)
        .chain(std::iter::once(config.target));
    for pos in required {
        if !world.is_passable(pos) {
            warn!("Clearing water at {}", pos);
            world.set(pos, Terrain::Grass);
        }
    }

    Ok(world)
}
