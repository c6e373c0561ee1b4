//! # archer-headless
//!
//! Runs one archer arena session without a window. An autopilot plays the
//! archer, ticks are paced by the core's fixed-period ticker, and every
//! signal the core emits is logged (or printed as JSON lines).
//!
//! ```text
//! archer-headless [CONFIG] [--fast] [--json] [--max-ticks N]
//! ```

mod autopilot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use archer_core::clock::Ticker;
use archer_core::{Signal, Simulation, SimulationConfig};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use autopilot::{Autopilot, DEFAULT_FLEE_RADIUS};

#[derive(Parser)]
#[command(name = "archer-headless", about = "Runs an archer arena session headless")]
struct Args {
    /// Path to a JSON session configuration
    config: Option<PathBuf>,

    /// Step without sleeping; every tick counts as on schedule
    #[arg(long)]
    fast: bool,

    /// Print each signal to stdout as a JSON line
    #[arg(long)]
    json: bool,

    /// Tear the session down after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Distance at which the autopilot backs away from enemies
    #[arg(long, default_value_t = DEFAULT_FLEE_RADIUS)]
    flee_radius: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let period = config.tick_period();
    let mut sim = Simulation::new(config).context("failed to start session")?;
    let mut autopilot = Autopilot::new(args.flee_radius);
    let mut ticker = Ticker::new(period);

    report(&mut sim, args.json)?;

    while sim.is_running() {
        for event in autopilot.plan(&sim) {
            sim.handle_input(event);
        }
        let elapsed = if args.fast { period } else { ticker.wait_next() };
        sim.step(elapsed);
        report(&mut sim, args.json)?;

        if args.max_ticks.is_some_and(|max| sim.tick() >= max) {
            info!(ticks = sim.tick(), "tick limit reached");
            sim.teardown();
            report(&mut sim, args.json)?;
        }
    }

    info!(
        phase = %sim.phase(),
        score = sim.scoreboard().score(),
        level = sim.scoreboard().level(),
        ticks = sim.tick(),
        "session over"
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = SimulationConfig::from_json_str(&text)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Drains pending signals and logs or prints them.
fn report(sim: &mut Simulation, json: bool) -> Result<()> {
    for signal in sim.drain_signals() {
        if json {
            println!("{}", serde_json::to_string(&signal)?);
            continue;
        }
        match signal {
            Signal::EntitySpawned(snap) => debug!(
                id = %snap.id,
                tag = %snap.tag,
                sprite = %snap.sprite,
                x = snap.position.x,
                y = snap.position.y,
                "spawned"
            ),
            Signal::EntityUpdated(snap) => debug!(
                id = %snap.id,
                x = snap.position.x,
                y = snap.position.y,
                facing = snap.facing,
                "updated"
            ),
            Signal::EntityRemoved { id } => debug!(id = %id, "removed"),
            Signal::ScoreChanged(score) => info!(score, "score"),
            Signal::LevelChanged(level) => info!(level, "level"),
            Signal::EnemiesRemainingChanged(remaining) => info!(remaining, "enemies remaining"),
            Signal::GameEnded(outcome) => info!(%outcome, "game ended"),
        }
    }
    Ok(())
}
