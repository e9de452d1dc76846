//! Headless demo runner.
//!
//! Loads configuration (an optional TOML path as the first argument, then
//! `SIM_*` environment overrides), builds a small level and plays a scripted
//! scenario through the verb engine, tracing every collaborator request.
//!
//! ```bash
//! RUST_LOG=sim_runtime=debug cargo run -p sim-cli -- demo.toml
//! ```
mod scenario;

use std::path::Path;

use anyhow::{Context, Result};
use sim_runtime::{ConfigLoader, LoggingHost, RecordingHost, RuntimeConfig, Simulation};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ConfigLoader::load(Path::new(&path))
            .with_context(|| format!("loading {path}"))?
            .with_env_overrides(),
        None => RuntimeConfig::from_env(),
    };

    let host = LoggingHost::new(scenario::host());
    let mut sim = Simulation::new(config, host);
    tracing::info!(seed = sim.seed(), "starting demo scenario");

    scenario::run(&mut sim)?;
    print_summary(&sim);
    Ok(())
}

fn print_summary(sim: &Simulation<LoggingHost<RecordingHost>>) {
    println!("frames: {}", sim.clock().frame());
    for (bucket, score) in sim.scoreboard().table().iter() {
        if score.active {
            println!("score {bucket}: {}", score.curr());
        }
    }
    for actor in sim.world().actors() {
        println!(
            "actor {} {:?} hp={}/{} color={}",
            actor.id,
            actor.state(),
            actor.stats.hit_points,
            actor.stats.max_hit_points,
            actor.color
        );
    }
    let host = sim.host().inner();
    println!("collaborator requests: {}", host.requests().len());
    if let Some(level) = host.current_level() {
        println!("switched to level {:#x}", level.0);
    }
}
