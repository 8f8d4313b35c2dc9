#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Nightfall headless and reports the outcome.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nightfall_core::ResourceKind;
use nightfall_simulation::{Simulation, SimulationConfig};
use nightfall_world::query;
use script::Script;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a headless Nightfall epoch with a scripted player.
#[derive(Debug, Parser)]
#[command(name = "nightfall", version, about, long_about = None)]
struct Args {
    /// Seed for world generation and spawning; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run before reporting.
    #[arg(long, default_value_t = 60)]
    seconds: u64,

    /// TOML file with simulation settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Behaviour of the player during the run.
    #[arg(long, value_enum, default_value_t = Script::Idle)]
    script: Script,
}

/// Entry point for the Nightfall command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let steps = args
        .seconds
        .saturating_mul(1000)
        .checked_div(config.step_ms)
        .context("step_ms must be greater than zero")?;

    let mut simulation = Simulation::new(config);
    println!("{}", query::welcome_banner(simulation.world()));
    info!(steps, script = ?args.script, "run_started");

    let mut commands = Vec::new();
    let mut executed = 0u64;
    for step in 0..steps {
        commands.clear();
        args.script.commands(step, simulation.world(), &mut commands);
        for command in commands.drain(..) {
            simulation.submit(command);
        }
        simulation.step();
        executed = step + 1;
        if simulation.is_game_over() {
            break;
        }
    }

    print_summary(&simulation, executed);
    Ok(())
}

fn print_summary(simulation: &Simulation, steps: u64) {
    let world = simulation.world();
    let clock = query::clock(world);
    let player = query::player(world);
    let levels = query::levels(world);

    println!("steps:      {steps}");
    println!(
        "wave:       {} ({}, {}s left)",
        clock.wave,
        if clock.is_day { "day" } else { "night" },
        clock.remaining()
    );
    println!("score:      {}", player.score);
    println!(
        "wallet:     wood {} / stone {} / gold {}",
        player.wallet.amount(ResourceKind::Wood),
        player.wallet.amount(ResourceKind::Stone),
        player.wallet.amount(ResourceKind::Gold)
    );
    println!(
        "levels:     weapon {} / wall {} / tower {}",
        levels.weapon, levels.wall, levels.tower
    );
    println!(
        "entities:   {} creatures, {} structures, {} helpers, {} nodes",
        query::creatures(world).len(),
        query::structures(world).len(),
        query::helpers(world).len(),
        query::resource_nodes(world).len()
    );
    println!(
        "status:     {}",
        if simulation.is_game_over() {
            "overrun"
        } else {
            "holding"
        }
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
