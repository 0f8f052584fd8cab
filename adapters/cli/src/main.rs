#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Bastion session headless.

mod logging;
mod script;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use bastion_core::SimulationConfig;
use bastion_presenter::HeadlessPresenter;
use bastion_simulation::Simulation;
use bastion_world::query;
use clap::Parser;

use crate::script::{FireOrder, Order, Script};

/// Runs a scripted tower-defence session without a window.
#[derive(Debug, Parser)]
#[command(name = "bastion", author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Frame delta passed to every tick.
    #[arg(long, default_value_t = 1.0)]
    delta: f32,

    /// Overrides the spawn generator seed.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with simulation parameters.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fires toward X,Y once TICK ticks have run. May be repeated.
    #[arg(long = "fire", value_name = "TICK:X,Y")]
    fire: Vec<FireOrder>,

    /// Spawns an enemy once TICK ticks have run. May be repeated.
    #[arg(long = "spawn", value_name = "TICK")]
    spawn: Vec<u64>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }

    let mut simulation = Simulation::new(&config).context("simulation configuration is invalid")?;
    let script = Script::new(&args.fire, &args.spawn);
    let unreached = script.unreached(args.ticks);
    if unreached > 0 {
        log::warn!("{unreached} scripted order(s) fall after the last tick");
    }

    let mut presenter = HeadlessPresenter::new();
    let mut events = Vec::new();
    log::info!("running {} ticks with delta {}", args.ticks, args.delta);
    for tick in 0..args.ticks {
        for order in script.orders_at(tick) {
            match *order {
                Order::Fire(target) => {
                    simulation.fire_projectile(target, &mut presenter, &mut events);
                }
                Order::Spawn => simulation.spawn_enemy_now(&mut presenter, &mut events),
            }
        }
        simulation.tick(args.delta, &mut presenter, &mut events);
        events.clear();
    }

    print_summary(&simulation);
    Ok(())
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SimulationConfig::from_toml_str(&contents)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn print_summary(simulation: &Simulation) {
    let stats = simulation.stats();
    println!(
        "ticks: {}  elapsed: {:.3}s",
        simulation.tick_index(),
        simulation.elapsed().as_secs_f64()
    );
    println!(
        "enemies: {} spawned, {} killed, {} dismissed",
        stats.enemies_spawned, stats.enemies_killed, stats.enemies_dismissed
    );
    println!(
        "projectiles: {} fired, {} hits, {} culled, {} in flight",
        stats.projectiles_fired,
        stats.hits,
        stats.projectiles_culled,
        stats.projectiles_in_flight()
    );

    let survivors = query::enemy_view(simulation.world());
    println!("surviving enemies: {}", survivors.len());
    for enemy in survivors.iter() {
        println!(
            "  #{:<4} at ({:>7.1}, {:>7.1})  health {}/{}",
            enemy.id.get(),
            enemy.position.x,
            enemy.position.y,
            enemy.health,
            enemy.max_health
        );
    }
}
