#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line demo driver for the Garden Defence simulation.
//!
//! Scatters a seeded batch of cabbages, drops a hive spawner and a pigeon
//! spawner onto the grid, then runs the requested number of steps while
//! logging every broadcast event.

use std::num::NonZeroU32;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use garden_defence_core::{
    config::SimulationConfig, CellCoord, Command, Event, Position, ResourceKind,
};
use garden_defence_session::{apply, query, GameState};

#[derive(Debug, Parser)]
#[command(name = "garden-defence", about = "Deterministic garden-defence simulation demo")]
struct Args {
    /// Number of simulation steps to run.
    #[arg(long, default_value_t = 600)]
    steps: u32,
    /// Seed for the initial cabbage scatter.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of grid columns.
    #[arg(long, default_value_t = 12)]
    columns: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = 12)]
    rows: u32,
    /// Side length of a square tile in world units.
    #[arg(long, default_value_t = 50)]
    tile_size: u32,
    /// Number of cabbages scattered before the run starts.
    #[arg(long, default_value_t = 8)]
    cabbages: u32,
    /// Steps between pigeon releases.
    #[arg(long, default_value_t = 100)]
    pigeon_period: u32,
    /// Steps between hive constructions.
    #[arg(long, default_value_t = 100)]
    hive_period: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    if args.columns == 0 || args.rows == 0 {
        bail!("the grid needs at least one column and one row");
    }
    let tile_size = NonZeroU32::new(args.tile_size).context("--tile-size must be non-zero")?;
    let pigeon_period =
        NonZeroU32::new(args.pigeon_period).context("--pigeon-period must be non-zero")?;
    let hive_period =
        NonZeroU32::new(args.hive_period).context("--hive-period must be non-zero")?;

    let config = SimulationConfig::default();
    let mut state = GameState::new(args.columns, args.rows, tile_size, config);
    let mut events = Vec::new();

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for _ in 0..args.cabbages {
        let cell = CellCoord::new(
            rng.gen_range(0..args.columns),
            rng.gen_range(0..args.rows),
        );
        apply(
            &mut state,
            Command::PlantResource {
                cell,
                kind: ResourceKind::Cabbage,
            },
            &mut events,
        );
    }

    let size = tile_size.get() as i32;
    let center = Position::new(
        args.columns as i32 * size / 2,
        args.rows as i32 * size / 2,
    );
    apply(
        &mut state,
        Command::PlaceHiveSpawner {
            position: center,
            period: hive_period,
        },
        &mut events,
    );
    // Pigeons come in from the top-left corner of the grid.
    apply(
        &mut state,
        Command::PlacePigeonSpawner {
            position: Position::new(0, 0),
            period: pigeon_period,
        },
        &mut events,
    );
    for event in events.drain(..) {
        log_event(0, &event);
    }

    for step in 1..=args.steps {
        apply(&mut state, Command::Tick, &mut events);
        for event in events.drain(..) {
            log_event(step, &event);
        }
    }

    let actors = query::actors(&state);
    let enemies = query::enemies(&state);
    let cabbages = query::resource_cells(&state, ResourceKind::Cabbage);
    info!(
        steps = args.steps,
        actors = actors.len(),
        enemies = enemies.len(),
        cabbage_tiles = cabbages.len(),
        "run finished"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_event(step: u32, event: &Event) {
    match *event {
        Event::ResourcePlanted { cell, kind } => {
            info!(step, ?cell, ?kind, "resource planted");
        }
        Event::HivePlaced { actor, position } => {
            info!(step, actor = actor.get(), ?position, "hive placed");
        }
        Event::HiveSpawnerPlaced { actor, position } => {
            info!(step, actor = actor.get(), ?position, "hive spawner placed");
        }
        Event::PigeonSpawnerPlaced { actor, position } => {
            info!(step, actor = actor.get(), ?position, "pigeon spawner placed");
        }
        Event::HiveSpawned {
            spawner,
            hive,
            position,
        } => {
            info!(
                step,
                spawner = spawner.get(),
                hive = hive.get(),
                ?position,
                "hive spawned"
            );
        }
        Event::BeeFired { hive, bee, target } => {
            info!(
                step,
                hive = hive.get(),
                bee = bee.get(),
                target = target.get(),
                "bee fired"
            );
        }
        Event::EnemySpawned {
            spawner,
            enemy,
            position,
            target,
        } => {
            info!(
                step,
                spawner = spawner.get(),
                enemy = enemy.get(),
                ?position,
                ?target,
                "pigeon released"
            );
        }
        Event::EnemyStruck {
            enemy,
            bee,
            position,
        } => {
            info!(
                step,
                enemy = enemy.get(),
                bee = bee.get(),
                ?position,
                "enemy struck"
            );
        }
        Event::BeeExpiryDeferred { bee } => {
            info!(step, bee = bee.get(), "bee expiry deferred");
        }
        Event::BeeExpired { bee, position } => {
            info!(step, bee = bee.get(), ?position, "bee expired");
        }
        Event::ResourceEaten { cell, enemy } => {
            info!(step, ?cell, enemy = enemy.get(), "resource eaten");
        }
        Event::EnemyDeparted { enemy } => {
            info!(step, enemy = enemy.get(), "pigeon departed");
        }
        Event::EnemyExpired { enemy } => {
            info!(step, enemy = enemy.get(), "pigeon expired");
        }
    }
}
