#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration for Garden Defence.
//!
//! A [`GameState`] glues the world, the enemy registry, and the actor
//! collection together. All mutation flows through [`apply`]: adapters
//! submit [`Command`] values and receive broadcast [`Event`] values
//! describing everything that happened. Read access goes through the
//! deterministic views in [`query`].

use std::num::NonZeroU32;

use garden_defence_actors::{Actor, ActorManager, Hive, HiveSpawner, PigeonSpawner, StepContext};
use garden_defence_core::{config::SimulationConfig, Command, Event};
use garden_defence_world::{enemies::EnemyRegistry, World};

/// Complete simulation state for one session.
#[derive(Debug)]
pub struct GameState {
    world: World,
    enemies: EnemyRegistry,
    actors: ActorManager,
    config: SimulationConfig,
}

impl GameState {
    /// Creates a session over an empty world with the provided grid
    /// dimensions and configuration.
    #[must_use]
    pub fn new(columns: u32, rows: u32, tile_size: NonZeroU32, config: SimulationConfig) -> Self {
        Self {
            world: World::new(columns, rows, tile_size),
            enemies: EnemyRegistry::new(),
            actors: ActorManager::new(),
            config,
        }
    }

    /// The authoritative world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The gameplay configuration the session runs with.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

/// Executes a command against the session, appending the resulting events.
///
/// `Command::Tick` advances the simulation by exactly one step: resource
/// cleanup, enemy registry tick, actor tick phase, actor interact phase.
/// Placement commands buffer their actor for admission at the next step's
/// interact phase.
pub fn apply(state: &mut GameState, command: Command, events: &mut Vec<Event>) {
    match command {
        Command::Tick => step(state, events),
        Command::PlantResource { cell, kind } => {
            if state.world.plant(cell, kind) {
                events.push(Event::ResourcePlanted { cell, kind });
            }
        }
        Command::PlaceHive { position } => {
            let actor = state.actors.allocate_id();
            state
                .actors
                .spawn(Actor::Hive(Hive::new(actor, position, &state.config.hive)));
            events.push(Event::HivePlaced { actor, position });
        }
        Command::PlaceHiveSpawner { position, period } => {
            let actor = state.actors.allocate_id();
            state
                .actors
                .spawn(Actor::HiveSpawner(HiveSpawner::new(actor, position, period)));
            events.push(Event::HiveSpawnerPlaced { actor, position });
        }
        Command::PlacePigeonSpawner { position, period } => {
            let actor = state.actors.allocate_id();
            state.actors.spawn(Actor::PigeonSpawner(PigeonSpawner::new(
                actor, position, period,
            )));
            events.push(Event::PigeonSpawnerPlaced { actor, position });
        }
    }
}

fn step(state: &mut GameState, events: &mut Vec<Event>) {
    let GameState {
        world,
        enemies,
        actors,
        config,
    } = state;

    world.cleanup_resources();
    enemies.run_tick(world, events);

    let mut ctx = StepContext {
        world,
        enemies,
        config,
    };
    actors.run_tick(&mut ctx, events);
    actors.run_interact(&mut ctx, events);
}

/// Deterministic read-only views over a session.
pub mod query {
    use garden_defence_core::{ActorId, ActorKind, CellCoord, EnemyId, Position, ResourceKind};
    use garden_defence_world::query as world_query;

    use super::GameState;

    /// Snapshot of one admitted actor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActorView {
        /// Identifier of the actor.
        pub id: ActorId,
        /// Kind of the actor.
        pub kind: ActorKind,
        /// Position of the actor.
        pub position: Position,
    }

    /// Snapshot of one live pigeon.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EnemyView {
        /// Identifier of the pigeon.
        pub id: EnemyId,
        /// Position of the pigeon.
        pub position: Position,
        /// Whether the pigeon is still hunting a cabbage.
        pub attacking: bool,
    }

    /// Admitted actors sorted by identifier, flagged ones included.
    #[must_use]
    pub fn actors(state: &GameState) -> Vec<ActorView> {
        let mut views: Vec<ActorView> = state
            .actors
            .iter()
            .map(|actor| ActorView {
                id: actor.id(),
                kind: actor.kind(),
                position: actor.position(),
            })
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    /// Live pigeons sorted by identifier, flagged ones included.
    #[must_use]
    pub fn enemies(state: &GameState) -> Vec<EnemyView> {
        let mut views: Vec<EnemyView> = state
            .enemies
            .iter()
            .map(|pigeon| EnemyView {
                id: pigeon.id(),
                position: pigeon.position(),
                attacking: pigeon.is_attacking(),
            })
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    /// Cells holding at least one unconsumed resource of the provided
    /// kind, in row-major order.
    #[must_use]
    pub fn resource_cells(state: &GameState, kind: ResourceKind) -> Vec<CellCoord> {
        world_query::resource_cells(&state.world, kind)
    }
}
