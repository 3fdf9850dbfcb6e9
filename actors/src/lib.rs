#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Actor collection and actor behaviours for Garden Defence.
//!
//! Actors follow a two-phase protocol driven once per step: a tick phase
//! (autonomous state advancement) and an interact phase (world-observing
//! behaviour that may produce new actors). Mutation of the collection is
//! deferred: spawns land in a pending buffer and flagged actors are purged
//! at the next cleanup point, so iteration order stays stable within a
//! phase.

use garden_defence_core::{
    config::SimulationConfig, ActorId, ActorKind, Event, Position,
};
use garden_defence_world::{enemies::EnemyRegistry, World};

mod bee;
mod hive;
mod spawners;

pub use bee::{AimTarget, GuardBee};
pub use hive::Hive;
pub use spawners::{HiveSpawner, PigeonSpawner};

/// Mutable simulation state handed to actors during a phase.
pub struct StepContext<'a> {
    /// Authoritative tile grid with its stacked resources.
    pub world: &'a mut World,
    /// Registry of live pigeons.
    pub enemies: &'a mut EnemyRegistry,
    /// Validated gameplay configuration.
    pub config: &'a SimulationConfig,
}

/// A managed actor, dispatched by kind.
#[derive(Debug)]
pub enum Actor {
    /// Detection-and-fire structure.
    Hive(Hive),
    /// Homing projectile.
    GuardBee(GuardBee),
    /// Timed hive constructor.
    HiveSpawner(HiveSpawner),
    /// Timed pigeon releaser.
    PigeonSpawner(PigeonSpawner),
}

impl Actor {
    /// Identifier of the actor.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        match self {
            Self::Hive(hive) => hive.id(),
            Self::GuardBee(bee) => bee.id(),
            Self::HiveSpawner(spawner) => spawner.id(),
            Self::PigeonSpawner(spawner) => spawner.id(),
        }
    }

    /// Kind of the actor.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        match self {
            Self::Hive(_) => ActorKind::Hive,
            Self::GuardBee(_) => ActorKind::GuardBee,
            Self::HiveSpawner(_) => ActorKind::HiveSpawner,
            Self::PigeonSpawner(_) => ActorKind::PigeonSpawner,
        }
    }

    /// Current position of the actor.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Hive(hive) => hive.position(),
            Self::GuardBee(bee) => bee.position(),
            Self::HiveSpawner(spawner) => spawner.position(),
            Self::PigeonSpawner(spawner) => spawner.position(),
        }
    }

    /// Reports whether the actor is flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        match self {
            Self::Hive(hive) => hive.is_marked_for_removal(),
            Self::GuardBee(bee) => bee.is_marked_for_removal(),
            Self::HiveSpawner(_) | Self::PigeonSpawner(_) => false,
        }
    }

    /// Reports whether the actor participates in the interact phase.
    #[must_use]
    pub const fn supports_interact(&self) -> bool {
        !matches!(self, Self::GuardBee(_))
    }

    fn tick(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) {
        match self {
            Self::Hive(hive) => hive.tick(),
            Self::GuardBee(bee) => bee.tick(ctx, events),
            Self::HiveSpawner(spawner) => spawner.tick(),
            Self::PigeonSpawner(spawner) => spawner.tick(),
        }
    }

    fn interact(
        &mut self,
        ctx: &mut StepContext<'_>,
        queue: &mut SpawnQueue<'_>,
        events: &mut Vec<Event>,
    ) {
        match self {
            Self::Hive(hive) => hive.interact(ctx, queue, events),
            Self::GuardBee(_) => {}
            Self::HiveSpawner(spawner) => spawner.interact(ctx, queue, events),
            Self::PigeonSpawner(spawner) => spawner.interact(ctx, events),
        }
    }
}

/// Deferred-spawn handle given to actors during the interact phase.
///
/// Spawns requested through the queue land in the manager's pending buffer
/// and are admitted at the start of the next interact phase, so an actor
/// produced during a pass is never ticked or interacted within that pass.
pub struct SpawnQueue<'a> {
    pending: &'a mut Vec<Actor>,
    next_id: &'a mut u32,
    hive_sites: Vec<Position>,
}

impl SpawnQueue<'_> {
    /// Allocates a fresh actor identifier.
    #[must_use]
    pub fn reserve_id(&mut self) -> ActorId {
        let id = ActorId::new(*self.next_id);
        *self.next_id += 1;
        id
    }

    /// Buffers an actor for admission at the next interact phase.
    pub fn enqueue(&mut self, actor: Actor) {
        self.pending.push(actor);
    }

    /// Reports whether a hive already occupies the provided position,
    /// counting both admitted actors and spawns buffered this pass.
    #[must_use]
    pub fn hive_occupies(&self, position: Position) -> bool {
        self.hive_sites.contains(&position)
            || self
                .pending
                .iter()
                .any(|actor| actor.kind() == ActorKind::Hive && actor.position() == position)
    }
}

/// Ordered actor collection with deferred admission and removal.
#[derive(Debug, Default)]
pub struct ActorManager {
    active: Vec<Actor>,
    pending: Vec<Actor>,
    next_id: u32,
}

impl ActorManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh actor identifier.
    #[must_use]
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Buffers an actor for admission at the next interact phase. Safe to
    /// call from any phase.
    pub fn spawn(&mut self, actor: Actor) {
        self.pending.push(actor);
    }

    /// Tick phase: purges flagged actors, then ticks the survivors in
    /// insertion order, re-checking the removal flag per actor.
    pub fn run_tick(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) {
        self.cleanup();
        for actor in &mut self.active {
            if actor.is_marked_for_removal() {
                continue;
            }
            actor.tick(ctx, events);
        }
    }

    /// Interact phase: admits pending spawns in order, then interacts the
    /// interaction-capable actors over a stable snapshot of the admitted
    /// list, skipping flagged entries.
    pub fn run_interact(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) {
        let Self {
            active,
            pending,
            next_id,
        } = self;
        active.append(pending);

        let hive_sites = active
            .iter()
            .filter(|actor| actor.kind() == ActorKind::Hive)
            .map(Actor::position)
            .collect();
        let mut queue = SpawnQueue {
            pending,
            next_id,
            hive_sites,
        };

        // Spawns go to pending, so the admitted list cannot grow under us.
        for index in 0..active.len() {
            if !active[index].supports_interact() || active[index].is_marked_for_removal() {
                continue;
            }
            active[index].interact(ctx, &mut queue, events);
        }
    }

    fn cleanup(&mut self) {
        self.active.retain(|actor| !actor.is_marked_for_removal());
    }

    /// Admitted actors in insertion order, flagged ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.active.iter()
    }

    /// Number of admitted actors, flagged ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Reports whether no actors have been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
