//! Timed spawners: hive construction and pigeon release.

use std::num::NonZeroU32;

use garden_defence_core::{
    timing::RepeatingTimer, ActorId, Body, CellCoord, Event, Position, ResourceKind,
};
use garden_defence_world::query;

use crate::{Actor, Hive, SpawnQueue, StepContext};

/// Constructs hives on a repeating timer, up to a lifetime cap.
#[derive(Debug)]
pub struct HiveSpawner {
    id: ActorId,
    body: Body,
    timer: RepeatingTimer,
    spawned: u32,
}

impl HiveSpawner {
    /// Creates a hive spawner with the provided spawn period.
    #[must_use]
    pub fn new(id: ActorId, position: Position, period: NonZeroU32) -> Self {
        Self {
            id,
            body: Body::new(position),
            timer: RepeatingTimer::new(period),
            spawned: 0,
        }
    }

    /// Identifier of the spawner.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Position of the spawner.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position()
    }

    /// Number of hives constructed so far.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    pub(crate) fn tick(&mut self) {
        self.timer.tick();
    }

    pub(crate) fn interact(
        &mut self,
        ctx: &mut StepContext<'_>,
        queue: &mut SpawnQueue<'_>,
        events: &mut Vec<Event>,
    ) {
        if self.spawned >= ctx.config.hive_spawner_max_spawns {
            return;
        }
        if !self.timer.is_finished() {
            return;
        }

        let Some(cell) = ctx.world.cell_containing(self.body.position()) else {
            return;
        };
        let snapped = ctx.world.cell_center(cell);
        if queue.hive_occupies(snapped) {
            return;
        }

        let hive = queue.reserve_id();
        queue.enqueue(Actor::Hive(Hive::new(hive, snapped, &ctx.config.hive)));
        self.spawned += 1;
        events.push(Event::HiveSpawned {
            spawner: self.id,
            hive,
            position: snapped,
        });
    }
}

/// Releases pigeons on a repeating timer, aimed at the nearest
/// cabbage-bearing tile.
#[derive(Debug)]
pub struct PigeonSpawner {
    id: ActorId,
    body: Body,
    timer: RepeatingTimer,
}

impl PigeonSpawner {
    /// Creates a pigeon spawner with the provided spawn period.
    #[must_use]
    pub fn new(id: ActorId, position: Position, period: NonZeroU32) -> Self {
        Self {
            id,
            body: Body::new(position),
            timer: RepeatingTimer::new(period),
        }
    }

    /// Identifier of the spawner.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Position of the spawner.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position()
    }

    pub(crate) fn tick(&mut self) {
        self.timer.tick();
    }

    pub(crate) fn interact(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) {
        let cells = query::resource_cells(ctx.world, ResourceKind::Cabbage);
        let origin = self.body.position();
        let mut nearest: Option<(CellCoord, i32)> = None;
        for cell in cells {
            let distance = origin.distance(ctx.world.cell_center(cell));
            let closer = match nearest {
                Some((_, best)) => distance < best,
                None => true,
            };
            if closer {
                nearest = Some((cell, distance));
            }
        }
        // No cabbages means nothing worth raiding; the timer keeps
        // rolling regardless.
        let Some((target, _)) = nearest else {
            return;
        };
        if !self.timer.is_finished() {
            return;
        }

        let enemy = ctx.enemies.spawn(origin, target, &ctx.config.pigeon);
        events.push(Event::EnemySpawned {
            spawner: self.id,
            enemy,
            position: origin,
            target,
        });
    }
}
