//! Detection-and-fire hive.

use garden_defence_core::{
    config::HiveConfig,
    timing::{FinishedEdge, RepeatingTimer},
    ActorId, Body, EnemyId, Event, Position,
};

use crate::{bee::AimTarget, Actor, GuardBee, SpawnQueue, StepContext};

/// Stationary structure that launches one guard bee per re-arm at the
/// nearest enemy inside its detection radius.
#[derive(Debug)]
pub struct Hive {
    id: ActorId,
    body: Body,
    detection_distance: i64,
    loaded: bool,
    rearm: RepeatingTimer,
    rearm_edge: FinishedEdge,
}

impl Hive {
    /// Creates a hive at the provided position. Hives start loaded, so
    /// the first shot does not wait for a re-arm.
    #[must_use]
    pub fn new(id: ActorId, position: Position, config: &HiveConfig) -> Self {
        Self {
            id,
            body: Body::new(position),
            detection_distance: i64::from(config.detection_distance.get()),
            loaded: true,
            rearm: RepeatingTimer::new(config.rearm_period),
            rearm_edge: FinishedEdge::new(),
        }
    }

    /// Identifier of the hive.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Position of the hive.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position()
    }

    /// Reports whether the hive is armed to fire.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reports whether the hive is flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.body.is_marked_for_removal()
    }

    pub(crate) fn tick(&mut self) {
        self.rearm.tick();
        if self.rearm_edge.observe(self.rearm.is_finished()) {
            self.loaded = true;
        }
    }

    pub(crate) fn interact(
        &mut self,
        ctx: &mut StepContext<'_>,
        queue: &mut SpawnQueue<'_>,
        events: &mut Vec<Event>,
    ) {
        if !self.loaded {
            return;
        }

        let origin = self.body.position();
        let mut nearest: Option<(EnemyId, i64)> = None;
        for pigeon in ctx.enemies.iter() {
            let d2 = origin.distance_squared(pigeon.position());
            let closer = match nearest {
                Some((_, best)) => d2 < best,
                None => true,
            };
            if closer {
                nearest = Some((pigeon.id(), d2));
            }
        }

        let Some((target, d2)) = nearest else {
            return;
        };
        if d2 > self.detection_distance * self.detection_distance {
            return;
        }

        let bee = queue.reserve_id();
        queue.enqueue(Actor::GuardBee(GuardBee::new(
            bee,
            origin,
            AimTarget::Enemy(target),
            &ctx.config.bee,
        )));
        self.loaded = false;
        // A rollover landing on the very next tick must not re-arm us.
        self.rearm_edge.suppress_next();
        events.push(Event::BeeFired {
            hive: self.id,
            bee,
            target,
        });
    }
}
