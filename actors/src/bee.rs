//! Homing guard-bee projectile.
//!
//! The bee chases an aim point with an integer rasterization plan built
//! from whole-unit cardinal moves. The plan (absolute deltas, step signs,
//! error accumulator) persists across steps and is rebuilt only when the
//! aim moves. Per-axis stall counters break livelocks with forced unit
//! moves, and every unit move is followed by a proximity hit check.

use std::num::NonZeroU32;

use garden_defence_core::{
    config::BeeConfig, timing::FixedTimer, ActorId, Body, EnemyId, Event, Heading, Position,
};

use crate::StepContext;

/// What a guard bee is flying toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AimTarget {
    /// A tracked enemy. If the handle stops resolving, the bee returns to
    /// its spawn point instead.
    Enemy(EnemyId),
    /// A fixed position.
    Fixed(Position),
}

/// Homing projectile launched by a hive.
#[derive(Debug)]
pub struct GuardBee {
    id: ActorId,
    body: Body,
    spawn_point: Position,
    target: AimTarget,
    speed: i32,
    lifespan: FixedTimer,
    expiry_deferred: bool,
    // Rasterization plan, persisted across steps.
    plan_built: bool,
    aim: Position,
    step_dx: i32,
    step_dy: i32,
    step_sx: i32,
    step_sy: i32,
    step_err: i32,
    // Stall accounting against the previous step's end position.
    last_x: i32,
    last_y: i32,
    stall_x: u32,
    stall_y: u32,
    jitter_x: i32,
    jitter_y: i32,
}

impl GuardBee {
    /// Creates a bee at the provided position chasing the provided aim.
    #[must_use]
    pub fn new(id: ActorId, position: Position, target: AimTarget, config: &BeeConfig) -> Self {
        Self {
            id,
            body: Body::new(position),
            spawn_point: position,
            target,
            speed: config.speed.get() as i32,
            lifespan: FixedTimer::new(config.lifespan),
            expiry_deferred: false,
            plan_built: false,
            aim: position,
            step_dx: 0,
            step_dy: 0,
            step_sx: 1,
            step_sy: 1,
            step_err: 0,
            last_x: position.x(),
            last_y: position.y(),
            stall_x: 0,
            stall_y: 0,
            jitter_x: 1,
            jitter_y: 1,
        }
    }

    /// Identifier of the bee.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Current position of the bee.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position()
    }

    /// Reports whether the bee is flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.body.is_marked_for_removal()
    }

    fn resolve_aim(&self, ctx: &StepContext<'_>) -> Position {
        match self.target {
            AimTarget::Enemy(id) => ctx
                .enemies
                .position_of(id)
                .unwrap_or(self.spawn_point),
            AimTarget::Fixed(position) => position,
        }
    }

    fn rebuild_plan_if_aim_moved(&mut self, aim: Position) {
        if self.plan_built && aim == self.aim {
            return;
        }
        self.aim = aim;
        let dx = aim.x() - self.body.position().x();
        let dy = aim.y() - self.body.position().y();
        self.step_dx = dx.abs();
        self.step_dy = dy.abs();
        self.step_sx = if dx >= 0 { 1 } else { -1 };
        self.step_sy = if dy >= 0 { 1 } else { -1 };
        self.step_err = 0;
        self.plan_built = true;
        if let Some(heading) = Heading::dominant(dx, dy) {
            self.body.face(heading);
        }
    }

    /// Strikes the nearest enemy within one tile-size of the bee, if any:
    /// the bee snaps onto the enemy and both are flagged for removal.
    /// Returns `true` on a strike, which ends the bee's step.
    fn try_hit(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) -> bool {
        let radius = ctx.world.grid().tile_size();
        let mut nearest: Option<(EnemyId, Position, i32)> = None;
        for pigeon in ctx.enemies.iter() {
            let distance = self.body.position().distance(pigeon.position());
            if distance > radius {
                continue;
            }
            let closer = match nearest {
                Some((_, _, best)) => distance < best,
                None => true,
            };
            if closer {
                nearest = Some((pigeon.id(), pigeon.position(), distance));
            }
        }
        let Some((enemy, position, _)) = nearest else {
            return false;
        };
        self.body.set_position(position);
        self.body.mark_for_removal();
        ctx.enemies.mark_for_removal(enemy);
        events.push(Event::EnemyStruck {
            enemy,
            bee: self.id,
            position,
        });
        true
    }

    pub(crate) fn tick(&mut self, ctx: &mut StepContext<'_>, events: &mut Vec<Event>) {
        let aim = self.resolve_aim(ctx);
        self.rebuild_plan_if_aim_moved(aim);

        let mut budget = self.speed;
        let mut forced_x = false;
        let mut forced_y = false;

        if self.stall_x >= 2 {
            let x = self.body.position().x();
            let heading = if x < self.aim.x() {
                Heading::East
            } else if x > self.aim.x() {
                Heading::West
            } else {
                Heading::horizontal(self.jitter_x)
            };
            self.body.nudge(heading);
            if self.try_hit(ctx, events) {
                return;
            }
            self.jitter_x = -self.jitter_x;
            budget -= 1;
            forced_x = true;
        }
        if self.stall_y >= 2 {
            let y = self.body.position().y();
            let heading = if y < self.aim.y() {
                Heading::South
            } else if y > self.aim.y() {
                Heading::North
            } else {
                Heading::vertical(self.jitter_y)
            };
            self.body.nudge(heading);
            if self.try_hit(ctx, events) {
                return;
            }
            self.jitter_y = -self.jitter_y;
            budget -= 1;
            forced_y = true;
        }

        // A forced nudge along an axis the plan considers flat would be
        // cancelled straight away by the normal pass; skip it instead.
        let skip_normal = (forced_x && self.step_dx == 0) || (forced_y && self.step_dy == 0);

        if !skip_normal {
            while budget > 0 && self.body.position() != self.aim {
                if self.step_dx >= self.step_dy {
                    if self.body.position().x() == self.aim.x() {
                        // Primary axis already aligned: the remaining
                        // budget flows into the minor axis.
                        self.body.nudge(Heading::vertical(self.step_sy));
                        budget -= 1;
                        if self.try_hit(ctx, events) {
                            return;
                        }
                        continue;
                    }
                    self.body.nudge(Heading::horizontal(self.step_sx));
                    budget -= 1;
                    if self.try_hit(ctx, events) {
                        return;
                    }
                    self.step_err += self.step_dy;
                    if self.step_err >= self.step_dx
                        && self.body.position().y() != self.aim.y()
                        && budget > 0
                    {
                        self.body.nudge(Heading::vertical(self.step_sy));
                        budget -= 1;
                        if self.try_hit(ctx, events) {
                            return;
                        }
                        self.step_err -= self.step_dx;
                    }
                } else {
                    if self.body.position().y() == self.aim.y() {
                        self.body.nudge(Heading::horizontal(self.step_sx));
                        budget -= 1;
                        if self.try_hit(ctx, events) {
                            return;
                        }
                        continue;
                    }
                    self.body.nudge(Heading::vertical(self.step_sy));
                    budget -= 1;
                    if self.try_hit(ctx, events) {
                        return;
                    }
                    self.step_err += self.step_dx;
                    if self.step_err >= self.step_dy
                        && self.body.position().x() != self.aim.x()
                        && budget > 0
                    {
                        self.body.nudge(Heading::horizontal(self.step_sx));
                        budget -= 1;
                        if self.try_hit(ctx, events) {
                            return;
                        }
                        self.step_err -= self.step_dy;
                    }
                }
            }
        }

        let end = self.body.position();
        if end.x() == self.last_x {
            self.stall_x += 1;
        } else {
            self.stall_x = 0;
        }
        if end.y() == self.last_y {
            self.stall_y += 1;
        } else {
            self.stall_y = 0;
        }
        self.last_x = end.x();
        self.last_y = end.y();

        // Safety check in case the step started overlapped with an enemy.
        if self.try_hit(ctx, events) {
            return;
        }

        self.lifespan.tick();
        if !self.lifespan.is_finished() {
            return;
        }
        // Expiring with an enemy in reach counts as a hit so both vanish
        // at the same place and step.
        let radius = ctx.world.grid().tile_size();
        let reachable = ctx
            .enemies
            .iter()
            .find(|pigeon| end.distance(pigeon.position()) <= radius)
            .map(|pigeon| pigeon.id());
        if let Some(enemy) = reachable {
            ctx.enemies.mark_for_removal(enemy);
            self.body.mark_for_removal();
            events.push(Event::EnemyStruck {
                enemy,
                bee: self.id,
                position: end,
            });
        } else if !self.expiry_deferred {
            self.expiry_deferred = true;
            self.lifespan = FixedTimer::new(NonZeroU32::MIN);
            events.push(Event::BeeExpiryDeferred { bee: self.id });
        } else {
            self.body.mark_for_removal();
            events.push(Event::BeeExpired {
                bee: self.id,
                position: end,
            });
        }
    }
}
