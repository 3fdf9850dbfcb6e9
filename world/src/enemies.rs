//! Pigeon enemies and the registry that owns them.
//!
//! Pigeons live outside the actor collection: hives and bees observe them
//! through [`EnemyRegistry`] lookups keyed by [`EnemyId`], never through
//! references. The registry purges flagged pigeons at the start of its own
//! tick pass, so an enemy struck during a step stays position-resolvable
//! for the remainder of that step.

use garden_defence_core::{
    config::PigeonConfig, timing::FixedTimer, Body, CellCoord, EnemyId, Event, Position,
    ResourceKind,
};

use crate::{query, World};

/// A pigeon raiding the garden for cabbages.
#[derive(Debug)]
pub struct Pigeon {
    id: EnemyId,
    body: Body,
    spawn_point: Position,
    lifespan: FixedTimer,
    attacking: bool,
    target: Option<CellCoord>,
}

impl Pigeon {
    fn new(id: EnemyId, position: Position, target: CellCoord, config: &PigeonConfig) -> Self {
        let mut body = Body::new(position);
        body.set_speed(config.speed.get() as i32);
        Self {
            id,
            body,
            spawn_point: position,
            lifespan: FixedTimer::new(config.lifespan),
            attacking: true,
            target: Some(target),
        }
    }

    /// Identifier of the pigeon.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Current position of the pigeon.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.body.position()
    }

    /// Reports whether the pigeon is still hunting a cabbage.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Reports whether the pigeon is flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.body.is_marked_for_removal()
    }

    fn face_toward(&mut self, goal: Position) {
        let dx = f64::from(goal.x() - self.body.position().x());
        let dy = f64::from(goal.y() - self.body.position().y());
        self.body.face_degrees(dy.atan2(dx).to_degrees() as i32);
    }

    fn tick(&mut self, world: &mut World, events: &mut Vec<Event>) {
        let tile_size = world.grid().tile_size();

        if !self.attacking {
            self.face_toward(self.spawn_point);
        } else if let Some(cell) = self.target {
            self.face_toward(world.cell_center(cell));
        } else {
            self.face_toward(world.center());
        }
        self.body.advance();

        self.lifespan.tick();
        if self.lifespan.is_finished() && !self.body.is_marked_for_removal() {
            self.body.mark_for_removal();
            events.push(Event::EnemyExpired { enemy: self.id });
        }

        if !self.attacking
            && self.body.position().distance(self.spawn_point) < tile_size
            && !self.body.is_marked_for_removal()
        {
            self.body.mark_for_removal();
            events.push(Event::EnemyDeparted { enemy: self.id });
        }

        let cells = query::resource_cells(world, ResourceKind::Cabbage);
        let mut nearest: Option<(CellCoord, i32)> = None;
        for cell in cells {
            let distance = self.body.position().distance(world.cell_center(cell));
            let closer = match nearest {
                Some((_, best)) => distance < best,
                None => true,
            };
            if closer {
                nearest = Some((cell, distance));
            }
        }
        match nearest {
            Some((cell, distance)) => {
                self.target = Some(cell);
                if self.attacking && distance < tile_size {
                    if world.consume_resource(cell, ResourceKind::Cabbage) {
                        events.push(Event::ResourceEaten {
                            cell,
                            enemy: self.id,
                        });
                    }
                    self.attacking = false;
                }
            }
            None => self.attacking = false,
        }
    }
}

/// Ordered collection of live pigeons with monotonic identifiers.
#[derive(Debug, Default)]
pub struct EnemyRegistry {
    pigeons: Vec<Pigeon>,
    next_id: u32,
}

impl EnemyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new pigeon aimed at the provided cabbage tile.
    pub fn spawn(
        &mut self,
        position: Position,
        target: CellCoord,
        config: &PigeonConfig,
    ) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id += 1;
        self.pigeons.push(Pigeon::new(id, position, target, config));
        id
    }

    /// Purges flagged pigeons, then ticks the survivors in insertion
    /// order.
    pub fn run_tick(&mut self, world: &mut World, events: &mut Vec<Event>) {
        self.cleanup();
        for pigeon in &mut self.pigeons {
            pigeon.tick(world, events);
        }
    }

    fn cleanup(&mut self) {
        self.pigeons
            .retain(|pigeon| !pigeon.is_marked_for_removal());
    }

    /// Resolves a pigeon's position, including pigeons flagged for
    /// removal but not yet purged. `None` means the handle is dangling.
    #[must_use]
    pub fn position_of(&self, id: EnemyId) -> Option<Position> {
        self.pigeons
            .iter()
            .find(|pigeon| pigeon.id == id)
            .map(Pigeon::position)
    }

    /// Flags the identified pigeon for removal. Unknown handles and
    /// already-flagged pigeons are no-ops.
    pub fn mark_for_removal(&mut self, id: EnemyId) {
        if let Some(pigeon) = self.pigeons.iter_mut().find(|pigeon| pigeon.id == id) {
            pigeon.body.mark_for_removal();
        }
    }

    /// Live pigeons in insertion order, including flagged-but-unpurged
    /// ones.
    pub fn iter(&self) -> impl Iterator<Item = &Pigeon> {
        self.pigeons.iter()
    }

    /// Number of pigeons currently held, flagged ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pigeons.len()
    }

    /// Reports whether the registry holds no pigeons at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pigeons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EnemyRegistry;
    use crate::World;
    use garden_defence_core::{
        config::PigeonConfig, CellCoord, Event, Position, ResourceKind,
    };
    use std::num::NonZeroU32;

    fn tile(size: u32) -> NonZeroU32 {
        NonZeroU32::new(size).expect("tile size")
    }

    fn short_lived(speed: u32, lifespan: u32) -> PigeonConfig {
        PigeonConfig::new(speed, lifespan).expect("valid config")
    }

    #[test]
    fn pigeon_flies_in_eats_and_returns_home() {
        let mut world = World::new(4, 4, tile(50));
        let cabbage = CellCoord::new(0, 0);
        assert!(world.plant(cabbage, ResourceKind::Cabbage));

        let mut registry = EnemyRegistry::new();
        let config = short_lived(5, 3000);
        let spawn = Position::new(100, 100);
        let id = registry.spawn(spawn, cabbage, &config);

        let mut events = Vec::new();
        let mut eaten_at = None;
        let mut departed_at = None;
        for step in 1..=60 {
            world.cleanup_resources();
            registry.run_tick(&mut world, &mut events);
            for event in events.drain(..) {
                match event {
                    Event::ResourceEaten { cell, enemy } => {
                        assert_eq!(cell, cabbage);
                        assert_eq!(enemy, id);
                        eaten_at = Some(step);
                    }
                    Event::EnemyDeparted { enemy } => {
                        assert_eq!(enemy, id);
                        departed_at = Some(step);
                    }
                    other => panic!("unexpected event: {other:?}"),
                }
            }
        }
        let eaten_at = eaten_at.expect("pigeon reached the cabbage");
        let departed_at = departed_at.expect("pigeon returned to its spawn");
        assert!(eaten_at < departed_at);
        // Departed pigeons are purged on the registry's next tick pass.
        registry.run_tick(&mut world, &mut events);
        assert!(registry.is_empty());
    }

    #[test]
    fn flagged_pigeons_stay_resolvable_until_the_next_tick_pass() {
        let mut world = World::new(4, 4, tile(50));
        let mut registry = EnemyRegistry::new();
        let config = short_lived(1, 3000);
        let id = registry.spawn(Position::new(100, 100), CellCoord::new(0, 0), &config);

        registry.mark_for_removal(id);
        assert!(registry.position_of(id).is_some());

        let mut events = Vec::new();
        registry.run_tick(&mut world, &mut events);
        assert_eq!(registry.position_of(id), None);
    }

    #[test]
    fn lifespan_expiry_flags_the_pigeon_exactly_once() {
        let mut world = World::new(4, 4, tile(50));
        assert!(world.plant(CellCoord::new(0, 0), ResourceKind::Cabbage));
        let mut registry = EnemyRegistry::new();
        let config = short_lived(1, 2);
        let id = registry.spawn(Position::new(200, 0), CellCoord::new(0, 0), &config);

        let mut events = Vec::new();
        registry.run_tick(&mut world, &mut events);
        assert!(events.is_empty());
        registry.run_tick(&mut world, &mut events);
        assert_eq!(events, vec![Event::EnemyExpired { enemy: id }]);
    }

    #[test]
    fn identifiers_are_never_reused() {
        let mut world = World::new(4, 4, tile(50));
        let mut registry = EnemyRegistry::new();
        let config = short_lived(1, 1);
        let first = registry.spawn(Position::new(0, 0), CellCoord::new(0, 0), &config);
        let mut events = Vec::new();
        registry.run_tick(&mut world, &mut events);
        registry.run_tick(&mut world, &mut events);
        assert!(registry.is_empty());
        let second = registry.spawn(Position::new(0, 0), CellCoord::new(0, 0), &config);
        assert_ne!(first, second);
        assert!(second.get() > first.get());
    }
}
