//! Guard-bee pursuit behaviour driven through the actor manager.

use std::num::NonZeroU32;

use garden_defence_actors::{Actor, ActorManager, AimTarget, GuardBee, StepContext};
use garden_defence_core::{
    config::{BeeConfig, PigeonConfig, SimulationConfig},
    CellCoord, Event, Position,
};
use garden_defence_world::{enemies::EnemyRegistry, World};

fn tile(size: u32) -> NonZeroU32 {
    NonZeroU32::new(size).expect("tile size")
}

fn config_with_bee(speed: u32, lifespan: u32) -> SimulationConfig {
    SimulationConfig {
        bee: BeeConfig::new(speed, lifespan).expect("valid bee config"),
        ..SimulationConfig::default()
    }
}

fn step(
    manager: &mut ActorManager,
    world: &mut World,
    enemies: &mut EnemyRegistry,
    config: &SimulationConfig,
    events: &mut Vec<Event>,
) {
    let mut ctx = StepContext {
        world,
        enemies,
        config,
    };
    manager.run_tick(&mut ctx, events);
    manager.run_interact(&mut ctx, events);
}

fn bee_position(manager: &ActorManager) -> Position {
    manager
        .iter()
        .find_map(|actor| match actor {
            Actor::GuardBee(bee) => Some(bee.position()),
            _ => None,
        })
        .expect("a live bee")
}

/// Spawns a bee, runs one step to admit it, and returns the pieces needed
/// to drive it.
fn admitted_bee(
    world_tile: u32,
    spawn: Position,
    target: AimTarget,
    config: SimulationConfig,
) -> (ActorManager, World, EnemyRegistry, SimulationConfig) {
    let mut manager = ActorManager::new();
    let mut world = World::new(40, 40, tile(world_tile));
    let mut enemies = EnemyRegistry::new();
    let id = manager.allocate_id();
    manager.spawn(Actor::GuardBee(GuardBee::new(id, spawn, target, &config.bee)));
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(events.is_empty());
    assert_eq!(bee_position(&manager), spawn);
    (manager, world, enemies, config)
}

#[test]
fn reaches_a_fixed_aim_in_three_steps() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(4, 2)),
        config_with_bee(2, 300),
    );
    let mut events = Vec::new();
    let mut positions = Vec::new();
    for _ in 0..3 {
        step(&mut manager, &mut world, &mut enemies, &config, &mut events);
        positions.push(bee_position(&manager));
    }
    assert_eq!(
        positions,
        vec![Position::new(2, 0), Position::new(3, 1), Position::new(4, 2)]
    );
    assert!(events.is_empty());
}

#[test]
fn diagonal_ties_step_both_axes_every_step() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(3, 3)),
        config_with_bee(2, 300),
    );
    let mut events = Vec::new();
    let mut positions = Vec::new();
    for _ in 0..3 {
        step(&mut manager, &mut world, &mut enemies, &config, &mut events);
        positions.push(bee_position(&manager));
    }
    assert_eq!(
        positions,
        vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)]
    );
}

#[test]
fn horizontal_pursuit_recovers_from_stall_jitter() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(10, 0)),
        config_with_bee(2, 300),
    );
    let mut events = Vec::new();
    let mut positions = Vec::new();
    for _ in 0..7 {
        step(&mut manager, &mut world, &mut enemies, &config, &mut events);
        positions.push(bee_position(&manager));
    }
    // The vertical axis never moves on a flat plan, so its stall counter
    // fires a jitter nudge every third step until arrival.
    assert_eq!(
        positions,
        vec![
            Position::new(2, 0),
            Position::new(4, 0),
            Position::new(4, 1),
            Position::new(6, 1),
            Position::new(8, 1),
            Position::new(8, 0),
            Position::new(10, 0),
        ]
    );
}

#[test]
fn stall_breaker_nudges_even_while_resting_at_aim() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(4, 2)),
        config_with_bee(2, 300),
    );
    let mut events = Vec::new();
    for _ in 0..3 {
        step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    }
    assert_eq!(bee_position(&manager), Position::new(4, 2));

    // Two motionless steps at the aim point push both stall counters to
    // the trigger threshold.
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(4, 2));

    // The third step fires jitter nudges on both axes despite the bee
    // being exactly where it wants to be.
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(5, 3));
}

#[test]
fn strikes_snap_the_bee_onto_the_enemy() {
    let mut manager = ActorManager::new();
    let mut world = World::new(40, 40, tile(2));
    let mut enemies = EnemyRegistry::new();
    let config = config_with_bee(2, 300);
    let pigeon_config = PigeonConfig::new(1, 3000).expect("valid pigeon config");
    let enemy = enemies.spawn(Position::new(5, 0), CellCoord::new(0, 0), &pigeon_config);

    let bee_id = manager.allocate_id();
    manager.spawn(Actor::GuardBee(GuardBee::new(
        bee_id,
        Position::new(0, 0),
        AimTarget::Enemy(enemy),
        &config.bee,
    )));
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);

    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(2, 0));
    assert!(events.is_empty());

    // The next unit move lands within one tile-size of the enemy: the bee
    // snaps onto it and both are flagged.
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(
        events,
        vec![Event::EnemyStruck {
            enemy,
            bee: bee_id,
            position: Position::new(5, 0),
        }]
    );
    assert_eq!(bee_position(&manager), Position::new(5, 0));
    assert!(enemies.iter().all(|pigeon| pigeon.is_marked_for_removal()));

    // The flagged bee is purged at the next tick phase.
    events.clear();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(manager.is_empty());
    assert!(events.is_empty());
}

#[test]
fn a_large_budget_lands_exactly_on_the_aim_in_one_step() {
    // With budget >= |dx| + |dy| the rasterization pass terminates at the
    // aim instead of spending the rest of the budget.
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(5, 3)),
        config_with_bee(20, 300),
    );
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(5, 3));

    // The following step starts at the aim and moves nowhere.
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(5, 3));
    assert!(events.is_empty());
}

#[test]
fn dangling_target_sends_the_bee_back_to_its_spawn_point() {
    let mut manager = ActorManager::new();
    let mut world = World::new(40, 40, tile(2));
    let mut enemies = EnemyRegistry::new();
    let config = config_with_bee(2, 300);
    let pigeon_config = PigeonConfig::new(1, 3000).expect("valid pigeon config");
    let enemy = enemies.spawn(Position::new(6, 0), CellCoord::new(0, 0), &pigeon_config);

    let bee_id = manager.allocate_id();
    manager.spawn(Actor::GuardBee(GuardBee::new(
        bee_id,
        Position::new(0, 0),
        AimTarget::Enemy(enemy),
        &config.bee,
    )));
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);

    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(2, 0));

    // Purge the enemy out from under the bee; the handle now dangles.
    enemies.mark_for_removal(enemy);
    enemies.run_tick(&mut world, &mut events);
    assert_eq!(enemies.position_of(enemy), None);

    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(bee_position(&manager), Position::new(0, 0));
    assert!(events.is_empty());
}

#[test]
fn expiry_with_an_enemy_in_reach_destroys_both_on_that_step() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        50,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(0, 0)),
        config_with_bee(2, 2),
    );
    let bee_id = manager
        .iter()
        .next()
        .map(|actor| actor.id())
        .expect("a live bee");
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(events.is_empty());

    // The enemy arrives within one tile-size on the very step the bee's
    // lifespan runs out: the coincidence is a strike, not a deferral.
    let pigeon_config = PigeonConfig::new(1, 3000).expect("valid pigeon config");
    let enemy = enemies.spawn(Position::new(30, 0), CellCoord::new(0, 0), &pigeon_config);
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(
        events,
        vec![Event::EnemyStruck {
            enemy,
            bee: bee_id,
            position: Position::new(30, 0),
        }]
    );
    assert!(enemies.iter().all(|pigeon| pigeon.is_marked_for_removal()));
    assert!(manager.iter().all(Actor::is_marked_for_removal));

    // Neither a deferral nor an expiry follows; the flagged bee is purged.
    events.clear();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(manager.is_empty());
    assert!(events.is_empty());
}

#[test]
fn expiry_with_nothing_in_reach_defers_exactly_once() {
    let (mut manager, mut world, mut enemies, config) = admitted_bee(
        2,
        Position::new(0, 0),
        AimTarget::Fixed(Position::new(0, 0)),
        config_with_bee(2, 3),
    );
    let bee_id = manager
        .iter()
        .next()
        .map(|actor| actor.id())
        .expect("a live bee");
    let mut events = Vec::new();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(events.is_empty());

    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(events, vec![Event::BeeExpiryDeferred { bee: bee_id }]);

    events.clear();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        Event::BeeExpired { bee, .. } if bee == bee_id
    ));

    events.clear();
    step(&mut manager, &mut world, &mut enemies, &config, &mut events);
    assert!(manager.is_empty());
}
