#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defence simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the actor collection. Adapters submit
//! [`Command`] values describing desired mutations, the session executes
//! those commands via its `apply` entry point, and broadcasts [`Event`]
//! values describing what happened during the step. Everything here is
//! deterministic: identifiers are allocated monotonically and collections
//! are always iterated in insertion order.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod timing;

/// Unique identifier assigned to an actor managed by the actor collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy held by the enemy registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Integer world-unit position shared by every positioned entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate measured in world units.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate measured in world units, increasing downward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the squared Euclidean distance to another position.
    #[must_use]
    pub fn distance_squared(self, other: Position) -> i64 {
        let dx = i64::from(other.x - self.x);
        let dy = i64::from(other.y - self.y);
        dx * dx + dy * dy
    }

    /// Computes the linear distance to another position, truncated to a
    /// whole number of world units.
    #[must_use]
    pub fn distance(self, other: Position) -> i32 {
        self.distance_squared(other).isqrt() as i32
    }
}

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Cardinal movement headings used by the simulation's core actors.
///
/// Headings are measured in degrees with the vertical axis pointing down,
/// so south is 90 and north is 270.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Movement toward increasing horizontal coordinates (0 degrees).
    East,
    /// Movement toward increasing vertical coordinates (90 degrees).
    South,
    /// Movement toward decreasing horizontal coordinates (180 degrees).
    West,
    /// Movement toward decreasing vertical coordinates (270 degrees).
    North,
}

impl Heading {
    /// Degree value of the heading within [0, 360).
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::East => 0,
            Self::South => 90,
            Self::West => 180,
            Self::North => 270,
        }
    }

    /// Unit offsets applied by a single move along the heading.
    #[must_use]
    pub const fn unit_offsets(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::North => (0, -1),
        }
    }

    /// Horizontal heading for the provided sign (non-negative maps east).
    #[must_use]
    pub const fn horizontal(sign: i32) -> Self {
        if sign >= 0 {
            Self::East
        } else {
            Self::West
        }
    }

    /// Vertical heading for the provided sign (non-negative maps south).
    #[must_use]
    pub const fn vertical(sign: i32) -> Self {
        if sign >= 0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// Heading along the dominant axis of the provided deltas.
    ///
    /// Ties between the axes resolve to the horizontal heading. Returns
    /// `None` when both deltas are zero.
    #[must_use]
    pub fn dominant(dx: i32, dy: i32) -> Option<Self> {
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(Self::horizontal(dx))
        } else {
            Some(Self::vertical(dy))
        }
    }
}

/// Positioned-actor contract shared by every entity the simulation moves.
///
/// A body owns an integer position, a facing in degrees within [0, 360),
/// a per-move speed, and a monotonic removal flag. The removal flag only
/// ever transitions to `true`; the owning collection purges flagged
/// entities at its next cleanup point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    position: Position,
    heading_degrees: i32,
    speed: i32,
    removal: bool,
}

impl Body {
    /// Creates a stationary body at the provided position facing east.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            heading_degrees: 0,
            speed: 0,
            removal: false,
        }
    }

    /// Current position of the body.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Overwrites the body position without moving through intermediate
    /// cells. Used to snap projectiles onto the entity they struck.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current facing in degrees within [0, 360).
    #[must_use]
    pub const fn heading_degrees(&self) -> i32 {
        self.heading_degrees
    }

    /// Faces the body along an arbitrary degree heading.
    pub fn face_degrees(&mut self, degrees: i32) {
        self.heading_degrees = degrees.rem_euclid(360);
    }

    /// Faces the body along a cardinal heading.
    pub fn face(&mut self, heading: Heading) {
        self.heading_degrees = heading.degrees();
    }

    /// Units moved per [`Body::advance`] call.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Updates the per-move speed.
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    /// Moves `speed` units along the current facing.
    ///
    /// Offsets are computed trigonometrically and rounded, which is exact
    /// for the four cardinal headings.
    pub fn advance(&mut self) {
        let radians = f64::from(self.heading_degrees).to_radians();
        let dx = (f64::from(self.speed) * radians.cos()).round() as i32;
        let dy = (f64::from(self.speed) * radians.sin()).round() as i32;
        self.position = Position::new(self.position.x + dx, self.position.y + dy);
    }

    /// Faces the provided cardinal heading and moves exactly one unit
    /// along it, independent of the configured speed.
    pub fn nudge(&mut self, heading: Heading) {
        self.face(heading);
        let (dx, dy) = heading.unit_offsets();
        self.position = Position::new(self.position.x + dx, self.position.y + dy);
    }

    /// Flags the body for removal. Flagging an already-flagged body is a
    /// no-op.
    pub fn mark_for_removal(&mut self) {
        self.removal = true;
    }

    /// Reports whether the body has been flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.removal
    }
}

/// Kinds of actors managed by the actor collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Detection-and-fire structure that launches guard bees.
    Hive,
    /// Homing projectile chasing a tracked enemy.
    GuardBee,
    /// Timed spawner that places hives.
    HiveSpawner,
    /// Timed spawner that releases pigeons.
    PigeonSpawner,
}

/// Kinds of harvestable resources that can be stacked on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Leafy target of every pigeon raid.
    Cabbage,
    /// Mineral deposit ignored by pigeons.
    Ore,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by exactly one step (tick phase followed by
    /// interact phase).
    Tick,
    /// Stacks a resource of the provided kind onto a tile.
    PlantResource {
        /// Tile that receives the resource.
        cell: CellCoord,
        /// Kind of resource to plant.
        kind: ResourceKind,
    },
    /// Places a hive at the provided position.
    PlaceHive {
        /// World-unit position of the hive.
        position: Position,
    },
    /// Places a spawner that periodically constructs hives.
    PlaceHiveSpawner {
        /// World-unit position of the spawner.
        position: Position,
        /// Steps between spawn attempts.
        period: NonZeroU32,
    },
    /// Places a spawner that periodically releases pigeons.
    PlacePigeonSpawner {
        /// World-unit position of the spawner.
        position: Position,
        /// Steps between spawn attempts.
        period: NonZeroU32,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a resource was stacked onto a tile.
    ResourcePlanted {
        /// Tile that received the resource.
        cell: CellCoord,
        /// Kind of resource planted.
        kind: ResourceKind,
    },
    /// Confirms that a hive was placed by a command.
    HivePlaced {
        /// Identifier assigned to the hive.
        actor: ActorId,
        /// Position of the hive.
        position: Position,
    },
    /// Confirms that a hive spawner was placed by a command.
    HiveSpawnerPlaced {
        /// Identifier assigned to the spawner.
        actor: ActorId,
        /// Position of the spawner.
        position: Position,
    },
    /// Confirms that a pigeon spawner was placed by a command.
    PigeonSpawnerPlaced {
        /// Identifier assigned to the spawner.
        actor: ActorId,
        /// Position of the spawner.
        position: Position,
    },
    /// Reports that a hive spawner constructed a new hive.
    HiveSpawned {
        /// Spawner that produced the hive.
        spawner: ActorId,
        /// Identifier assigned to the hive.
        hive: ActorId,
        /// Tile-centre position the hive was snapped to.
        position: Position,
    },
    /// Reports that a hive launched a guard bee at an enemy.
    BeeFired {
        /// Hive that fired.
        hive: ActorId,
        /// Identifier assigned to the bee.
        bee: ActorId,
        /// Enemy the bee is tracking.
        target: EnemyId,
    },
    /// Reports that a pigeon spawner released a new pigeon.
    EnemySpawned {
        /// Spawner that released the pigeon.
        spawner: ActorId,
        /// Identifier assigned to the pigeon.
        enemy: EnemyId,
        /// Position the pigeon was released at.
        position: Position,
        /// Cabbage tile the pigeon is heading for.
        target: CellCoord,
    },
    /// Reports that a guard bee struck an enemy; both are flagged for
    /// removal on the step this event is emitted.
    EnemyStruck {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Bee that struck it.
        bee: ActorId,
        /// Position the collision resolved at.
        position: Position,
    },
    /// Reports that a bee's lifespan ran out with no enemy in reach, so
    /// its despawn was deferred by exactly one step.
    BeeExpiryDeferred {
        /// Bee whose despawn was deferred.
        bee: ActorId,
    },
    /// Reports that a bee despawned after its (possibly deferred)
    /// lifespan ran out.
    BeeExpired {
        /// Bee that despawned.
        bee: ActorId,
        /// Position the bee despawned at.
        position: Position,
    },
    /// Reports that a pigeon consumed a resource from a tile.
    ResourceEaten {
        /// Tile the resource was consumed from.
        cell: CellCoord,
        /// Pigeon that consumed it.
        enemy: EnemyId,
    },
    /// Reports that a pigeon returned to its spawn point and left.
    EnemyDeparted {
        /// Pigeon that departed.
        enemy: EnemyId,
    },
    /// Reports that a pigeon's lifespan ran out.
    EnemyExpired {
        /// Pigeon that expired.
        enemy: EnemyId,
    },
}
