#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Garden Defence.
//!
//! The world owns the tile grid with its stacked resources and the enemy
//! registry. Mutation happens through the session's command entry point;
//! this crate exposes the operations that entry point composes, plus
//! deterministic read-only queries under [`query`].

use std::num::NonZeroU32;

use garden_defence_core::{CellCoord, Position, ResourceKind};

pub mod enemies;
mod resources;

pub use resources::Resource;

/// Describes the discrete tile layout of the world.
#[derive(Debug)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_size: i32,
}

impl TileGrid {
    const fn new(columns: u32, rows: u32, tile_size: NonZeroU32) -> Self {
        Self {
            columns,
            rows,
            tile_size: tile_size.get() as i32,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }
}

#[derive(Debug, Default)]
struct Tile {
    resources: Vec<Resource>,
}

/// Authoritative mutable world: tile grid plus stacked resources.
#[derive(Debug)]
pub struct World {
    grid: TileGrid,
    tiles: Vec<Tile>,
}

impl World {
    /// Creates an empty world with the provided grid dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32, tile_size: NonZeroU32) -> Self {
        let grid = TileGrid::new(columns, rows, tile_size);
        let tiles = (0..columns as usize * rows as usize)
            .map(|_| Tile::default())
            .collect();
        Self { grid, tiles }
    }

    /// Describes the tile layout of the world.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    fn tile_index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.grid.columns && cell.row() < self.grid.rows {
            Some((cell.row() * self.grid.columns + cell.column()) as usize)
        } else {
            None
        }
    }

    /// Stacks a resource of the provided kind onto a tile. Returns `false`
    /// when the cell lies outside the grid.
    pub fn plant(&mut self, cell: CellCoord, kind: ResourceKind) -> bool {
        match self.tile_index(cell) {
            Some(index) => {
                self.tiles[index].resources.push(Resource::new(kind));
                true
            }
            None => false,
        }
    }

    /// Flags one unconsumed resource of the provided kind on the tile for
    /// removal. Returns `false` when the tile holds none.
    pub fn consume_resource(&mut self, cell: CellCoord, kind: ResourceKind) -> bool {
        let Some(index) = self.tile_index(cell) else {
            return false;
        };
        match self.tiles[index]
            .resources
            .iter_mut()
            .find(|resource| resource.kind() == kind && !resource.is_marked_for_removal())
        {
            Some(resource) => {
                resource.mark_for_removal();
                true
            }
            None => false,
        }
    }

    /// Purges resources flagged for removal during the previous step.
    pub fn cleanup_resources(&mut self) {
        for tile in &mut self.tiles {
            tile.resources
                .retain(|resource| !resource.is_marked_for_removal());
        }
    }

    /// Centre position of the provided cell in world units.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Position {
        let size = self.grid.tile_size;
        Position::new(
            cell.column() as i32 * size + size / 2,
            cell.row() as i32 * size + size / 2,
        )
    }

    /// Centre position of the whole grid in world units.
    #[must_use]
    pub fn center(&self) -> Position {
        let size = self.grid.tile_size;
        Position::new(
            self.grid.columns as i32 * size / 2,
            self.grid.rows as i32 * size / 2,
        )
    }

    /// Cell containing the provided position, when it lies on the grid.
    #[must_use]
    pub fn cell_containing(&self, position: Position) -> Option<CellCoord> {
        let size = self.grid.tile_size;
        let column = position.x().div_euclid(size);
        let row = position.y().div_euclid(size);
        if column < 0 || row < 0 {
            return None;
        }
        let cell = CellCoord::new(column as u32, row as u32);
        self.tile_index(cell).map(|_| cell)
    }
}

/// Read-only queries used to observe world state deterministically.
pub mod query {
    use super::World;
    use garden_defence_core::{CellCoord, ResourceKind};

    /// Cells holding at least one unconsumed resource of the provided
    /// kind, in row-major order.
    #[must_use]
    pub fn resource_cells(world: &World, kind: ResourceKind) -> Vec<CellCoord> {
        let mut cells = Vec::new();
        for row in 0..world.grid.rows {
            for column in 0..world.grid.columns {
                let cell = CellCoord::new(column, row);
                let index =
                    (row * world.grid.columns + column) as usize;
                let occupied = world.tiles[index]
                    .resources
                    .iter()
                    .any(|resource| resource.kind() == kind && !resource.is_marked_for_removal());
                if occupied {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Number of unconsumed resources of the provided kind on a tile.
    #[must_use]
    pub fn resource_count(world: &World, cell: CellCoord, kind: ResourceKind) -> usize {
        match world.tile_index(cell) {
            Some(index) => world.tiles[index]
                .resources
                .iter()
                .filter(|resource| {
                    resource.kind() == kind && !resource.is_marked_for_removal()
                })
                .count(),
            None => 0,
        }
    }
}
