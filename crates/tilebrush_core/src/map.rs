//! Rectangular tile map

use crate::tile::{Tile, TilePos};
use serde::{Deserialize, Serialize};

/// Offsets of the 8 neighbours in ground-border bit order:
/// NW, N, NE, W, E, SW, S, SE
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Offsets of the 4 cardinal neighbours in wall bit order: N, W, E, S
pub const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// A map of `width * height` cells, each holding a materialized tile or nothing.
///
/// Cells are stored row-major. Positions outside the map behave like
/// unmaterialized cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    pub name: String,
    pub width: u32,
    pub height: u32,
    tiles: Vec<Option<Tile>>,
}

impl TileMap {
    /// Create an empty map.
    ///
    /// Dimensions that [`TileMap::try_new`] rejects give a 0x0 map.
    pub fn new(name: String, width: u32, height: u32) -> Self {
        match Self::try_new(name.clone(), width, height) {
            Some(map) => map,
            None => Self {
                name,
                width: 0,
                height: 0,
                tiles: Vec::new(),
            },
        }
    }

    /// Create an empty map, or `None` when a side exceeds the `i32` position
    /// range or the cell storage cannot be allocated.
    pub fn try_new(name: String, width: u32, height: u32) -> Option<Self> {
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return None;
        }
        let size = (width as usize).checked_mul(height as usize)?;
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(size).ok()?;
        tiles.resize(size, None);
        Some(Self {
            name,
            width,
            height,
            tiles,
        })
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.tiles[i].as_ref())
    }

    pub fn tile_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.index(pos).and_then(|i| self.tiles[i].as_mut())
    }

    /// Get the tile at `pos`, materializing an empty one if needed.
    /// Returns `None` only when `pos` is out of bounds.
    pub fn tile_or_create(&mut self, pos: TilePos) -> Option<&mut Tile> {
        let index = self.index(pos)?;
        Some(self.tiles[index].get_or_insert_with(|| Tile::new(pos)))
    }

    /// Store a tile at its own position, returning the tile it replaced
    pub fn set_tile(&mut self, mut tile: Tile) -> Option<Tile> {
        let index = self.index(tile.pos)?;
        tile.pos = self.position_of(index);
        self.tiles[index].replace(tile)
    }

    pub fn remove_tile(&mut self, pos: TilePos) -> Option<Tile> {
        let index = self.index(pos)?;
        self.tiles[index].take()
    }

    /// Tile at an offset from `pos`
    pub fn neighbor(&self, pos: TilePos, dx: i32, dy: i32) -> Option<&Tile> {
        self.tile(pos.offset(dx, dy))
    }

    /// Positions of all materialized tiles, row-major
    pub fn positions(&self) -> Vec<TilePos> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_some())
            .map(|(index, _)| self.position_of(index))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    fn position_of(&self, index: usize) -> TilePos {
        let width = self.width.max(1) as usize;
        TilePos::new((index % width) as i32, (index / width) as i32)
    }
}
