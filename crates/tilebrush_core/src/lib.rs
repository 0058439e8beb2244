//! Core data structures for tilebrush
//!
//! This crate provides the plain data the bordering engine works on:
//! - `ItemCatalog` / `ItemType` - per-item metadata (stack layer, owning brush, border slot)
//! - `Tile` - an ordered item stack at a map position
//! - `TileMap` - a rectangular grid of optional tiles
//! - `BorderEdge`, `WallAlignment`, `TableAlignment`, `CarpetPiece`, `DoorKind` - alignment
//!   enums shared by items and brushes

mod alignment;
mod item;
mod map;
mod tile;

pub use alignment::{BorderEdge, CarpetPiece, DoorKind, TableAlignment, WallAlignment};
pub use item::{BrushId, DoorInfo, ItemCatalog, ItemId, ItemType, StackLayer, WallBinding};
pub use map::{TileMap, CARDINAL_OFFSETS, NEIGHBOR_OFFSETS};
pub use tile::{Tile, TilePos};
