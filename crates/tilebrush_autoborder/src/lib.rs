//! Ground border and wall alignment engine
//!
//! This crate recomputes the decorative pieces of a tile map after painting:
//! transition borders between ground types and the shape of wall segments,
//! tables and carpets.
//!
//! # Features
//! - Ground brushes with z-ordered border rules, friends and optional overlays
//! - 8-neighbour border resolution with diagonal decomposition
//! - Specific cases that rewrite or delete border pieces after placement
//! - 4-neighbour wall alignment with redirect chains, doors and decorations
//! - Table runs and carpet edges from 8-neighbour masks
//! - Weighted random item selection
//!
//! # Example
//!
//! ```rust,ignore
//! use rand::{rngs::SmallRng, SeedableRng};
//! use tilebrush_autoborder::{borderize_around, paint_ground, Materials};
//!
//! let materials: Materials = load_materials();
//! let sand = materials.ground_brush_by_name("sand").unwrap();
//! let mut rng = SmallRng::seed_from_u64(0);
//!
//! // Paint one tile, then fix up the borders around it
//! if let Some(tile) = map.tile_mut(pos) {
//!     paint_ground(tile, sand, &materials, &mut rng);
//! }
//! borderize_around(&mut map, pos, &materials);
//! ```

pub mod batch;
pub mod border;
pub mod borderize;
pub mod brush;
pub mod carpet;
pub mod carpetize;
pub mod ground;
pub mod materials;
pub mod paint;
pub mod table;
pub mod tableize;
pub mod tables;
pub mod wall;
pub mod wallize;
pub mod weighted;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use border::{AutoBorder, BorderRef, BorderRegistry};
pub use brush::{Brush, BrushRegistry, RESERVED_BRUSH_NAMES};
pub use carpet::CarpetBrush;
pub use ground::{border_rule_between, BorderRule, BorderTarget, GroundBrush, SpecificCase};
pub use materials::Materials;
pub use table::TableBrush;
pub use wall::{DoorDef, RedirectChain, WallBrush, MAX_REDIRECT_HOPS};
pub use weighted::{WeightedTable, WeightedTableError};

// Resolvers and painting operations
pub use batch::{
    borderize_around, borderize_map, carpetize_around, carpetize_map, tableize_around,
    tableize_map, wallize_around, wallize_map,
};
pub use borderize::{borderize_tile, ground_neighborhood, resolve_ground_borders};
pub use carpetize::{carpet_connectivity, resolve_carpet_alignment};
pub use paint::{
    can_paint_optional_border, erase_carpet, erase_ground, erase_optional_border, erase_table,
    erase_wall, paint_carpet, paint_ground, paint_optional_border, paint_table, paint_wall,
    paint_wall_decoration, place_door, switch_door,
};
pub use tableize::{resolve_table_alignment, table_connectivity};
pub use tables::{
    carpet_piece, full_wall_alignment, ground_border_slots, half_wall_alignment, table_alignment,
};
pub use wallize::{align_walls, joins_wall, resolve_wall_alignment, wall_connectivity};

// Re-export tilebrush_core
pub use tilebrush_core;
