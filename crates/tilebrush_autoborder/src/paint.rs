//! Brush painting operations
//!
//! These only place or remove the brush's own items on a single tile. The
//! caller re-runs the border and wall resolvers on the tile and its
//! neighbours afterwards.

use crate::carpet::CarpetBrush;
use crate::ground::GroundBrush;
use crate::materials::Materials;
use crate::table::TableBrush;
use rand::Rng;
use tilebrush_core::{
    BrushId, CarpetPiece, DoorKind, ItemId, TableAlignment, Tile, TileMap, TilePos,
    WallAlignment, NEIGHBOR_OFFSETS,
};

/// Replace the tile's ground with a weighted pick from `brush`
pub fn paint_ground(
    tile: &mut Tile,
    brush: &GroundBrush,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let Some(item) = brush.pick_ground(rng) else {
        return false;
    };
    let catalog = &materials.items;
    tile.remove_items(|id| catalog.ground_brush(id).is_some());
    tile.add_item(item, catalog);
    true
}

/// Remove the ground items painted by `brush`
pub fn erase_ground(tile: &mut Tile, brush: &GroundBrush, materials: &Materials) -> bool {
    let catalog = &materials.items;
    tile.remove_items(|id| catalog.ground_brush(id) == Some(brush.id)) > 0
}

/// Whether an optional overlay could show on the tile at `pos`: the tile is
/// not itself an overlay-casting ground and some neighbour is.
pub fn can_paint_optional_border(map: &TileMap, pos: TilePos, materials: &Materials) -> bool {
    let casts_overlay = |tile: &Tile| {
        materials
            .tile_ground_brush(tile)
            .map_or(false, GroundBrush::has_optional_border)
    };
    if map.tile(pos).map_or(false, casts_overlay) {
        return false;
    }
    NEIGHBOR_OFFSETS
        .iter()
        .any(|(dx, dy)| map.neighbor(pos, *dx, *dy).map_or(false, casts_overlay))
}

/// Let the tile accept optional overlays. Only tiles with ground can.
pub fn paint_optional_border(tile: &mut Tile, materials: &Materials) -> bool {
    if tile.ground(&materials.items).is_none() {
        return false;
    }
    tile.set_optional_border(true);
    true
}

pub fn erase_optional_border(tile: &mut Tile) -> bool {
    let had = tile.has_optional_border();
    tile.set_optional_border(false);
    had
}

/// Remove the walls of `brush` and of the brushes it redirects to.
/// Returns the number of items removed.
pub fn erase_wall(tile: &mut Tile, brush: BrushId, materials: &Materials) -> usize {
    let catalog = &materials.items;
    tile.remove_items(|id| {
        catalog.wall(id).map_or(false, |binding| {
            materials
                .brushes
                .wall_chain(brush)
                .any(|wall| wall.has_wall(id, binding.alignment))
        })
    })
}

/// Replace the tile's walls of `brush` with a fresh one.
///
/// The first shape with an item, searching the redirect chain, is placed.
/// The wall resolver gives it its final shape.
pub fn paint_wall(
    tile: &mut Tile,
    brush: BrushId,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    erase_wall(tile, brush, materials);

    let item = materials.brushes.wall_chain(brush).find_map(|wall| {
        WallAlignment::ALL[..16]
            .iter()
            .find_map(|&alignment| wall.pick_wall(alignment, &mut *rng))
    });
    match item {
        Some(item) => {
            tile.add_item(item, &materials.items);
            true
        }
        None => {
            tracing::debug!(brush = brush.0, "wall brush has no items to paint");
            false
        }
    }
}

/// Hang a decoration on the tile's first structural wall.
///
/// Existing items of the decoration are removed first. The new item matches
/// the wall's shape; on a door it matches the door kind, preferring the same
/// open state.
pub fn paint_wall_decoration(
    tile: &mut Tile,
    decoration: BrushId,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let catalog = &materials.items;
    let Some(brush) = materials.wall_brush(decoration) else {
        return false;
    };
    tile.remove_items(|id| {
        catalog
            .wall(id)
            .map_or(false, |binding| binding.brush == decoration)
    });

    let Some((_, wall, binding)) = tile.wall_item(catalog) else {
        return false;
    };
    let item = match catalog.door(wall) {
        Some(door) => brush.pick_door(binding.alignment, door.kind, door.open),
        None => brush.pick_wall(binding.alignment, rng),
    };
    match item {
        Some(item) => {
            tile.add_item(item, catalog);
            true
        }
        None => false,
    }
}

/// Turn the tile's wall into a door of `kind` at the same shape.
///
/// A door already in place keeps its open state, otherwise `open` is wanted.
/// An exact open-state match anywhere along the redirect chain beats a door
/// of the right kind in the wrong state.
pub fn place_door(tile: &mut Tile, kind: DoorKind, open: bool, materials: &Materials) -> bool {
    let catalog = &materials.items;
    let Some((index, wall, binding)) = tile.wall_item(catalog) else {
        return false;
    };
    let open = catalog.door(wall).map_or(open, |door| door.open);

    let mut fallback: Option<ItemId> = None;
    for brush in materials.brushes.wall_chain(binding.brush) {
        for door in brush.doors(binding.alignment).iter().filter(|door| door.kind == kind) {
            if door.open == open {
                return tile.transform_at(index, door.item);
            }
            fallback.get_or_insert(door.item);
        }
    }
    match fallback {
        Some(item) => tile.transform_at(index, item),
        None => false,
    }
}

/// Open a closed door or close an open one
pub fn switch_door(tile: &mut Tile, materials: &Materials) -> bool {
    let catalog = &materials.items;
    let Some((index, item, door)) = tile
        .items()
        .iter()
        .enumerate()
        .find_map(|(index, &id)| catalog.door(id).map(|door| (index, id, door)))
    else {
        return false;
    };
    let Some(binding) = catalog.wall(item) else {
        return false;
    };
    let Some(brush) = materials.wall_brush(binding.brush) else {
        return false;
    };

    let toggled = brush
        .doors(binding.alignment)
        .iter()
        .find(|other| other.kind == door.kind && other.open != door.open);
    match toggled {
        Some(other) => tile.transform_at(index, other.item),
        None => false,
    }
}

/// Replace the tile's tables of `brush` with a lone one.
///
/// Tables of other brushes stay. The table resolver gives the new item its
/// final shape.
pub fn paint_table(
    tile: &mut Tile,
    brush: &TableBrush,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    erase_table(tile, brush.id, materials);
    let Some(item) = brush.pick_table(TableAlignment::Alone, rng) else {
        tracing::debug!(brush = %brush.name, "table brush has no lone table");
        return false;
    };
    tile.add_item(item, &materials.items);
    true
}

/// Remove the tables painted by `brush`
pub fn erase_table(tile: &mut Tile, brush: BrushId, materials: &Materials) -> usize {
    let catalog = &materials.items;
    tile.remove_items(|id| catalog.table_brush(id) == Some(brush))
}

/// Lay carpet from `brush` on the tile, replacing any carpet already there
pub fn paint_carpet(
    tile: &mut Tile,
    brush: &CarpetBrush,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let catalog = &materials.items;
    tile.remove_items(|id| catalog.carpet_brush(id).is_some());
    let Some(item) = brush.pick_carpet(CarpetPiece::Center, rng) else {
        tracing::debug!(brush = %brush.name, "carpet brush has no items");
        return false;
    };
    tile.add_item(item, catalog);
    true
}

/// Remove the carpet laid by `brush`
pub fn erase_carpet(tile: &mut Tile, brush: BrushId, materials: &Materials) -> usize {
    let catalog = &materials.items;
    tile.remove_items(|id| catalog.carpet_brush(id) == Some(brush))
}
