//! Wall alignment resolution
//!
//! A wall tile looks at its four cardinal neighbours, builds a 4-bit
//! connectivity mask from the ones holding a compatible wall and swaps its
//! wall item for the shape the mask calls for. Decorations hanging on the
//! wall follow the new shape.

use crate::materials::Materials;
use crate::tables::{full_wall_alignment, half_wall_alignment};
use crate::wall::WallBrush;
use rand::Rng;
use tilebrush_core::{
    BrushId, ItemId, Tile, TileMap, TilePos, WallAlignment, CARDINAL_OFFSETS,
};

/// Whether the tile at `pos` holds a wall that joins walls of `brush`.
///
/// Wall items (decorations included) are scanned bottom to top. The first one
/// belonging to `brush` or to a friend (in either direction) decides: it
/// joins unless the item refuses connections. Unrelated walls are skipped.
pub fn joins_wall(map: &TileMap, pos: TilePos, brush: &WallBrush, materials: &Materials) -> bool {
    let catalog = &materials.items;
    let Some(tile) = map.tile(pos) else {
        return false;
    };

    let compatible = |owner: BrushId| {
        owner == brush.id
            || brush.friend_of(owner)
            || materials
                .wall_brush(owner)
                .map_or(false, |other| other.friend_of(brush.id))
    };
    tile.items()
        .iter()
        .find_map(|&item| {
            catalog
                .wall(item)
                .filter(|binding| compatible(binding.brush))
                .map(|_| item)
        })
        .map_or(false, |item| {
            !catalog.get(item).map_or(false, |meta| meta.wall_hate_me)
        })
}

/// Connectivity mask of `pos` for walls of `brush`: bit 0..3 = N, W, E, S
pub fn wall_connectivity(
    map: &TileMap,
    pos: TilePos,
    brush: &WallBrush,
    materials: &Materials,
) -> u8 {
    CARDINAL_OFFSETS
        .iter()
        .enumerate()
        .filter(|(_, (dx, dy))| joins_wall(map, pos.offset(*dx, *dy), brush, materials))
        .fold(0, |mask, (bit, _)| mask | (1 << bit))
}

/// Re-align the wall at `pos` and the decorations on it.
///
/// Returns whether the tile's items changed. Tiles without a structural wall,
/// and walls pinned as untouchable, are left alone.
pub fn resolve_wall_alignment(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let wall = map.tile(pos).and_then(|tile| tile.wall_item(&materials.items));
    let Some((_, _, binding)) = wall else {
        return false;
    };
    if binding.alignment == WallAlignment::Untouchable {
        return false;
    }
    let Some(brush) = materials.wall_brush(binding.brush) else {
        return false;
    };

    let mask = wall_connectivity(map, pos, brush, materials);
    match map.tile_mut(pos) {
        Some(tile) => align_walls(tile, mask, materials, rng),
        None => false,
    }
}

/// Shape the tile's wall and decorations after a connectivity mask.
///
/// The full-table shape is tried first, then the reduced one. A shape is
/// settled once the wall already has it or an item for it was found along
/// the brush's redirect chain. Without any, the wall is kept as it is.
pub fn align_walls(tile: &mut Tile, mask: u8, materials: &Materials, rng: &mut impl Rng) -> bool {
    let catalog = &materials.items;
    let before = tile.items().to_vec();

    let mut settled = false;
    for candidate in [full_wall_alignment(mask), half_wall_alignment(mask)] {
        let Some((index, item, binding)) = tile.wall_item(catalog) else {
            break;
        };
        if binding.alignment == WallAlignment::Untouchable {
            break;
        }

        settled = binding.alignment == candidate;
        if !settled {
            let replacement = pick_replacement(materials, binding.brush, item, candidate, rng);
            if let Some(replacement) = replacement {
                tile.transform_at(index, replacement);
                settled = true;
            }
        }

        align_decorations(tile, candidate, materials, rng);
        if settled {
            break;
        }
    }

    if !settled {
        tracing::debug!(pos = ?tile.pos, mask, "no wall item for any candidate shape");
    }
    tile.items() != before.as_slice()
}

/// Item to turn `item` into for `alignment`, searching the redirect chain.
///
/// Doors stay doors of the same kind and keep their open state when possible.
fn pick_replacement(
    materials: &Materials,
    start: BrushId,
    item: ItemId,
    alignment: WallAlignment,
    rng: &mut impl Rng,
) -> Option<ItemId> {
    let door = materials.items.door(item);
    materials
        .brushes
        .wall_chain(start)
        .find_map(|brush| match door {
            Some(door) => brush.pick_door(alignment, door.kind, door.open),
            None => brush.pick_wall(alignment, &mut *rng),
        })
}

fn align_decorations(
    tile: &mut Tile,
    alignment: WallAlignment,
    materials: &Materials,
    rng: &mut impl Rng,
) {
    let catalog = &materials.items;
    for index in 0..tile.len() {
        let item = tile.items()[index];
        let Some(binding) = catalog.wall(item).filter(|binding| binding.decoration) else {
            continue;
        };
        if binding.alignment == alignment {
            continue;
        }
        let replacement = materials
            .wall_brush(binding.brush)
            .and_then(|decoration| decoration.pick_wall(alignment, &mut *rng));
        if let Some(replacement) = replacement {
            tile.transform_at(index, replacement);
        }
    }
}
