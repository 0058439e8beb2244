//! Carpet alignment resolution
//!
//! Carpet items join with the same carpet brush on all eight sides. The mask
//! picks a border or center piece through [`carpet_piece`].

use crate::materials::Materials;
use crate::tables::carpet_piece;
use rand::Rng;
use tilebrush_core::{BrushId, TileMap, TilePos, NEIGHBOR_OFFSETS};

/// Whether the tile at `pos` holds any item of carpet brush `brush`
pub fn has_carpet(map: &TileMap, pos: TilePos, brush: BrushId, materials: &Materials) -> bool {
    map.tile(pos).map_or(false, |tile| {
        tile.items()
            .iter()
            .any(|&id| materials.items.carpet_brush(id) == Some(brush))
    })
}

/// 8-bit mask of the neighbours of `pos` holding carpet of `brush`
pub fn carpet_connectivity(
    map: &TileMap,
    pos: TilePos,
    brush: BrushId,
    materials: &Materials,
) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .enumerate()
        .filter(|(_, (dx, dy))| has_carpet(map, pos.offset(*dx, *dy), brush, materials))
        .fold(0, |mask, (bit, _)| mask | (1 << bit))
}

/// Re-align the carpet items of the tile at `pos`.
///
/// Returns whether the tile's items changed.
pub fn resolve_carpet_alignment(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let catalog = &materials.items;
    let Some(tile) = map.tile(pos) else {
        return false;
    };
    let carpets: Vec<(usize, BrushId, u8)> = tile
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, &id)| catalog.carpet_brush(id).map(|brush| (index, brush)))
        .map(|(index, brush)| (index, brush, carpet_connectivity(map, pos, brush, materials)))
        .collect();
    let Some(tile) = map.tile_mut(pos) else {
        return false;
    };

    let mut changed = false;
    for (index, brush, mask) in carpets {
        let item = materials
            .carpet_brush(brush)
            .and_then(|carpet| carpet.pick_carpet(carpet_piece(mask), rng));
        match item {
            Some(item) if tile.items()[index] != item => changed |= tile.transform_at(index, item),
            _ => {}
        }
    }
    changed
}
