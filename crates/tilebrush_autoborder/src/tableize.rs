//! Table alignment resolution
//!
//! Every table item on a tile looks at its eight neighbours for items of the
//! same table brush and takes the shape [`table_alignment`] gives for them.

use crate::materials::Materials;
use crate::tables::table_alignment;
use rand::Rng;
use tilebrush_core::{BrushId, TileMap, TilePos, NEIGHBOR_OFFSETS};

/// Whether the tile at `pos` holds any item of table brush `brush`
pub fn has_table(map: &TileMap, pos: TilePos, brush: BrushId, materials: &Materials) -> bool {
    map.tile(pos).map_or(false, |tile| {
        tile.items()
            .iter()
            .any(|&id| materials.items.table_brush(id) == Some(brush))
    })
}

/// 8-bit mask of the neighbours of `pos` holding tables of `brush`
pub fn table_connectivity(map: &TileMap, pos: TilePos, brush: BrushId, materials: &Materials) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .enumerate()
        .filter(|(_, (dx, dy))| has_table(map, pos.offset(*dx, *dy), brush, materials))
        .fold(0, |mask, (bit, _)| mask | (1 << bit))
}

/// Re-align the table items of the tile at `pos`.
///
/// Items are handled bottom to top. The first table whose shape has no item
/// ends the pass, leaving it and the tables above it as they are. Returns
/// whether the tile's items changed.
pub fn resolve_table_alignment(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> bool {
    let catalog = &materials.items;
    let Some(tile) = map.tile(pos) else {
        return false;
    };
    let tables: Vec<(usize, BrushId, u8)> = tile
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, &id)| catalog.table_brush(id).map(|brush| (index, brush)))
        .map(|(index, brush)| (index, brush, table_connectivity(map, pos, brush, materials)))
        .collect();
    let Some(tile) = map.tile_mut(pos) else {
        return false;
    };

    let mut changed = false;
    for (index, brush, mask) in tables {
        let Some(table) = materials.table_brush(brush) else {
            continue;
        };
        let alignment = table_alignment(mask);
        let Some(item) = table.pick_table(alignment, rng) else {
            tracing::debug!(pos = ?pos, ?alignment, brush = %table.name, "no table item for shape");
            break;
        };
        if tile.items()[index] != item {
            changed |= tile.transform_at(index, item);
        }
    }
    changed
}
