//! Whole-map and neighbourhood re-resolution
//!
//! Resolution of one tile reads live neighbour state, so tiles are processed
//! one after another in row-major order.

use crate::borderize::resolve_ground_borders;
use crate::carpetize::resolve_carpet_alignment;
use crate::materials::Materials;
use crate::tableize::resolve_table_alignment;
use crate::wallize::resolve_wall_alignment;
use rand::Rng;
use tilebrush_core::{TileMap, TilePos};

/// Positions of `pos` and its 8 neighbours, row-major, clipped to the map
fn region_around(map: &TileMap, pos: TilePos) -> Vec<TilePos> {
    let mut positions = Vec::with_capacity(9);
    for dy in -1..=1 {
        for dx in -1..=1 {
            let target = pos.offset(dx, dy);
            if map.tile(target).is_some() {
                positions.push(target);
            }
        }
    }
    positions
}

/// Run `resolve` on every tile in row-major order, counting changed tiles
fn resolve_map<F, R>(map: &mut TileMap, pass: &str, mut progress: F, mut resolve: R) -> usize
where
    F: FnMut(usize, usize),
    R: FnMut(&mut TileMap, TilePos) -> bool,
{
    let positions = map.positions();
    let total = positions.len();
    let mut changed = 0;
    for (done, pos) in positions.into_iter().enumerate() {
        if resolve(map, pos) {
            changed += 1;
        }
        progress(done + 1, total);
    }
    tracing::debug!(map = %map.name, tiles = total, changed, pass, "resolved map");
    changed
}

/// Recompute the borders of every tile.
///
/// `progress(done, total)` is called after each tile. Returns the number of
/// tiles whose items changed.
pub fn borderize_map<F>(map: &mut TileMap, materials: &Materials, progress: F) -> usize
where
    F: FnMut(usize, usize),
{
    resolve_map(map, "borderize", progress, |map, pos| {
        resolve_ground_borders(map, pos, materials)
    })
}

/// Re-align every wall. Same contract as [`borderize_map`].
pub fn wallize_map<F>(
    map: &mut TileMap,
    materials: &Materials,
    rng: &mut impl Rng,
    progress: F,
) -> usize
where
    F: FnMut(usize, usize),
{
    resolve_map(map, "wallize", progress, |map, pos| {
        resolve_wall_alignment(map, pos, materials, rng)
    })
}

/// Re-align every table. Same contract as [`borderize_map`].
pub fn tableize_map<F>(
    map: &mut TileMap,
    materials: &Materials,
    rng: &mut impl Rng,
    progress: F,
) -> usize
where
    F: FnMut(usize, usize),
{
    resolve_map(map, "tableize", progress, |map, pos| {
        resolve_table_alignment(map, pos, materials, rng)
    })
}

/// Re-align every carpet. Same contract as [`borderize_map`].
pub fn carpetize_map<F>(
    map: &mut TileMap,
    materials: &Materials,
    rng: &mut impl Rng,
    progress: F,
) -> usize
where
    F: FnMut(usize, usize),
{
    resolve_map(map, "carpetize", progress, |map, pos| {
        resolve_carpet_alignment(map, pos, materials, rng)
    })
}

/// Recompute the borders of the tile at `pos` and its neighbours
pub fn borderize_around(map: &mut TileMap, pos: TilePos, materials: &Materials) -> usize {
    region_around(map, pos)
        .into_iter()
        .filter(|&target| resolve_ground_borders(map, target, materials))
        .count()
}

/// Re-align the walls of the tile at `pos` and its neighbours
pub fn wallize_around(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> usize {
    region_around(map, pos)
        .into_iter()
        .filter(|&target| resolve_wall_alignment(map, target, materials, rng))
        .count()
}

pub fn tableize_around(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> usize {
    region_around(map, pos)
        .into_iter()
        .filter(|&target| resolve_table_alignment(map, target, materials, rng))
        .count()
}

pub fn carpetize_around(
    map: &mut TileMap,
    pos: TilePos,
    materials: &Materials,
    rng: &mut impl Rng,
) -> usize {
    region_around(map, pos)
        .into_iter()
        .filter(|&target| resolve_carpet_alignment(map, target, materials, rng))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground::{BorderRule, BorderTarget};
    use crate::paint::{paint_carpet, paint_ground, paint_table, paint_wall};
    use crate::testing::{border, carpet, filled_map, ground, items_at, set_slot, table, wall};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tilebrush_core::{BorderEdge, CarpetPiece, TableAlignment, Tile, WallAlignment};

    fn grass_and_sand() -> Materials {
        let mut materials = Materials::new();
        let sand_border = border(&mut materials, 1, 1000, 0, true);
        ground(&mut materials, "grass", 10, 100, |_| {});
        ground(&mut materials, "sand", 20, 200, |brush| {
            brush
                .border_rules
                .push(BorderRule::new(BorderTarget::All, true, Some(sand_border)));
        });
        materials
    }

    #[test]
    fn test_borderize_map_reports_progress() {
        let materials = grass_and_sand();
        let mut map = filled_map(3, 3, 100);
        map.set_tile(Tile::with_items(TilePos::new(1, 1), vec![200]));

        let mut calls = Vec::new();
        let changed = borderize_map(&mut map, &materials, |done, total| calls.push((done, total)));
        // every grass tile touches the sand tile
        assert_eq!(changed, 8);
        assert_eq!(calls.len(), 9);
        assert_eq!(calls.last(), Some(&(9, 9)));
        assert_eq!(
            items_at(&map, TilePos::new(1, 0)),
            vec![100, 1000 + BorderEdge::NorthHorizontal.index() as u16]
        );
        assert_eq!(items_at(&map, TilePos::new(1, 1)), vec![200]);

        // a second pass changes nothing
        assert_eq!(borderize_map(&mut map, &materials, |_, _| {}), 0);
    }

    #[test]
    fn test_paint_then_borderize_around() {
        let materials = grass_and_sand();
        let sand = materials.ground_brush_by_name("sand").unwrap();
        let mut map = filled_map(5, 5, 100);
        let mut rng = SmallRng::seed_from_u64(5);

        let center = TilePos::new(2, 2);
        if let Some(tile) = map.tile_mut(center) {
            paint_ground(tile, sand, &materials, &mut rng);
        }
        assert_eq!(borderize_around(&mut map, center, &materials), 8);
        // tiles two steps away are outside the region
        assert_eq!(items_at(&map, TilePos::new(0, 0)), vec![100]);
        assert_eq!(
            items_at(&map, TilePos::new(3, 3)),
            vec![100, 1000 + BorderEdge::SouthEastCorner.index() as u16]
        );
    }

    #[test]
    fn test_wallize_around_joins_painted_walls() {
        let mut materials = Materials::new();
        let stone = wall(&mut materials, "stone", |brush| {
            for alignment in &WallAlignment::ALL[..16] {
                set_slot(brush, *alignment, 500 + alignment.index() as u16);
            }
        });
        let mut map = TileMap::new("walls".to_string(), 3, 3);
        let mut rng = SmallRng::seed_from_u64(5);

        for x in 0..3 {
            let pos = TilePos::new(x, 1);
            if let Some(tile) = map.tile_or_create(pos) {
                paint_wall(tile, stone, &materials, &mut rng);
            }
        }
        wallize_around(&mut map, TilePos::new(1, 1), &materials, &mut rng);
        let horizontal = 500 + WallAlignment::Horizontal.index() as u16;
        assert_eq!(items_at(&map, TilePos::new(1, 1)), vec![horizontal]);
        assert_eq!(
            items_at(&map, TilePos::new(0, 1)),
            vec![500 + WallAlignment::WestEnd.index() as u16]
        );

        let mut calls = 0;
        let changed = wallize_map(&mut map, &materials, &mut rng, |_, _| calls += 1);
        assert_eq!(changed, 0);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_painted_tables_and_carpet_align() {
        let mut materials = Materials::new();
        ground(&mut materials, "floor", 10, 100, |_| {});
        let counter = table(&mut materials, "counter", |brush| {
            for alignment in TableAlignment::ALL {
                brush.slot_mut(alignment).push(400 + alignment.index() as u16, 1);
            }
        });
        let rug = carpet(&mut materials, "rug", |brush| {
            brush.slot_mut(CarpetPiece::Center).push(800, 1);
            let north = CarpetPiece::Edge(BorderEdge::NorthHorizontal);
            brush.slot_mut(north).push(801, 1);
        });
        let counter = materials.table_brush(counter).unwrap().clone();
        let rug = materials.carpet_brush(rug).unwrap().clone();
        let mut map = filled_map(3, 3, 100);
        let mut rng = SmallRng::seed_from_u64(5);

        for y in 0..2 {
            if let Some(tile) = map.tile_mut(TilePos::new(0, y)) {
                paint_table(tile, &counter, &materials, &mut rng);
            }
        }
        for x in 0..3 {
            for y in 1..3 {
                if let Some(tile) = map.tile_mut(TilePos::new(x, y)) {
                    paint_carpet(tile, &rug, &materials, &mut rng);
                }
            }
        }

        assert_eq!(tableize_around(&mut map, TilePos::new(0, 0), &materials, &mut rng), 2);
        assert_eq!(
            items_at(&map, TilePos::new(0, 0)),
            vec![100, 400 + TableAlignment::NorthEnd.index() as u16]
        );
        assert_eq!(tableize_map(&mut map, &materials, &mut rng, |_, _| {}), 0);

        // only the middle of the top row has a piece of its own; corners fall back to center
        assert_eq!(carpetize_map(&mut map, &materials, &mut rng, |_, _| {}), 1);
        assert!(items_at(&map, TilePos::new(0, 1)).contains(&800));
        assert!(items_at(&map, TilePos::new(1, 1)).contains(&801));
        assert!(items_at(&map, TilePos::new(1, 2)).contains(&800));
        assert_eq!(carpetize_around(&mut map, TilePos::new(1, 1), &materials, &mut rng), 0);
    }
}
