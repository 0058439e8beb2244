//! Ground border resolution
//!
//! Recomputes the border pieces of a tile from the ground brushes of its
//! eight neighbours:
//!
//! 1. Neighbours sharing a brush are grouped into one 8-bit mask, and the
//!    [`BorderRule`] between the tile's brush and theirs picks the border.
//! 2. Masks resolving to the same border are merged into one cluster that
//!    keeps the highest priority.
//! 3. The tile's border items are cleared and clusters are drawn from the
//!    highest priority down, each mask decoded through the ground table.
//! 4. Specific cases of the rules involved get a chance to rewrite the result.

use crate::border::BorderRef;
use crate::ground::{border_rule_between, BorderRule, GroundBrush, SpecificCase};
use crate::materials::Materials;
use crate::tables::ground_border_slots;
use tilebrush_core::{
    BorderEdge, BrushId, ItemCatalog, ItemId, StackLayer, Tile, TileMap, TilePos,
    NEIGHBOR_OFFSETS,
};

/// Priority of borders drawn against empty space
pub const EMPTY_NEIGHBOR_Z: i32 = 5000;
/// Priority of optional overlays, above every other border
pub const OPTIONAL_BORDER_Z: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BorderCluster {
    alignment: u8,
    z: i32,
    border: Option<BorderRef>,
}

/// Ground brushes of the 8 neighbours of `pos`, in mask bit order.
///
/// Missing tiles, tiles without ground and ground items without a ground
/// brush all read as `None`.
pub fn ground_neighborhood(
    map: &TileMap,
    pos: TilePos,
    materials: &Materials,
) -> [Option<BrushId>; 8] {
    NEIGHBOR_OFFSETS.map(|(dx, dy)| {
        map.neighbor(pos, dx, dy)
            .and_then(|tile| materials.tile_ground_brush(tile))
            .map(|brush| brush.id)
    })
}

/// Recompute the border items of the tile at `pos`.
///
/// Returns whether the tile's items changed. Positions without a tile are
/// left alone.
pub fn resolve_ground_borders(map: &mut TileMap, pos: TilePos, materials: &Materials) -> bool {
    let neighbors = ground_neighborhood(map, pos, materials);
    match map.tile_mut(pos) {
        Some(tile) => borderize_tile(tile, &neighbors, materials),
        None => false,
    }
}

/// Recompute the border items of `tile` given its neighbourhood.
///
/// Returns whether the tile's items changed.
pub fn borderize_tile(
    tile: &mut Tile,
    neighbors: &[Option<BrushId>; 8],
    materials: &Materials,
) -> bool {
    let catalog = &materials.items;
    let before = tile.items().to_vec();

    let brushes: [Option<&GroundBrush>; 8] =
        neighbors.map(|id| id.and_then(|id| materials.ground_brush(id)));
    let center = materials.tile_ground_brush(tile);

    let mut visited = [false; 8];
    let mut clusters: Vec<BorderCluster> = Vec::new();
    let mut specific: Vec<&BorderRule> = Vec::new();

    for i in 0..8 {
        if visited[i] {
            continue;
        }

        match (center, brushes[i]) {
            (Some(brush), Some(other)) => {
                if other.id == brush.id {
                    visited[i] = true;
                    continue;
                }
                if !other.has_outer_border() && !brush.has_inner_border() {
                    visited[i] = true;
                    continue;
                }

                let mut only_optional = false;
                if brush.friend_of(other.id) || other.friend_of(brush.id) {
                    if !other.has_optional_border() {
                        continue;
                    }
                    only_optional = true;
                }

                let mask = collect_mask(&brushes, &mut visited, i, |b| {
                    b.map(|b| b.id) == Some(other.id)
                });
                if mask == 0 {
                    continue;
                }

                if other.has_optional_border() && tile.has_optional_border() {
                    clusters.push(BorderCluster {
                        alignment: mask,
                        z: OPTIONAL_BORDER_Z,
                        border: other.optional_border,
                    });
                    if other.solo_optional_border {
                        only_optional = true;
                    }
                }

                if !only_optional {
                    if let Some(rule) = border_rule_between(Some(brush), Some(other)) {
                        merge_cluster(&mut clusters, mask, other.z_order, rule.border);
                        note_specific_cases(&mut specific, rule);
                    }
                }
            }
            (Some(brush), None) => {
                if brush.has_inner_zilch_border() {
                    let mask = collect_mask(&brushes, &mut visited, i, |b| b.is_none());
                    if mask != 0 {
                        if let Some(rule) = border_rule_between(Some(brush), None) {
                            if rule.border.is_some() {
                                clusters.push(BorderCluster {
                                    alignment: mask,
                                    z: EMPTY_NEIGHBOR_Z,
                                    border: rule.border,
                                });
                            }
                            note_specific_cases(&mut specific, rule);
                        }
                    }
                }
            }
            (None, Some(other)) => {
                if other.has_outer_zilch_border() {
                    let mask = collect_mask(&brushes, &mut visited, i, |b| {
                        b.map(|b| b.id) == Some(other.id)
                    });
                    if mask != 0 {
                        if let Some(rule) = border_rule_between(None, Some(other)) {
                            if rule.border.is_some() {
                                clusters.push(BorderCluster {
                                    alignment: mask,
                                    z: other.z_order,
                                    border: rule.border,
                                });
                            }
                            note_specific_cases(&mut specific, rule);
                        }

                        if other.has_optional_border() && tile.has_optional_border() {
                            clusters.push(BorderCluster {
                                alignment: mask,
                                z: OPTIONAL_BORDER_Z,
                                border: other.optional_border,
                            });
                        } else {
                            tile.set_optional_border(false);
                        }
                    }
                }
            }
            (None, None) => {}
        }
        visited[i] = true;
    }

    clusters.sort_by_key(|cluster| cluster.z);
    tile.remove_border_items(catalog);

    for cluster in clusters.iter().rev() {
        let Some(border) = cluster.border.and_then(|handle| materials.auto_border(handle)) else {
            continue;
        };
        for &edge in ground_border_slots(cluster.alignment).iter().flatten() {
            for item in border.pieces(edge) {
                tile.add_border_item(item, catalog);
            }
        }
    }

    'cases: for rule in &specific {
        for case in &rule.specific_cases {
            if apply_specific_case(tile, case, catalog) == CaseOutcome::EndPass {
                break 'cases;
            }
        }
    }

    tile.items() != before.as_slice()
}

/// Mark every unvisited neighbour from `start` on that matches, returning their mask
fn collect_mask<F>(
    brushes: &[Option<&GroundBrush>; 8],
    visited: &mut [bool; 8],
    start: usize,
    matches: F,
) -> u8
where
    F: Fn(Option<&GroundBrush>) -> bool,
{
    let mut mask = 0u8;
    for j in start..8 {
        if !visited[j] && matches(brushes[j]) {
            visited[j] = true;
            mask |= 1 << j;
        }
    }
    mask
}

fn merge_cluster(clusters: &mut Vec<BorderCluster>, mask: u8, z: i32, border: Option<BorderRef>) {
    if let Some(cluster) = clusters.iter_mut().find(|cluster| cluster.border == border) {
        cluster.alignment |= mask;
        cluster.z = cluster.z.max(z);
        return;
    }
    clusters.push(BorderCluster {
        alignment: mask,
        z,
        border,
    });
}

fn note_specific_cases<'a>(specific: &mut Vec<&'a BorderRule>, rule: &'a BorderRule) {
    if !rule.specific_cases.is_empty() && !specific.iter().any(|known| std::ptr::eq(*known, rule)) {
        specific.push(rule);
    }
}

fn in_group(catalog: &ItemCatalog, item: ItemId, group: u16, edge: BorderEdge) -> bool {
    catalog
        .get(item)
        .map_or(false, |meta| meta.border_group == group && meta.border_edge == Some(edge))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseOutcome {
    Skipped,
    Applied,
    /// A replace case fired; no further case runs on this tile
    EndPass,
}

/// Run one specific case against the tile's border pieces.
///
/// Fires only when every condition is satisfied by some border piece above
/// the ground, scanning up to the first item that is not a border.
fn apply_specific_case(tile: &mut Tile, case: &SpecificCase, catalog: &ItemCatalog) -> CaseOutcome {
    if !case.is_actionable() {
        return CaseOutcome::Skipped;
    }

    let borders: Vec<ItemId> = tile
        .clip_items(catalog)
        .take_while(|&id| catalog.is_border(id))
        .collect();

    let group_hit = case.match_group.map_or(false, |(group, edge)| {
        borders.iter().any(|&id| in_group(catalog, id, group, edge))
    });
    let item_hits = case
        .match_items
        .iter()
        .filter(|item| borders.contains(item))
        .count();
    if item_hits + usize::from(group_hit) != case.pattern_len() {
        return CaseOutcome::Skipped;
    }

    if case.delete_all_matched {
        let matched = |id: ItemId| {
            case.match_items.contains(&id)
                || case
                    .match_group
                    .map_or(false, |(group, edge)| in_group(catalog, id, group, edge))
        };
        let removed = tile.remove_items(|id| borders.contains(&id) && matched(id));
        tracing::trace!(pos = ?tile.pos, removed, "specific case deleted border pieces");
        return CaseOutcome::Applied;
    }

    let Some((from, to)) = case.replace else {
        return CaseOutcome::Skipped;
    };
    if borders.contains(&from) {
        tracing::trace!(pos = ?tile.pos, from, to, "specific case replaced border piece");
        tile.transform_item(from, to);
        return CaseOutcome::EndPass;
    }
    // the scan ran into a non-border item before finding the piece
    let above_ground = tile
        .items()
        .iter()
        .filter(|&&id| catalog.layer(id) != StackLayer::Ground)
        .count();
    if above_ground > borders.len() {
        CaseOutcome::EndPass
    } else {
        CaseOutcome::Skipped
    }
}
