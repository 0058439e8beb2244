//! Material fixtures shared by the unit tests

use crate::border::{AutoBorder, BorderRef};
use crate::brush::Brush;
use crate::carpet::CarpetBrush;
use crate::ground::GroundBrush;
use crate::materials::Materials;
use crate::table::TableBrush;
use crate::wall::WallBrush;
use crate::weighted::WeightedTable;
use tilebrush_core::{
    BorderEdge, BrushId, CarpetPiece, DoorInfo, ItemId, StackLayer, TableAlignment, Tile,
    TileMap, TilePos, WallAlignment, WallBinding,
};

/// Register a border whose piece for `edge` is `base + edge.index()`
pub(crate) fn border(
    materials: &mut Materials,
    id: u32,
    base: ItemId,
    group: u16,
    diagonals: bool,
) -> BorderRef {
    let mut border = AutoBorder::new(id);
    border.group = group;
    for edge in BorderEdge::ALL {
        if edge.is_diagonal() && !diagonals {
            continue;
        }
        let item = base + edge.index() as ItemId;
        border.set_tile(edge, item);
        let meta = materials.items.entry(item, StackLayer::Clip);
        meta.is_border = true;
        meta.border_group = group;
        meta.border_edge = Some(edge);
    }
    materials.borders.register(border).unwrap()
}

/// Plain border item outside any border, e.g. a specific-case replacement
pub(crate) fn border_item(materials: &mut Materials, item: ItemId) {
    materials.items.entry(item, StackLayer::Clip).is_border = true;
}

pub(crate) fn ground(
    materials: &mut Materials,
    name: &str,
    z_order: i32,
    item: ItemId,
    configure: impl FnOnce(&mut GroundBrush),
) -> BrushId {
    let id = materials.brushes.reserve(name).unwrap();
    let mut brush = GroundBrush::new(id, name.to_string());
    brush.z_order = z_order;
    brush.choices = WeightedTable::from_weights([(item, 1)]);
    configure(&mut brush);
    for &choice in brush.choices.values() {
        materials.items.entry(choice, StackLayer::Ground).ground_brush = Some(id);
    }
    materials.brushes.fill(id, Brush::Ground(brush));
    id
}

fn wall_like(
    materials: &mut Materials,
    name: &str,
    decoration: bool,
    configure: impl FnOnce(&mut WallBrush),
) -> BrushId {
    let id = materials.brushes.reserve(name).unwrap();
    let mut brush = WallBrush::new(id, name.to_string());
    configure(&mut brush);
    for alignment in WallAlignment::ALL {
        let binding = WallBinding {
            brush: id,
            alignment,
            decoration,
        };
        for &item in brush.slot(alignment).values() {
            materials.items.entry(item, StackLayer::Bottom).wall = Some(binding);
        }
        for door in brush.doors(alignment) {
            let meta = materials.items.entry(door.item, StackLayer::Bottom);
            meta.wall = Some(binding);
            meta.door = Some(DoorInfo {
                kind: door.kind,
                open: door.open,
            });
        }
    }
    let brush = if decoration {
        Brush::WallDecoration(brush)
    } else {
        Brush::Wall(brush)
    };
    materials.brushes.fill(id, brush);
    id
}

pub(crate) fn wall(
    materials: &mut Materials,
    name: &str,
    configure: impl FnOnce(&mut WallBrush),
) -> BrushId {
    wall_like(materials, name, false, configure)
}

pub(crate) fn decoration(
    materials: &mut Materials,
    name: &str,
    configure: impl FnOnce(&mut WallBrush),
) -> BrushId {
    wall_like(materials, name, true, configure)
}

pub(crate) fn table(
    materials: &mut Materials,
    name: &str,
    configure: impl FnOnce(&mut TableBrush),
) -> BrushId {
    let id = materials.brushes.reserve(name).unwrap();
    let mut brush = TableBrush::new(id, name.to_string());
    configure(&mut brush);
    for alignment in TableAlignment::ALL {
        for &item in brush.slot(alignment).values() {
            materials.items.entry(item, StackLayer::Normal).table_brush = Some(id);
        }
    }
    materials.brushes.fill(id, Brush::Table(brush));
    id
}

pub(crate) fn carpet(
    materials: &mut Materials,
    name: &str,
    configure: impl FnOnce(&mut CarpetBrush),
) -> BrushId {
    let id = materials.brushes.reserve(name).unwrap();
    let mut brush = CarpetBrush::new(id, name.to_string());
    configure(&mut brush);
    for piece in (0..CarpetPiece::COUNT).filter_map(CarpetPiece::from_index) {
        for &item in brush.slot(piece).values() {
            materials.items.entry(item, StackLayer::Bottom).carpet_brush = Some(id);
        }
    }
    materials.brushes.fill(id, Brush::Carpet(brush));
    id
}

/// Put a single item in a wall slot
pub(crate) fn set_slot(brush: &mut WallBrush, alignment: WallAlignment, item: ItemId) {
    *brush.slot_mut(alignment) = WeightedTable::from_weights([(item, 1)]);
}

/// A map where every cell holds one item
pub(crate) fn filled_map(width: u32, height: u32, item: ItemId) -> TileMap {
    let mut map = TileMap::new("test".to_string(), width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            map.set_tile(Tile::with_items(TilePos::new(x, y), vec![item]));
        }
    }
    map
}

pub(crate) fn items_at(map: &TileMap, pos: TilePos) -> Vec<ItemId> {
    map.tile(pos).map(|tile| tile.items().to_vec()).unwrap_or_default()
}
