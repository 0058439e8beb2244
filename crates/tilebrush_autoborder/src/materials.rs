//! The loaded material set consumed by resolvers and painters

use crate::border::{AutoBorder, BorderRef, BorderRegistry};
use crate::brush::{Brush, BrushRegistry};
use crate::carpet::CarpetBrush;
use crate::ground::GroundBrush;
use crate::table::TableBrush;
use crate::wall::WallBrush;
use serde::{Deserialize, Serialize};
use tilebrush_core::{BrushId, ItemCatalog, Tile};

/// Item metadata, borders and brushes of one loaded project.
///
/// Built once by a loader and only read afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Materials {
    pub items: ItemCatalog,
    pub borders: BorderRegistry,
    pub brushes: BrushRegistry,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brush(&self, id: BrushId) -> Option<&Brush> {
        self.brushes.get(id)
    }

    pub fn ground_brush(&self, id: BrushId) -> Option<&GroundBrush> {
        self.brushes.ground_brush(id)
    }

    pub fn ground_brush_by_name(&self, name: &str) -> Option<&GroundBrush> {
        self.brushes.by_name(name).and_then(Brush::as_ground)
    }

    pub fn wall_brush(&self, id: BrushId) -> Option<&WallBrush> {
        self.brushes.wall_brush(id)
    }

    pub fn table_brush(&self, id: BrushId) -> Option<&TableBrush> {
        self.brushes.table_brush(id)
    }

    pub fn carpet_brush(&self, id: BrushId) -> Option<&CarpetBrush> {
        self.brushes.carpet_brush(id)
    }

    pub fn auto_border(&self, handle: BorderRef) -> Option<&AutoBorder> {
        self.borders.get(handle)
    }

    pub fn auto_border_by_id(&self, id: u32) -> Option<&AutoBorder> {
        self.borders.get_by_id(id)
    }

    /// Ground brush owning the tile's ground item
    pub fn tile_ground_brush(&self, tile: &Tile) -> Option<&GroundBrush> {
        tile.ground_brush(&self.items)
            .and_then(|id| self.ground_brush(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilebrush_core::{ItemType, StackLayer, TilePos};

    #[test]
    fn test_lookups() {
        let mut materials = Materials::new();
        let grass = materials
            .brushes
            .add(Brush::Ground(GroundBrush::new(BrushId(0), "grass".to_string())))
            .unwrap();
        let mut item = ItemType::new(100, StackLayer::Ground);
        item.ground_brush = Some(grass);
        materials.items.insert(item);
        let handle = materials.borders.register(AutoBorder::new(5)).unwrap();

        assert_eq!(materials.ground_brush_by_name("grass").map(|b| b.id), Some(grass));
        assert!(materials.ground_brush_by_name("sand").is_none());
        assert!(materials.wall_brush(grass).is_none());
        assert_eq!(materials.auto_border(handle).map(|b| b.id), Some(5));
        assert_eq!(materials.auto_border_by_id(5).map(|b| b.id), Some(5));

        let tile = Tile::with_items(TilePos::new(0, 0), vec![100]);
        assert_eq!(materials.tile_ground_brush(&tile).map(|b| b.id), Some(grass));
    }
}
