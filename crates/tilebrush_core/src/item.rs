//! Item identifiers and the item metadata catalog
//!
//! Tiles only store item ids. Everything the bordering engine needs to know
//! about an item (which layer of the stack it lives in, which brush owns it,
//! which border slot or wall shape it represents) lives in an [`ItemType`]
//! looked up through the [`ItemCatalog`].

use crate::alignment::{BorderEdge, DoorKind, WallAlignment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server-side item type id
pub type ItemId = u16;

/// Identifier of a brush in a brush registry.
///
/// Ids are assigned by the registry starting at 1. [`BrushId::ALL`] is the
/// wildcard used by friend lists and border rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrushId(pub u32);

impl BrushId {
    /// Wildcard matching every brush
    pub const ALL: BrushId = BrushId(0xFFFF_FFFF);

    pub fn is_all(self) -> bool {
        self == Self::ALL
    }
}

/// Position class of an item in a tile's item stack, bottom to top.
///
/// A tile keeps its items sorted by this value; items of the same layer keep
/// insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StackLayer {
    /// Ground tiles ("bank" items), at most one expected per tile
    Ground,
    /// Borders and other overlays drawn right above the ground
    Clip,
    /// Walls and other items anchored to the bottom of the stack
    Bottom,
    /// Items always drawn above creatures
    Top,
    /// Everything else
    #[default]
    Normal,
}

/// Binding of an item to a wall brush shape slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallBinding {
    pub brush: BrushId,
    pub alignment: WallAlignment,
    /// Owned by a wall decoration brush rather than a structural wall brush
    pub decoration: bool,
}

/// Door metadata for items registered as a wall brush door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorInfo {
    pub kind: DoorKind,
    pub open: bool,
}

/// Engine-relevant metadata for one item type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: ItemId,
    pub layer: StackLayer,
    /// Ground brush that paints this item, for ground items
    pub ground_brush: Option<BrushId>,
    /// Border piece (clip-layer item placed by the ground border resolver)
    pub is_border: bool,
    /// Border piece of a mountain-style optional overlay
    pub is_optional_border: bool,
    /// Border family, 0 when the item belongs to no group
    pub border_group: u16,
    /// Slot this item fills in the first border that declared it
    pub border_edge: Option<BorderEdge>,
    pub wall: Option<WallBinding>,
    /// Neighbouring walls do not connect to this item
    pub wall_hate_me: bool,
    pub door: Option<DoorInfo>,
    /// Table brush that aligns this item
    pub table_brush: Option<BrushId>,
    /// Carpet brush that aligns this item
    pub carpet_brush: Option<BrushId>,
}

impl ItemType {
    pub fn new(id: ItemId, layer: StackLayer) -> Self {
        Self {
            id,
            layer,
            ..Default::default()
        }
    }

    pub fn is_ground(&self) -> bool {
        self.layer == StackLayer::Ground
    }

    pub fn is_wall(&self) -> bool {
        self.wall.is_some()
    }

    /// Structural wall (wall brush, not a decoration)
    pub fn is_structural_wall(&self) -> bool {
        matches!(self.wall, Some(binding) if !binding.decoration)
    }

    pub fn is_wall_decoration(&self) -> bool {
        matches!(self.wall, Some(binding) if binding.decoration)
    }

    pub fn wall_alignment(&self) -> Option<WallAlignment> {
        self.wall.map(|binding| binding.alignment)
    }

    /// Brush of any kind that owns this item
    pub fn owner(&self) -> Option<BrushId> {
        self.ground_brush
            .or(self.wall.map(|binding| binding.brush))
            .or(self.table_brush)
            .or(self.carpet_brush)
    }
}

/// Metadata for every item known to the loaded materials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemType>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Insert or replace the metadata of an item
    pub fn insert(&mut self, item: ItemType) {
        self.items.insert(item.id, item);
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemType> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemType> {
        self.items.get_mut(&id)
    }

    /// Get the metadata of an item, creating a default entry in `layer` if absent
    pub fn entry(&mut self, id: ItemId, layer: StackLayer) -> &mut ItemType {
        self.items
            .entry(id)
            .or_insert_with(|| ItemType::new(id, layer))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stack layer of an item; unknown items are ordinary items
    pub fn layer(&self, id: ItemId) -> StackLayer {
        self.get(id).map(|t| t.layer).unwrap_or_default()
    }

    pub fn is_border(&self, id: ItemId) -> bool {
        self.get(id).map_or(false, |t| t.is_border)
    }

    pub fn ground_brush(&self, id: ItemId) -> Option<BrushId> {
        self.get(id)
            .filter(|t| t.is_ground())
            .and_then(|t| t.ground_brush)
    }

    pub fn wall(&self, id: ItemId) -> Option<WallBinding> {
        self.get(id).and_then(|t| t.wall)
    }

    pub fn door(&self, id: ItemId) -> Option<DoorInfo> {
        self.get(id).and_then(|t| t.door)
    }

    pub fn table_brush(&self, id: ItemId) -> Option<BrushId> {
        self.get(id).and_then(|t| t.table_brush)
    }

    pub fn carpet_brush(&self, id: ItemId) -> Option<BrushId> {
        self.get(id).and_then(|t| t.carpet_brush)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemType> {
        self.items.values()
    }
}
