//! A single map tile and its item stack

use crate::item::{BrushId, ItemCatalog, ItemId, StackLayer, WallBinding};
use serde::{Deserialize, Serialize};

/// Tile coordinates. `y` grows southward, `x` grows eastward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A tile: an ordered item stack plus per-tile flags.
///
/// Items are kept sorted by [`StackLayer`]; within a layer they keep the order
/// in which they were added. The ground layer holds at most one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: TilePos,
    items: Vec<ItemId>,
    /// Accepts mountain-style optional border overlays from neighbours
    #[serde(default)]
    optional_border: bool,
}

impl Tile {
    pub fn new(pos: TilePos) -> Self {
        Self {
            pos,
            items: Vec::new(),
            optional_border: false,
        }
    }

    /// Build a tile from items already in stack order
    pub fn with_items(pos: TilePos, items: Vec<ItemId>) -> Self {
        Self {
            pos,
            items,
            optional_border: false,
        }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    pub fn has_optional_border(&self) -> bool {
        self.optional_border
    }

    pub fn set_optional_border(&mut self, value: bool) {
        self.optional_border = value;
    }

    /// The ground item, if the bottom of the stack is one
    pub fn ground(&self, catalog: &ItemCatalog) -> Option<ItemId> {
        self.items
            .first()
            .copied()
            .filter(|&id| catalog.layer(id) == StackLayer::Ground)
    }

    /// Ground brush owning the tile's ground item
    pub fn ground_brush(&self, catalog: &ItemCatalog) -> Option<BrushId> {
        self.ground(catalog).and_then(|id| catalog.ground_brush(id))
    }

    /// First structural wall item with its stack index and binding
    pub fn wall_item(&self, catalog: &ItemCatalog) -> Option<(usize, ItemId, WallBinding)> {
        self.items.iter().enumerate().find_map(|(index, &id)| {
            catalog
                .wall(id)
                .filter(|binding| !binding.decoration)
                .map(|binding| (index, id, binding))
        })
    }

    /// Items of the clip layer (borders and overlays), bottom to top
    pub fn clip_items<'a>(&'a self, catalog: &'a ItemCatalog) -> impl Iterator<Item = ItemId> + 'a {
        self.items
            .iter()
            .copied()
            .skip_while(move |&id| catalog.layer(id) == StackLayer::Ground)
            .take_while(move |&id| catalog.layer(id) == StackLayer::Clip)
    }

    /// Insert an item at its place in the stack.
    ///
    /// A ground item replaces the current ground. Any other item goes on top
    /// of the items of its own layer.
    pub fn add_item(&mut self, id: ItemId, catalog: &ItemCatalog) {
        let layer = catalog.layer(id);
        if layer == StackLayer::Ground {
            if self.ground(catalog).is_some() {
                self.items[0] = id;
            } else {
                self.items.insert(0, id);
            }
            return;
        }

        let index = self
            .items
            .iter()
            .position(|&other| catalog.layer(other) > layer)
            .unwrap_or(self.items.len());
        self.items.insert(index, id);
    }

    /// Add a border piece on top of the existing clip layer
    pub fn add_border_item(&mut self, id: ItemId, catalog: &ItemCatalog) {
        self.add_item(id, catalog);
    }

    /// Remove every item matching `predicate`, returning how many were removed
    pub fn remove_items<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(ItemId) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|&id| !predicate(id));
        before - self.items.len()
    }

    /// Remove all border pieces
    pub fn remove_border_items(&mut self, catalog: &ItemCatalog) -> usize {
        self.remove_items(|id| catalog.is_border(id))
    }

    /// Replace the first occurrence of `old` with `new` in place
    pub fn transform_item(&mut self, old: ItemId, new: ItemId) -> bool {
        match self.items.iter_mut().find(|id| **id == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    /// Replace the item at a stack index in place
    pub fn transform_at(&mut self, index: usize, new: ItemId) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }
}
