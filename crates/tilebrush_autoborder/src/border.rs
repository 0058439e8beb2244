//! Auto border definitions and the border registry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilebrush_core::{BorderEdge, ItemId};

/// Handle to a border stored in a [`BorderRegistry`].
///
/// Registry-declared borders and inline borders owned by a single ground brush
/// rule both get a handle; only the former are reachable by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BorderRef(pub u32);

/// A set of up to 12 directional pieces stitching one terrain to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoBorder {
    /// Public id, 0 for inline borders
    pub id: u32,
    /// Mountain-style overlay border
    pub is_ground_overlay: bool,
    /// Border family used by specific-case group matching, 0 for none
    pub group: u16,
    pub tiles: [Option<ItemId>; BorderEdge::COUNT],
}

impl AutoBorder {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            is_ground_overlay: false,
            group: 0,
            tiles: [None; BorderEdge::COUNT],
        }
    }

    /// Piece for a slot
    pub fn tile(&self, edge: BorderEdge) -> Option<ItemId> {
        self.tiles[edge.index()]
    }

    pub fn set_tile(&mut self, edge: BorderEdge, item: ItemId) {
        self.tiles[edge.index()] = Some(item);
    }

    /// Items to draw for a slot.
    ///
    /// A missing diagonal piece is replaced by the two straight pieces that
    /// compose it; each missing straight piece is skipped.
    pub fn pieces(&self, edge: BorderEdge) -> Vec<ItemId> {
        if let Some(item) = self.tile(edge) {
            return vec![item];
        }
        match edge.diagonal_parts() {
            Some(parts) => parts.iter().filter_map(|&part| self.tile(part)).collect(),
            None => Vec::new(),
        }
    }

    /// Slot of an item within this border, if it is one of its pieces
    pub fn edge_of(&self, item: ItemId) -> Option<BorderEdge> {
        BorderEdge::ALL
            .iter()
            .copied()
            .find(|edge| self.tile(*edge) == Some(item))
    }
}

/// Storage for every auto border, keyed by handle and by public id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorderRegistry {
    borders: Vec<AutoBorder>,
    by_id: HashMap<u32, BorderRef>,
}

impl BorderRegistry {
    pub fn new() -> Self {
        Self {
            borders: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Register a border under its public id.
    ///
    /// Returns `None` without storing anything when the id is 0 or taken.
    pub fn register(&mut self, border: AutoBorder) -> Option<BorderRef> {
        if border.id == 0 || self.by_id.contains_key(&border.id) {
            return None;
        }
        let id = border.id;
        let handle = self.push(border);
        self.by_id.insert(id, handle);
        Some(handle)
    }

    /// Store an inline border that is only reachable through its handle
    pub fn register_inline(&mut self, mut border: AutoBorder) -> BorderRef {
        border.id = 0;
        self.push(border)
    }

    fn push(&mut self, border: AutoBorder) -> BorderRef {
        let handle = BorderRef(self.borders.len() as u32);
        self.borders.push(border);
        handle
    }

    pub fn get(&self, handle: BorderRef) -> Option<&AutoBorder> {
        self.borders.get(handle.0 as usize)
    }

    pub fn lookup(&self, id: u32) -> Option<BorderRef> {
        self.by_id.get(&id).copied()
    }

    pub fn get_by_id(&self, id: u32) -> Option<&AutoBorder> {
        self.lookup(id).and_then(|handle| self.get(handle))
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.borders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.borders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BorderRef, &AutoBorder)> {
        self.borders
            .iter()
            .enumerate()
            .map(|(i, border)| (BorderRef(i as u32), border))
    }
}
