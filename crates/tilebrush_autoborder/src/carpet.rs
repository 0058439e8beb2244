//! Carpet brush definitions

use crate::weighted::WeightedTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tilebrush_core::{BrushId, CarpetPiece, ItemId};

/// Carpets: a weighted item set for the center and each border piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarpetBrush {
    pub id: BrushId,
    pub name: String,
    pub look_id: u16,
    pub slots: [WeightedTable<ItemId>; CarpetPiece::COUNT],
}

impl CarpetBrush {
    pub fn new(id: BrushId, name: String) -> Self {
        Self {
            id,
            name,
            look_id: 0,
            slots: std::array::from_fn(|_| WeightedTable::new()),
        }
    }

    pub fn slot(&self, piece: CarpetPiece) -> &WeightedTable<ItemId> {
        &self.slots[piece.index()]
    }

    pub fn slot_mut(&mut self, piece: CarpetPiece) -> &mut WeightedTable<ItemId> {
        &mut self.slots[piece.index()]
    }

    /// Draw an item for a piece.
    ///
    /// An empty slot falls back to the center, then to the first slot that
    /// has any item, so a carpet with items never comes up empty.
    pub fn pick_carpet(&self, piece: CarpetPiece, rng: &mut impl Rng) -> Option<ItemId> {
        if let Some(&item) = self.slot(piece).select(&mut *rng) {
            return Some(item);
        }
        if let Some(&item) = self.slot(CarpetPiece::Center).select(&mut *rng) {
            return Some(item);
        }
        self.slots
            .iter()
            .find_map(|slot| slot.select(&mut *rng).copied())
    }

    pub fn has_any_item(&self) -> bool {
        self.slots.iter().any(|slot| !slot.is_empty())
    }
}
