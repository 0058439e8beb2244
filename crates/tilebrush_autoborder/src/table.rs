//! Table brush definitions

use crate::weighted::WeightedTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tilebrush_core::{BrushId, ItemId, TableAlignment};

/// Tables and counters: a weighted item set per [`TableAlignment`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBrush {
    pub id: BrushId,
    pub name: String,
    pub look_id: u16,
    pub slots: [WeightedTable<ItemId>; TableAlignment::COUNT],
}

impl TableBrush {
    pub fn new(id: BrushId, name: String) -> Self {
        Self {
            id,
            name,
            look_id: 0,
            slots: std::array::from_fn(|_| WeightedTable::new()),
        }
    }

    pub fn slot(&self, alignment: TableAlignment) -> &WeightedTable<ItemId> {
        &self.slots[alignment.index()]
    }

    pub fn slot_mut(&mut self, alignment: TableAlignment) -> &mut WeightedTable<ItemId> {
        &mut self.slots[alignment.index()]
    }

    /// Draw an item for a shape. Empty slots have no fallback.
    pub fn pick_table(&self, alignment: TableAlignment, rng: &mut impl Rng) -> Option<ItemId> {
        self.slot(alignment).select(rng).copied()
    }

    pub fn has_any_item(&self) -> bool {
        self.slots.iter().any(|slot| !slot.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_table_uses_own_slot_only() {
        let mut brush = TableBrush::new(BrushId(1), "counter".to_string());
        assert!(!brush.has_any_item());
        brush.slot_mut(TableAlignment::Alone).push(400, 1);
        brush.slot_mut(TableAlignment::Vertical).push(401, 1);

        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(brush.pick_table(TableAlignment::Vertical, &mut rng), Some(401));
        assert_eq!(brush.pick_table(TableAlignment::NorthEnd, &mut rng), None);
        assert!(brush.has_any_item());
    }
}
