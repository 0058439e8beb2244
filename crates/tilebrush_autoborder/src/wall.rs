//! Wall brush definitions
//!
//! A wall brush holds, for every [`WallAlignment`] slot, a weighted set of
//! wall items and a list of door/window items. Wall decoration brushes use
//! the same structure.

use crate::brush::BrushRegistry;
use crate::weighted::WeightedTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tilebrush_core::{BrushId, DoorKind, ItemId, WallAlignment};

/// Longest redirect chain followed before giving up
pub const MAX_REDIRECT_HOPS: usize = 16;

/// A door or window item hosted by a wall slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorDef {
    pub item: ItemId,
    pub kind: DoorKind,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallBrush {
    pub id: BrushId,
    pub name: String,
    pub look_id: u16,
    pub wall_slots: [WeightedTable<ItemId>; WallAlignment::COUNT],
    pub door_slots: [Vec<DoorDef>; WallAlignment::COUNT],
    pub friends: Vec<BrushId>,
    /// Brush whose slots fill in for the ones this brush leaves empty
    pub redirect_to: Option<BrushId>,
}

impl WallBrush {
    pub fn new(id: BrushId, name: String) -> Self {
        Self {
            id,
            name,
            look_id: 0,
            wall_slots: std::array::from_fn(|_| WeightedTable::new()),
            door_slots: std::array::from_fn(|_| Vec::new()),
            friends: Vec::new(),
            redirect_to: None,
        }
    }

    pub fn slot(&self, alignment: WallAlignment) -> &WeightedTable<ItemId> {
        &self.wall_slots[alignment.index()]
    }

    pub fn slot_mut(&mut self, alignment: WallAlignment) -> &mut WeightedTable<ItemId> {
        &mut self.wall_slots[alignment.index()]
    }

    pub fn doors(&self, alignment: WallAlignment) -> &[DoorDef] {
        &self.door_slots[alignment.index()]
    }

    pub fn doors_mut(&mut self, alignment: WallAlignment) -> &mut Vec<DoorDef> {
        &mut self.door_slots[alignment.index()]
    }

    pub fn friend_of(&self, other: BrushId) -> bool {
        self.friends.contains(&other)
    }

    /// Whether `item` is one of this brush's walls or doors at `alignment`.
    /// Redirect targets are not searched; see [`BrushRegistry::wall_chain`].
    pub fn has_wall(&self, item: ItemId, alignment: WallAlignment) -> bool {
        self.slot(alignment).contains(&item)
            || self.doors(alignment).iter().any(|door| door.item == item)
    }

    /// Door kind of one of this brush's door items
    pub fn door_kind_of(&self, item: ItemId) -> Option<DoorKind> {
        self.door_slots
            .iter()
            .flatten()
            .find(|door| door.item == item)
            .map(|door| door.kind)
    }

    /// Draw a wall item for a slot
    pub fn pick_wall(&self, alignment: WallAlignment, rng: &mut impl Rng) -> Option<ItemId> {
        self.slot(alignment).select(rng).copied()
    }

    /// Find a door of `kind` for a slot, preferring one with the given open state
    pub fn pick_door(
        &self,
        alignment: WallAlignment,
        kind: DoorKind,
        open: bool,
    ) -> Option<ItemId> {
        let mut fallback = None;
        for door in self.doors(alignment).iter().filter(|door| door.kind == kind) {
            if door.open == open {
                return Some(door.item);
            }
            fallback.get_or_insert(door.item);
        }
        fallback
    }

    pub fn has_any_item(&self) -> bool {
        self.wall_slots.iter().any(|slot| !slot.is_empty())
            || self.door_slots.iter().any(|doors| !doors.is_empty())
    }
}

/// Iterator over a wall brush and the brushes its redirect links lead to.
///
/// Stops at a missing brush, at a brush already visited, or after
/// [`MAX_REDIRECT_HOPS`] brushes.
pub struct RedirectChain<'a> {
    registry: &'a BrushRegistry,
    next: Option<BrushId>,
    visited: HashSet<BrushId>,
}

impl<'a> RedirectChain<'a> {
    pub(crate) fn new(registry: &'a BrushRegistry, start: BrushId) -> Self {
        Self {
            registry,
            next: Some(start),
            visited: HashSet::new(),
        }
    }
}

impl<'a> Iterator for RedirectChain<'a> {
    type Item = &'a WallBrush;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if self.visited.len() >= MAX_REDIRECT_HOPS {
            tracing::debug!(brush = id.0, "redirect chain too long, cut");
            return None;
        }
        if !self.visited.insert(id) {
            tracing::debug!(brush = id.0, "redirect chain loops back, cut");
            return None;
        }

        let brush = self.registry.wall_brush(id)?;
        if let Some(target) = brush.redirect_to {
            tracing::trace!(from = id.0, to = target.0, "following wall redirect");
        }
        self.next = brush.redirect_to;
        Some(brush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn stone() -> WallBrush {
        let mut brush = WallBrush::new(BrushId(1), "stone".to_string());
        *brush.slot_mut(WallAlignment::Vertical) = WeightedTable::from_weights([(10u16, 1)]);
        brush.doors_mut(WallAlignment::Vertical).extend([
            DoorDef {
                item: 20,
                kind: DoorKind::Normal,
                open: false,
            },
            DoorDef {
                item: 21,
                kind: DoorKind::Normal,
                open: true,
            },
            DoorDef {
                item: 22,
                kind: DoorKind::Window,
                open: true,
            },
        ]);
        brush
    }

    #[test]
    fn test_has_wall_checks_slot() {
        let brush = stone();
        assert!(brush.has_wall(10, WallAlignment::Vertical));
        assert!(brush.has_wall(21, WallAlignment::Vertical));
        assert!(!brush.has_wall(10, WallAlignment::Horizontal));
        assert!(brush.has_any_item());
    }

    #[test]
    fn test_door_kind_of() {
        let brush = stone();
        assert_eq!(brush.door_kind_of(22), Some(DoorKind::Window));
        assert_eq!(brush.door_kind_of(10), None);
    }

    #[test]
    fn test_pick_door_prefers_open_state() {
        let brush = stone();
        assert_eq!(
            brush.pick_door(WallAlignment::Vertical, DoorKind::Normal, true),
            Some(21)
        );
        assert_eq!(
            brush.pick_door(WallAlignment::Vertical, DoorKind::Normal, false),
            Some(20)
        );
        // no closed window: fall back to the open one
        assert_eq!(
            brush.pick_door(WallAlignment::Vertical, DoorKind::Window, false),
            Some(22)
        );
        assert_eq!(
            brush.pick_door(WallAlignment::Vertical, DoorKind::Magic, false),
            None
        );
    }

    #[test]
    fn test_pick_wall_empty_slot() {
        let brush = stone();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(brush.pick_wall(WallAlignment::Vertical, &mut rng), Some(10));
        assert_eq!(brush.pick_wall(WallAlignment::Pole, &mut rng), None);
    }

    fn chained(redirects: &[(u32, Option<u32>)]) -> BrushRegistry {
        let mut registry = BrushRegistry::new();
        for &(id, target) in redirects {
            let mut brush = WallBrush::new(BrushId(id), format!("wall{id}"));
            brush.redirect_to = target.map(BrushId);
            registry.add(Brush::Wall(brush));
        }
        registry
    }

    #[test]
    fn test_chain_follows_redirects() {
        let registry = chained(&[(1, Some(2)), (2, Some(3)), (3, None)]);
        let ids: Vec<_> = registry.wall_chain(BrushId(1)).map(|b| b.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_chain_stops_on_cycle() {
        let registry = chained(&[(1, Some(2)), (2, Some(3)), (3, Some(1))]);
        let ids: Vec<_> = registry.wall_chain(BrushId(2)).map(|b| b.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let registry = chained(&[(1, Some(1))]);
        assert_eq!(registry.wall_chain(BrushId(1)).count(), 1);
    }

    #[test]
    fn test_chain_stops_on_missing_brush() {
        let registry = chained(&[(1, Some(9))]);
        assert_eq!(registry.wall_chain(BrushId(1)).count(), 1);
        assert_eq!(registry.wall_chain(BrushId(9)).count(), 0);
    }
}
