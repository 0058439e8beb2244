//! Brush registry
//!
//! All brushes live in one registry and are addressed by [`BrushId`]. Ids are
//! handed out from 1 in registration order. Names are reserved before the
//! brush is built so that definitions can reference brushes declared later.

use crate::carpet::CarpetBrush;
use crate::ground::GroundBrush;
use crate::table::TableBrush;
use crate::wall::{RedirectChain, WallBrush};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilebrush_core::BrushId;

/// Names that collide with border rule targets
pub const RESERVED_BRUSH_NAMES: [&str; 2] = ["all", "none"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    Ground(GroundBrush),
    Wall(WallBrush),
    WallDecoration(WallBrush),
    Table(TableBrush),
    Carpet(CarpetBrush),
}

impl Brush {
    pub fn id(&self) -> BrushId {
        match self {
            Brush::Ground(brush) => brush.id,
            Brush::Wall(brush) | Brush::WallDecoration(brush) => brush.id,
            Brush::Table(brush) => brush.id,
            Brush::Carpet(brush) => brush.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Brush::Ground(brush) => &brush.name,
            Brush::Wall(brush) | Brush::WallDecoration(brush) => &brush.name,
            Brush::Table(brush) => &brush.name,
            Brush::Carpet(brush) => &brush.name,
        }
    }

    pub fn look_id(&self) -> u16 {
        match self {
            Brush::Ground(brush) => brush.look_id,
            Brush::Wall(brush) | Brush::WallDecoration(brush) => brush.look_id,
            Brush::Table(brush) => brush.look_id,
            Brush::Carpet(brush) => brush.look_id,
        }
    }

    /// Short kind name used in log messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Brush::Ground(_) => "ground",
            Brush::Wall(_) => "wall",
            Brush::WallDecoration(_) => "wall decoration",
            Brush::Table(_) => "table",
            Brush::Carpet(_) => "carpet",
        }
    }

    fn set_id(&mut self, id: BrushId) {
        match self {
            Brush::Ground(brush) => brush.id = id,
            Brush::Wall(brush) | Brush::WallDecoration(brush) => brush.id = id,
            Brush::Table(brush) => brush.id = id,
            Brush::Carpet(brush) => brush.id = id,
        }
    }

    pub fn as_ground(&self) -> Option<&GroundBrush> {
        match self {
            Brush::Ground(brush) => Some(brush),
            _ => None,
        }
    }

    /// The wall data of a structural wall or wall decoration brush
    pub fn as_wall(&self) -> Option<&WallBrush> {
        match self {
            Brush::Wall(brush) | Brush::WallDecoration(brush) => Some(brush),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableBrush> {
        match self {
            Brush::Table(brush) => Some(brush),
            _ => None,
        }
    }

    pub fn as_carpet(&self) -> Option<&CarpetBrush> {
        match self {
            Brush::Carpet(brush) => Some(brush),
            _ => None,
        }
    }

    pub fn is_wall_decoration(&self) -> bool {
        matches!(self, Brush::WallDecoration(_))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrushRegistry {
    /// Slot `n` holds brush id `n + 1`; `None` while only the name is reserved
    brushes: Vec<Option<Brush>>,
    names: HashMap<String, BrushId>,
}

impl BrushRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for a brush name.
    ///
    /// Returns `None` for an empty, reserved or already used name.
    pub fn reserve(&mut self, name: &str) -> Option<BrushId> {
        if name.is_empty()
            || RESERVED_BRUSH_NAMES.contains(&name)
            || self.names.contains_key(name)
        {
            return None;
        }
        self.brushes.push(None);
        let id = BrushId(self.brushes.len() as u32);
        self.names.insert(name.to_string(), id);
        Some(id)
    }

    /// Store the brush for a reserved id. The brush's own id is overwritten.
    pub fn fill(&mut self, id: BrushId, mut brush: Brush) -> bool {
        let Some(slot) = Self::slot_index(id).and_then(|index| self.brushes.get_mut(index)) else {
            return false;
        };
        brush.set_id(id);
        *slot = Some(brush);
        true
    }

    /// Reserve the brush's name and store it in one step
    pub fn add(&mut self, brush: Brush) -> Option<BrushId> {
        let id = self.reserve(brush.name())?;
        self.fill(id, brush);
        Some(id)
    }

    fn slot_index(id: BrushId) -> Option<usize> {
        (id.0 as usize).checked_sub(1)
    }

    pub fn get(&self, id: BrushId) -> Option<&Brush> {
        Self::slot_index(id)
            .and_then(|index| self.brushes.get(index))
            .and_then(Option::as_ref)
    }

    /// Id reserved for a name, whether or not the brush is stored yet
    pub fn id_of(&self, name: &str) -> Option<BrushId> {
        self.names.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Brush> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn ground_brush(&self, id: BrushId) -> Option<&GroundBrush> {
        self.get(id).and_then(Brush::as_ground)
    }

    /// Wall data of a wall or wall decoration brush
    pub fn wall_brush(&self, id: BrushId) -> Option<&WallBrush> {
        self.get(id).and_then(Brush::as_wall)
    }

    pub fn table_brush(&self, id: BrushId) -> Option<&TableBrush> {
        self.get(id).and_then(Brush::as_table)
    }

    pub fn carpet_brush(&self, id: BrushId) -> Option<&CarpetBrush> {
        self.get(id).and_then(Brush::as_carpet)
    }

    /// A wall brush followed by its redirect targets
    pub fn wall_chain(&self, start: BrushId) -> RedirectChain<'_> {
        RedirectChain::new(self, start)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brush> {
        self.brushes.iter().flatten()
    }

    /// Number of stored brushes
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut registry = BrushRegistry::new();
        let grass = registry
            .add(Brush::Ground(GroundBrush::new(BrushId(0), "grass".to_string())))
            .unwrap();
        let wall = registry
            .add(Brush::Wall(WallBrush::new(BrushId(0), "stone wall".to_string())))
            .unwrap();
        assert_eq!(grass, BrushId(1));
        assert_eq!(wall, BrushId(2));
        assert_eq!(registry.ground_brush(grass).map(|b| b.id), Some(grass));
        assert!(registry.ground_brush(wall).is_none());
        assert_eq!(registry.wall_brush(wall).map(|b| b.name.as_str()), Some("stone wall"));
        assert!(registry.get(BrushId(0)).is_none());
    }

    #[test]
    fn test_reserved_and_duplicate_names() {
        let mut registry = BrushRegistry::new();
        assert!(registry.reserve("all").is_none());
        assert!(registry.reserve("none").is_none());
        assert!(registry.reserve("").is_none());
        assert!(registry.reserve("sand").is_some());
        assert!(registry.reserve("sand").is_none());
    }

    #[test]
    fn test_reserved_name_is_not_a_brush_yet() {
        let mut registry = BrushRegistry::new();
        let id = registry.reserve("lava").unwrap();
        assert_eq!(registry.id_of("lava"), Some(id));
        assert!(registry.by_name("lava").is_none());
        assert!(registry.is_empty());

        let lava = GroundBrush::new(BrushId(99), "lava".to_string());
        assert!(registry.fill(id, Brush::Ground(lava)));
        assert_eq!(registry.by_name("lava").map(Brush::id), Some(id));
        assert_eq!(registry.len(), 1);
        let unknown = GroundBrush::new(BrushId(7), "x".to_string());
        assert!(!registry.fill(BrushId(7), Brush::Ground(unknown)));
    }

    #[test]
    fn test_decoration_is_wall_like() {
        let mut registry = BrushRegistry::new();
        let id = registry
            .add(Brush::WallDecoration(WallBrush::new(BrushId(0), "vines".to_string())))
            .unwrap();
        let brush = registry.get(id).unwrap();
        assert!(brush.is_wall_decoration());
        assert_eq!(brush.kind_name(), "wall decoration");
        assert!(registry.wall_brush(id).is_some());
    }

    #[test]
    fn test_table_and_carpet_lookups() {
        let mut registry = BrushRegistry::new();
        let table = registry
            .add(Brush::Table(TableBrush::new(BrushId(0), "counter".to_string())))
            .unwrap();
        let carpet = registry
            .add(Brush::Carpet(CarpetBrush::new(BrushId(0), "rug".to_string())))
            .unwrap();
        assert_eq!(registry.table_brush(table).map(|b| b.id), Some(table));
        assert_eq!(registry.carpet_brush(carpet).map(|b| b.id), Some(carpet));
        assert!(registry.table_brush(carpet).is_none());
        assert!(registry.wall_brush(table).is_none());
        assert_eq!(registry.get(carpet).map(Brush::kind_name), Some("carpet"));
    }
}
