//! Raw material file structures
//!
//! These mirror the JSON layout one to one. Names and ids are still
//! unresolved; see [`crate::resolve`] for turning them into [`Materials`].
//!
//! [`Materials`]: tilebrush_autoborder::Materials

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tilebrush_core::{ItemId, StackLayer};

/// Top-level material file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialsFile {
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub borders: Vec<BorderDef>,
    #[serde(default)]
    pub brushes: Vec<BrushDef>,
}

/// Item not otherwise owned by a brush
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    #[serde(default)]
    pub layer: StackLayer,
}

/// Registry border with a public id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderDef {
    pub id: u32,
    #[serde(default)]
    pub group: u16,
    /// `"optional"` marks a mountain-style overlay border
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Edge name (`n`, `cnw`, `dse`, ...) to item id
    #[serde(default)]
    pub edges: BTreeMap<String, ItemId>,
}

impl BorderDef {
    pub fn is_optional(&self) -> bool {
        self.kind.as_deref() == Some("optional")
    }
}

/// Weighted item entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanceDef {
    pub id: ItemId,
    #[serde(default = "default_chance")]
    pub chance: u32,
}

fn default_chance() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrushDef {
    #[serde(alias = "border")]
    Ground(GroundBrushDef),
    Wall(WallBrushDef),
    WallDecoration(WallBrushDef),
    Table(TableBrushDef),
    Carpet(CarpetBrushDef),
}

impl BrushDef {
    pub fn name(&self) -> &str {
        match self {
            BrushDef::Ground(def) => &def.name,
            BrushDef::Wall(def) | BrushDef::WallDecoration(def) => &def.name,
            BrushDef::Table(def) => &def.name,
            BrushDef::Carpet(def) => &def.name,
        }
    }

    /// Tag name; definitions sharing a name must share this too
    pub fn kind_name(&self) -> &'static str {
        match self {
            BrushDef::Ground(_) => "ground",
            BrushDef::Wall(_) => "wall",
            BrushDef::WallDecoration(_) => "wall_decoration",
            BrushDef::Table(_) => "table",
            BrushDef::Carpet(_) => "carpet",
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, BrushDef::Wall(_) | BrushDef::WallDecoration(_))
    }
}

/// Either a registry border id or an inline edge table.
///
/// Inline tables need `ground_equivalent`, the ground item they stand for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorderSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_equivalent: Option<ItemId>,
    #[serde(default)]
    pub group: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub edges: BTreeMap<String, ItemId>,
}

/// Ground brush body.
///
/// A later definition with the same name continues the brush: unset scalars
/// keep their earlier value and lists are appended to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundBrushDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_id: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_order: Option<i32>,
    /// Defaults to true on a new brush
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomize: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solo_optional: Option<bool>,
    /// Drop the border rules collected so far before adding this body's
    #[serde(default)]
    pub clear_borders: bool,
    /// Drop the friend or enemy list collected so far
    #[serde(default)]
    pub clear_friends: bool,
    #[serde(default)]
    pub items: Vec<ChanceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<BorderSource>,
    #[serde(default)]
    pub borders: Vec<BorderRuleDef>,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorderRuleDef {
    /// Brush name, `"all"` (default) or `"none"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// `"outer"` (default) or `"inner"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(rename = "super", default)]
    pub is_super: bool,
    /// Border id; `0` declares "no border" for this pairing
    #[serde(flatten)]
    pub source: BorderSource,
    #[serde(default)]
    pub specific: Vec<SpecificCaseDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificCaseDef {
    #[serde(default)]
    pub conditions: Vec<ConditionDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionDef {
    /// The piece of a registry border at an edge
    MatchBorder { id: u32, edge: String },
    /// Any piece of a border group at an edge
    MatchGroup { group: u16, edge: String },
    MatchItem { id: ItemId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionDef {
    /// Replace the piece of a registry border at an edge
    ReplaceBorder { id: u32, edge: String, with: ItemId },
    ReplaceItem { id: ItemId, with: ItemId },
    /// Delete every matched piece
    DeleteBorders,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallBrushDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_id: Option<u16>,
    #[serde(default)]
    pub walls: Vec<WallSlotDef>,
    #[serde(default)]
    pub friends: Vec<WallFriendDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSlotDef {
    /// Alignment name (`vertical`, `south T`, `corner`, ...)
    #[serde(rename = "type")]
    pub alignment: String,
    #[serde(default)]
    pub items: Vec<ChanceDef>,
    #[serde(default)]
    pub doors: Vec<DoorItemDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorItemDef {
    pub id: ItemId,
    /// Door type name, possibly a group (`any door`, `any window`, `any`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Required for doors; windows default to open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
    #[serde(default)]
    pub hate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallFriendDef {
    pub name: String,
    /// Use this brush's slots where ours are empty
    #[serde(default)]
    pub redirect: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableBrushDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_id: Option<u16>,
    #[serde(default)]
    pub tables: Vec<TableSlotDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSlotDef {
    /// `alone`, `vertical`, `horizontal`, `north`, `east`, `south` or `west`
    #[serde(rename = "align")]
    pub alignment: String,
    #[serde(default)]
    pub items: Vec<ChanceDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarpetBrushDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_id: Option<u16>,
    #[serde(default)]
    pub carpets: Vec<CarpetSlotDef>,
}

/// Carpet piece. Without `items`, `id` is the only choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarpetSlotDef {
    /// Border edge name or `center`
    #[serde(rename = "align")]
    pub piece: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub items: Vec<ChanceDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brush_tags() {
        let json = r#"[
            { "type": "border", "name": "grass" },
            { "type": "ground", "name": "sand", "z_order": 3 },
            { "type": "wall", "name": "stone" },
            { "type": "wall_decoration", "name": "torch" },
            { "type": "table", "name": "counter" },
            { "type": "carpet", "name": "rug" }
        ]"#;
        let brushes: Vec<BrushDef> = serde_json::from_str(json).unwrap();
        assert_eq!(brushes.len(), 6);
        assert!(matches!(&brushes[0], BrushDef::Ground(def) if def.randomize.is_none()));
        assert!(matches!(&brushes[1], BrushDef::Ground(def) if def.z_order == Some(3)));
        assert!(brushes[2].is_wall());
        assert!(matches!(brushes[3], BrushDef::WallDecoration(_)));
        assert_eq!(brushes[0].kind_name(), brushes[1].kind_name());
        assert!(!brushes[4].is_wall());
        assert_eq!(brushes[5].kind_name(), "carpet");
    }

    #[test]
    fn test_parse_table_and_carpet_slots() {
        let json = r#"[
            {
                "type": "table", "name": "counter",
                "tables": [{ "align": "vertical", "items": [{ "id": 401, "chance": 2 }] }]
            },
            {
                "type": "carpet", "name": "rug",
                "carpets": [
                    { "align": "center", "items": [{ "id": 800 }] },
                    { "align": "n", "id": 801 }
                ]
            },
            { "type": "ground", "name": "grass", "clear_borders": true }
        ]"#;
        let brushes: Vec<BrushDef> = serde_json::from_str(json).unwrap();
        let BrushDef::Table(table) = &brushes[0] else {
            panic!("expected a table brush");
        };
        assert_eq!(table.tables[0].alignment, "vertical");
        assert_eq!(table.tables[0].items[0].chance, 2);

        let BrushDef::Carpet(carpet) = &brushes[1] else {
            panic!("expected a carpet brush");
        };
        assert_eq!(carpet.carpets[1].piece, "n");
        assert_eq!(carpet.carpets[1].id, Some(801));
        assert!(carpet.carpets[1].items.is_empty());

        assert!(matches!(&brushes[2], BrushDef::Ground(def) if def.clear_borders && !def.clear_friends));
    }

    #[test]
    fn test_parse_border_rule_with_inline_edges() {
        let json = r#"{
            "to": "none",
            "align": "inner",
            "super": true,
            "ground_equivalent": 100,
            "edges": { "n": 1, "dnw": 2 },
            "specific": [{
                "conditions": [{ "type": "match_item", "id": 1 }],
                "actions": [{ "type": "delete_borders" }]
            }]
        }"#;
        let rule: BorderRuleDef = serde_json::from_str(json).unwrap();
        assert_eq!(rule.to.as_deref(), Some("none"));
        assert!(rule.is_super);
        assert_eq!(rule.source.id, None);
        assert_eq!(rule.source.ground_equivalent, Some(100));
        assert_eq!(rule.source.edges.get("dnw"), Some(&2));
        assert!(matches!(rule.specific[0].actions[0], ActionDef::DeleteBorders));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let file: MaterialsFile = serde_json::from_str("{}").unwrap();
        assert!(file.items.is_empty());
        assert!(file.borders.is_empty());
        assert!(file.brushes.is_empty());

        let item: ItemDef = serde_json::from_str(r#"{ "id": 7 }"#).unwrap();
        assert_eq!(item.layer, StackLayer::Normal);
        let chance: ChanceDef = serde_json::from_str(r#"{ "id": 7 }"#).unwrap();
        assert_eq!(chance.chance, 1);
    }
}
