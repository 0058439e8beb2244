//! Resolution of raw definitions into [`Materials`]
//!
//! Order matters: plain items first, then registry borders, then brush
//! names, then brush bodies. Reserving every name before building any brush
//! lets rules and friend lists point at brushes declared further down.
//!
//! A brush name seen again with the same type continues the earlier brush
//! instead of replacing it. An empty definition is thus a forward
//! declaration.
//!
//! Problems in the definitions never abort a load. Each one becomes a
//! [`LoadWarning`] and the offending element is left out.

use crate::types::{
    ActionDef, BorderDef, BorderRuleDef, BorderSource, BrushDef, CarpetBrushDef, ChanceDef,
    ConditionDef, GroundBrushDef, ItemDef, MaterialsFile, SpecificCaseDef, TableBrushDef,
    WallBrushDef,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;
use tilebrush_autoborder::{
    AutoBorder, BorderRef, BorderRule, BorderTarget, Brush, CarpetBrush, DoorDef, GroundBrush,
    Materials, SpecificCase, TableBrush, WallBrush, RESERVED_BRUSH_NAMES,
};
use tilebrush_core::{
    BorderEdge, BrushId, CarpetPiece, DoorInfo, DoorKind, ItemId, ItemType, StackLayer,
    TableAlignment, WallAlignment, WallBinding,
};

/// A definition that was dropped or partially applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    #[error("border id {id} is reserved or already defined")]
    DuplicateBorder { id: u32 },
    #[error("{owner}: unknown border edge '{edge}'")]
    UnknownEdge { owner: String, edge: String },
    #[error("{owner}: item {item} belongs to a brush and cannot be a border piece")]
    BorderPieceOwned { owner: String, item: ItemId },
    #[error("{owner}: border piece {item} moved from the {layer:?} layer to Clip")]
    BorderLayerChanged {
        owner: String,
        item: ItemId,
        layer: StackLayer,
    },
    #[error("brush name '{name}' is empty or reserved")]
    InvalidBrushName { name: String },
    #[error("brush '{name}' is defined again with another type")]
    DuplicateBrush { name: String },
    #[error("brush '{brush}': brush '{name}' is not defined")]
    UnknownBrush { brush: String, name: String },
    #[error("brush '{brush}': border id {id} is not defined")]
    UnknownBorder { brush: String, id: u32 },
    #[error("brush '{brush}': border rule has neither an id nor a ground equivalent")]
    MissingBorder { brush: String },
    #[error("brush '{brush}': item {item} already belongs to another brush")]
    ItemClaimed { brush: String, item: ItemId },
    #[error("brush '{brush}': item {item} is not a ground item")]
    NotGroundItem { brush: String, item: ItemId },
    #[error("brush '{brush}': ground equivalent {item} is not one of its own ground items")]
    BadGroundEquivalent { brush: String, item: ItemId },
    #[error("brush '{brush}': has both a friend and an enemy list, one is ignored")]
    ConflictingFriendLists { brush: String },
    #[error("brush '{brush}': specific case has no condition or no action")]
    IncompleteSpecificCase { brush: String },
    #[error("brush '{brush}': unknown alignment '{name}'")]
    UnknownAlignment { brush: String, name: String },
    #[error("brush '{brush}': carpet piece '{name}' has no items")]
    EmptyCarpetSlot { brush: String, name: String },
    #[error("brush '{brush}': unknown door type '{name}'")]
    UnknownDoorType { brush: String, name: String },
    #[error("brush '{brush}': door {item} does not say whether it is open")]
    MissingDoorState { brush: String, item: ItemId },
    #[error("brush '{brush}': redirect target '{name}' is not a wall brush")]
    NotAWallBrush { brush: String, name: String },
    #[error("brush '{brush}': more than one redirect link")]
    MultipleRedirects { brush: String },
}

/// Result of a load: the usable materials plus everything that was dropped
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub materials: Materials,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Build materials from a parsed material file
pub fn resolve_materials(file: &MaterialsFile) -> LoadReport {
    let mut resolver = Resolver::default();

    for item in &file.items {
        resolver.declare_item(item);
    }
    for border in &file.borders {
        resolver.register_border(border);
    }

    let ids: Vec<Option<BrushId>> = file
        .brushes
        .iter()
        .map(|def| resolver.reserve_brush(def))
        .collect();

    let mut bodies: BTreeMap<BrushId, Brush> = BTreeMap::new();
    for (def, id) in file.brushes.iter().zip(ids) {
        let Some(id) = id else {
            continue;
        };
        let brush = bodies.entry(id).or_insert_with(|| empty_brush(id, def));
        resolver.build_brush(brush, def);
    }
    for (id, mut brush) in bodies {
        if let Brush::Ground(ground) = &mut brush {
            // nothing to randomize between
            if ground.choices.total_chance() == 0 {
                ground.randomize = false;
            }
        }
        resolver.materials.brushes.fill(id, brush);
    }

    LoadReport {
        materials: resolver.materials,
        warnings: resolver.warnings,
    }
}

fn empty_brush(id: BrushId, def: &BrushDef) -> Brush {
    let name = def.name().to_string();
    match def {
        BrushDef::Ground(_) => Brush::Ground(GroundBrush::new(id, name)),
        BrushDef::Wall(_) => Brush::Wall(WallBrush::new(id, name)),
        BrushDef::WallDecoration(_) => Brush::WallDecoration(WallBrush::new(id, name)),
        BrushDef::Table(_) => Brush::Table(TableBrush::new(id, name)),
        BrushDef::Carpet(_) => Brush::Carpet(CarpetBrush::new(id, name)),
    }
}

#[derive(Default)]
struct Resolver {
    materials: Materials,
    warnings: Vec<LoadWarning>,
    /// Names of wall and wall decoration brushes, valid redirect targets
    wall_names: HashSet<String>,
    /// Definition type each reserved brush was first declared with
    kinds: HashMap<BrushId, &'static str>,
}

impl Resolver {
    fn warn(&mut self, warning: LoadWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn declare_item(&mut self, def: &ItemDef) {
        if !self.materials.items.contains(def.id) {
            self.materials.items.insert(ItemType::new(def.id, def.layer));
        }
    }

    fn register_border(&mut self, def: &BorderDef) {
        if def.id == 0 || self.materials.borders.contains_id(def.id) {
            self.warn(LoadWarning::DuplicateBorder { id: def.id });
            return;
        }

        let mut border = AutoBorder::new(def.id);
        border.group = def.group;
        border.is_ground_overlay = def.is_optional();
        self.fill_edges(&mut border, &def.edges, &format!("border {}", def.id));
        self.materials.borders.register(border);
    }

    /// Put edge pieces into a border and mark them as border items.
    ///
    /// Group and edge metadata stick to the first border declaring an item.
    fn fill_edges(
        &mut self,
        border: &mut AutoBorder,
        edges: &BTreeMap<String, ItemId>,
        owner: &str,
    ) {
        for (name, &item) in edges {
            let Some(edge) = BorderEdge::from_name(name) else {
                self.warn(LoadWarning::UnknownEdge {
                    owner: owner.to_string(),
                    edge: name.clone(),
                });
                continue;
            };
            if !self.claim_border_piece(item, owner) {
                continue;
            }
            border.set_tile(edge, item);

            let meta = self.materials.items.entry(item, StackLayer::Clip);
            meta.is_optional_border |= border.is_ground_overlay;
            if meta.border_group == 0 {
                meta.border_group = border.group;
            }
            if meta.border_edge.is_none() {
                meta.border_edge = Some(edge);
            }
        }
    }

    /// Border pieces live on the Clip layer and belong to no brush
    fn claim_border_piece(&mut self, item: ItemId, owner: &str) -> bool {
        let meta = self.materials.items.entry(item, StackLayer::Clip);
        if meta.owner().is_some() {
            self.warn(LoadWarning::BorderPieceOwned {
                owner: owner.to_string(),
                item,
            });
            return false;
        }

        meta.is_border = true;
        let layer = std::mem::replace(&mut meta.layer, StackLayer::Clip);
        if layer != StackLayer::Clip {
            self.warn(LoadWarning::BorderLayerChanged {
                owner: owner.to_string(),
                item,
                layer,
            });
        }
        true
    }

    fn reserve_brush(&mut self, def: &BrushDef) -> Option<BrushId> {
        let name = def.name();
        if name.is_empty() || RESERVED_BRUSH_NAMES.contains(&name) {
            self.warn(LoadWarning::InvalidBrushName {
                name: name.to_string(),
            });
            return None;
        }

        if let Some(id) = self.materials.brushes.id_of(name) {
            if self.kinds.get(&id) == Some(&def.kind_name()) {
                tracing::debug!(brush = name, "continuing brush definition");
                return Some(id);
            }
            self.warn(LoadWarning::DuplicateBrush {
                name: name.to_string(),
            });
            return None;
        }

        let Some(id) = self.materials.brushes.reserve(name) else {
            self.warn(LoadWarning::DuplicateBrush {
                name: name.to_string(),
            });
            return None;
        };
        self.kinds.insert(id, def.kind_name());
        if def.is_wall() {
            self.wall_names.insert(name.to_string());
        }
        Some(id)
    }

    /// Apply one definition to its brush. Kinds always match: a name is
    /// only continued by a definition of the type it was declared with.
    fn build_brush(&mut self, brush: &mut Brush, def: &BrushDef) {
        match (brush, def) {
            (Brush::Ground(brush), BrushDef::Ground(def)) => self.ground_brush(brush, def),
            (Brush::Wall(brush), BrushDef::Wall(def)) => self.wall_brush(brush, def, false),
            (Brush::WallDecoration(brush), BrushDef::WallDecoration(def)) => {
                self.wall_brush(brush, def, true)
            }
            (Brush::Table(brush), BrushDef::Table(def)) => self.table_brush(brush, def),
            (Brush::Carpet(brush), BrushDef::Carpet(def)) => self.carpet_brush(brush, def),
            (brush, def) => tracing::error!(
                brush = brush.name(),
                kind = def.kind_name(),
                "definition does not match brush type"
            ),
        }
    }

    fn brush_id(&mut self, brush: &str, name: &str) -> Option<BrushId> {
        let id = self.materials.brushes.id_of(name);
        if id.is_none() {
            self.warn(LoadWarning::UnknownBrush {
                brush: brush.to_string(),
                name: name.to_string(),
            });
        }
        id
    }

    fn ground_brush(&mut self, brush: &mut GroundBrush, def: &GroundBrushDef) {
        let id = brush.id;
        if def.clear_borders {
            brush.border_rules.clear();
        }
        if def.clear_friends {
            brush.friends.clear();
            brush.is_enemy_list = false;
        }
        if let Some(look_id) = def.look_id {
            brush.look_id = look_id;
        }
        if let Some(z_order) = def.z_order {
            brush.z_order = z_order;
        }
        if let Some(randomize) = def.randomize {
            brush.randomize = randomize;
        }
        if let Some(solo) = def.solo_optional {
            brush.solo_optional_border = solo;
        }

        for choice in &def.items {
            if self.claim_ground(choice.id, id, &def.name) {
                brush.choices.push(choice.id, choice.chance);
            }
        }

        if let Some(border) = def
            .optional
            .as_ref()
            .and_then(|source| self.optional_border(id, &def.name, source))
        {
            brush.optional_border = Some(border);
        }
        for rule in &def.borders {
            if let Some(rule) = self.border_rule(id, &def.name, rule) {
                brush.border_rules.push(rule);
            }
        }

        let enemies = !def.enemies.is_empty();
        let names = if enemies {
            if !def.friends.is_empty() {
                self.warn(LoadWarning::ConflictingFriendLists {
                    brush: def.name.clone(),
                });
            }
            &def.enemies
        } else {
            &def.friends
        };
        if names.is_empty() {
            return;
        }
        // a continuation may not flip the kind of a non-empty list
        if !brush.friends.is_empty() && brush.is_enemy_list != enemies {
            self.warn(LoadWarning::ConflictingFriendLists {
                brush: def.name.clone(),
            });
            return;
        }
        brush.is_enemy_list = enemies;
        for name in names {
            let friend = if name == "all" {
                Some(BrushId::ALL)
            } else {
                self.brush_id(&def.name, name)
            };
            brush.friends.extend(friend);
        }
    }

    /// Whether `item` is free for `brush`. Each item has at most one owner
    /// and border pieces have none.
    fn claim_item(&mut self, item: ItemId, brush: BrushId, layer: StackLayer, name: &str) -> bool {
        let meta = self.materials.items.entry(item, layer);
        let free = !meta.is_border && meta.owner().map_or(true, |owner| owner == brush);
        if !free {
            self.warn(LoadWarning::ItemClaimed {
                brush: name.to_string(),
                item,
            });
        }
        free
    }

    /// Bind a ground item to its brush
    fn claim_ground(&mut self, item: ItemId, brush: BrushId, name: &str) -> bool {
        if self.materials.items.entry(item, StackLayer::Ground).layer != StackLayer::Ground {
            self.warn(LoadWarning::NotGroundItem {
                brush: name.to_string(),
                item,
            });
            return false;
        }
        if !self.claim_item(item, brush, StackLayer::Ground, name) {
            return false;
        }
        self.materials.items.entry(item, StackLayer::Ground).ground_brush = Some(brush);
        true
    }

    fn optional_border(
        &mut self,
        id: BrushId,
        name: &str,
        source: &BorderSource,
    ) -> Option<BorderRef> {
        if let Some(item) = source.ground_equivalent {
            if !self.is_ground_equivalent(item, id, name) {
                return None;
            }
        }
        self.border_source(id, name, source, true).flatten()
    }

    fn is_ground_equivalent(&mut self, item: ItemId, brush: BrushId, name: &str) -> bool {
        let valid = self.materials.items.ground_brush(item) == Some(brush);
        if !valid {
            self.warn(LoadWarning::BadGroundEquivalent {
                brush: name.to_string(),
                item,
            });
        }
        valid
    }

    /// Border named by a rule or optional border.
    ///
    /// `Some(None)` is an explicit "no border" (id 0); `None` means the
    /// reference could not be resolved.
    fn border_source(
        &mut self,
        id: BrushId,
        name: &str,
        source: &BorderSource,
        overlay: bool,
    ) -> Option<Option<BorderRef>> {
        match (source.id, source.ground_equivalent) {
            (Some(0), _) => Some(None),
            (Some(border), _) => {
                let handle = self.materials.borders.lookup(border);
                if handle.is_none() {
                    self.warn(LoadWarning::UnknownBorder {
                        brush: name.to_string(),
                        id: border,
                    });
                }
                handle.map(Some)
            }
            (None, Some(_)) => {
                let mut border = AutoBorder::new(0);
                border.group = source.group;
                border.is_ground_overlay = overlay;
                self.fill_edges(&mut border, &source.edges, &format!("brush '{}'", name));
                let handle = self.materials.borders.register_inline(border);
                tracing::trace!(brush = id.0, "registered inline border");
                Some(Some(handle))
            }
            (None, None) => {
                self.warn(LoadWarning::MissingBorder {
                    brush: name.to_string(),
                });
                None
            }
        }
    }

    fn border_rule(&mut self, id: BrushId, name: &str, def: &BorderRuleDef) -> Option<BorderRule> {
        let target = match def.to.as_deref() {
            None | Some("all") => BorderTarget::All,
            Some("none") => BorderTarget::None,
            Some(other) => BorderTarget::Brush(self.brush_id(name, other)?),
        };
        let outer = def.align.as_deref() != Some("inner");

        if let Some(item) = def.source.ground_equivalent {
            // a rule with a bad equivalent is still usable
            self.is_ground_equivalent(item, id, name);
        }
        let border = self.border_source(id, name, &def.source, false)?;

        let mut rule = BorderRule::new(target, outer, border);
        rule.is_super = def.is_super;
        rule.specific_cases = def
            .specific
            .iter()
            .filter_map(|case| self.specific_case(name, case))
            .collect();
        Some(rule)
    }

    /// Piece of a registry border at a named edge
    fn border_piece(&mut self, brush: &str, id: u32, edge: &str) -> Option<ItemId> {
        let edge = self.edge(brush, edge)?;
        match self.materials.borders.get_by_id(id) {
            Some(border) => border.tile(edge),
            None => {
                self.warn(LoadWarning::UnknownBorder {
                    brush: brush.to_string(),
                    id,
                });
                None
            }
        }
    }

    fn edge(&mut self, brush: &str, name: &str) -> Option<BorderEdge> {
        let edge = BorderEdge::from_name(name);
        if edge.is_none() {
            self.warn(LoadWarning::UnknownEdge {
                owner: format!("brush '{}'", brush),
                edge: name.to_string(),
            });
        }
        edge
    }

    fn specific_case(&mut self, brush: &str, def: &SpecificCaseDef) -> Option<SpecificCase> {
        let mut case = SpecificCase::default();

        for condition in &def.conditions {
            match condition {
                ConditionDef::MatchBorder { id, edge } => {
                    if let Some(item) = self.border_piece(brush, *id, edge) {
                        case.match_items.push(item);
                    }
                }
                ConditionDef::MatchGroup { group, edge } => {
                    if let Some(edge) = self.edge(brush, edge) {
                        case.match_group = Some((*group, edge));
                    }
                }
                ConditionDef::MatchItem { id } => case.match_items.push(*id),
            }
        }

        for action in &def.actions {
            match action {
                ActionDef::ReplaceBorder { id, edge, with } => {
                    if let Some(item) = self.border_piece(brush, *id, edge) {
                        if self.mark_border(brush, *with) {
                            case.replace = Some((item, *with));
                        }
                    }
                }
                ActionDef::ReplaceItem { id, with } => {
                    if self.mark_border(brush, *with) {
                        case.replace = Some((*id, *with));
                    }
                }
                ActionDef::DeleteBorders => case.delete_all_matched = true,
            }
        }

        if !case.is_actionable() {
            self.warn(LoadWarning::IncompleteSpecificCase {
                brush: brush.to_string(),
            });
            return None;
        }
        Some(case)
    }

    /// Replacement pieces count as borders so the next pass clears them
    fn mark_border(&mut self, brush: &str, item: ItemId) -> bool {
        self.claim_border_piece(item, &format!("brush '{}'", brush))
    }

    fn wall_brush(&mut self, brush: &mut WallBrush, def: &WallBrushDef, decoration: bool) {
        let id = brush.id;
        if let Some(look_id) = def.look_id {
            brush.look_id = look_id;
        }

        for slot in &def.walls {
            let Some(alignment) = WallAlignment::from_name(&slot.alignment) else {
                self.warn(LoadWarning::UnknownAlignment {
                    brush: def.name.clone(),
                    name: slot.alignment.clone(),
                });
                continue;
            };
            let binding = WallBinding {
                brush: id,
                alignment,
                decoration,
            };

            for choice in &slot.items {
                if self.claim_wall(choice.id, binding, &def.name) {
                    brush.slot_mut(alignment).push(choice.id, choice.chance);
                }
            }

            for door in &slot.doors {
                let Some(kinds) = DoorKind::parse_group(&door.kind) else {
                    self.warn(LoadWarning::UnknownDoorType {
                        brush: def.name.clone(),
                        name: door.kind.clone(),
                    });
                    continue;
                };
                let open = match door.open {
                    Some(open) => open,
                    None if kinds.iter().all(|kind| kind.is_window()) => true,
                    None => {
                        self.warn(LoadWarning::MissingDoorState {
                            brush: def.name.clone(),
                            item: door.id,
                        });
                        continue;
                    }
                };
                if !self.claim_wall(door.id, binding, &def.name) {
                    continue;
                }

                let meta = self.materials.items.entry(door.id, StackLayer::Bottom);
                meta.door = kinds.first().map(|&kind| DoorInfo { kind, open });
                meta.wall_hate_me = door.hate;
                brush
                    .doors_mut(alignment)
                    .extend(kinds.into_iter().map(|kind| DoorDef {
                        item: door.id,
                        kind,
                        open,
                    }));
            }
        }

        for friend in &def.friends {
            // walls never befriend everything
            if friend.name == "all" {
                continue;
            }
            let Some(friend_id) = self.brush_id(&def.name, &friend.name) else {
                continue;
            };
            brush.friends.push(friend_id);

            if friend.redirect {
                if !self.wall_names.contains(&friend.name) {
                    self.warn(LoadWarning::NotAWallBrush {
                        brush: def.name.clone(),
                        name: friend.name.clone(),
                    });
                } else if brush.redirect_to.is_some() {
                    self.warn(LoadWarning::MultipleRedirects {
                        brush: def.name.clone(),
                    });
                } else {
                    brush.redirect_to = Some(friend_id);
                }
            }
        }
    }

    /// Bind a wall item to a brush slot. An item may sit in several slots of
    /// the same brush; the last slot wins the binding.
    fn claim_wall(&mut self, item: ItemId, binding: WallBinding, name: &str) -> bool {
        if !self.claim_item(item, binding.brush, StackLayer::Bottom, name) {
            return false;
        }
        self.materials.items.entry(item, StackLayer::Bottom).wall = Some(binding);
        true
    }

    fn table_brush(&mut self, brush: &mut TableBrush, def: &TableBrushDef) {
        if let Some(look_id) = def.look_id {
            brush.look_id = look_id;
        }
        for slot in &def.tables {
            let Some(alignment) = TableAlignment::from_name(&slot.alignment) else {
                self.warn(LoadWarning::UnknownAlignment {
                    brush: def.name.clone(),
                    name: slot.alignment.clone(),
                });
                continue;
            };
            for choice in &slot.items {
                if self.claim_item(choice.id, brush.id, StackLayer::Normal, &def.name) {
                    self.materials.items.entry(choice.id, StackLayer::Normal).table_brush =
                        Some(brush.id);
                    brush.slot_mut(alignment).push(choice.id, choice.chance);
                }
            }
        }
    }

    fn carpet_brush(&mut self, brush: &mut CarpetBrush, def: &CarpetBrushDef) {
        if let Some(look_id) = def.look_id {
            brush.look_id = look_id;
        }
        for slot in &def.carpets {
            let Some(piece) = CarpetPiece::from_name(&slot.piece) else {
                self.warn(LoadWarning::UnknownAlignment {
                    brush: def.name.clone(),
                    name: slot.piece.clone(),
                });
                continue;
            };
            let lone = slot.id.map(|id| ChanceDef { id, chance: 1 });
            let choices = if slot.items.is_empty() {
                lone.as_slice()
            } else {
                slot.items.as_slice()
            };
            if choices.is_empty() {
                self.warn(LoadWarning::EmptyCarpetSlot {
                    brush: def.name.clone(),
                    name: slot.piece.clone(),
                });
                continue;
            }
            for choice in choices {
                if self.claim_item(choice.id, brush.id, StackLayer::Bottom, &def.name) {
                    self.materials.items.entry(choice.id, StackLayer::Bottom).carpet_brush =
                        Some(brush.id);
                    brush.slot_mut(piece).push(choice.id, choice.chance);
                }
            }
        }
    }
}
