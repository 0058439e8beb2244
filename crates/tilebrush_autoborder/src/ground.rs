//! Ground (terrain) brush definitions
//!
//! A ground brush paints one terrain type and declares how that terrain borders
//! the others. Which of two brushes supplies the border for a shared edge is
//! decided by [`border_rule_between`].

use crate::border::BorderRef;
use crate::weighted::WeightedTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tilebrush_core::{BorderEdge, BrushId, ItemId};

/// The partner a border rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderTarget {
    /// A specific ground brush
    Brush(BrushId),
    /// Any ground brush not matched by an earlier rule
    All,
    /// No ground at all: empty tiles and the map edge
    None,
}

impl BorderTarget {
    /// Whether this target accepts a neighbouring ground brush
    pub fn accepts(self, brush: BrushId) -> bool {
        match self {
            BorderTarget::Brush(id) => id == brush,
            BorderTarget::All => true,
            BorderTarget::None => false,
        }
    }
}

/// One "border against X" declaration of a ground brush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderRule {
    pub target: BorderTarget,
    /// Outer rules are offered by the higher brush to lower neighbours;
    /// inner rules are used by the brush for its own tiles.
    pub outer: bool,
    pub is_super: bool,
    /// Border to draw; `None` declares "no border" for this pairing
    pub border: Option<BorderRef>,
    pub specific_cases: Vec<SpecificCase>,
}

impl BorderRule {
    pub fn new(target: BorderTarget, outer: bool, border: Option<BorderRef>) -> Self {
        Self {
            target,
            outer,
            is_super: false,
            border,
            specific_cases: Vec::new(),
        }
    }
}

/// A post-pass rewrite: when every condition matches the tile's border pieces,
/// either delete the matched pieces or replace one piece with another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecificCase {
    /// Matches any border piece of this group filling this slot
    pub match_group: Option<(u16, BorderEdge)>,
    /// Each item must be present among the border pieces
    pub match_items: Vec<ItemId>,
    /// `(from, to)`: transform the first `from` piece into `to`
    pub replace: Option<(ItemId, ItemId)>,
    pub delete_all_matched: bool,
}

impl SpecificCase {
    /// Number of conditions that must hold for the case to fire
    pub fn pattern_len(&self) -> usize {
        self.match_items.len() + usize::from(self.match_group.is_some())
    }

    /// A case without conditions or without an action never fires
    pub fn is_actionable(&self) -> bool {
        self.pattern_len() > 0 && (self.delete_all_matched || self.replace.is_some())
    }
}

/// Terrain brush definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundBrush {
    pub id: BrushId,
    pub name: String,
    pub look_id: u16,
    /// Border priority; the higher brush wins a shared edge
    pub z_order: i32,
    pub choices: WeightedTable<ItemId>,
    pub randomize: bool,
    /// Neighbours with this brush draw only the optional overlay, never a regular border
    pub solo_optional_border: bool,
    pub border_rules: Vec<BorderRule>,
    /// Mountain-style overlay drawn onto neighbouring tiles that accept it
    pub optional_border: Option<BorderRef>,
    pub friends: Vec<BrushId>,
    /// `friends` lists enemies: every brush except those listed is a friend
    pub is_enemy_list: bool,
}

impl GroundBrush {
    pub fn new(id: BrushId, name: String) -> Self {
        Self {
            id,
            name,
            look_id: 0,
            z_order: 0,
            choices: WeightedTable::new(),
            randomize: true,
            solo_optional_border: false,
            border_rules: Vec::new(),
            optional_border: None,
            friends: Vec::new(),
            is_enemy_list: false,
        }
    }

    /// Whether the brush has ground items to paint
    pub fn can_paint(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn has_optional_border(&self) -> bool {
        self.optional_border.is_some()
    }

    fn has_rule(&self, outer: bool, against_nothing: bool) -> bool {
        self.border_rules.iter().any(|rule| {
            rule.outer == outer && (rule.target == BorderTarget::None) == against_nothing
        })
    }

    /// Has an outer rule against some brush
    pub fn has_outer_border(&self) -> bool {
        self.has_rule(true, false)
    }

    /// Has an inner rule against some brush
    pub fn has_inner_border(&self) -> bool {
        self.has_rule(false, false)
    }

    /// Has an outer rule against empty space
    pub fn has_outer_zilch_border(&self) -> bool {
        self.has_rule(true, true)
    }

    /// Has an inner rule against empty space
    pub fn has_inner_zilch_border(&self) -> bool {
        self.has_rule(false, true)
    }

    /// Friend test as seen from this brush.
    ///
    /// With a friend list, listed brushes (or everyone, for [`BrushId::ALL`])
    /// are friends. With an enemy list the answer is inverted.
    pub fn friend_of(&self, other: BrushId) -> bool {
        let listed = self
            .friends
            .iter()
            .any(|&friend| friend == other || friend.is_all());
        listed != self.is_enemy_list
    }

    /// Pick the ground item to paint
    pub fn pick_ground(&self, rng: &mut impl Rng) -> Option<ItemId> {
        if self.randomize {
            self.choices.select(rng).copied()
        } else {
            self.choices.first().copied()
        }
    }

    fn inner_rule_to(&self, other: BrushId) -> Option<&BorderRule> {
        self.border_rules
            .iter()
            .filter(|rule| !rule.outer)
            .find(|rule| rule.target.accepts(other))
    }

    fn outer_rule_to(&self, other: BrushId) -> Option<&BorderRule> {
        self.border_rules
            .iter()
            .filter(|rule| rule.outer)
            .find(|rule| rule.target.accepts(other))
    }

    fn rule_against_nothing(&self, outer: bool) -> Option<&BorderRule> {
        self.border_rules
            .iter()
            .find(|rule| rule.outer == outer && rule.target == BorderTarget::None)
    }
}

/// Find the rule that borders a tile of `inner` against a neighbour of `outer`.
///
/// - Both present: when `outer` sits higher and offers outer rules, the lower
///   brush's own inner rule is tried first, then the higher brush's outer rule.
///   Otherwise only `inner`'s inner rules apply.
/// - Only `inner`: its inner rule against nothing.
/// - Only `outer`: its outer rule against nothing.
pub fn border_rule_between<'a>(
    inner: Option<&'a GroundBrush>,
    outer: Option<&'a GroundBrush>,
) -> Option<&'a BorderRule> {
    match (inner, outer) {
        (Some(first), Some(second)) => {
            if first.z_order < second.z_order && second.has_outer_border() {
                first
                    .inner_rule_to(second.id)
                    .or_else(|| second.outer_rule_to(first.id))
            } else {
                first.inner_rule_to(second.id)
            }
        }
        (Some(first), None) => first.rule_against_nothing(false),
        (None, Some(second)) => second.rule_against_nothing(true),
        (None, None) => None,
    }
}
