//! Alignment enums shared by items, borders, walls, tables and carpets

use serde::{Deserialize, Serialize};

/// One of the twelve slots an auto border can fill.
///
/// The declaration order is the slot index used by auto border edge tables.
/// Straight pieces come first, then outer corners, then diagonal (inner corner)
/// pieces. A diagonal slot that a border leaves undefined is drawn as the two
/// straight pieces returned by [`BorderEdge::diagonal_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BorderEdge {
    NorthHorizontal,
    EastHorizontal,
    SouthHorizontal,
    WestHorizontal,
    NorthWestCorner,
    NorthEastCorner,
    SouthWestCorner,
    SouthEastCorner,
    NorthWestDiagonal,
    NorthEastDiagonal,
    SouthEastDiagonal,
    SouthWestDiagonal,
}

impl BorderEdge {
    pub const COUNT: usize = 12;

    pub const ALL: [BorderEdge; Self::COUNT] = [
        BorderEdge::NorthHorizontal,
        BorderEdge::EastHorizontal,
        BorderEdge::SouthHorizontal,
        BorderEdge::WestHorizontal,
        BorderEdge::NorthWestCorner,
        BorderEdge::NorthEastCorner,
        BorderEdge::SouthWestCorner,
        BorderEdge::SouthEastCorner,
        BorderEdge::NorthWestDiagonal,
        BorderEdge::NorthEastDiagonal,
        BorderEdge::SouthEastDiagonal,
        BorderEdge::SouthWestDiagonal,
    ];

    /// Slot index into a border's edge table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse the short edge names used in material files (`n`, `cnw`, `dse`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let edge = match name {
            "n" => BorderEdge::NorthHorizontal,
            "e" => BorderEdge::EastHorizontal,
            "s" => BorderEdge::SouthHorizontal,
            "w" => BorderEdge::WestHorizontal,
            "cnw" => BorderEdge::NorthWestCorner,
            "cne" => BorderEdge::NorthEastCorner,
            "csw" => BorderEdge::SouthWestCorner,
            "cse" => BorderEdge::SouthEastCorner,
            "dnw" => BorderEdge::NorthWestDiagonal,
            "dne" => BorderEdge::NorthEastDiagonal,
            "dse" => BorderEdge::SouthEastDiagonal,
            "dsw" => BorderEdge::SouthWestDiagonal,
            _ => return None,
        };
        Some(edge)
    }

    /// Short name, inverse of [`BorderEdge::from_name`]
    pub fn name(self) -> &'static str {
        match self {
            BorderEdge::NorthHorizontal => "n",
            BorderEdge::EastHorizontal => "e",
            BorderEdge::SouthHorizontal => "s",
            BorderEdge::WestHorizontal => "w",
            BorderEdge::NorthWestCorner => "cnw",
            BorderEdge::NorthEastCorner => "cne",
            BorderEdge::SouthWestCorner => "csw",
            BorderEdge::SouthEastCorner => "cse",
            BorderEdge::NorthWestDiagonal => "dnw",
            BorderEdge::NorthEastDiagonal => "dne",
            BorderEdge::SouthEastDiagonal => "dse",
            BorderEdge::SouthWestDiagonal => "dsw",
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            BorderEdge::NorthWestDiagonal
                | BorderEdge::NorthEastDiagonal
                | BorderEdge::SouthEastDiagonal
                | BorderEdge::SouthWestDiagonal
        )
    }

    /// The two straight pieces that stand in for a missing diagonal piece,
    /// in drawing order. `None` for non-diagonal slots.
    pub fn diagonal_parts(self) -> Option<[BorderEdge; 2]> {
        match self {
            BorderEdge::NorthWestDiagonal => {
                Some([BorderEdge::WestHorizontal, BorderEdge::NorthHorizontal])
            }
            BorderEdge::NorthEastDiagonal => {
                Some([BorderEdge::EastHorizontal, BorderEdge::NorthHorizontal])
            }
            BorderEdge::SouthWestDiagonal => {
                Some([BorderEdge::SouthHorizontal, BorderEdge::WestHorizontal])
            }
            BorderEdge::SouthEastDiagonal => {
                Some([BorderEdge::SouthHorizontal, BorderEdge::EastHorizontal])
            }
            _ => None,
        }
    }
}

/// Shape slot of a wall item.
///
/// The first sixteen variants are indexed by the 4-bit connectivity mask of a
/// wall tile (bit 0 = north, bit 1 = west, bit 2 = east, bit 3 = south), so
/// `WallAlignment::from_mask(m) as u8 == m`. [`WallAlignment::Untouchable`]
/// is never produced by a mask; it pins an item against re-alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallAlignment {
    Pole = 0,
    SouthEnd = 1,
    EastEnd = 2,
    NorthWestDiagonal = 3,
    WestEnd = 4,
    NorthEastDiagonal = 5,
    Horizontal = 6,
    SouthT = 7,
    NorthEnd = 8,
    Vertical = 9,
    SouthWestDiagonal = 10,
    EastT = 11,
    SouthEastDiagonal = 12,
    WestT = 13,
    NorthT = 14,
    Intersection = 15,
    Untouchable = 16,
}

impl WallAlignment {
    /// Number of slots in a wall brush, the sixteen mask shapes plus untouchable
    pub const COUNT: usize = 17;

    pub const ALL: [WallAlignment; Self::COUNT] = [
        WallAlignment::Pole,
        WallAlignment::SouthEnd,
        WallAlignment::EastEnd,
        WallAlignment::NorthWestDiagonal,
        WallAlignment::WestEnd,
        WallAlignment::NorthEastDiagonal,
        WallAlignment::Horizontal,
        WallAlignment::SouthT,
        WallAlignment::NorthEnd,
        WallAlignment::Vertical,
        WallAlignment::SouthWestDiagonal,
        WallAlignment::EastT,
        WallAlignment::SouthEastDiagonal,
        WallAlignment::WestT,
        WallAlignment::NorthT,
        WallAlignment::Intersection,
        WallAlignment::Untouchable,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Shape for a 4-bit connectivity mask. Bits above the low nibble are ignored.
    pub const fn from_mask(mask: u8) -> Self {
        Self::ALL[(mask & 0x0F) as usize]
    }

    /// Parse the wall type names used in material files
    pub fn from_name(name: &str) -> Option<Self> {
        let alignment = match name {
            "vertical" => WallAlignment::Vertical,
            "horizontal" => WallAlignment::Horizontal,
            // a lone "corner" is the generic corner piece of reduced wall sets
            "corner" | "northwest diagonal" => WallAlignment::NorthWestDiagonal,
            "pole" => WallAlignment::Pole,
            "south end" => WallAlignment::SouthEnd,
            "east end" => WallAlignment::EastEnd,
            "north end" => WallAlignment::NorthEnd,
            "west end" => WallAlignment::WestEnd,
            "south T" => WallAlignment::SouthT,
            "east T" => WallAlignment::EastT,
            "west T" => WallAlignment::WestT,
            "north T" => WallAlignment::NorthT,
            "northeast diagonal" => WallAlignment::NorthEastDiagonal,
            "southwest diagonal" => WallAlignment::SouthWestDiagonal,
            "southeast diagonal" => WallAlignment::SouthEastDiagonal,
            "intersection" => WallAlignment::Intersection,
            "untouchable" => WallAlignment::Untouchable,
            _ => return None,
        };
        Some(alignment)
    }
}

/// Shape slot of a table item.
///
/// Tables only join along one axis. An end piece is named after the side of
/// the run it closes: a table with a single neighbour to the north is the
/// south end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableAlignment {
    Alone,
    Vertical,
    Horizontal,
    SouthEnd,
    EastEnd,
    NorthEnd,
    WestEnd,
}

impl TableAlignment {
    pub const COUNT: usize = 7;

    pub const ALL: [TableAlignment; Self::COUNT] = [
        TableAlignment::Alone,
        TableAlignment::Vertical,
        TableAlignment::Horizontal,
        TableAlignment::SouthEnd,
        TableAlignment::EastEnd,
        TableAlignment::NorthEnd,
        TableAlignment::WestEnd,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let alignment = match name {
            "alone" => TableAlignment::Alone,
            "vertical" => TableAlignment::Vertical,
            "horizontal" => TableAlignment::Horizontal,
            "south" => TableAlignment::SouthEnd,
            "east" => TableAlignment::EastEnd,
            "north" => TableAlignment::NorthEnd,
            "west" => TableAlignment::WestEnd,
            _ => return None,
        };
        Some(alignment)
    }
}

/// Slot of a carpet item: the middle of a carpet or one of its border pieces.
///
/// Edge pieces are named from the carpet's own point of view, so the top row
/// of a carpet uses [`BorderEdge::NorthHorizontal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarpetPiece {
    Center,
    Edge(BorderEdge),
}

impl CarpetPiece {
    /// Center plus the twelve border slots
    pub const COUNT: usize = BorderEdge::COUNT + 1;

    pub const fn index(self) -> usize {
        match self {
            CarpetPiece::Center => 0,
            CarpetPiece::Edge(edge) => edge.index() + 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CarpetPiece::Center),
            i => BorderEdge::ALL.get(i - 1).map(|&edge| CarpetPiece::Edge(edge)),
        }
    }

    /// Parse `center` or a border edge name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "center" => Some(CarpetPiece::Center),
            _ => BorderEdge::from_name(name).map(CarpetPiece::Edge),
        }
    }
}

/// Kind of a door or window item hosted by a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorKind {
    Normal,
    Locked,
    Quest,
    Magic,
    Archway,
    Window,
    HatchWindow,
}

impl DoorKind {
    pub const DOORS: [DoorKind; 5] = [
        DoorKind::Archway,
        DoorKind::Normal,
        DoorKind::Locked,
        DoorKind::Quest,
        DoorKind::Magic,
    ];

    pub const WINDOWS: [DoorKind; 2] = [DoorKind::Window, DoorKind::HatchWindow];

    /// Parse a door type name. Group names (`any door`, `any window`, `any`)
    /// expand to several kinds.
    pub fn parse_group(name: &str) -> Option<Vec<DoorKind>> {
        let kinds = match name {
            "normal" => vec![DoorKind::Normal],
            "locked" => vec![DoorKind::Locked],
            "quest" => vec![DoorKind::Quest],
            "magic" => vec![DoorKind::Magic],
            "archway" => vec![DoorKind::Archway],
            "window" => vec![DoorKind::Window],
            "hatch window" | "hatch_window" => vec![DoorKind::HatchWindow],
            "any door" => Self::DOORS.to_vec(),
            "any window" => Self::WINDOWS.to_vec(),
            "any" => {
                let mut all = Self::WINDOWS.to_vec();
                all.extend_from_slice(&Self::DOORS);
                all
            }
            _ => return None,
        };
        Some(kinds)
    }

    pub fn is_window(self) -> bool {
        matches!(self, DoorKind::Window | DoorKind::HatchWindow)
    }
}
