//! Neighbour-mask lookup tables
//!
//! Ground, table and carpet masks use bit 0..7 = NW, N, NE, W, E, SW, S, SE.
//! Wall masks use bit 0..3 = N, W, E, S. All tables are computed at compile
//! time.

use tilebrush_core::{BorderEdge, CarpetPiece, TableAlignment, WallAlignment};

/// Border slots for one ground mask, in emission order
pub type GroundSlots = [Option<BorderEdge>; 4];

const NW: u8 = 1 << 0;
const N: u8 = 1 << 1;
const NE: u8 = 1 << 2;
const W: u8 = 1 << 3;
const E: u8 = 1 << 4;
const SW: u8 = 1 << 5;
const S: u8 = 1 << 6;
const SE: u8 = 1 << 7;

static GROUND_BORDER_TABLE: [GroundSlots; 256] = build_ground_table();
static FULL_WALL_TABLE: [WallAlignment; 16] = build_full_wall_table();
static HALF_WALL_TABLE: [WallAlignment; 16] = build_half_wall_table();
static TABLE_TABLE: [TableAlignment; 256] = build_table_table();
static CARPET_TABLE: [CarpetPiece; 256] = build_carpet_table();

/// Border slots to draw on a tile whose bordering neighbours form `mask`.
///
/// Slots are named after the piece of the neighbouring terrain, so a lone
/// northern neighbour yields [`BorderEdge::SouthHorizontal`]. Two adjacent
/// orthogonal neighbours produce a diagonal piece; an orthogonal neighbour not
/// covered by a diagonal produces a straight piece; a corner neighbour whose
/// two adjacent orthogonals are both clear produces an outer corner.
pub fn ground_border_slots(mask: u8) -> &'static GroundSlots {
    &GROUND_BORDER_TABLE[mask as usize]
}

/// Wall shape for a connectivity mask, one distinct shape per mask
pub fn full_wall_alignment(mask: u8) -> WallAlignment {
    FULL_WALL_TABLE[(mask & 0x0F) as usize]
}

/// Wall shape for a connectivity mask on reduced wall sets.
///
/// Collapses to pole, vertical, horizontal or the generic corner piece.
pub fn half_wall_alignment(mask: u8) -> WallAlignment {
    HALF_WALL_TABLE[(mask & 0x0F) as usize]
}

/// Table shape for the 8-bit mask of neighbours holding the same table brush.
///
/// Only the four cardinal neighbours count. A table that would need to bend
/// (neighbours on both axes) stands alone.
pub fn table_alignment(mask: u8) -> TableAlignment {
    TABLE_TABLE[mask as usize]
}

/// Carpet piece for the 8-bit mask of neighbours holding the same carpet.
///
/// Missing sides give edge and outer corner pieces. A tile surrounded on all
/// four sides takes the diagonal piece of the first missing corner (NW, NE,
/// SE, SW), or the center. Shapes no piece fits, like one-wide strips, use
/// the center.
pub fn carpet_piece(mask: u8) -> CarpetPiece {
    CARPET_TABLE[mask as usize]
}

const fn has(mask: u8, bit: u8) -> bool {
    mask & bit != 0
}

const fn push(mut slots: GroundSlots, len: usize, edge: BorderEdge) -> (GroundSlots, usize) {
    if len < slots.len() {
        slots[len] = Some(edge);
        (slots, len + 1)
    } else {
        (slots, len)
    }
}

const fn ground_slots(mask: u8) -> GroundSlots {
    let (n, w, e, s) = (has(mask, N), has(mask, W), has(mask, E), has(mask, S));
    let slots = [None; 4];
    let len = 0;

    let (slots, len) = if n && w {
        push(slots, len, BorderEdge::SouthEastDiagonal)
    } else {
        (slots, len)
    };
    let (slots, len) = if n && e {
        push(slots, len, BorderEdge::SouthWestDiagonal)
    } else {
        (slots, len)
    };
    let (slots, len) = if s && w {
        push(slots, len, BorderEdge::NorthEastDiagonal)
    } else {
        (slots, len)
    };
    let (slots, len) = if s && e {
        push(slots, len, BorderEdge::NorthWestDiagonal)
    } else {
        (slots, len)
    };

    let (slots, len) = if n && !w && !e {
        push(slots, len, BorderEdge::SouthHorizontal)
    } else {
        (slots, len)
    };
    let (slots, len) = if s && !w && !e {
        push(slots, len, BorderEdge::NorthHorizontal)
    } else {
        (slots, len)
    };
    let (slots, len) = if w && !n && !s {
        push(slots, len, BorderEdge::EastHorizontal)
    } else {
        (slots, len)
    };
    let (slots, len) = if e && !n && !s {
        push(slots, len, BorderEdge::WestHorizontal)
    } else {
        (slots, len)
    };

    let (slots, len) = if has(mask, NW) && !n && !w {
        push(slots, len, BorderEdge::SouthEastCorner)
    } else {
        (slots, len)
    };
    let (slots, len) = if has(mask, NE) && !n && !e {
        push(slots, len, BorderEdge::SouthWestCorner)
    } else {
        (slots, len)
    };
    let (slots, len) = if has(mask, SW) && !s && !w {
        push(slots, len, BorderEdge::NorthEastCorner)
    } else {
        (slots, len)
    };
    let (slots, _) = if has(mask, SE) && !s && !e {
        push(slots, len, BorderEdge::NorthWestCorner)
    } else {
        (slots, len)
    };
    slots
}

const fn build_ground_table() -> [GroundSlots; 256] {
    let mut table = [[None; 4]; 256];
    let mut mask = 0;
    while mask < 256 {
        table[mask] = ground_slots(mask as u8);
        mask += 1;
    }
    table
}

const fn build_full_wall_table() -> [WallAlignment; 16] {
    let mut table = [WallAlignment::Pole; 16];
    let mut mask = 0;
    while mask < 16 {
        table[mask] = WallAlignment::from_mask(mask as u8);
        mask += 1;
    }
    table
}

const fn build_half_wall_table() -> [WallAlignment; 16] {
    const VERTICAL: u8 = 0b1001;
    const HORIZONTAL: u8 = 0b0110;

    let mut table = [WallAlignment::Pole; 16];
    let mut mask = 0;
    while mask < 16 {
        let vertical = has(mask as u8, VERTICAL);
        let horizontal = has(mask as u8, HORIZONTAL);
        table[mask] = match (vertical, horizontal) {
            (false, false) => WallAlignment::Pole,
            (true, false) => WallAlignment::Vertical,
            (false, true) => WallAlignment::Horizontal,
            (true, true) => WallAlignment::NorthWestDiagonal,
        };
        mask += 1;
    }
    table
}

const fn table_shape(mask: u8) -> TableAlignment {
    let (n, w, e, s) = (has(mask, N), has(mask, W), has(mask, E), has(mask, S));
    match (n || s, w || e) {
        (true, true) | (false, false) => TableAlignment::Alone,
        (true, false) => match (n, s) {
            (true, true) => TableAlignment::Vertical,
            (true, false) => TableAlignment::SouthEnd,
            _ => TableAlignment::NorthEnd,
        },
        (false, true) => match (w, e) {
            (true, true) => TableAlignment::Horizontal,
            (true, false) => TableAlignment::EastEnd,
            _ => TableAlignment::WestEnd,
        },
    }
}

const fn build_table_table() -> [TableAlignment; 256] {
    let mut table = [TableAlignment::Alone; 256];
    let mut mask = 0;
    while mask < 256 {
        table[mask] = table_shape(mask as u8);
        mask += 1;
    }
    table
}

const fn carpet_shape(mask: u8) -> CarpetPiece {
    let (n, w, e, s) = (has(mask, N), has(mask, W), has(mask, E), has(mask, S));
    let edge = match (n, w, e, s) {
        (false, false, true, true) => Some(BorderEdge::NorthWestCorner),
        (false, true, false, true) => Some(BorderEdge::NorthEastCorner),
        (true, false, true, false) => Some(BorderEdge::SouthWestCorner),
        (true, true, false, false) => Some(BorderEdge::SouthEastCorner),
        (false, true, true, true) => Some(BorderEdge::NorthHorizontal),
        (true, true, false, true) => Some(BorderEdge::EastHorizontal),
        (true, true, true, false) => Some(BorderEdge::SouthHorizontal),
        (true, false, true, true) => Some(BorderEdge::WestHorizontal),
        (true, true, true, true) => {
            if !has(mask, NW) {
                Some(BorderEdge::NorthWestDiagonal)
            } else if !has(mask, NE) {
                Some(BorderEdge::NorthEastDiagonal)
            } else if !has(mask, SE) {
                Some(BorderEdge::SouthEastDiagonal)
            } else if !has(mask, SW) {
                Some(BorderEdge::SouthWestDiagonal)
            } else {
                None
            }
        }
        _ => None,
    };
    match edge {
        Some(edge) => CarpetPiece::Edge(edge),
        None => CarpetPiece::Center,
    }
}

const fn build_carpet_table() -> [CarpetPiece; 256] {
    let mut table = [CarpetPiece::Center; 256];
    let mut mask = 0;
    while mask < 256 {
        table[mask] = carpet_shape(mask as u8);
        mask += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(mask: u8) -> Vec<BorderEdge> {
        ground_border_slots(mask).iter().flatten().copied().collect()
    }

    #[test]
    fn test_empty_mask_has_no_slots() {
        assert!(slots(0).is_empty());
    }

    #[test]
    fn test_single_bit_masks() {
        let expected = [
            (NW, BorderEdge::SouthEastCorner),
            (N, BorderEdge::SouthHorizontal),
            (NE, BorderEdge::SouthWestCorner),
            (W, BorderEdge::EastHorizontal),
            (E, BorderEdge::WestHorizontal),
            (SW, BorderEdge::NorthEastCorner),
            (S, BorderEdge::NorthHorizontal),
            (SE, BorderEdge::NorthWestCorner),
        ];
        for (mask, edge) in expected {
            assert_eq!(slots(mask), vec![edge], "mask {mask:#010b}");
        }
    }

    #[test]
    fn test_adjacent_orthogonals_make_diagonal() {
        assert_eq!(slots(N | W), vec![BorderEdge::SouthEastDiagonal]);
        assert_eq!(slots(N | E), vec![BorderEdge::SouthWestDiagonal]);
        assert_eq!(slots(S | W), vec![BorderEdge::NorthEastDiagonal]);
        assert_eq!(slots(S | E), vec![BorderEdge::NorthWestDiagonal]);
        // the corner between them is covered by the diagonal
        assert_eq!(slots(N | W | NW), vec![BorderEdge::SouthEastDiagonal]);
    }

    #[test]
    fn test_opposite_orthogonals_make_two_edges() {
        assert_eq!(
            slots(N | S),
            vec![BorderEdge::SouthHorizontal, BorderEdge::NorthHorizontal]
        );
        assert_eq!(
            slots(W | E),
            vec![BorderEdge::EastHorizontal, BorderEdge::WestHorizontal]
        );
    }

    #[test]
    fn test_corner_suppressed_by_adjacent_orthogonal() {
        assert_eq!(slots(N | NE), vec![BorderEdge::SouthHorizontal]);
        assert_eq!(
            slots(N | SE),
            vec![BorderEdge::SouthHorizontal, BorderEdge::NorthWestCorner]
        );
    }

    #[test]
    fn test_every_mask_fits_four_slots() {
        for mask in 0..=255u8 {
            let all = ground_border_slots(mask);
            // slots are packed at the front
            let used = all.iter().take_while(|slot| slot.is_some()).count();
            assert_eq!(used, all.iter().flatten().count(), "mask {mask:#010b}");
        }
        assert_eq!(slots(0xFF).len(), 4);
        assert_eq!(slots(NW | NE | SW | SE).len(), 4);
    }

    #[test]
    fn test_full_wall_table_is_mask_identity() {
        for mask in 0..16u8 {
            assert_eq!(full_wall_alignment(mask) as u8, mask);
        }
        assert_eq!(full_wall_alignment(0), WallAlignment::Pole);
        assert_eq!(full_wall_alignment(0b1001), WallAlignment::Vertical);
        assert_eq!(full_wall_alignment(0b0110), WallAlignment::Horizontal);
        assert_eq!(full_wall_alignment(0b1111), WallAlignment::Intersection);
    }

    #[test]
    fn test_half_wall_table_collapses_shapes() {
        assert_eq!(half_wall_alignment(0), WallAlignment::Pole);
        assert_eq!(half_wall_alignment(0b0001), WallAlignment::Vertical);
        assert_eq!(half_wall_alignment(0b1001), WallAlignment::Vertical);
        assert_eq!(half_wall_alignment(0b0100), WallAlignment::Horizontal);
        assert_eq!(half_wall_alignment(0b0110), WallAlignment::Horizontal);
        assert_eq!(half_wall_alignment(0b0011), WallAlignment::NorthWestDiagonal);
        assert_eq!(half_wall_alignment(0b1111), WallAlignment::NorthWestDiagonal);
    }

    #[test]
    fn test_table_runs_along_one_axis() {
        assert_eq!(table_alignment(0), TableAlignment::Alone);
        assert_eq!(table_alignment(N), TableAlignment::SouthEnd);
        assert_eq!(table_alignment(S), TableAlignment::NorthEnd);
        assert_eq!(table_alignment(W), TableAlignment::EastEnd);
        assert_eq!(table_alignment(E), TableAlignment::WestEnd);
        assert_eq!(table_alignment(N | S), TableAlignment::Vertical);
        assert_eq!(table_alignment(W | E), TableAlignment::Horizontal);
        assert_eq!(table_alignment(N | E), TableAlignment::Alone);
        // diagonal neighbours never join tables
        assert_eq!(table_alignment(NW | NE | SW | SE), TableAlignment::Alone);
        assert_eq!(table_alignment(W | E | NW), TableAlignment::Horizontal);
    }

    #[test]
    fn test_carpet_pieces() {
        let edge = CarpetPiece::Edge;
        assert_eq!(carpet_piece(0xFF), CarpetPiece::Center);
        assert_eq!(carpet_piece(0), CarpetPiece::Center);
        // top-left tile of a carpet
        assert_eq!(carpet_piece(E | S | SE), edge(BorderEdge::NorthWestCorner));
        assert_eq!(carpet_piece(W | S | SW), edge(BorderEdge::NorthEastCorner));
        // top row
        assert_eq!(
            carpet_piece(W | E | S | SW | SE),
            edge(BorderEdge::NorthHorizontal)
        );
        assert_eq!(
            carpet_piece(N | W | E | NW | NE),
            edge(BorderEdge::SouthHorizontal)
        );
        // notch at the south-east corner only
        assert_eq!(carpet_piece(0xFF & !SE), edge(BorderEdge::SouthEastDiagonal));
        // one-wide strip
        assert_eq!(carpet_piece(N | S), CarpetPiece::Center);
    }
}
