//! Grid topology: the 81 squares, 27 units, peer lists, and chutes.
//!
//! Unit index convention: 0..=8 rows, 9..=17 columns, 18..=26 boxes.
//! These tables are built once and are the sole source of adjacency truth;
//! no other module recomputes row/column/box membership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base unit index of the nine rows.
pub const UNIT_ROW_BASE: usize = 0;
/// Base unit index of the nine columns.
pub const UNIT_COL_BASE: usize = 9;
/// Base unit index of the nine boxes.
pub const UNIT_BOX_BASE: usize = 18;

/// The kind of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Row,
    Column,
    Box,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Row => write!(f, "row"),
            UnitKind::Column => write!(f, "column"),
            UnitKind::Box => write!(f, "box"),
        }
    }
}

/// A reference to one of the 27 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub kind: UnitKind,
    /// Index within the kind, 0..=8.
    pub index: usize,
}

impl UnitRef {
    /// Build from a flat unit index 0..=26.
    pub fn from_unit(unit: usize) -> Self {
        UnitRef {
            kind: unit_kind(unit),
            index: unit % 9,
        }
    }

    /// The flat unit index 0..=26.
    pub fn unit(self) -> usize {
        match self.kind {
            UnitKind::Row => UNIT_ROW_BASE + self.index,
            UnitKind::Column => UNIT_COL_BASE + self.index,
            UnitKind::Box => UNIT_BOX_BASE + self.index,
        }
    }
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.index + 1)
    }
}

/// Classify a flat unit index.
pub fn unit_kind(unit: usize) -> UnitKind {
    match unit {
        UNIT_ROW_BASE..=8 => UnitKind::Row,
        UNIT_COL_BASE..=17 => UnitKind::Column,
        UNIT_BOX_BASE..=26 => UnitKind::Box,
        _ => panic!("unit index out of range: {unit}"),
    }
}

/// The 9 square indices of a unit, in ascending square order for rows and
/// columns and box-row-major order for boxes.
fn build_unit(unit: usize) -> [usize; 9] {
    if unit < UNIT_COL_BASE {
        let row = unit;
        std::array::from_fn(|col| row * 9 + col)
    } else if unit < UNIT_BOX_BASE {
        let col = unit - UNIT_COL_BASE;
        std::array::from_fn(|row| row * 9 + col)
    } else {
        let box_idx = unit - UNIT_BOX_BASE;
        let base = (box_idx / 3) * 27 + (box_idx % 3) * 3;
        std::array::from_fn(|i| base + (i / 3) * 9 + i % 3)
    }
}

lazy_static::lazy_static! {
    /// The 27 units: rows, then columns, then boxes.
    pub static ref UNITS: [[usize; 9]; 27] = std::array::from_fn(build_unit);

    /// For each square, its 3 containing units: [row, column, box].
    pub static ref SQUARE_UNITS: [[usize; 3]; 81] = std::array::from_fn(|sq| {
        let (row, col) = (sq / 9, sq % 9);
        [
            UNIT_ROW_BASE + row,
            UNIT_COL_BASE + col,
            UNIT_BOX_BASE + (row / 3) * 3 + col / 3,
        ]
    });

    /// For each square, its 20 distinct peers in ascending square order.
    pub static ref PEERS: [[usize; 20]; 81] = std::array::from_fn(|sq| {
        let mut peers = [0usize; 20];
        let mut count = 0;
        for other in 0..81 {
            if other != sq && shares_unit(sq, other) {
                peers[count] = other;
                count += 1;
            }
        }
        debug_assert_eq!(count, 20);
        peers
    });

    /// The 6 chutes as box-index triples: 3 horizontal bands, 3 vertical stacks.
    pub static ref CHUTES: [[usize; 3]; 6] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
    ];
}

fn shares_unit(a: usize, b: usize) -> bool {
    let (ra, ca) = (a / 9, a % 9);
    let (rb, cb) = (b / 9, b % 9);
    ra == rb || ca == cb || (ra / 3 == rb / 3 && ca / 3 == cb / 3)
}

/// Whether two squares share at least one unit.
#[inline]
pub fn sees(a: usize, b: usize) -> bool {
    a != b && shares_unit(a, b)
}

/// Orientation of a chute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChuteKind {
    Horizontal,
    Vertical,
}

/// Classify chute index 0..=5: the first three are horizontal bands.
pub fn chute_kind(chute: usize) -> ChuteKind {
    if chute < 3 {
        ChuteKind::Horizontal
    } else {
        ChuteKind::Vertical
    }
}
