//! Intersection removals: pointing pairs and box/line reduction.

use super::fabric::CandidateFabric;
use super::types::{Elimination, Hint, Technique};
use crate::board::Position;
use crate::topology::{
    UnitRef, UNITS, UNIT_BOX_BASE, UNIT_COL_BASE, UNIT_ROW_BASE,
};

/// Within a box, a digit confined to one row or column: strike it from the
/// rest of that line.
pub fn find_pointing_pairs(fab: &CandidateFabric) -> Option<Hint> {
    for unit in UNIT_BOX_BASE..UNIT_BOX_BASE + 9 {
        for digit in 1..=9u8 {
            let cells = fab.unit_cells_with(unit, digit);
            if !(2..=3).contains(&cells.len()) {
                continue;
            }
            let row = cells[0] / 9;
            let col = cells[0] % 9;
            let line = if cells.iter().all(|&sq| sq / 9 == row) {
                Some(UNIT_ROW_BASE + row)
            } else if cells.iter().all(|&sq| sq % 9 == col) {
                Some(UNIT_COL_BASE + col)
            } else {
                None
            };
            let Some(line) = line else { continue };
            if let Some(hint) = intersection_hint(
                fab,
                Technique::PointingPair,
                digit,
                &cells,
                unit,
                line,
                line,
            ) {
                return Some(hint);
            }
        }
    }
    None
}

/// Within a line, a digit confined to one box: strike it from the rest of
/// that box.
pub fn find_box_line_reduction(fab: &CandidateFabric) -> Option<Hint> {
    for unit in UNIT_ROW_BASE..UNIT_COL_BASE + 9 {
        for digit in 1..=9u8 {
            let cells = fab.unit_cells_with(unit, digit);
            if !(2..=3).contains(&cells.len()) {
                continue;
            }
            let box_idx = Position::from_index(cells[0]).box_index();
            if !cells
                .iter()
                .all(|&sq| Position::from_index(sq).box_index() == box_idx)
            {
                continue;
            }
            let box_unit = UNIT_BOX_BASE + box_idx;
            if let Some(hint) = intersection_hint(
                fab,
                Technique::BoxLineReduction,
                digit,
                &cells,
                unit,
                box_unit,
                box_unit,
            ) {
                return Some(hint);
            }
        }
    }
    None
}

/// Eliminations of `digit` from `strike_unit` outside the intersection
/// squares. `primary` is the unit the pattern was found in.
fn intersection_hint(
    fab: &CandidateFabric,
    technique: Technique,
    digit: u8,
    squares: &[usize],
    primary: usize,
    secondary: usize,
    strike_unit: usize,
) -> Option<Hint> {
    let mut eliminations = Vec::new();
    for &sq in &UNITS[strike_unit] {
        if !squares.contains(&sq) && fab.cands[sq].contains(digit) {
            eliminations.push(Elimination {
                square: Position::from_index(sq),
                digit,
            });
        }
    }
    if eliminations.is_empty() {
        return None;
    }
    Some(Hint::IntersectionRemoval {
        technique,
        digit,
        squares: squares.iter().map(|&sq| Position::from_index(sq)).collect(),
        primary_unit: UnitRef::from_unit(primary),
        secondary_unit: UnitRef::from_unit(secondary),
        eliminations,
    })
}
