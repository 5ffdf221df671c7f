//! Basic fish: x-wing (size 2) and swordfish (size 3).
//!
//! One sized search, run once with rows as bases and once with columns.
//! A fish exists when `size` base lines confine a digit to `size` cover
//! lines; the digit then leaves the covers outside the base lines.

use super::fabric::CandidateFabric;
use super::subsets::combinations;
use super::types::{Elimination, Hint};
use crate::board::Position;
use crate::topology::{UnitRef, UNITS, UNIT_COL_BASE, UNIT_ROW_BASE};

pub fn find_x_wing(fab: &CandidateFabric) -> Option<Hint> {
    find_fish(fab, 2)
}

pub fn find_swordfish(fab: &CandidateFabric) -> Option<Hint> {
    find_fish(fab, 3)
}

fn find_fish(fab: &CandidateFabric, size: usize) -> Option<Hint> {
    for digit in 1..=9u8 {
        for rows_as_base in [true, false] {
            if let Some(hint) = find_fish_oriented(fab, digit, size, rows_as_base) {
                return Some(hint);
            }
        }
    }
    None
}

fn find_fish_oriented(
    fab: &CandidateFabric,
    digit: u8,
    size: usize,
    rows_as_base: bool,
) -> Option<Hint> {
    let base_start = if rows_as_base { UNIT_ROW_BASE } else { UNIT_COL_BASE };
    let cover_start = if rows_as_base { UNIT_COL_BASE } else { UNIT_ROW_BASE };

    let eligible: Vec<usize> = (base_start..base_start + 9)
        .filter(|&unit| {
            let count = fab.unit_count(unit, digit) as usize;
            (2..=size).contains(&count)
        })
        .collect();
    if eligible.len() < size {
        return None;
    }

    for base_combo in combinations(&eligible, size) {
        // Cover-line indices occupied by the base cells.
        let mut cover_mask: u16 = 0;
        let mut base_cells: Vec<usize> = Vec::new();
        for &base in &base_combo {
            for sq in fab.unit_cells_with(base, digit) {
                let cover_idx = if rows_as_base { sq % 9 } else { sq / 9 };
                cover_mask |= 1 << cover_idx;
                base_cells.push(sq);
            }
        }
        if cover_mask.count_ones() as usize != size {
            continue;
        }

        let covers: Vec<usize> = (0..9)
            .filter(|i| cover_mask & (1 << i) != 0)
            .map(|i| cover_start + i)
            .collect();
        let mut eliminations = Vec::new();
        for &cover in &covers {
            for &sq in &UNITS[cover] {
                if fab.cands[sq].contains(digit) && !base_cells.contains(&sq) {
                    eliminations.push(Elimination {
                        square: Position::from_index(sq),
                        digit,
                    });
                }
            }
        }
        if eliminations.is_empty() {
            continue;
        }

        base_cells.sort_unstable();
        let squares: Vec<Position> = base_cells.iter().map(|&sq| Position::from_index(sq)).collect();
        let base_units: Vec<UnitRef> = base_combo.iter().map(|&u| UnitRef::from_unit(u)).collect();
        let cover_units: Vec<UnitRef> = covers.iter().map(|&u| UnitRef::from_unit(u)).collect();

        return Some(match size {
            2 => Hint::XWing {
                digit,
                corners: [squares[0], squares[1], squares[2], squares[3]],
                base_units: [base_units[0], base_units[1]],
                cover_units: [cover_units[0], cover_units[1]],
                eliminations,
            },
            3 => Hint::Swordfish {
                digit,
                squares,
                base_units: [base_units[0], base_units[1], base_units[2]],
                cover_units: [cover_units[0], cover_units[1], cover_units[2]],
                eliminations,
            },
            _ => unreachable!("fish size {size}"),
        });
    }
    None
}
