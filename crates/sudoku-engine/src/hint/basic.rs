//! Single-placement techniques: naked single, last remaining in a unit,
//! hidden single.

use super::fabric::CandidateFabric;
use super::types::{Hint, Technique};
use crate::bitset::DigitSet;
use crate::board::Position;
use crate::topology::{UnitKind, UnitRef, UNITS, UNIT_BOX_BASE, UNIT_COL_BASE, UNIT_ROW_BASE};

/// A square with exactly one candidate.
pub fn find_naked_single(fab: &CandidateFabric) -> Option<Hint> {
    for sq in 0..81 {
        if let Some(digit) = fab.cands[sq].single_digit() {
            return Some(Hint::SingleCell {
                technique: Technique::NakedSingle,
                square: Position::from_index(sq),
                digit,
                unit: None,
            });
        }
    }
    None
}

/// A unit with a single empty square: its digit is the one missing.
pub fn find_last_remaining(fab: &CandidateFabric, kind: UnitKind) -> Option<Hint> {
    let (base, technique) = match kind {
        UnitKind::Box => (UNIT_BOX_BASE, Technique::LastRemainingInBox),
        UnitKind::Row => (UNIT_ROW_BASE, Technique::LastRemainingInRow),
        UnitKind::Column => (UNIT_COL_BASE, Technique::LastRemainingInColumn),
    };
    for unit in base..base + 9 {
        let mut placed = DigitSet::EMPTY;
        let mut hole = None;
        let mut holes = 0;
        for &sq in &UNITS[unit] {
            match fab.values[sq] {
                Some(d) => placed.insert(d),
                None => {
                    hole = Some(sq);
                    holes += 1;
                }
            }
        }
        if holes == 1 {
            let sq = hole.expect("counted one hole");
            if let Some(digit) = DigitSet::FULL.difference(placed).single_digit() {
                return Some(Hint::SingleCell {
                    technique,
                    square: Position::from_index(sq),
                    digit,
                    unit: Some(UnitRef::from_unit(unit)),
                });
            }
        }
    }
    None
}

/// A digit with exactly one candidate square within some unit.
pub fn find_hidden_single(fab: &CandidateFabric) -> Option<Hint> {
    for unit in 0..27 {
        for digit in 1..=9u8 {
            if fab.unit_count(unit, digit) == 1 {
                let sq = fab.unit_cells_with(unit, digit)[0];
                return Some(Hint::SingleCell {
                    technique: Technique::HiddenSingle,
                    square: Position::from_index(sq),
                    digit,
                    unit: Some(UnitRef::from_unit(unit)),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Candidates};

    fn fabric(input: &str) -> CandidateFabric {
        let board = Board::from_string(input);
        let cands = Candidates::from_board(&board);
        CandidateFabric::from_state(&board, &cands)
    }

    #[test]
    fn test_last_remaining_in_row() {
        // Row 1 fully placed except r1c9.
        let mut input = String::from("12345678.");
        input.push_str(&".".repeat(72));
        let fab = fabric(&input);

        let hint = find_last_remaining(&fab, UnitKind::Row).unwrap();
        assert_eq!(
            hint,
            Hint::SingleCell {
                technique: Technique::LastRemainingInRow,
                square: Position::new(0, 8),
                digit: 9,
                unit: Some(UnitRef {
                    kind: UnitKind::Row,
                    index: 0
                }),
            }
        );
        // Nothing fires for boxes on this board.
        assert!(find_last_remaining(&fab, UnitKind::Box).is_none());
    }

    #[test]
    fn test_last_remaining_in_box() {
        // Box 1 fully placed except r2c3.
        let mut input = String::from("123......45.......678......");
        input.push_str(&".".repeat(54));
        let fab = fabric(&input);

        let hint = find_last_remaining(&fab, UnitKind::Box).unwrap();
        assert_eq!(
            hint,
            Hint::SingleCell {
                technique: Technique::LastRemainingInBox,
                square: Position::new(1, 2),
                digit: 9,
                unit: Some(UnitRef {
                    kind: UnitKind::Box,
                    index: 0
                }),
            }
        );
    }

    #[test]
    fn test_naked_single() {
        // r1c9's marks are whittled to one digit by its row and column.
        let mut input = String::from("12345678.");
        input.push_str(&".".repeat(72));
        let fab = fabric(&input);
        let hint = find_naked_single(&fab).unwrap();
        assert_eq!(
            hint,
            Hint::SingleCell {
                technique: Technique::NakedSingle,
                square: Position::new(0, 8),
                digit: 9,
                unit: None,
            }
        );
    }

    #[test]
    fn test_hidden_single() {
        // Fives in rows 2-3 and columns 2-3 pin the only spot for 5 in box 1
        // to r1c1. No naked single exists.
        let board = Board::from_string(
            ".........\
             ....5....\
             ......5..\
             .5.......\
             ..5......\
             .........\
             .........\
             .........\
             .........",
        );
        let cands = Candidates::from_board(&board);
        let fab = CandidateFabric::from_state(&board, &cands);

        assert!(find_naked_single(&fab).is_none());
        let hint = find_hidden_single(&fab).unwrap();
        match hint {
            Hint::SingleCell {
                technique, square, digit, ..
            } => {
                assert_eq!(technique, Technique::HiddenSingle);
                assert_eq!(square, Position::new(0, 0));
                assert_eq!(digit, 5);
            }
            other => panic!("unexpected hint {other:?}"),
        }
    }
}
