//! Board state: placements, derived pencil marks, conflicts, and the two
//! exchange formats (81-character grid string and compact run-length form).

use crate::bitset::DigitSet;
use crate::error::Error;
use crate::topology::{UnitRef, PEERS, UNITS};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A square position on the 9x9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Position { row, col }
    }

    /// Linear row-major square index, 0..=80.
    pub fn index(self) -> usize {
        self.row * 9 + self.col
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 81);
        Position {
            row: index / 9,
            col: index % 9,
        }
    }

    /// Index of the 3x3 box containing this square, 0..=8.
    pub fn box_index(self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// A duplicated digit within one unit (invariant I1 violation).
///
/// Conflicts are reported, never auto-repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub unit: UnitRef,
    pub digit: u8,
    pub squares: Vec<Position>,
}

/// Placements for the 81 squares. `None` is an empty square.
///
/// `Board` carries placements only; pencil marks live in [`Candidates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<u8>; 81],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with all 81 squares empty.
    pub fn empty() -> Self {
        Board { cells: [None; 81] }
    }

    /// Parse a grid string: `1`-`9` are clues, `.` and `0` are empty, any
    /// other character is ignored. Short input is padded with empties on the
    /// right; input beyond 81 cells is truncated.
    pub fn from_string(input: &str) -> Self {
        let mut board = Board::empty();
        let mut idx = 0;
        for c in input.chars() {
            if idx >= 81 {
                break;
            }
            match c {
                '.' | '0' => idx += 1,
                '1'..='9' => {
                    board.cells[idx] = Some(c as u8 - b'0');
                    idx += 1;
                }
                _ => {}
            }
        }
        board
    }

    /// The canonical 81-character form, `.` for empty squares.
    pub fn to_grid_string(&self) -> String {
        self.cells
            .iter()
            .map(|c| match c {
                Some(d) => (b'0' + d) as char,
                None => '.',
            })
            .collect()
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.index()]
    }

    pub fn set(&mut self, pos: Position, value: Option<u8>) {
        debug_assert!(value.map_or(true, |d| (1..=9).contains(&d)));
        self.cells[pos.index()] = value;
    }

    /// Placement at a linear square index.
    #[inline]
    pub fn value(&self, square: usize) -> Option<u8> {
        self.cells[square]
    }

    #[inline]
    pub fn set_value(&mut self, square: usize, value: Option<u8>) {
        self.cells[square] = value;
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Linear indices of empty squares, ascending.
    pub fn empty_squares(&self) -> impl Iterator<Item = usize> + '_ {
        (0..81).filter(|&i| self.cells[i].is_none())
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        self.empty_squares().map(Position::from_index).collect()
    }

    /// Report every unit/digit pair that is placed more than once.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut out = Vec::new();
        for (unit_idx, unit) in UNITS.iter().enumerate() {
            for digit in 1..=9u8 {
                let squares: Vec<Position> = unit
                    .iter()
                    .filter(|&&sq| self.cells[sq] == Some(digit))
                    .map(|&sq| Position::from_index(sq))
                    .collect();
                if squares.len() > 1 {
                    out.push(Conflict {
                        unit: UnitRef::from_unit(unit_idx),
                        digit,
                        squares,
                    });
                }
            }
        }
        out
    }

    /// Compact run-length form: digits emit themselves, runs of consecutive
    /// empties collapse to one letter per run length (`a` = 1 .. `f` = 6).
    pub fn serialize_compact(&self) -> String {
        let mut out = String::with_capacity(81);
        let mut run = 0usize;
        for cell in &self.cells {
            match cell {
                Some(d) => {
                    flush_run(&mut out, &mut run);
                    out.push((b'0' + d) as char);
                }
                None => {
                    run += 1;
                    if run == 6 {
                        flush_run(&mut out, &mut run);
                    }
                }
            }
        }
        flush_run(&mut out, &mut run);
        out
    }

    /// Invert [`Board::serialize_compact`]. Rejects unknown symbols and any
    /// input that does not decode to exactly 81 squares.
    pub fn deserialize_compact(input: &str) -> Result<Self, Error> {
        let mut board = Board::empty();
        let mut idx = 0usize;
        for c in input.chars() {
            let advance = match c {
                '1'..='9' => {
                    if idx < 81 {
                        board.cells[idx] = Some(c as u8 - b'0');
                    }
                    1
                }
                'a'..='f' => (c as u8 - b'a') as usize + 1,
                _ => {
                    return Err(Error::MalformedInput(format!(
                        "unexpected symbol {c:?} in compact form"
                    )))
                }
            };
            idx += advance;
            if idx > 81 {
                return Err(Error::MalformedInput(format!(
                    "compact form decodes past 81 squares (at {idx})"
                )));
            }
        }
        if idx != 81 {
            return Err(Error::MalformedInput(format!(
                "compact form decodes to {idx} squares, expected 81"
            )));
        }
        Ok(board)
    }
}

fn flush_run(out: &mut String, run: &mut usize) {
    if *run > 0 {
        out.push((b'a' + (*run - 1) as u8) as char);
        *run = 0;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_grid_string())
    }
}

// Boards cross process boundaries as the 81-character exchange string, not
// as a raw array.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_grid_string())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoardVisitor;
        impl Visitor<'_> for BoardVisitor {
            type Value = Board;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an 81-character grid string")
            }
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Board, E> {
                Ok(Board::from_string(v))
            }
        }
        deserializer.deserialize_str(BoardVisitor)
    }
}

/// Pencil marks for every empty square; placed squares carry the empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    marks: [DigitSet; 81],
}

impl Candidates {
    /// Derive pencil marks from a board: every empty square starts at
    /// {1..9}, then each placed digit is struck from its peers.
    pub fn from_board(board: &Board) -> Self {
        let mut marks = [DigitSet::FULL; 81];
        for sq in 0..81 {
            if let Some(d) = board.value(sq) {
                marks[sq] = DigitSet::EMPTY;
                for &peer in &PEERS[sq] {
                    marks[peer].remove(d);
                }
            }
        }
        Candidates { marks }
    }

    #[inline]
    pub fn get(&self, square: usize) -> DigitSet {
        self.marks[square]
    }

    #[inline]
    pub fn set(&mut self, square: usize, set: DigitSet) {
        self.marks[square] = set;
    }

    pub fn remove(&mut self, square: usize, digit: u8) {
        self.marks[square].remove(digit);
    }

    pub fn insert(&mut self, square: usize, digit: u8) {
        self.marks[square].insert(digit);
    }

    /// Record a placement: clear the square's marks and strike the digit
    /// from all 20 peers.
    pub fn place(&mut self, square: usize, digit: u8) {
        self.marks[square] = DigitSet::EMPTY;
        for &peer in &PEERS[square] {
            self.marks[peer].remove(digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_from_string_rules() {
        let board = Board::from_string(EASY);
        assert_eq!(board.get(Position::new(0, 0)), Some(5));
        assert_eq!(board.get(Position::new(0, 2)), None);
        assert_eq!(board.filled_count(), 30);

        // '0' is empty, unknown characters are ignored, short input pads.
        let board = Board::from_string("1 2|30\n4");
        assert_eq!(board.get(Position::new(0, 0)), Some(1));
        assert_eq!(board.get(Position::new(0, 1)), Some(2));
        assert_eq!(board.get(Position::new(0, 2)), Some(3));
        assert_eq!(board.get(Position::new(0, 3)), None);
        assert_eq!(board.get(Position::new(0, 4)), Some(4));
        assert_eq!(board.filled_count(), 4);

        // Input beyond 81 squares is truncated.
        let long: String = "1".repeat(100);
        assert_eq!(Board::from_string(&long).filled_count(), 81);
    }

    #[test]
    fn test_grid_string_roundtrip() {
        let board = Board::from_string(EASY);
        assert_eq!(board.to_grid_string(), EASY);
        assert_eq!(Board::from_string(&board.to_grid_string()), board);
    }

    #[test]
    fn test_conflicts() {
        let mut input = String::from("11");
        input.push_str(&".".repeat(79));
        let board = Board::from_string(&input);
        let conflicts = board.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].digit, 1);
        assert_eq!(
            conflicts[0].squares,
            vec![Position::new(0, 0), Position::new(0, 1)]
        );

        assert!(Board::from_string(EASY).conflicts().is_empty());
    }

    #[test]
    fn test_compact_roundtrip_solved() {
        let solved = "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let board = Board::from_string(solved);
        let compact = board.serialize_compact();
        assert_eq!(compact, solved);
        assert_eq!(Board::deserialize_compact(&compact).unwrap(), board);
    }

    #[test]
    fn test_compact_runs() {
        let board = Board::from_string(EASY);
        let compact = board.serialize_compact();
        let back = Board::deserialize_compact(&compact).unwrap();
        assert_eq!(back, board);
        // Two leading empties after "53" collapse to 'b'.
        assert!(compact.starts_with("53b7"));

        // Runs longer than 6 split across letters.
        let mut long_run = String::from("1");
        long_run.push_str(&".".repeat(80));
        let sparse = Board::from_string(&long_run);
        let compact = sparse.serialize_compact();
        assert_eq!(Board::deserialize_compact(&compact).unwrap(), sparse);
        assert!(compact.chars().all(|c| matches!(c, '1' | 'a'..='f')));
    }

    #[test]
    fn test_compact_rejects_bad_input() {
        assert!(Board::deserialize_compact("xyz").is_err());
        assert!(Board::deserialize_compact("1").is_err());
        let over = "9".repeat(82);
        assert!(Board::deserialize_compact(&over).is_err());
    }

    #[test]
    fn test_candidates_derivation() {
        let board = Board::from_string(EASY);
        let cands = Candidates::from_board(&board);

        // Placed square carries no marks.
        assert!(cands.get(0).is_empty());
        // r1c3 sees 5, 3 (row), 6, 9, 8 (column+box): those digits are gone.
        let c = cands.get(Position::new(0, 2).index());
        assert!(!c.contains(5));
        assert!(!c.contains(3));
        assert!(!c.contains(6));
        assert!(!c.contains(9));
        assert!(!c.contains(8));
        assert!(c.contains(1));
    }

    #[test]
    fn test_candidates_place() {
        let board = Board::from_string(EASY);
        let mut cands = Candidates::from_board(&board);
        let sq = Position::new(0, 2).index();
        cands.place(sq, 4);
        assert!(cands.get(sq).is_empty());
        for &peer in &PEERS[sq] {
            assert!(!cands.get(peer).contains(4));
        }
    }
}
