//! Mistake detection against the unique solution.
//!
//! Both detectors need ground truth; the battery only runs them when the
//! engine obtained a unique solution for the puzzle.

use super::fabric::CandidateFabric;
use super::types::Hint;
use crate::board::{Board, Position};

/// A placed square that disagrees with the solution.
pub fn find_incorrect_value(fab: &CandidateFabric, solution: &Board) -> Option<Hint> {
    for sq in 0..81 {
        if let (Some(actual), Some(expected)) = (fab.values[sq], solution.value(sq)) {
            if actual != expected {
                return Some(Hint::IncorrectValue {
                    square: Position::from_index(sq),
                    actual,
                    expected,
                });
            }
        }
    }
    None
}

/// An empty square whose pencil marks omit the digit it must take.
pub fn find_missing_candidate(fab: &CandidateFabric, solution: &Board) -> Option<Hint> {
    for sq in 0..81 {
        if !fab.is_empty_square(sq) {
            continue;
        }
        if let Some(expected) = solution.value(sq) {
            if !fab.cands[sq].contains(expected) {
                return Some(Hint::MissingCandidate {
                    square: Position::from_index(sq),
                    digit: expected,
                });
            }
        }
    }
    None
}
