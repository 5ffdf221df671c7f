//! Y-wing: a bi-value pivot AB seeing pincers AC and BC forces C out of
//! every square seeing both pincers.

use super::fabric::CandidateFabric;
use super::types::{Elimination, Hint};
use crate::board::Position;
use crate::topology::{sees, PEERS};

pub fn find_y_wing(fab: &CandidateFabric) -> Option<Hint> {
    let bivalue = fab.bivalue_squares();
    for &pivot in &bivalue {
        // Bi-value peers sharing exactly one candidate with the pivot.
        let arms: Vec<usize> = PEERS[pivot]
            .iter()
            .copied()
            .filter(|&sq| {
                fab.cands[sq].len() == 2
                    && fab.cands[sq] != fab.cands[pivot]
                    && fab.cands[sq].intersection(fab.cands[pivot]).len() == 1
            })
            .collect();
        for (i, &p1) in arms.iter().enumerate() {
            for &p2 in &arms[i + 1..] {
                if let Some(hint) = check_y_wing(fab, pivot, p1, p2) {
                    return Some(hint);
                }
            }
        }
    }
    None
}

fn check_y_wing(fab: &CandidateFabric, pivot: usize, p1: usize, p2: usize) -> Option<Hint> {
    let pivot_cands = fab.cands[pivot];
    let c1 = fab.cands[p1];
    let c2 = fab.cands[p2];

    // The three squares must span exactly three digits A, B, C.
    if (pivot_cands | c1 | c2).len() != 3 {
        return None;
    }
    let a = pivot_cands.intersection(c1).single_digit()?;
    let b = pivot_cands.intersection(c2).single_digit()?;
    if a == b {
        return None;
    }
    let c = c1.intersection(c2).single_digit()?;
    if c == a || c == b {
        return None;
    }

    let mut eliminations = Vec::new();
    for sq in 0..81 {
        if sq != pivot && sq != p1 && sq != p2
            && fab.cands[sq].contains(c)
            && sees(sq, p1)
            && sees(sq, p2)
        {
            eliminations.push(Elimination {
                square: Position::from_index(sq),
                digit: c,
            });
        }
    }
    if eliminations.is_empty() {
        return None;
    }
    Some(Hint::YWing {
        pivot: Position::from_index(pivot),
        pincers: [Position::from_index(p1), Position::from_index(p2)],
        candidate_a: a,
        candidate_b: b,
        candidate_c: c,
        eliminations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Candidates};

    #[test]
    fn test_y_wing() {
        // Pivot r1c1 {1,2}, pincers r1c5 {1,3} and r4c1 {2,3}. Squares
        // seeing both pincers may not hold 3; r4c5 is one such square.
        let board = Board::empty();
        let mut cands = Candidates::from_board(&board);
        cands.set(0, [1, 2].into_iter().collect()); // r1c1
        cands.set(4, [1, 3].into_iter().collect()); // r1c5
        cands.set(27, [2, 3].into_iter().collect()); // r4c1

        let fab = CandidateFabric::from_state(&board, &cands);
        let hint = find_y_wing(&fab).unwrap();
        match hint {
            Hint::YWing {
                pivot,
                pincers,
                candidate_a,
                candidate_b,
                candidate_c,
                eliminations,
            } => {
                assert_eq!(pivot, Position::new(0, 0));
                assert_eq!(pincers, [Position::new(0, 4), Position::new(3, 0)]);
                assert_eq!((candidate_a, candidate_b, candidate_c), (1, 2, 3));
                // The only square seeing both pincers (other than the pivot)
                // is their row/column crossing.
                assert_eq!(eliminations.len(), 1);
                assert_eq!(
                    eliminations[0],
                    Elimination {
                        square: Position::new(3, 4),
                        digit: 3,
                    }
                );
            }
            other => panic!("unexpected hint {other:?}"),
        }
    }

    #[test]
    fn test_no_y_wing_when_union_too_wide() {
        // Pincers agreeing on nothing: {1,2}, {1,3}, {2,4} spans four digits.
        let board = Board::empty();
        let mut cands = Candidates::from_board(&board);
        cands.set(0, [1, 2].into_iter().collect());
        cands.set(4, [1, 3].into_iter().collect());
        cands.set(27, [2, 4].into_iter().collect());

        let fab = CandidateFabric::from_state(&board, &cands);
        assert!(find_y_wing(&fab).is_none());
    }
}
