//! Chute remote pairs: two non-peer bi-value squares with the same pair in
//! two boxes of one chute.
//!
//! The three squares of the third box seen by neither remote square decide
//! the elimination: a pair digit absent there must fall, within the chute's
//! remaining line, in one of the two remote boxes, forcing the matching
//! remote square to the other digit. At least one remote square therefore
//! holds the digit present among those three squares, and that digit leaves
//! every square seeing both.

use super::fabric::CandidateFabric;
use super::types::{Elimination, Hint};
use crate::board::Position;
use crate::topology::{chute_kind, sees, UNITS, UNIT_BOX_BASE, CHUTES};

pub fn find_chute_remote_pairs(fab: &CandidateFabric) -> Option<Hint> {
    let bivalue = fab.bivalue_squares();
    for (chute_idx, boxes) in CHUTES.iter().enumerate() {
        for (i, &box_a) in boxes.iter().enumerate() {
            for &box_b in &boxes[i + 1..] {
                let third_box = boxes.iter().copied().find(|&b| b != box_a && b != box_b)
                    .expect("chute has three boxes");
                for &sq1 in &bivalue {
                    if Position::from_index(sq1).box_index() != box_a {
                        continue;
                    }
                    for &sq2 in &bivalue {
                        if Position::from_index(sq2).box_index() != box_b {
                            continue;
                        }
                        if fab.cands[sq1] != fab.cands[sq2] || sees(sq1, sq2) {
                            continue;
                        }
                        if let Some(hint) =
                            check_remote_pair(fab, chute_idx, sq1, sq2, third_box)
                        {
                            return Some(hint);
                        }
                    }
                }
            }
        }
    }
    None
}

fn check_remote_pair(
    fab: &CandidateFabric,
    chute_idx: usize,
    sq1: usize,
    sq2: usize,
    third_box: usize,
) -> Option<Hint> {
    let pair = fab.cands[sq1];
    let mut digits = pair.iter();
    let x = digits.next()?;
    let y = digits.next()?;

    // The three third-box squares in line with neither remote square.
    let free: Vec<usize> = UNITS[UNIT_BOX_BASE + third_box]
        .iter()
        .copied()
        .filter(|&sq| !sees(sq, sq1) && !sees(sq, sq2))
        .collect();
    debug_assert_eq!(free.len(), 3);

    let appears = |digit: u8| {
        free.iter()
            .any(|&sq| fab.values[sq] == Some(digit) || fab.cands[sq].contains(digit))
    };
    let (present, absent) = match (appears(x), appears(y)) {
        (true, false) => (x, y),
        (false, true) => (y, x),
        _ => return None,
    };

    let mut eliminations = Vec::new();
    for sq in 0..81 {
        if sq != sq1 && sq != sq2
            && fab.cands[sq].contains(present)
            && sees(sq, sq1)
            && sees(sq, sq2)
        {
            eliminations.push(Elimination {
                square: Position::from_index(sq),
                digit: present,
            });
        }
    }
    if eliminations.is_empty() {
        return None;
    }
    Some(Hint::ChuteRemotePairs {
        digits: (x, y),
        remote_pair: [Position::from_index(sq1), Position::from_index(sq2)],
        chute_kind: chute_kind(chute_idx),
        third_box_squares: free.iter().map(|&sq| Position::from_index(sq)).collect(),
        present_digit: present,
        absent_digit: absent,
        eliminations,
    })
}
