//! Locked-set techniques: naked and hidden pairs, triples, and quads.
//!
//! One routine per family, parameterized by the set size k. Traversal is
//! unit index ascending, then lexicographic square/digit combinations, so
//! the first hit is reproducible.

use super::fabric::CandidateFabric;
use super::types::{Elimination, Hint, Technique};
use crate::bitset::DigitSet;
use crate::board::Position;
use crate::topology::{UnitRef, UNITS};

/// Lexicographic k-combinations of `items`.
pub(super) fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || items.len() < k {
        return out;
    }
    let mut combo = vec![0usize; k];
    fn recurse(
        items: &[usize],
        k: usize,
        start: usize,
        depth: usize,
        combo: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if depth == k {
            out.push(combo.clone());
            return;
        }
        for i in start..=items.len() - (k - depth) {
            combo[depth] = items[i];
            recurse(items, k, i + 1, depth + 1, combo, out);
        }
    }
    recurse(items, k, 0, 0, &mut combo, &mut out);
    out
}

fn naked_technique(k: usize) -> Technique {
    match k {
        2 => Technique::NakedPair,
        3 => Technique::NakedTriple,
        4 => Technique::NakedQuad,
        _ => unreachable!("naked set size {k}"),
    }
}

fn hidden_technique(k: usize) -> Technique {
    match k {
        2 => Technique::HiddenPair,
        3 => Technique::HiddenTriple,
        4 => Technique::HiddenQuad,
        _ => unreachable!("hidden set size {k}"),
    }
}

/// k squares of one unit whose combined candidates span exactly k digits:
/// those digits leave the unit's other squares.
pub fn find_naked_set(fab: &CandidateFabric, k: usize) -> Option<Hint> {
    let technique = naked_technique(k);
    for unit in 0..27 {
        let empty = fab.unit_empty_cells(unit);
        if empty.len() <= k {
            // A set filling every empty square eliminates nothing.
            continue;
        }
        for combo in combinations(&empty, k) {
            let mut union = DigitSet::EMPTY;
            for &sq in &combo {
                union |= fab.cands[sq];
            }
            if union.len() as usize != k {
                continue;
            }
            let mut eliminations = Vec::new();
            for &sq in &empty {
                if combo.contains(&sq) {
                    continue;
                }
                for digit in fab.cands[sq].intersection(union).iter() {
                    eliminations.push(Elimination {
                        square: Position::from_index(sq),
                        digit,
                    });
                }
            }
            if !eliminations.is_empty() {
                return Some(Hint::NakedSet {
                    technique,
                    squares: combo.iter().map(|&sq| Position::from_index(sq)).collect(),
                    digits: union.iter().collect(),
                    unit: UnitRef::from_unit(unit),
                    eliminations,
                });
            }
        }
    }
    None
}

/// k digits confined to exactly k squares of one unit: every other
/// candidate leaves those squares.
pub fn find_hidden_set(fab: &CandidateFabric, k: usize) -> Option<Hint> {
    let technique = hidden_technique(k);
    for unit in 0..27 {
        // Digits still open in this unit, capped at k occurrences.
        let digits: Vec<usize> = (1..=9)
            .filter(|&d| {
                let count = fab.unit_count(unit, d as u8);
                count > 0 && count <= k as u32
            })
            .collect();
        if digits.len() < k {
            continue;
        }
        for combo in combinations(&digits, k) {
            let mut cell_mask: u16 = 0; // positions within the unit
            for &d in &combo {
                cell_mask |= fab.unit_digit_mask(unit, d as u8);
            }
            if cell_mask.count_ones() as usize != k {
                continue;
            }
            let combo_set: DigitSet = combo.iter().map(|&d| d as u8).collect();
            let squares: Vec<usize> = UNITS[unit]
                .iter()
                .enumerate()
                .filter(|&(pos, _)| cell_mask & (1 << pos) != 0)
                .map(|(_, &sq)| sq)
                .collect();
            let mut eliminations = Vec::new();
            for &sq in &squares {
                for digit in fab.cands[sq].difference(combo_set).iter() {
                    eliminations.push(Elimination {
                        square: Position::from_index(sq),
                        digit,
                    });
                }
            }
            if !eliminations.is_empty() {
                return Some(Hint::HiddenSet {
                    technique,
                    squares: squares.iter().map(|&sq| Position::from_index(sq)).collect(),
                    digits: combo.iter().map(|&d| d as u8).collect(),
                    unit: UnitRef::from_unit(unit),
                    eliminations,
                });
            }
        }
    }
    None
}
