//! Simple coloring: two-color the conjugate-pair graph of one digit.
//!
//! Rule 2: a unit holding two squares of one color falsifies that color.
//! Rule 4: an outside candidate seeing both colors can never hold the digit.

use super::fabric::CandidateFabric;
use super::types::{ColoredSquare, ColoringRule, Elimination, Hint};
use crate::board::Position;
use crate::topology::{sees, UnitRef, SQUARE_UNITS};

pub fn find_simple_coloring(fab: &CandidateFabric) -> Option<Hint> {
    for digit in 1..=9u8 {
        // Conjugate edges: units where the digit has exactly two spots.
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); 81];
        let mut linked = false;
        for unit in 0..27 {
            if fab.unit_count(unit, digit) == 2 {
                let cells = fab.unit_cells_with(unit, digit);
                neighbors[cells[0]].push(cells[1]);
                neighbors[cells[1]].push(cells[0]);
                linked = true;
            }
        }
        if !linked {
            continue;
        }

        let mut colors = [0u8; 81]; // 0 unvisited, 1/2 the two parities, 3 done
        for start in 0..81 {
            if neighbors[start].is_empty() || colors[start] != 0 {
                continue;
            }
            // Depth-first two-coloring of this component.
            let mut component = vec![start];
            let mut stack = vec![start];
            colors[start] = 1;
            while let Some(sq) = stack.pop() {
                let next_color = if colors[sq] == 1 { 2 } else { 1 };
                for &peer in &neighbors[sq] {
                    if colors[peer] == 0 {
                        colors[peer] = next_color;
                        component.push(peer);
                        stack.push(peer);
                    }
                }
            }
            component.sort_unstable();

            if let Some(hint) = check_component(fab, digit, &component, &colors) {
                return Some(hint);
            }
            for &sq in &component {
                colors[sq] = 3;
            }
        }
    }
    None
}

fn check_component(
    fab: &CandidateFabric,
    digit: u8,
    component: &[usize],
    colors: &[u8; 81],
) -> Option<Hint> {
    let of_color = |color: u8| -> Vec<usize> {
        component
            .iter()
            .copied()
            .filter(|&sq| colors[sq] == color)
            .collect()
    };
    let colored: Vec<ColoredSquare> = component
        .iter()
        .map(|&sq| ColoredSquare {
            square: Position::from_index(sq),
            color: colors[sq],
        })
        .collect();
    let chain: Vec<Position> = component.iter().map(|&sq| Position::from_index(sq)).collect();

    // Rule 2: same-colored squares sharing a unit falsify their color.
    for color in [1u8, 2] {
        let cells = of_color(color);
        for (i, &a) in cells.iter().enumerate() {
            for &b in &cells[i + 1..] {
                if !sees(a, b) {
                    continue;
                }
                let unit = SQUARE_UNITS[a]
                    .iter()
                    .copied()
                    .find(|u| SQUARE_UNITS[b].contains(u))
                    .expect("seeing squares share a unit");
                let eliminations = cells
                    .iter()
                    .map(|&sq| Elimination {
                        square: Position::from_index(sq),
                        digit,
                    })
                    .collect();
                return Some(Hint::SimpleColoring {
                    digit,
                    chain,
                    colors: colored,
                    rule: ColoringRule::Rule2,
                    conflict_unit: Some(UnitRef::from_unit(unit)),
                    witness: None,
                    eliminations,
                });
            }
        }
    }

    // Rule 4: outside candidates seeing both colors.
    let mut eliminations = Vec::new();
    let mut witness = None;
    for sq in 0..81 {
        if colors[sq] != 0 || !fab.cands[sq].contains(digit) {
            continue;
        }
        let sees_color = |color: u8| {
            component
                .iter()
                .any(|&node| colors[node] == color && sees(sq, node))
        };
        if sees_color(1) && sees_color(2) {
            witness.get_or_insert(Position::from_index(sq));
            eliminations.push(Elimination {
                square: Position::from_index(sq),
                digit,
            });
        }
    }
    if eliminations.is_empty() {
        return None;
    }
    Some(Hint::SimpleColoring {
        digit,
        chain,
        colors: colored,
        rule: ColoringRule::Rule4,
        conflict_unit: None,
        witness,
        eliminations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Candidates};

    /// Restrict digit 5 to the given squares (all other squares lose it).
    fn coloring_state(spots: &[usize]) -> CandidateFabric {
        let board = Board::empty();
        let mut cands = Candidates::from_board(&board);
        for sq in 0..81 {
            if !spots.contains(&sq) {
                cands.remove(sq, 5);
            }
        }
        CandidateFabric::from_state(&board, &cands)
    }

    #[test]
    fn test_rule_4_witness_sees_both_colors() {
        // Chain on 5: r1c1 - r9c1 (column), r9c1 - r9c5 (row),
        // r9c5 - r3c5 (column). r3c2 sees r1c1 (color 1, box) and r3c5
        // (color 2, row); padding spots keep it outside the chain.
        let a = 0; // r1c1
        let b = 72; // r9c1
        let c = 76; // r9c5
        let d = 22; // r3c5
        let witness = 19; // r3c2
        let pads = [10, 46, 25]; // r2c2, r6c2, r3c8
        let fab = coloring_state(&[a, b, c, d, witness, pads[0], pads[1], pads[2]]);

        let hint = find_simple_coloring(&fab).unwrap();
        match hint {
            Hint::SimpleColoring {
                digit,
                chain,
                rule,
                conflict_unit,
                witness: w,
                eliminations,
                ..
            } => {
                assert_eq!(digit, 5);
                assert_eq!(rule, ColoringRule::Rule4);
                assert_eq!(conflict_unit, None);
                assert_eq!(w, Some(Position::new(2, 1)));
                assert_eq!(
                    chain,
                    vec![
                        Position::new(0, 0),
                        Position::new(2, 4),
                        Position::new(8, 0),
                        Position::new(8, 4),
                    ]
                );
                assert_eq!(
                    eliminations,
                    vec![Elimination {
                        square: Position::new(2, 1),
                        digit: 5,
                    }]
                );
            }
            other => panic!("unexpected hint {other:?}"),
        }
    }

    #[test]
    fn test_rule_2_color_conflict() {
        // Chain on 5: r1c1 - r9c1 - r9c5 - r3c5 - r3c3. The endpoints r1c1
        // and r3c3 carry the same color and share box 1: that color is false.
        let a = 0; // r1c1
        let b = 72; // r9c1
        let c = 76; // r9c5
        let d = 22; // r3c5
        let e = 20; // r3c3
        let pad = 10; // r2c2 keeps box 1 at three spots
        let fab = coloring_state(&[a, b, c, d, e, pad]);

        let hint = find_simple_coloring(&fab).unwrap();
        match hint {
            Hint::SimpleColoring {
                digit,
                rule,
                conflict_unit,
                witness,
                eliminations,
                colors,
                ..
            } => {
                assert_eq!(digit, 5);
                assert_eq!(rule, ColoringRule::Rule2);
                assert_eq!(witness, None);
                let unit = conflict_unit.unwrap();
                assert_eq!(unit, UnitRef::from_unit(18));
                // The false color covers r1c1, r3c3, r9c5.
                let mut struck: Vec<Position> = eliminations.iter().map(|e| e.square).collect();
                struck.sort();
                assert_eq!(
                    struck,
                    vec![Position::new(0, 0), Position::new(2, 2), Position::new(8, 4)]
                );
                // The colored squares are exactly the five chain nodes.
                assert_eq!(colors.len(), 5);
            }
            other => panic!("unexpected hint {other:?}"),
        }
    }

    #[test]
    fn test_no_deduction_from_bare_pairs() {
        // Three isolated column conjugates; no square outside them holds 5,
        // so neither rule applies.
        let fab = coloring_state(&[0, 1, 2, 36, 37, 38]);
        assert!(find_simple_coloring(&fab).is_none());
    }
}
