//! The hint engine: a difficulty-ordered battery of technique detectors, the
//! apply-hint state transition, and the trace driver.

pub mod basic;
pub mod chute;
pub mod coloring;
pub mod errors;
pub mod fabric;
pub mod fish;
pub mod intersections;
pub mod subsets;
pub mod types;
pub mod wings;

pub use types::{
    difficulty_to_category, technique_difficulty, Category, ColoredSquare, ColoringRule,
    Elimination, Hint, Technique,
};

use crate::board::{Board, Candidates};
use crate::solver::{DigitPolicy, SolveOptions, Solver};
use crate::topology::UnitKind;
use fabric::CandidateFabric;
use serde::{Deserialize, Serialize};

/// Default step cap for [`HintEngine::solve_with_hints`].
pub const DEFAULT_STEP_CAP: usize = 1000;

/// Why the trace driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Every square is placed.
    Solved,
    /// No implemented technique applies.
    NoHint,
    /// A hint was produced but applying it changed nothing.
    NoProgress,
    /// The step cap was exhausted.
    StepCap,
}

/// One trace entry: the hint taken and the board after applying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub technique: Technique,
    pub difficulty: u8,
    pub hint: Hint,
    pub board_after: Board,
}

/// Result of driving the hint engine to termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub solved: bool,
    pub outcome: SolveOutcome,
    pub trace: Vec<TraceStep>,
    pub board: Board,
}

impl SolveResult {
    pub fn steps(&self) -> usize {
        self.trace.len()
    }
}

/// Hint engine for one puzzle. Holds the puzzle and, when it is uniquely
/// solvable, the ground-truth solution for the mistake detectors.
pub struct HintEngine {
    puzzle: Board,
    solution: Option<Board>,
}

impl HintEngine {
    pub fn new(puzzle: &Board) -> Self {
        let solver = Solver::new();
        let first =
            solver.solve_with(puzzle, &SolveOptions::with_digit_policy(DigitPolicy::Ascending));
        let last =
            solver.solve_with(puzzle, &SolveOptions::with_digit_policy(DigitPolicy::Descending));
        let solution = match (first, last) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        };
        HintEngine {
            puzzle: *puzzle,
            solution,
        }
    }

    pub fn puzzle(&self) -> &Board {
        &self.puzzle
    }

    /// The unique solution, when one exists.
    pub fn solution(&self) -> Option<&Board> {
        self.solution.as_ref()
    }

    /// The next deductive step for `board`, trying detectors in ascending
    /// difficulty. `candidates` are the caller's pencil marks (a player may
    /// carry stale ones); omitted, they are derived from the board.
    pub fn get_hint(&self, board: &Board, candidates: Option<&Candidates>) -> Option<Hint> {
        let derived;
        let cands = match candidates {
            Some(c) => c,
            None => {
                derived = Candidates::from_board(board);
                &derived
            }
        };
        let fab = CandidateFabric::from_state(board, cands);

        // Mistake detectors run only with a unique solution in hand.
        if let Some(solution) = &self.solution {
            if let Some(hint) = errors::find_incorrect_value(&fab, solution) {
                return Some(hint);
            }
            if let Some(hint) = errors::find_missing_candidate(&fab, solution) {
                return Some(hint);
            }
        }

        basic::find_naked_single(&fab)
            .or_else(|| basic::find_last_remaining(&fab, UnitKind::Box))
            .or_else(|| basic::find_last_remaining(&fab, UnitKind::Row))
            .or_else(|| basic::find_last_remaining(&fab, UnitKind::Column))
            .or_else(|| basic::find_hidden_single(&fab))
            .or_else(|| subsets::find_naked_set(&fab, 2))
            .or_else(|| intersections::find_pointing_pairs(&fab))
            .or_else(|| intersections::find_box_line_reduction(&fab))
            .or_else(|| subsets::find_hidden_set(&fab, 2))
            .or_else(|| subsets::find_naked_set(&fab, 3))
            .or_else(|| subsets::find_hidden_set(&fab, 3))
            .or_else(|| subsets::find_naked_set(&fab, 4))
            .or_else(|| subsets::find_hidden_set(&fab, 4))
            .or_else(|| fish::find_x_wing(&fab))
            .or_else(|| wings::find_y_wing(&fab))
            .or_else(|| chute::find_chute_remote_pairs(&fab))
            .or_else(|| coloring::find_simple_coloring(&fab))
            .or_else(|| fish::find_swordfish(&fab))
    }

    /// Mutate `board` and `candidates` exactly as a player following the
    /// hint would. Returns whether the state actually changed.
    pub fn apply(&self, hint: &Hint, board: &mut Board, candidates: &mut Candidates) -> bool {
        match hint {
            Hint::IncorrectValue {
                square, expected, ..
            } => {
                let sq = square.index();
                let progressed = board.value(sq) != Some(*expected);
                board.set_value(sq, Some(*expected));
                candidates.place(sq, *expected);
                progressed
            }
            Hint::MissingCandidate { square, digit } => {
                let sq = square.index();
                let progressed = !candidates.get(sq).contains(*digit);
                candidates.insert(sq, *digit);
                progressed
            }
            Hint::SingleCell { square, digit, .. } => {
                let sq = square.index();
                let progressed = board.value(sq) != Some(*digit);
                board.set_value(sq, Some(*digit));
                candidates.place(sq, *digit);
                progressed
            }
            _ => {
                let mut progressed = false;
                for elim in hint.eliminations() {
                    let sq = elim.square.index();
                    if candidates.get(sq).contains(elim.digit) {
                        candidates.remove(sq, elim.digit);
                        progressed = true;
                    }
                }
                progressed
            }
        }
    }

    /// Drive the battery to termination from the puzzle's start state.
    pub fn solve_with_hints(&self, max_steps: usize) -> SolveResult {
        let mut board = self.puzzle;
        let mut candidates = Candidates::from_board(&board);
        let mut trace = Vec::new();

        let outcome = loop {
            if board.is_complete() {
                break SolveOutcome::Solved;
            }
            if trace.len() >= max_steps {
                break SolveOutcome::StepCap;
            }
            let Some(hint) = self.get_hint(&board, Some(&candidates)) else {
                break SolveOutcome::NoHint;
            };
            if !self.apply(&hint, &mut board, &mut candidates) {
                break SolveOutcome::NoProgress;
            }
            trace.push(TraceStep {
                technique: hint.technique(),
                difficulty: hint.difficulty(),
                hint,
                board_after: board,
            });
        };

        SolveResult {
            solved: board.is_complete(),
            outcome,
            trace,
            board,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    const EASY: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const EASY_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solve_with_hints_easy() {
        let engine = HintEngine::new(&Board::from_string(EASY));
        let result = engine.solve_with_hints(DEFAULT_STEP_CAP);
        assert!(result.solved);
        assert_eq!(result.outcome, SolveOutcome::Solved);
        assert_eq!(result.board.to_grid_string(), EASY_SOLUTION);
        // One placement per empty square; no mistakes on a clean trace.
        assert_eq!(result.steps(), 51);
        assert!(result
            .trace
            .iter()
            .all(|s| s.technique > Technique::MissingCandidate));
    }

    #[test]
    fn test_every_hint_progresses() {
        // P5: whatever the battery returns must change state when applied.
        let engine = HintEngine::new(&Board::from_string(EASY));
        let mut board = *engine.puzzle();
        let mut candidates = Candidates::from_board(&board);
        let mut steps = 0;
        while let Some(hint) = engine.get_hint(&board, Some(&candidates)) {
            assert!(
                engine.apply(&hint, &mut board, &mut candidates),
                "hint did not progress: {hint:?}"
            );
            steps += 1;
            assert!(steps <= DEFAULT_STEP_CAP, "driver ran away");
            if board.is_complete() {
                break;
            }
        }
        assert!(board.is_complete());
    }

    #[test]
    fn test_placements_agree_with_solution() {
        // Soundness: every placement the trace makes matches ground truth.
        let engine = HintEngine::new(&Board::from_string(EASY));
        let solution = Board::from_string(EASY_SOLUTION);
        let result = engine.solve_with_hints(DEFAULT_STEP_CAP);
        for step in &result.trace {
            if let Hint::SingleCell { square, digit, .. } = &step.hint {
                assert_eq!(solution.get(*square), Some(*digit));
            }
        }
    }

    #[test]
    fn test_incorrect_value_reported_first() {
        let engine = HintEngine::new(&Board::from_string(EASY));
        let mut board = Board::from_string(EASY);
        board.set(Position::new(0, 2), Some(2)); // truth is 4
        let hint = engine.get_hint(&board, None).unwrap();
        assert_eq!(
            hint,
            Hint::IncorrectValue {
                square: Position::new(0, 2),
                actual: 2,
                expected: 4,
            }
        );
        // Applying the correction fixes the square.
        let mut candidates = Candidates::from_board(&board);
        assert!(engine.apply(&hint, &mut board, &mut candidates));
        assert_eq!(board.get(Position::new(0, 2)), Some(4));
    }

    #[test]
    fn test_missing_candidate_restored() {
        let engine = HintEngine::new(&Board::from_string(EASY));
        let board = Board::from_string(EASY);
        let mut candidates = Candidates::from_board(&board);
        let sq = Position::new(0, 2).index();
        candidates.remove(sq, 4); // strike the true digit from the marks
        let hint = engine.get_hint(&board, Some(&candidates)).unwrap();
        assert_eq!(
            hint,
            Hint::MissingCandidate {
                square: Position::new(0, 2),
                digit: 4,
            }
        );
        let mut board = board;
        assert!(engine.apply(&hint, &mut board, &mut candidates));
        assert!(candidates.get(sq).contains(4));
    }

    #[test]
    fn test_no_error_hints_without_unique_solution() {
        // The empty board has no unique solution: mistake detectors stay
        // silent and the battery reports ordinary techniques instead.
        let engine = HintEngine::new(&Board::empty());
        assert!(engine.solution().is_none());
        // An empty board offers no deduction at all.
        assert!(engine.get_hint(&Board::empty(), None).is_none());
    }

    #[test]
    fn test_step_cap_halts_driver() {
        let engine = HintEngine::new(&Board::from_string(EASY));
        let result = engine.solve_with_hints(3);
        assert!(!result.solved);
        assert_eq!(result.outcome, SolveOutcome::StepCap);
        assert_eq!(result.steps(), 3);
    }
}
