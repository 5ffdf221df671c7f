//! Sudoku engine: solver, hint engine, and difficulty-aware generator.
//!
//! Three coupled services over the classical 9x9 grid:
//!
//! - a constraint-propagating backtracking [`Solver`] deciding solvability
//!   and uniqueness;
//! - a [`HintEngine`] that names the next human-style deduction for any
//!   board state and applies it exactly as a player would;
//! - a [`Generator`] producing minimal-clue puzzles whose hint-trace
//!   difficulty lands in a requested band.
//!
//! The three are coupled by contract: the hint engine's trace is the
//! scorer's input, the solver is ground truth for mistakes and uniqueness,
//! and the generator accepts or rejects candidates by driving the hint
//! engine to completion.
//!
//! ```
//! use sudoku_engine::{evaluate_puzzle_difficulty, Board, Solver};
//!
//! let puzzle = Board::from_string(
//!     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
//! );
//! let solver = Solver::new();
//! assert!(solver.is_unique(&puzzle).unwrap());
//!
//! let report = evaluate_puzzle_difficulty(&puzzle, None);
//! assert!(report.solvable);
//! ```

pub mod bitset;
pub mod board;
pub mod error;
pub mod generator;
pub mod hint;
pub mod score;
pub mod solver;
pub mod topology;

pub use bitset::DigitSet;
pub use board::{Board, Candidates, Conflict, Position};
pub use error::Error;
pub use generator::{GeneratedPuzzle, Generator, GeneratorOptions, MIN_CLUES};
pub use hint::{
    difficulty_to_category, technique_difficulty, Category, ColoringRule, Elimination, Hint,
    HintEngine, SolveOutcome, SolveResult, Technique, TraceStep, DEFAULT_STEP_CAP,
};
pub use score::{evaluate_puzzle_difficulty, score_trace, DifficultyReport, TechniqueCount};
pub use solver::{DigitPolicy, SolveOptions, Solver, SquarePolicy, Values};
pub use topology::{unit_kind, ChuteKind, UnitKind, UnitRef};
