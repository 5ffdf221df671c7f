//! Backtracking search over the propagated candidate state.

pub mod propagate;

pub use propagate::Values;

use crate::board::Board;
use crate::error::Error;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Which open square to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SquarePolicy {
    /// Fewest remaining candidates, ties broken by lowest square index.
    #[default]
    MinCandidates,
    /// Most remaining candidates, ties broken by lowest square index.
    MaxCandidates,
    Random,
}

/// The order in which the chosen square's digits are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DigitPolicy {
    #[default]
    Ascending,
    Descending,
    Random,
}

/// Search policy for one `solve` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOptions {
    pub square_policy: SquarePolicy,
    pub digit_policy: DigitPolicy,
    /// Seed for the randomized policies; `None` draws fresh entropy.
    pub seed: Option<u64>,
    /// Search node cap; exhausting it is branch failure.
    pub node_limit: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            square_policy: SquarePolicy::MinCandidates,
            digit_policy: DigitPolicy::Ascending,
            seed: None,
            node_limit: 5_000_000,
        }
    }
}

impl SolveOptions {
    pub fn with_digit_policy(digit_policy: DigitPolicy) -> Self {
        SolveOptions {
            digit_policy,
            ..Default::default()
        }
    }
}

/// Unit struct solver; all state is per-call.
#[derive(Debug, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Solver
    }

    /// Propagate a board's clues into solver state. `None` on contradiction.
    pub fn parse_grid(&self, board: &Board) -> Option<Values> {
        Values::from_board(board)
    }

    /// Solve with the default deterministic policy.
    pub fn solve(&self, board: &Board) -> Option<Board> {
        self.solve_with(board, &SolveOptions::default())
    }

    /// Solve under an explicit search policy.
    pub fn solve_with(&self, board: &Board, opts: &SolveOptions) -> Option<Board> {
        let values = Values::from_board(board)?;
        let mut rng = match opts.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut budget = opts.node_limit;
        search(values, opts, &mut rng, &mut budget).and_then(|v| v.solved_board())
    }

    /// Exactly one solution?
    ///
    /// Two searches with opposite digit orders reach the lexicographically
    /// first and last solutions; any second solution splits them.
    pub fn is_unique(&self, board: &Board) -> Result<bool, Error> {
        if Values::from_board(board).is_none() {
            return Err(Error::UniquenessIndeterminate);
        }
        let first = self.solve_with(board, &SolveOptions::with_digit_policy(DigitPolicy::Ascending));
        let last = self.solve_with(board, &SolveOptions::with_digit_policy(DigitPolicy::Descending));
        match (first, last) {
            (Some(a), Some(b)) => Ok(a == b),
            _ => Ok(false),
        }
    }

    /// A uniformly scrambled complete grid, the generator's seed material.
    pub fn sample_full_grid(&self, rng: &mut SmallRng) -> Board {
        let opts = SolveOptions {
            digit_policy: DigitPolicy::Random,
            ..Default::default()
        };
        let mut budget = opts.node_limit;
        // The empty board always propagates and always has solutions.
        let values = Values::from_board(&Board::empty()).expect("empty board propagates");
        let solved = search(values, &opts, rng, &mut budget).expect("empty board is solvable");
        solved.to_board()
    }

    /// After clearing `square` (which held `removed`), is there a completion
    /// that places a *different* digit there? If so, the removal broke
    /// uniqueness.
    pub fn admits_other_digit(&self, board: &Board, square: usize, removed: u8) -> bool {
        debug_assert!(board.value(square).is_none());
        let mut values = match Values::from_board(board) {
            Some(v) => v,
            None => return false,
        };
        if !values.eliminate(square, removed) {
            return false;
        }
        let opts = SolveOptions::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut budget = opts.node_limit;
        search(values, &opts, &mut rng, &mut budget).is_some()
    }
}

fn search(
    values: Values,
    opts: &SolveOptions,
    rng: &mut SmallRng,
    budget: &mut u64,
) -> Option<Values> {
    if *budget == 0 {
        return None;
    }
    *budget -= 1;

    if values.is_solved() {
        return Some(values);
    }

    let square = choose_square(&values, opts.square_policy, rng)?;
    let mut digits: Vec<u8> = values.get(square).iter().collect();
    match opts.digit_policy {
        DigitPolicy::Ascending => {}
        DigitPolicy::Descending => digits.reverse(),
        DigitPolicy::Random => digits.shuffle(rng),
    }

    for digit in digits {
        let mut branch = values;
        if branch.assign(square, digit) {
            if let Some(solved) = search(branch, opts, rng, budget) {
                return Some(solved);
            }
        }
    }
    None
}

fn choose_square(values: &Values, policy: SquarePolicy, rng: &mut SmallRng) -> Option<usize> {
    match policy {
        SquarePolicy::MinCandidates => values
            .open_squares()
            .min_by_key(|&sq| (values.get(sq).len(), sq)),
        SquarePolicy::MaxCandidates => values
            .open_squares()
            .max_by_key(|&sq| (values.get(sq).len(), std::cmp::Reverse(sq))),
        SquarePolicy::Random => {
            let open: Vec<usize> = values.open_squares().collect();
            open.choose(rng).copied()
        }
    }
}
