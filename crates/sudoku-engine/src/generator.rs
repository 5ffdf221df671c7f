//! Puzzle generation: uniqueness-preserving clue removal, then a multi-start
//! annealing walk over the difficulty landscape.

use crate::board::Board;
use crate::hint::Category;
use crate::score::{evaluate_puzzle_difficulty, UNSOLVABLE_BY_LOGIC};
use crate::solver::Solver;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Classic lower bound on clues for a unique puzzle.
pub const MIN_CLUES: usize = 17;

const INITIAL_TEMPERATURE: f32 = 10.0;
const COOLING_RATE: f32 = 0.995;
/// Difficulty evaluations granted to one annealing round.
const ROUND_EVALS: usize = 150;
/// Candidate moves sampled per annealing step.
const MOVE_SAMPLE: usize = 6;
/// Extra headroom a "safe climb" may overshoot the band by.
const CLIMB_BUFFER: f32 = 6.0;
/// Fast-path rounds for the easy categories.
const FAST_ROUNDS: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub target_difficulty: f32,
    pub tolerance: f32,
    pub max_attempts: usize,
    pub min_clues: usize,
    pub max_clues: usize,
    /// Restrict acceptance to these bands; `None` is unrestricted.
    pub allowed_categories: Option<Vec<Category>>,
    /// Seed the first annealing round from this puzzle instead of a fresh
    /// minimal one.
    pub start_puzzle: Option<Board>,
    /// Reseed the generator's random stream for a reproducible run.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            target_difficulty: 50.0,
            tolerance: 3.0,
            max_attempts: 5000,
            min_clues: MIN_CLUES,
            max_clues: 81,
            allowed_categories: None,
            start_puzzle: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub puzzle: Board,
    /// The attained difficulty, which may sit outside the requested band
    /// when the attempt budget ran out.
    pub difficulty: u8,
    pub category: Category,
    /// Difficulty evaluations spent.
    pub attempts: usize,
    pub clues: usize,
}

/// The last move taken, for the uniform tabu check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Add(usize),
    Remove(usize),
    Swap(usize, usize),
}

impl Move {
    fn inverts(self, last: Option<Move>) -> bool {
        let Some(last) = last else { return false };
        matches!(
            (self, last),
            (Move::Add(a), Move::Remove(b)) if a == b
        ) || matches!(
            (self, last),
            (Move::Remove(a), Move::Add(b)) if a == b
        ) || matches!(
            (self, last),
            (Move::Swap(a, b), Move::Swap(c, d)) if a == d && b == c
        )
    }
}

pub struct Generator {
    rng: SmallRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Generator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sample a full grid and strip clues in random order, restoring any
    /// removal that breaks uniqueness. Stops at `n` clues (floored at 17)
    /// or when nothing more can go.
    pub fn generate_with_clues(&mut self, n: usize) -> Board {
        let solver = Solver::new();
        let solution = solver.sample_full_grid(&mut self.rng);
        self.strip_clues(&solver, solution, n.max(MIN_CLUES))
    }

    fn strip_clues(&mut self, solver: &Solver, solution: Board, target: usize) -> Board {
        let mut puzzle = solution;
        let mut order: Vec<usize> = (0..81).collect();
        order.shuffle(&mut self.rng);
        let mut filled = 81;
        for sq in order {
            if filled <= target {
                break;
            }
            let removed = match puzzle.value(sq) {
                Some(d) => d,
                None => continue,
            };
            puzzle.set_value(sq, None);
            if solver.admits_other_digit(&puzzle, sq, removed) {
                puzzle.set_value(sq, Some(removed));
            } else {
                filled -= 1;
            }
        }
        puzzle
    }

    /// Search for a puzzle whose trace difficulty lands within
    /// `target ± tolerance`, returning the best approximation found when
    /// the attempt budget runs out. Never fails.
    pub fn generate_with_difficulty(&mut self, opts: &GeneratorOptions) -> GeneratedPuzzle {
        if let Some(seed) = opts.seed {
            self.rng = SmallRng::seed_from_u64(seed);
        }
        self.anneal(opts, 0)
    }

    /// Generate for a named category using its preset band. The easy
    /// categories first try plain clue removal filtered by the scorer.
    pub fn generate_by_category(&mut self, category: Category, opts: &GeneratorOptions) -> GeneratedPuzzle {
        let mut opts = opts.clone();
        if let Some((target, tolerance)) = category.target_band() {
            opts.target_difficulty = target;
            opts.tolerance = tolerance;
        }
        if let Some(seed) = opts.seed.take() {
            self.rng = SmallRng::seed_from_u64(seed);
        }

        let mut attempts = 0;
        if let Some(clue_range) = fast_path_clues(category) {
            let mut best: Option<GeneratedPuzzle> = None;
            for _ in 0..FAST_ROUNDS {
                if attempts >= opts.max_attempts {
                    break;
                }
                let clues = self.rng.gen_range(clue_range.clone());
                let puzzle = self.generate_with_clues(clues);
                let report = evaluate_puzzle_difficulty(&puzzle, None);
                attempts += 1;
                let candidate = GeneratedPuzzle {
                    puzzle,
                    difficulty: report.difficulty,
                    category: report.category,
                    attempts,
                    clues: puzzle.filled_count(),
                };
                if self.accepted(&candidate, &opts) {
                    return candidate;
                }
                let closer = |c: &GeneratedPuzzle| cost(c.difficulty, opts.target_difficulty);
                if best.as_ref().map_or(true, |b| closer(&candidate) < closer(b)) {
                    best = Some(candidate);
                }
            }
            // The annealer can still land the band; keep the fast-path best
            // as fallback in case it cannot.
            let annealed = self.anneal(&opts, attempts);
            if self.accepted(&annealed, &opts) {
                return annealed;
            }
            if let Some(best) = best {
                if cost(best.difficulty, opts.target_difficulty)
                    < cost(annealed.difficulty, opts.target_difficulty)
                {
                    return best;
                }
            }
            return annealed;
        }

        self.anneal(&opts, attempts)
    }

    fn accepted(&self, candidate: &GeneratedPuzzle, opts: &GeneratorOptions) -> bool {
        cost(candidate.difficulty, opts.target_difficulty) <= opts.tolerance
            && candidate.clues >= opts.min_clues
            && candidate.clues <= opts.max_clues
            && opts
                .allowed_categories
                .as_ref()
                .map_or(true, |cats| cats.contains(&candidate.category))
    }

    fn anneal(&mut self, opts: &GeneratorOptions, mut attempts: usize) -> GeneratedPuzzle {
        let solver = Solver::new();
        let mut best: Option<(Board, u8)> = None;
        let mut first_round = true;
        // A zero budget still owes the caller one evaluated candidate.
        let max_attempts = opts.max_attempts.max(attempts + 1);

        while attempts < max_attempts {
            let round_end = (attempts + ROUND_EVALS).min(max_attempts);

            // Fresh start per round; the caller's start puzzle seeds round one.
            let (mut current, solution) = match (first_round, &opts.start_puzzle) {
                (true, Some(start)) => match solver.solve(start) {
                    Some(solution) => (*start, solution),
                    None => self.fresh_start(&solver, opts),
                },
                _ => self.fresh_start(&solver, opts),
            };
            first_round = false;

            let mut current_diff = self.evaluate(&current, &mut attempts);
            let mut temperature = INITIAL_TEMPERATURE;
            let mut last_move: Option<Move> = None;

            while attempts < round_end {
                track_best(&mut best, &current, current_diff, opts);
                let candidate = GeneratedPuzzle {
                    puzzle: current,
                    difficulty: current_diff,
                    category: Category::from_difficulty(current_diff),
                    attempts,
                    clues: current.filled_count(),
                };
                if self.accepted(&candidate, opts) {
                    return candidate;
                }

                let cost_old = cost(current_diff, opts.target_difficulty);
                let too_hard = current_diff as f32 > opts.target_difficulty;
                let moves = if too_hard {
                    self.sample_adds(&current, &solution, last_move, opts)
                } else {
                    self.sample_removes_and_swaps(&solver, &current, &solution, last_move, opts)
                };
                if moves.is_empty() {
                    break; // local dead end, restart the round
                }

                // Score the sampled moves and keep the cheapest safe climb,
                // falling back to the overall cheapest (dark-zone included).
                let mut scored: Vec<(Move, Board, u8)> = Vec::new();
                for (mv, board) in moves {
                    if attempts >= round_end {
                        break;
                    }
                    let diff = self.evaluate(&board, &mut attempts);
                    scored.push((mv, board, diff));
                }
                if scored.is_empty() {
                    break;
                }
                let safe_bound = opts.target_difficulty + opts.tolerance + CLIMB_BUFFER;
                let pick = scored
                    .iter()
                    .filter(|(_, _, d)| *d != UNSOLVABLE_BY_LOGIC && (*d as f32) <= safe_bound)
                    .min_by(|a, b| {
                        cost(a.2, opts.target_difficulty)
                            .total_cmp(&cost(b.2, opts.target_difficulty))
                    })
                    .or_else(|| {
                        scored.iter().min_by(|a, b| {
                            cost(a.2, opts.target_difficulty)
                                .total_cmp(&cost(b.2, opts.target_difficulty))
                        })
                    })
                    .cloned();
                let Some((mv, board, diff)) = pick else { break };

                let cost_new = cost(diff, opts.target_difficulty);
                let accept = cost_new < cost_old || {
                    let p = ((cost_old - cost_new) / temperature).exp();
                    self.rng.gen::<f32>() < p
                };
                if accept {
                    current = board;
                    current_diff = diff;
                    last_move = Some(mv);
                }
                temperature *= COOLING_RATE;
            }

            track_best(&mut best, &current, current_diff, opts);
        }

        let (puzzle, difficulty) = best.expect("at least one round evaluates");
        GeneratedPuzzle {
            puzzle,
            difficulty,
            category: Category::from_difficulty(difficulty),
            attempts,
            clues: puzzle.filled_count(),
        }
    }

    fn fresh_start(&mut self, solver: &Solver, opts: &GeneratorOptions) -> (Board, Board) {
        let solution = solver.sample_full_grid(&mut self.rng);
        let clues = self.rng.gen_range(22..=30).max(opts.min_clues);
        let puzzle = self.strip_clues(solver, solution, clues);
        (puzzle, solution)
    }

    fn evaluate(&mut self, board: &Board, attempts: &mut usize) -> u8 {
        *attempts += 1;
        evaluate_puzzle_difficulty(board, None).difficulty
    }

    /// Candidate clue additions (score usually drops).
    fn sample_adds(
        &mut self,
        current: &Board,
        solution: &Board,
        last_move: Option<Move>,
        opts: &GeneratorOptions,
    ) -> Vec<(Move, Board)> {
        if current.filled_count() >= opts.max_clues {
            return Vec::new();
        }
        let mut holes: Vec<usize> = current.empty_squares().collect();
        holes.shuffle(&mut self.rng);
        let mut out = Vec::new();
        for sq in holes {
            if out.len() >= MOVE_SAMPLE {
                break;
            }
            let mv = Move::Add(sq);
            if mv.inverts(last_move) {
                continue;
            }
            let mut next = *current;
            next.set_value(sq, solution.value(sq));
            out.push((mv, next));
        }
        out
    }

    /// Candidate removals and swaps that keep the solution unique.
    fn sample_removes_and_swaps(
        &mut self,
        solver: &Solver,
        current: &Board,
        solution: &Board,
        last_move: Option<Move>,
        opts: &GeneratorOptions,
    ) -> Vec<(Move, Board)> {
        let mut filled: Vec<usize> = (0..81).filter(|&sq| current.value(sq).is_some()).collect();
        filled.shuffle(&mut self.rng);
        let mut out = Vec::new();

        if current.filled_count() > opts.min_clues {
            for &sq in &filled {
                if out.len() >= MOVE_SAMPLE - 2 {
                    break;
                }
                let mv = Move::Remove(sq);
                if mv.inverts(last_move) {
                    continue;
                }
                let removed = current.value(sq).expect("filled square");
                let mut next = *current;
                next.set_value(sq, None);
                if !solver.admits_other_digit(&next, sq, removed) {
                    out.push((mv, next));
                }
            }
        }

        // Swaps reshape the puzzle at a fixed clue count.
        let holes: Vec<usize> = current.empty_squares().collect();
        for _ in 0..2 {
            let (Some(&add_sq), Some(&rem_sq)) =
                (holes.choose(&mut self.rng), filled.choose(&mut self.rng))
            else {
                break;
            };
            let mv = Move::Swap(add_sq, rem_sq);
            if mv.inverts(last_move) {
                continue;
            }
            let mut next = *current;
            next.set_value(add_sq, solution.value(add_sq));
            let removed = match next.value(rem_sq) {
                Some(d) => d,
                None => continue,
            };
            next.set_value(rem_sq, None);
            if !solver.admits_other_digit(&next, rem_sq, removed) {
                out.push((mv, next));
            }
        }
        out
    }
}

fn cost(difficulty: u8, target: f32) -> f32 {
    (difficulty as f32 - target).abs()
}

fn track_best(best: &mut Option<(Board, u8)>, board: &Board, difficulty: u8, opts: &GeneratorOptions) {
    let closer = best
        .as_ref()
        .map_or(true, |(_, d)| cost(difficulty, opts.target_difficulty) < cost(*d, opts.target_difficulty));
    if closer {
        *best = Some((*board, difficulty));
    }
}

/// Typical clue counts per easy category, for the removal-only fast path.
fn fast_path_clues(category: Category) -> Option<std::ops::RangeInclusive<usize>> {
    match category {
        Category::Trivial => Some(38..=46),
        Category::Basic => Some(28..=36),
        Category::Intermediate => Some(23..=28),
        _ => None,
    }
}
