//! Minimax search with alpha-beta pruning
//!
//! This module implements the full-width search used by the Pro tier.
//! The AI is the maximizing side, its opponent the minimizing side.
//!
//! # Features
//!
//! - Terminal scores biased by distance: quick wins, slow losses
//! - Depth from tier, level, match score and board size ([`DepthPolicy`])
//! - Parallel root: candidates split across scoped threads, merged in
//!   enumeration order so the result matches the sequential search
//! - Optional time limit with iterative deepening
//!
//! # Example
//!
//! ```
//! use connect_n::board::{Board, Player};
//! use connect_n::level::{Difficulty, Level, MatchScore};
//! use connect_n::search::Searcher;
//!
//! let searcher = Searcher::new();
//! let board = Board::new(4).unwrap();
//! let level = Level::new(1, 4, 3, 0, Difficulty::Hard);
//!
//! let result = searcher.find_best_move(&board, Player::O, &level, &MatchScore::new());
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{Board, Player, Pos};
use crate::eval::{evaluate_with, EvalWeights};
use crate::level::{Level, MatchScore};
use crate::rules::{check_draw, check_win, valid_moves};

use super::DepthPolicy;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Upper bound on worker threads at the root
const MAX_THREADS: usize = 8;

/// Nodes between clock reads when a time limit is set
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Search resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Root worker threads; 0 picks the available parallelism (capped at 8)
    pub threads: usize,
    /// Wall-clock budget per decision. When set, the search deepens one ply
    /// at a time and keeps the deepest completed iteration.
    pub time_limit_ms: Option<u64>,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Minimax value of the best move
    pub score: i32,
    /// Depth of the completed search
    pub depth: u32,
    /// Total nodes visited
    pub nodes: u64,
}

impl SearchResult {
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }
}

/// Shared stop signal for a timed search.
#[derive(Clone, Copy)]
struct Deadline<'a> {
    at: Instant,
    stopped: &'a AtomicBool,
}

/// Per-thread search state. Each root worker owns one.
struct Worker<'a> {
    weights: &'a EvalWeights,
    ai: Player,
    win_condition: usize,
    /// Depth the current root search started from
    base_depth: u32,
    nodes: u64,
    deadline: Option<Deadline<'a>>,
}

impl<'a> Worker<'a> {
    fn new(
        weights: &'a EvalWeights,
        ai: Player,
        win_condition: usize,
        base_depth: u32,
        deadline: Option<Deadline<'a>>,
    ) -> Self {
        Self {
            weights,
            ai,
            win_condition,
            base_depth,
            nodes: 0,
            deadline,
        }
    }

    /// Check the stop flag, reading the clock every few nodes.
    #[inline]
    fn is_stopped(&self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if deadline.stopped.load(Ordering::Relaxed) {
            return true;
        }
        if self.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline.at {
            deadline.stopped.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        if self.is_stopped() {
            // Interrupted iterations are discarded by the caller
            return 0;
        }

        if let Some(win) = check_win(board, self.win_condition) {
            let plies = self.base_depth.saturating_sub(depth) as i32;
            return if win.winner == self.ai {
                self.weights.win - plies
            } else {
                -self.weights.win + plies
            };
        }
        if depth == 0 || check_draw(board) {
            return evaluate_with(board, self.ai, self.win_condition, self.weights);
        }

        let moves = valid_moves(board);
        if maximizing {
            let mut best = -INF;
            for mv in moves {
                let child = board.with_move(mv, self.ai);
                let score = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let human = self.ai.opponent();
            let mut best = INF;
            for mv in moves {
                let child = board.with_move(mv, human);
                let score = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Value of playing `mv` at the root: the AI's move is applied, then the
    /// opponent replies with the full depth still available.
    fn root_value(&mut self, board: &Board, mv: Pos) -> i32 {
        let child = board.with_move(mv, self.ai);
        self.minimax(&child, self.base_depth, -INF, INF, false)
    }
}

/// Minimax searcher.
///
/// Holds only configuration; every call works on its own board copies, so
/// one searcher can serve concurrent decisions on different boards.
#[derive(Debug, Clone)]
pub struct Searcher {
    weights: EvalWeights,
    depth_policy: DepthPolicy,
    threads: usize,
    time_limit: Option<Duration>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Searcher with default weights and depth policy, no time limit, and
    /// one root thread per available core (at most 8).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(
            EvalWeights::default(),
            DepthPolicy::default(),
            SearchConfig::default(),
        )
    }

    #[must_use]
    pub fn with_config(weights: EvalWeights, depth_policy: DepthPolicy, search: SearchConfig) -> Self {
        let threads = match search.threads {
            0 => thread::available_parallelism()
                .map(|n| n.get().min(MAX_THREADS))
                .unwrap_or(4),
            n => n,
        };
        Self {
            weights,
            depth_policy,
            threads,
            time_limit: search.time_limit_ms.map(Duration::from_millis),
        }
    }

    /// Override the root thread count (1 = sequential)
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Override the time limit
    #[must_use]
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    #[must_use]
    pub fn depth_policy(&self) -> &DepthPolicy {
        &self.depth_policy
    }

    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Minimax value of `board` searched `depth` plies deep.
    ///
    /// `depth` is also the base for distance-biased terminal scores: a win
    /// found `n` plies below this call scores `WIN - n`.
    #[must_use]
    pub fn minimax(
        &self,
        board: &Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        ai: Player,
        win_condition: usize,
    ) -> i32 {
        let mut worker = Worker::new(&self.weights, ai, win_condition, depth, None);
        worker.minimax(board, depth, alpha, beta, maximizing)
    }

    /// Best move for `ai` at the depth the policy gives for this level and
    /// match score.
    #[must_use]
    pub fn find_best_move(
        &self,
        board: &Board,
        ai: Player,
        level: &Level,
        score: &MatchScore,
    ) -> SearchResult {
        let depth = self.depth_policy.depth_for(level, score, ai);
        self.search(board, ai, level.win_condition, depth)
    }

    /// Best move for `ai` at an explicit depth.
    ///
    /// Every empty cell is tried in row-major order; the first candidate with
    /// the strictly highest value wins.
    #[must_use]
    pub fn search(&self, board: &Board, ai: Player, win_condition: usize, depth: u32) -> SearchResult {
        let result = match self.time_limit {
            None => self.search_root(board, ai, win_condition, depth, None),
            Some(limit) => Some(self.search_iterative(board, ai, win_condition, depth, limit)),
        };
        // Only a timed iteration can be interrupted, and search_iterative
        // always returns its last completed one.
        let result = result.unwrap_or_else(SearchResult::no_move);
        debug!(
            depth = result.depth,
            nodes = result.nodes,
            score = result.score,
            best = ?result.best_move,
            "search finished"
        );
        result
    }

    /// Iterative deepening up to `max_depth` within `limit`.
    ///
    /// Depth 1 always completes; deeper iterations are dropped if the clock
    /// runs out before they finish.
    fn search_iterative(
        &self,
        board: &Board,
        ai: Player,
        win_condition: usize,
        max_depth: u32,
        limit: Duration,
    ) -> SearchResult {
        let stopped = AtomicBool::new(false);
        let deadline = Deadline {
            at: Instant::now() + limit,
            stopped: &stopped,
        };

        let first_depth = max_depth.min(1);
        let mut best = self
            .search_root(board, ai, win_condition, first_depth, None)
            .unwrap_or_else(SearchResult::no_move);
        let mut nodes = best.nodes;

        for depth in (first_depth + 1)..=max_depth {
            match self.search_root(board, ai, win_condition, depth, Some(deadline)) {
                Some(result) => {
                    nodes += result.nodes;
                    best = result;
                }
                None => {
                    debug!(depth, "time limit reached, keeping depth {}", best.depth);
                    break;
                }
            }
        }

        best.nodes = nodes;
        best
    }

    /// One fixed-depth root search. Returns `None` if the deadline stopped it.
    fn search_root(
        &self,
        board: &Board,
        ai: Player,
        win_condition: usize,
        depth: u32,
        deadline: Option<Deadline<'_>>,
    ) -> Option<SearchResult> {
        let moves = valid_moves(board);
        if moves.is_empty() {
            return Some(SearchResult::no_move());
        }

        let threads = self.threads.clamp(1, moves.len());
        let (values, nodes) = if threads == 1 {
            let mut worker = Worker::new(&self.weights, ai, win_condition, depth, deadline);
            let values: Vec<i32> = moves.iter().map(|&mv| worker.root_value(board, mv)).collect();
            (values, worker.nodes)
        } else {
            self.parallel_root_values(board, &moves, ai, win_condition, depth, deadline, threads)
        };

        if deadline.is_some_and(|d| d.stopped.load(Ordering::Relaxed)) {
            return None;
        }

        // Merge in enumeration order: earliest strictly-best candidate wins
        let mut best_move = None;
        let mut best_score = i32::MIN;
        for (&mv, &value) in moves.iter().zip(&values) {
            trace!(row = mv.row, col = mv.col, value, "root candidate");
            if value > best_score {
                best_score = value;
                best_move = Some(mv);
            }
        }

        Some(SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes,
        })
    }

    /// Root values computed on scoped threads, one contiguous chunk of
    /// candidates per thread. Values come back in candidate order.
    #[allow(clippy::too_many_arguments)]
    fn parallel_root_values(
        &self,
        board: &Board,
        moves: &[Pos],
        ai: Player,
        win_condition: usize,
        depth: u32,
        deadline: Option<Deadline<'_>>,
        threads: usize,
    ) -> (Vec<i32>, u64) {
        let chunk = moves.len().div_ceil(threads);
        let weights = &self.weights;

        thread::scope(|scope| {
            let handles: Vec<_> = moves
                .chunks(chunk)
                .map(|part| {
                    scope.spawn(move || {
                        let mut worker = Worker::new(weights, ai, win_condition, depth, deadline);
                        let values: Vec<i32> =
                            part.iter().map(|&mv| worker.root_value(board, mv)).collect();
                        (values, worker.nodes)
                    })
                })
                .collect();

            let mut values = Vec::with_capacity(moves.len());
            let mut nodes = 0;
            for handle in handles {
                let (part_values, part_nodes) = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                values.extend(part_values);
                nodes += part_nodes;
            }
            (values, nodes)
        })
    }
}
