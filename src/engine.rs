//! Move selection for the computer player and move hints for the human
//!
//! Every decision follows the same priority:
//!
//! 1. **Immediate win**: a move that completes a line right now
//! 2. **Block**: the cell the opponent would win on next turn
//! 3. **Tier play**: random (Simple), one-ply heuristic (Hard) or full
//!    minimax search (Pro)
//!
//! The advisor uses steps 1 and 2 for the human and falls back to a random
//! move; it never searches.
//!
//! # Example
//!
//! ```
//! use connect_n::board::{Board, Player};
//! use connect_n::engine::AIEngine;
//! use connect_n::level::{Difficulty, Level, MatchScore};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let engine = AIEngine::new();
//! let level = Level::new(1, 5, 3, 0, Difficulty::Hard);
//! let board = Board::new(level.board_size).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let result = engine.computer_move_with_stats(&board, Player::O, &level, &MatchScore::new(), &mut rng);
//! println!("Best move: {:?}", result.best_move);
//! println!("Selection: {:?}", result.kind);
//! ```

use std::time::Instant;

use tracing::{debug, instrument};

use crate::board::{Board, Player, Pos};
use crate::config::EngineConfig;
use crate::eval::evaluate_with;
use crate::level::{Difficulty, Level, MatchScore};
use crate::rng::{self, RandomSource};
use crate::rules::{check_win, valid_moves};
use crate::search::{SearchResult, Searcher};

/// Which step of the decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The move completes a line for the mover
    ImmediateWin,
    /// The move takes the cell the opponent would win on
    Block,
    /// Uniform choice among the empty cells
    Random,
    /// Best one-ply evaluation
    Heuristic,
    /// Minimax search result
    Search,
    /// The board has no empty cell
    NoMove,
}

/// Result of a move decision with search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen move, `None` when the board is full
    pub best_move: Option<Pos>,
    pub kind: Selection,
    /// Evaluation of the chosen move from the mover's side
    pub score: i32,
    /// Search depth; 0 unless the move came from a search
    pub depth: u32,
    /// Positions examined
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn new(best_move: Option<Pos>, kind: Selection, score: i32, nodes: u64, start: Instant) -> Self {
        Self {
            best_move,
            kind,
            score,
            depth: 0,
            nodes,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            kind: Selection::Search,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Computer player.
///
/// Holds the configuration and the searcher; it keeps no state between
/// decisions, so one engine can serve any number of games.
#[derive(Debug, Clone)]
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AIEngine {
    /// Engine with the tuned default weights and depth policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let searcher = Searcher::with_config(config.weights, config.depth, config.search);
        Self { config, searcher }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Move for `ai`, or `None` if the board has no empty cell.
    ///
    /// There is no separate human-player argument: with two players the
    /// opponent is always `ai.opponent()`.
    ///
    /// Use [`computer_move_with_stats`](Self::computer_move_with_stats) for
    /// the selection kind and search statistics.
    #[must_use]
    pub fn computer_move<R: RandomSource + ?Sized>(
        &self,
        board: &Board,
        ai: Player,
        level: &Level,
        score: &MatchScore,
        rng: &mut R,
    ) -> Option<Pos> {
        self.computer_move_with_stats(board, ai, level, score, rng)
            .best_move
    }

    /// Move for `ai` with the step that chose it.
    ///
    /// The win and block checks run for every tier. Only Simple consumes
    /// randomness. The opponent is `ai.opponent()`.
    #[must_use]
    #[instrument(skip(self, board, level, score, rng), fields(difficulty = %level.difficulty, level = level.level))]
    pub fn computer_move_with_stats<R: RandomSource + ?Sized>(
        &self,
        board: &Board,
        ai: Player,
        level: &Level,
        score: &MatchScore,
        rng: &mut R,
    ) -> MoveResult {
        let start = Instant::now();
        let k = level.win_condition;
        let weights = &self.config.weights;

        let moves = valid_moves(board);
        if moves.is_empty() {
            debug!("no move available");
            return MoveResult::new(None, Selection::NoMove, 0, 0, start);
        }

        if let Some(pos) = find_winning_move(board, ai, k) {
            debug!(%pos, "immediate win");
            return MoveResult::new(Some(pos), Selection::ImmediateWin, weights.win, 1, start);
        }

        if let Some(pos) = find_winning_move(board, ai.opponent(), k) {
            let value = evaluate_with(&board.with_move(pos, ai), ai, k, weights);
            debug!(%pos, "blocking opponent win");
            return MoveResult::new(Some(pos), Selection::Block, value, 1, start);
        }

        let result = match level.difficulty {
            Difficulty::Simple => {
                let pos = rng::choose(&moves, rng);
                MoveResult::new(pos, Selection::Random, 0, 0, start)
            }
            Difficulty::Hard => {
                let (pos, value) = self.best_one_ply(board, &moves, ai, k);
                MoveResult::new(pos, Selection::Heuristic, value, moves.len() as u64, start)
            }
            Difficulty::Pro => {
                let result = self.searcher.find_best_move(board, ai, level, score);
                MoveResult::from_search(result, start)
            }
        };

        debug!(
            kind = ?result.kind,
            best = ?result.best_move,
            depth = result.depth,
            nodes = result.nodes,
            score = result.score,
            "computer move"
        );
        result
    }

    /// Move whose resulting position evaluates highest for `ai`. The first
    /// strictly best candidate in row-major order wins.
    fn best_one_ply(&self, board: &Board, moves: &[Pos], ai: Player, k: usize) -> (Option<Pos>, i32) {
        let mut best_move = None;
        let mut best_score = i32::MIN;
        for &mv in moves {
            let value = evaluate_with(&board.with_move(mv, ai), ai, k, &self.config.weights);
            if value > best_score {
                best_score = value;
                best_move = Some(mv);
            }
        }
        (best_move, best_score)
    }
}

/// First empty cell (row-major) where `player` would complete a line of
/// `win_condition`.
#[must_use]
pub fn find_winning_move(board: &Board, player: Player, win_condition: usize) -> Option<Pos> {
    valid_moves(board).into_iter().find(|&pos| {
        check_win(&board.with_move(pos, player), win_condition)
            .is_some_and(|win| win.winner == player)
    })
}

/// Hint for the human player: win if possible, otherwise block, otherwise a
/// random empty cell. `None` only when the board is full.
///
/// The computer player is `human.opponent()`, so it is not passed in.
#[must_use]
#[instrument(skip(board, rng))]
pub fn suggest_move<R: RandomSource + ?Sized>(
    board: &Board,
    human: Player,
    win_condition: usize,
    rng: &mut R,
) -> Option<Pos> {
    if let Some(pos) = find_winning_move(board, human, win_condition) {
        debug!(%pos, "suggesting win");
        return Some(pos);
    }
    if let Some(pos) = find_winning_move(board, human.opponent(), win_condition) {
        debug!(%pos, "suggesting block");
        return Some(pos);
    }
    let pos = rng::choose(&valid_moves(board), rng);
    debug!(?pos, "suggesting random move");
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    fn level(difficulty: Difficulty, size: usize, k: usize) -> Level {
        Level::new(1, size, k, 0, difficulty)
    }

    fn engine() -> AIEngine {
        AIEngine::with_config(EngineConfig {
            search: SearchConfig {
                threads: 1,
                time_limit_ms: None,
            },
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_engine_default() {
        let engine = AIEngine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_find_winning_move() {
        let b = board(
            "
            X X . .
            . . . .
            O . . .
            O . . .
            ",
        );
        assert_eq!(find_winning_move(&b, Player::X, 3), Some(Pos::new(0, 2)));
        assert_eq!(find_winning_move(&b, Player::O, 3), Some(Pos::new(1, 0)));
        assert_eq!(find_winning_move(&b, Player::X, 4), None);
    }

    #[test]
    fn test_winning_move_ignores_diagonal_below_five() {
        let b = board(
            "
            X . . . .
            . X . . .
            . . X . .
            . . . . .
            . . . . .
            ",
        );
        assert_eq!(find_winning_move(&b, Player::X, 4), None);
    }

    #[test]
    fn test_win_now_at_every_tier() {
        // O has two in a row with an open third cell; X also threatens
        let b = board(
            "
            O O . . .
            . . . . .
            . . . . .
            . . . . .
            X X . . .
            ",
        );
        let engine = engine();
        for difficulty in Difficulty::ALL {
            let mut rng = StdRng::seed_from_u64(1);
            let result = engine.computer_move_with_stats(
                &b,
                Player::O,
                &level(difficulty, 5, 3),
                &MatchScore::new(),
                &mut rng,
            );
            assert_eq!(result.best_move, Some(Pos::new(0, 2)), "{difficulty}");
            assert_eq!(result.kind, Selection::ImmediateWin, "{difficulty}");
        }
    }

    #[test]
    fn test_block_at_every_tier() {
        let b = board(
            "
            X X . . .
            . . . . .
            . . . . .
            . . . . .
            . . . . O
            ",
        );
        let engine = engine();
        for difficulty in Difficulty::ALL {
            let mut rng = StdRng::seed_from_u64(2);
            let result = engine.computer_move_with_stats(
                &b,
                Player::O,
                &level(difficulty, 5, 3),
                &MatchScore::new(),
                &mut rng,
            );
            assert_eq!(result.best_move, Some(Pos::new(0, 2)), "{difficulty}");
            assert_eq!(result.kind, Selection::Block, "{difficulty}");
        }
    }

    #[test]
    fn test_block_beats_own_setup() {
        // O could build an open two in the middle, but X completes the column
        // at (0,0) or (3,0)
        let b = board(
            "
            . . . . .
            X . . . .
            X . O . .
            . . . . .
            . . . . .
            ",
        );
        let engine = engine();
        for difficulty in [Difficulty::Hard, Difficulty::Pro] {
            let mut rng = StdRng::seed_from_u64(3);
            let mv = engine.computer_move(
                &b,
                Player::O,
                &level(difficulty, 5, 3),
                &MatchScore::new(),
                &mut rng,
            );
            // (0,0) completes the column too; the first in row-major order is blocked
            assert_eq!(mv, Some(Pos::new(0, 0)), "{difficulty}");
        }
    }

    #[test]
    fn test_simple_picks_a_valid_cell() {
        let b = Board::new(5).unwrap();
        let engine = engine();
        let moves = valid_moves(&b);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = engine.computer_move_with_stats(
                &b,
                Player::O,
                &level(Difficulty::Simple, 5, 3),
                &MatchScore::new(),
                &mut rng,
            );
            assert_eq!(result.kind, Selection::Random);
            let pos = result.best_move.unwrap();
            assert!(moves.contains(&pos));
        }
    }

    #[test]
    fn test_simple_same_seed_same_move() {
        let b = Board::new(6).unwrap();
        let engine = engine();
        let lvl = level(Difficulty::Simple, 6, 3);
        let a = engine.computer_move(&b, Player::O, &lvl, &MatchScore::new(), &mut StdRng::seed_from_u64(9));
        let c = engine.computer_move(&b, Player::O, &lvl, &MatchScore::new(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, c);
    }

    #[test]
    fn test_hard_prefers_center_on_empty_board() {
        let b = Board::new(5).unwrap();
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(4);
        let result = engine.computer_move_with_stats(
            &b,
            Player::O,
            &level(Difficulty::Hard, 5, 3),
            &MatchScore::new(),
            &mut rng,
        );
        assert_eq!(result.kind, Selection::Heuristic);
        assert_eq!(result.best_move, Some(Pos::new(2, 2)));
        assert_eq!(result.score, 63);
        assert_eq!(result.nodes, 25);
    }

    #[test]
    fn test_pro_uses_search() {
        let b = board(
            "
            X . . .
            . O . .
            . . X .
            . . . .
            ",
        );
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(5);
        let lvl = level(Difficulty::Pro, 4, 3);
        let result = engine.computer_move_with_stats(&b, Player::O, &lvl, &MatchScore::new(), &mut rng);
        assert_eq!(result.kind, Selection::Search);
        assert_eq!(result.depth, 4);
        assert!(result.nodes > 0);
        assert!(result.best_move.is_some_and(|pos| b.is_empty(pos)));
    }

    #[test]
    fn test_no_move_on_full_board() {
        let b = board("X O X\nX O O\nO X X");
        let engine = engine();
        for difficulty in Difficulty::ALL {
            let mut rng = StdRng::seed_from_u64(6);
            let result = engine.computer_move_with_stats(
                &b,
                Player::O,
                &level(difficulty, 3, 3),
                &MatchScore::new(),
                &mut rng,
            );
            assert_eq!(result.best_move, None);
            assert_eq!(result.kind, Selection::NoMove);
        }
    }

    #[test]
    fn test_suggest_win_then_block() {
        let b = board(
            "
            X X . .
            . . . .
            O . . .
            O . . .
            ",
        );
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(suggest_move(&b, Player::X, 3, &mut rng), Some(Pos::new(0, 2)));

        let b = board(
            "
            X . . .
            . . . .
            O . . .
            O . . .
            ",
        );
        assert_eq!(suggest_move(&b, Player::X, 3, &mut rng), Some(Pos::new(1, 0)));
    }

    #[test]
    fn test_opponent_follows_the_given_side() {
        // O threatens (1,0); X is one short of (0,2)
        let b = board(
            "
            X X . .
            . . . .
            O . . .
            O . . .
            ",
        );
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(0);

        let hard = level(Difficulty::Hard, 4, 3);
        let mv = engine.computer_move(&b, Player::X, &hard, &MatchScore::new(), &mut rng);
        assert_eq!(mv, Some(Pos::new(0, 2)));

        let mv = engine.computer_move(&b, Player::O, &hard, &MatchScore::new(), &mut rng);
        assert_eq!(mv, Some(Pos::new(1, 0)));
        assert_eq!(suggest_move(&b, Player::O, 3, &mut rng), Some(Pos::new(1, 0)));

        // Advising O, the threat to block is X's
        let only_x_threat = b.with_move(Pos::new(1, 0), Player::X);
        assert_eq!(suggest_move(&only_x_threat, Player::O, 3, &mut rng), Some(Pos::new(0, 2)));
    }

    #[test]
    fn test_suggest_random_fallback() {
        let b = board(
            "
            X . #
            . O .
            . . .
            ",
        );
        let moves = valid_moves(&b);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos = suggest_move(&b, Player::X, 3, &mut rng).unwrap();
            assert!(moves.contains(&pos));
        }
        let full = board("X O X\nX O O\nO X X");
        assert_eq!(suggest_move(&full, Player::X, 3, &mut StdRng::seed_from_u64(0)), None);
    }
}
