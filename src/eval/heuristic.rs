//! Heuristic evaluation function for Connect-N board positions
//!
//! Scores a position for one player from:
//! - Sliding windows of K cells along every allowed direction
//! - A center-control bonus for the player's own pieces
//!
//! The evaluation is a pure function of the board; it has no randomness.

use crate::board::{Board, CellState, Player, Pos};
use crate::rules::directions;

use super::patterns::EvalWeights;

/// Piece counts inside one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WindowCounts {
    own: usize,
    opponent: usize,
    empty: usize,
}

/// Evaluate the board for `player` with the default weights.
///
/// Returns a score where higher is better for `player`. The opponent is
/// `player.opponent()`.
#[must_use]
pub fn evaluate(board: &Board, player: Player, win_condition: usize) -> i32 {
    evaluate_with(board, player, win_condition, &EvalWeights::default())
}

/// Evaluate the board for `player` with explicit weights.
#[must_use]
pub fn evaluate_with(
    board: &Board,
    player: Player,
    win_condition: usize,
    weights: &EvalWeights,
) -> i32 {
    center_score(board, player, weights) + window_score(board, player, win_condition, weights)
}

/// Bonus for own pieces in the 3x3 block around the middle cell.
/// Opponent pieces there are not penalized.
fn center_score(board: &Board, player: Player, weights: &EvalWeights) -> i32 {
    let size = board.size();
    let center = size / 2;
    let lo = center.saturating_sub(1);
    let hi = (center + 1).min(size - 1);

    let mut score = 0;
    for r in lo..=hi {
        for c in lo..=hi {
            if board.get(Pos::new(r, c)) == CellState::Occupied(player) {
                score += weights.center;
            }
        }
    }
    score
}

/// Sum of all window contributions along every allowed direction.
fn window_score(board: &Board, player: Player, win_condition: usize, weights: &EvalWeights) -> i32 {
    if win_condition == 0 || win_condition > board.size() {
        return 0;
    }
    let size = board.size();
    let mut score = 0;

    for &(dr, dc) in directions(win_condition) {
        for start in board.positions() {
            if start.offset(dr, dc, win_condition - 1, size).is_none() {
                continue;
            }
            let counts = count_window(board, start, dr, dc, win_condition, player);
            score += score_window(counts, win_condition, weights);
        }
    }
    score
}

fn count_window(
    board: &Board,
    start: Pos,
    dr: isize,
    dc: isize,
    win_condition: usize,
    player: Player,
) -> WindowCounts {
    let size = board.size();
    let mut counts = WindowCounts::default();
    for i in 0..win_condition {
        let Some(pos) = start.offset(dr, dc, i, size) else {
            break;
        };
        match board.get(pos) {
            CellState::Empty => counts.empty += 1,
            CellState::Occupied(p) if p == player => counts.own += 1,
            CellState::Occupied(_) => counts.opponent += 1,
            CellState::Obstacle => {}
        }
    }
    counts
}

/// Score one window. A window holding both players' pieces scores 0.
fn score_window(counts: WindowCounts, win_condition: usize, weights: &EvalWeights) -> i32 {
    let WindowCounts { own, opponent, empty } = counts;
    let mut score = 0;

    if own == win_condition {
        score += weights.complete;
    } else if own + 1 == win_condition && empty == 1 {
        score += weights.open_k_minus_1;
    } else if own + 2 == win_condition && empty == 2 {
        score += weights.open_k_minus_2;
    }

    if opponent + 1 == win_condition && empty == 1 {
        score += weights.opponent_k_minus_1;
    }

    score
}
