//! Win condition checking for Connect-N
//!
//! A player wins with K contiguous pieces along an allowed direction.
//! Horizontal and vertical lines always count; the two diagonals count only
//! when K > 4.
//!
//! The scan order is fixed: cells in row-major order, then directions in
//! [`DIRECTIONS`] order. The first line found is reported, so the highlighted
//! line is reproducible.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Pos};

/// Direction vectors in scan order
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // Right
    (1, 0),  // Down
    (1, 1),  // Down-right
    (1, -1), // Down-left
];

/// Diagonal lines are a game rule for long win conditions only.
#[inline]
pub fn allows_diagonals(win_condition: usize) -> bool {
    win_condition > 4
}

/// Directions that count for the given win condition
#[inline]
pub fn directions(win_condition: usize) -> &'static [(isize, isize)] {
    if allows_diagonals(win_condition) {
        &DIRECTIONS
    } else {
        &DIRECTIONS[..2]
    }
}

/// A completed line: the winner and the exact K cells, in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub winner: Player,
    pub line: Vec<Pos>,
}

/// Check for a winner.
///
/// Returns the first winning line under the deterministic scan order, or
/// `None` if no player has K in a row.
pub fn check_win(board: &Board, win_condition: usize) -> Option<WinLine> {
    if win_condition == 0 {
        return None;
    }
    let dirs = directions(win_condition);

    for pos in board.positions() {
        let Some(player) = board.get(pos).player() else {
            continue;
        };
        for &(dr, dc) in dirs {
            if let Some(line) = line_from(board, pos, dr, dc, win_condition, player) {
                return Some(WinLine {
                    winner: player,
                    line,
                });
            }
        }
    }
    None
}

/// K cells starting at `start` along `(dr, dc)`, if all hold `player`.
fn line_from(
    board: &Board,
    start: Pos,
    dr: isize,
    dc: isize,
    win_condition: usize,
    player: Player,
) -> Option<Vec<Pos>> {
    let size = board.size();
    // Bounds first: the far end must be on the board
    start.offset(dr, dc, win_condition - 1, size)?;

    let mut line = Vec::with_capacity(win_condition);
    line.push(start);
    for i in 1..win_condition {
        let next = start.offset(dr, dc, i, size)?;
        if board.get(next).player() != Some(player) {
            return None;
        }
        line.push(next);
    }
    Some(line)
}
