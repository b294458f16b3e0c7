//! Move enumeration for Connect-N

use crate::board::{Board, Pos};

/// All empty cells in row-major order.
///
/// The order is part of the contract: search ties go to the earliest
/// candidate, and the random tiers draw from this list.
pub fn valid_moves(board: &Board) -> Vec<Pos> {
    board
        .positions()
        .filter(|&pos| board.is_empty(pos))
        .collect()
}
