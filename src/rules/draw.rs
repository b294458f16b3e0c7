//! Draw detection for Connect-N

use crate::board::Board;

/// True when no cell is empty. Obstacles count as filled.
///
/// A full board can also hold a winning line, so check for a win first.
pub fn check_draw(board: &Board) -> bool {
    board.cells().iter().all(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{check_win, valid_moves};

    #[test]
    fn test_empty_board_not_draw() {
        let board = Board::new(3).unwrap();
        assert!(!check_draw(&board));
    }

    #[test]
    fn test_full_board_is_draw() {
        let board: Board = "X O X\nX O O\nO X X".parse().unwrap();
        assert!(check_draw(&board));
        assert_eq!(check_win(&board, 3), None);
    }

    #[test]
    fn test_obstacles_fill_cells() {
        let board: Board = "X O #\n# O X\nO X #".parse().unwrap();
        assert!(check_draw(&board));
    }

    #[test]
    fn test_one_empty_cell_not_draw() {
        let board: Board = "X O X\nX . O\nO X X".parse().unwrap();
        assert!(!check_draw(&board));
    }

    #[test]
    fn test_full_board_can_also_win() {
        let board: Board = "X X X\nO O X\nX O O".parse().unwrap();
        assert!(check_draw(&board));
        assert!(check_win(&board, 3).is_some());
    }

    #[test]
    fn test_draw_iff_no_moves() {
        for diagram in ["X O X\nX . O\nO X X", "X O #\n# O X\nO X #", ". . .\n. # .\n. . ."] {
            let board: Board = diagram.parse().unwrap();
            assert_eq!(check_draw(&board), valid_moves(&board).is_empty());
        }
    }
}
