//! Game rules for Connect-N
//!
//! This module implements the rule set:
//! - Win detection (K in a row, diagonals only when K > 4)
//! - Draw detection (no empty cell left)
//! - Move enumeration (every empty cell, row-major)

pub mod draw;
pub mod moves;
pub mod win;

// Re-exports for convenient access
pub use draw::check_draw;
pub use moves::valid_moves;
pub use win::{allows_diagonals, check_win, directions, WinLine, DIRECTIONS};
