//! Board representation for Connect-N

#[allow(clippy::module_inception)]
pub mod board;


pub use board::Board;

use serde::{Deserialize, Serialize};

/// Smallest playable board (and smallest win condition)
pub const MIN_BOARD_SIZE: usize = 3;

/// Player markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Diagram symbol for this player
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            other => Err(format!("unknown player '{other}' (expected x or o)")),
        }
    }
}

/// State of a single cell.
///
/// Player markers and cell states are distinct types; a cell holds a player
/// only through [`CellState::Occupied`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    Occupied(Player),
}

impl CellState {
    /// Player holding this cell, if any
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            CellState::Occupied(p) => Some(p),
            CellState::Empty | CellState::Obstacle => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }

    /// Diagram symbol: `.` empty, `#` obstacle, `X`/`O` players
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Obstacle => '#',
            CellState::Occupied(p) => p.symbol(),
        }
    }

    /// Parse a diagram symbol
    pub fn from_symbol(ch: char) -> Option<CellState> {
        match ch {
            '.' | '_' => Some(CellState::Empty),
            '#' => Some(CellState::Obstacle),
            'X' | 'x' => Some(CellState::Occupied(Player::X)),
            'O' | 'o' => Some(CellState::Occupied(Player::O)),
            _ => None,
        }
    }
}

impl From<Player> for CellState {
    #[inline]
    fn from(player: Player) -> Self {
        CellState::Occupied(player)
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board of the given size
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: idx / size,
            col: idx % size,
        }
    }

    /// Step `steps` times along `(dr, dc)`, or `None` when leaving the board
    #[inline]
    pub fn offset(self, dr: isize, dc: isize, steps: usize, size: usize) -> Option<Pos> {
        let steps = steps as isize;
        let r = self.row as isize + dr * steps;
        let c = self.col as isize + dc * steps;
        if r >= 0 && c >= 0 && (r as usize) < size && (c as usize) < size {
            Some(Pos::new(r as usize, c as usize))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order, matching the move enumeration order.
impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}
