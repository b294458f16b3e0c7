//! Square board with fixed obstacles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CellState, Player, Pos, MIN_BOARD_SIZE};
use crate::error::BoardError;
use crate::rng::RandomSource;

/// Game board: `size × size` cells in row-major order.
///
/// Obstacles are placed once at construction. Moves are applied with
/// [`Board::with_move`], which returns a new board, so a speculative search
/// never touches the caller's copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Create an empty board with no obstacles
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::SizeTooSmall { size });
        }
        Ok(Self {
            size,
            cells: vec![CellState::Empty; size * size],
        })
    }

    /// Create a board and scatter `obstacles` obstacle cells uniformly at random.
    ///
    /// Each obstacle goes to a uniformly chosen cell among those still empty,
    /// so obstacles never overlap. At least one cell must stay empty.
    pub fn with_obstacles<R: RandomSource + ?Sized>(
        size: usize,
        obstacles: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        let cells = size * size;
        if obstacles >= cells {
            return Err(BoardError::TooManyObstacles { obstacles, cells });
        }

        let mut free: Vec<usize> = (0..cells).collect();
        for _ in 0..obstacles {
            let pick = rng.uniform(free.len());
            let idx = free.swap_remove(pick);
            board.cells[idx] = CellState::Obstacle;
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at position. Panics if `pos` is outside the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> CellState {
        self.cells[pos.to_index(self.size)]
    }

    /// Bounds-checked cell lookup
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<CellState> {
        if self.contains(pos) {
            Some(self.get(pos))
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Check if position is empty (obstacles are not)
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Copy of this board with `player` placed at `pos`.
    ///
    /// The target cell must be empty; callers validate before applying.
    #[must_use]
    pub fn with_move(&self, pos: Pos, player: Player) -> Board {
        debug_assert!(self.is_empty(pos), "move onto non-empty cell {pos}");
        let mut next = self.clone();
        next.place(pos, player);
        next
    }

    /// In-place placement, only for boards owned by the caller's own frame
    #[inline]
    pub(crate) fn place(&mut self, pos: Pos, player: Player) {
        let idx = pos.to_index(self.size);
        self.cells[idx] = CellState::Occupied(player);
    }

    /// All cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of player pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.player().is_some()).count()
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |idx| Pos::from_index(idx, self.size))
    }
}

/// Rows of space-separated symbols (`.` empty, `#` obstacle, `X`, `O`).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            let line: Vec<String> = self.row(r).iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) format. Whitespace inside a row and
/// blank lines are ignored; the grid must be square.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<CellState>> = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let row = symbols
                .iter()
                .map(|&ch| {
                    CellState::from_symbol(ch).ok_or_else(|| {
                        BoardError::Parse(format!("unknown symbol '{ch}' on line {}", line_no + 1))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(BoardError::Parse(format!(
                "row {} has {} cells, expected {size}",
                bad + 1,
                rows[bad].len()
            )));
        }

        let mut board = Board::new(size)?;
        board.cells = rows.into_iter().flatten().collect();
        Ok(board)
    }
}
