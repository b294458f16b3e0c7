//! Search depth selection
//!
//! Depth comes from the tier and level number, gets one extra ply while the
//! AI trails in the match, and is then cut back on large boards to bound the
//! cost of a full-width search.

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::level::{Difficulty, Level, MatchScore};

/// Depth formula parameters. Defaults are the tuned values the tiers were
/// balanced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthPolicy {
    /// Depth used for Simple (only reached when Simple asks for a search)
    pub simple_base: u32,
    /// Hard: `hard_base + level / hard_level_divisor`
    pub hard_base: u32,
    pub hard_level_divisor: u32,
    /// Pro: `pro_base + level`
    pub pro_base: u32,
    /// Extra plies while the AI has fewer round wins
    pub behind_bonus: u32,
    /// Boards larger than this lose one ply
    pub medium_board: usize,
    /// Boards larger than this lose two plies
    pub large_board: usize,
    /// Floor after the board-size cut
    pub min_depth: u32,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            simple_base: 1,
            hard_base: 2,
            hard_level_divisor: 2,
            pro_base: 3,
            behind_bonus: 1,
            medium_board: 8,
            large_board: 10,
            min_depth: 1,
        }
    }
}

impl DepthPolicy {
    /// Depth from tier and level number alone
    pub fn base_depth(&self, difficulty: Difficulty, level: u32) -> u32 {
        match difficulty {
            Difficulty::Simple => self.simple_base,
            Difficulty::Hard => self.hard_base + level / self.hard_level_divisor.max(1),
            Difficulty::Pro => self.pro_base + level,
        }
    }

    /// Plies removed for the board size
    pub fn board_penalty(&self, board_size: usize) -> u32 {
        if board_size > self.large_board {
            2
        } else if board_size > self.medium_board {
            1
        } else {
            0
        }
    }

    /// Effective depth for a level, given whether the AI trails the match.
    pub fn search_depth(&self, level: &Level, behind: bool) -> u32 {
        let mut depth = self.base_depth(level.difficulty, level.level);
        if behind {
            depth += self.behind_bonus;
        }
        match self.board_penalty(level.board_size) {
            0 => depth,
            cut => depth.saturating_sub(cut).max(self.min_depth),
        }
    }

    /// Effective depth for `ai` under the current match score
    pub fn depth_for(&self, level: &Level, score: &MatchScore, ai: Player) -> u32 {
        self.search_depth(level, score.is_behind(ai))
    }
}
