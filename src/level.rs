//! Difficulty tiers, level catalogue and match score

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Player;

/// Wins needed to take a match (best of three)
pub const WINS_PER_MATCH: u32 = 2;

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random play after the win/block check
    Simple,
    /// One-ply heuristic
    Hard,
    /// Full minimax search
    Pro,
}

impl Difficulty {
    /// Tiers in unlock order
    pub const ALL: [Difficulty; 3] = [Difficulty::Simple, Difficulty::Hard, Difficulty::Pro];

    /// The tier unlocked after this one
    pub fn next(self) -> Option<Difficulty> {
        match self {
            Difficulty::Simple => Some(Difficulty::Hard),
            Difficulty::Hard => Some(Difficulty::Pro),
            Difficulty::Pro => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Simple => "simple",
            Difficulty::Hard => "hard",
            Difficulty::Pro => "pro",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Difficulty::Simple),
            "hard" => Ok(Difficulty::Hard),
            "pro" => Ok(Difficulty::Pro),
            other => Err(format!("unknown difficulty '{other}' (expected simple, hard or pro)")),
        }
    }
}

/// Rules for one level: board, win condition, obstacles and AI tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    /// Level number within its tier, starting at 1
    pub level: u32,
    pub board_size: usize,
    /// K: pieces in a row needed to win
    pub win_condition: usize,
    pub obstacles: usize,
    pub difficulty: Difficulty,
}

impl Level {
    pub const fn new(
        level: u32,
        board_size: usize,
        win_condition: usize,
        obstacles: usize,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            level,
            board_size,
            win_condition,
            obstacles,
            difficulty,
        }
    }

    /// Look up a catalogue level by tier and number
    pub fn find(difficulty: Difficulty, level: u32) -> Option<Level> {
        levels(difficulty).iter().find(|l| l.level == level).copied()
    }
}

const SIMPLE_LEVELS: [Level; 4] = [
    Level::new(1, 5, 3, 0, Difficulty::Simple),
    Level::new(2, 6, 3, 1, Difficulty::Simple),
    Level::new(3, 7, 4, 1, Difficulty::Simple),
    Level::new(4, 8, 4, 2, Difficulty::Simple),
];

const HARD_LEVELS: [Level; 3] = [
    Level::new(1, 8, 5, 3, Difficulty::Hard),
    Level::new(2, 9, 5, 4, Difficulty::Hard),
    Level::new(3, 10, 5, 4, Difficulty::Hard),
];

const PRO_LEVELS: [Level; 3] = [
    Level::new(1, 10, 6, 5, Difficulty::Pro),
    Level::new(2, 11, 6, 6, Difficulty::Pro),
    Level::new(3, 12, 6, 6, Difficulty::Pro),
];

/// Board presets offered for two human players
pub const TWO_PLAYER_LEVELS: [Level; 4] = [
    Level::new(1, 6, 3, 0, Difficulty::Simple),
    Level::new(2, 8, 4, 2, Difficulty::Hard),
    Level::new(3, 10, 5, 4, Difficulty::Pro),
    Level::new(4, 12, 6, 6, Difficulty::Pro),
];

/// Built-in levels of a tier, in play order
pub fn levels(difficulty: Difficulty) -> &'static [Level] {
    match difficulty {
        Difficulty::Simple => &SIMPLE_LEVELS,
        Difficulty::Hard => &HARD_LEVELS,
        Difficulty::Pro => &PRO_LEVELS,
    }
}

/// Level that follows `completed` in `difficulty`.
///
/// After the last level of a tier this is level 1 of the next tier; after
/// the last Pro level there is none.
pub fn next_level(difficulty: Difficulty, completed: u32) -> Option<Level> {
    let tier = levels(difficulty);
    if let Some(idx) = tier.iter().position(|l| l.level == completed) {
        if let Some(next) = tier.get(idx + 1) {
            return Some(*next);
        }
    }
    difficulty
        .next()
        .and_then(|d| levels(d).first().copied())
}

/// Round wins per player within one match.
///
/// The engine reads it to adapt search depth; it never updates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub x: u32,
    pub o: u32,
}

impl MatchScore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    pub fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }

    /// True when `player` has fewer round wins than the opponent
    #[inline]
    pub fn is_behind(&self, player: Player) -> bool {
        self.get(player) < self.get(player.opponent())
    }

    /// First player to reach [`WINS_PER_MATCH`]
    pub fn match_winner(&self) -> Option<Player> {
        if self.x >= WINS_PER_MATCH {
            Some(Player::X)
        } else if self.o >= WINS_PER_MATCH {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Both players one win away from the match
    pub fn is_tie_breaker(&self) -> bool {
        self.x == WINS_PER_MATCH - 1 && self.o == WINS_PER_MATCH - 1
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X {} - {} O", self.x, self.o)
    }
}
