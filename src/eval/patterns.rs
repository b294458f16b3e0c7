//! Pattern scores for Connect-N evaluation
//!
//! These constants define the scoring weights for window patterns. They are
//! empirically tuned and fix the observable strength of every tier, so the
//! defaults must stay as they are; [`EvalWeights`] lets a config override them.

use serde::{Deserialize, Serialize};

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Terminal score for a completed line found by the search
    pub const WIN: i32 = 1_000_000;

    /// Window fully held by the evaluated player
    pub const COMPLETE: i32 = 100_000;
    /// K-1 own pieces and one empty cell
    pub const OPEN_K_MINUS_1: i32 = 100;
    /// K-2 own pieces and two empty cells
    pub const OPEN_K_MINUS_2: i32 = 10;
    /// K-1 opponent pieces and one empty cell.
    /// Smaller in magnitude than `OPEN_K_MINUS_1`.
    pub const OPPONENT_K_MINUS_1: i32 = -90;

    /// Per own piece inside the 3x3 block around the middle cell
    pub const CENTER: i32 = 3;
}

/// Evaluation weights, defaulting to [`PatternScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub win: i32,
    pub complete: i32,
    pub open_k_minus_1: i32,
    pub open_k_minus_2: i32,
    pub opponent_k_minus_1: i32,
    pub center: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            win: PatternScore::WIN,
            complete: PatternScore::COMPLETE,
            open_k_minus_1: PatternScore::OPEN_K_MINUS_1,
            open_k_minus_2: PatternScore::OPEN_K_MINUS_2,
            opponent_k_minus_1: PatternScore::OPPONENT_K_MINUS_1,
            center: PatternScore::CENTER,
        }
    }
}
