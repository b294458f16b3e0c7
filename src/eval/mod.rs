//! Evaluation module for Connect-N positions
//!
//! This module provides window scoring for board positions.
//! The evaluation considers:
//! - K-cell windows along rows, columns and (for K > 4) diagonals
//! - Near-complete opponent windows as threats
//! - Positional bonus (center control)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_with};
pub use patterns::{EvalWeights, PatternScore};
