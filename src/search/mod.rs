//! Search module for the Connect-N AI
//!
//! Contains:
//! - Depth policy (tier, level, match score, board size)
//! - Minimax with alpha-beta pruning and a parallel root

pub mod alphabeta;
pub mod depth;

pub use alphabeta::{SearchConfig, SearchResult, Searcher, INF};
pub use depth::DepthPolicy;
