//! Connect-N rules engine and computer opponent
//!
//! Two players, X and O, take turns on a square board that may carry
//! obstacle cells. The first to line up K pieces wins:
//! - Horizontal and vertical lines always count
//! - Diagonal lines count only when K > 4
//! - A full board without a line is a draw
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Players, cell states, positions and the board grid
//! - [`rules`]: Win scan, draw check and move enumeration
//! - [`eval`]: Window-based position evaluation
//! - [`search`]: Depth policy and minimax with alpha-beta pruning
//! - [`engine`]: Computer player across the three tiers, and the advisor
//! - [`level`]: Difficulty tiers, level catalogue and match score
//! - [`game`]: Round and best-of-three match control
//! - [`config`]: Engine configuration loaded from TOML
//!
//! # Quick Start
//!
//! ```
//! use connect_n::{AIEngine, Board, Difficulty, Level, MatchScore, Player};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let level = Level::find(Difficulty::Simple, 1).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::with_obstacles(level.board_size, level.obstacles, &mut rng).unwrap();
//! let engine = AIEngine::new();
//!
//! // Computer plays O
//! if let Some(pos) = engine.computer_move(&board, Player::O, &level, &MatchScore::new(), &mut rng) {
//!     board = board.with_move(pos, Player::O);
//!     println!("AI plays at {pos}");
//! }
//! ```
//!
//! # Decision Priority
//!
//! The computer player follows this priority:
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Tier play: random (Simple), one-ply heuristic (Hard), alpha-beta
//!    search (Pro)

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod level;
pub mod rng;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, CellState, Player, Pos};
pub use config::EngineConfig;
pub use engine::{find_winning_move, suggest_move, AIEngine, MoveResult, Selection};
pub use error::{BoardError, ConfigError, GameError};
pub use game::{Match, Round, RoundStatus};
pub use level::{next_level, Difficulty, Level, MatchScore, WINS_PER_MATCH};
pub use rng::RandomSource;
pub use rules::{check_draw, check_win, valid_moves, WinLine};
pub use search::{SearchResult, Searcher};
