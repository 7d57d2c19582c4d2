//! A minimax agent for playing the board game 'Connect 4'
//!
//! The agent builds a game tree from the current position to a fixed depth,
//! scores the leaves with a window-counting heuristic and searches the tree
//! with alpha-beta pruning, exploring sibling subtrees in parallel.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, engine::Engine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let engine = Engine::with_depth(2);
//! let board = Board::new();
//!
//! // columns are numbered from 1 for human players
//! let column = engine.choose_move(&board)?;
//! assert_eq!(column, 4);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod node;

pub mod engine;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const WIN_LENGTH: usize = 4;

/// The number of plies the engine looks ahead
pub const SEARCH_DEPTH: usize = 7;

// a winning line has to fit on the board in every direction
const_assert!(WIN_LENGTH <= WIDTH);
const_assert!(WIN_LENGTH <= HEIGHT);
const_assert!(SEARCH_DEPTH > 0);
