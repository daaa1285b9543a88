//! A game-playing agent for the board game 'Othello' (Reversi)
//!
//! The agent answers known openings from a rotation-aware opening book and
//! otherwise chooses its move with a time-bounded negamax search guided by
//! a positional heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use othello_ai::{board::*, evaluator::DiscCountEvaluator, search::*};
//!
//! let mut engine = SearchEngine::new(DiscCountEvaluator);
//! let result = engine.search_depth(&Board::new(), Side::Black, 2);
//!
//! assert_eq!(result.best_move, Move::Place(Square::new(2, 3).unwrap()));
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod config;

pub mod display;

pub mod evaluator;

pub mod opening_book;

pub mod player;

pub mod protocol;

pub mod search;


pub use board::{Board, Move, Side, Square};
pub use config::{PassPolicy, PlayerConfig, SearchConfig};
pub use evaluator::{DiscCountEvaluator, EdgeParityEvaluator, Evaluator, PositionalEvaluator};
pub use opening_book::OpeningBook;
pub use player::Player;
pub use search::{SearchEngine, SearchResult, TimeBudget};

/// The width and height of the game board in cells
pub const BOARD_SIZE: usize = 8;

/// The number of cells on the game board
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

// the starting position splits the four centre cells, so the board needs a centre
const_assert!(BOARD_SIZE % 2 == 0);
// board keys are one character per cell
const_assert_eq!(NUM_CELLS, 64);
