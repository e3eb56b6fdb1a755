//! A Connect 4 engine with a depth-limited minimax opponent
//!
//! The engine keeps a 6x7 grid that supports reversible moves, and the
//! [`SearchAgent`](search::SearchAgent) explores it with alpha-beta pruned
//! minimax to pick a column for its own token.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{game_state::*, search::SearchAgent};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let state = GameState::from_layout(&[
//!     ".......",
//!     ".......",
//!     ".......",
//!     ".......",
//!     "BBB....",
//!     "AAA....",
//! ])?;
//! let mut agent = SearchAgent::new(Token::PlayerA)?.with_depth(3)?;
//!
//! assert_eq!(agent.choose_move(&state)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod error;

pub mod game_state;

pub mod search;


pub use error::GameError;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tokens needed to win
pub const WIN_LENGTH: usize = 4;

// a line of WIN_LENGTH must fit in at least one direction for the game to be winnable
const_assert!(WIN_LENGTH <= WIDTH && WIN_LENGTH <= HEIGHT);
const_assert!(WIDTH > 0 && HEIGHT > 0);
