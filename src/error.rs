use thiserror::Error;

use crate::{HEIGHT, WIDTH};

/// Errors returned by [`GameState`](crate::game_state::GameState) and
/// [`SearchAgent`](crate::search::SearchAgent) operations
///
/// None of these leave the board modified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// An empty token was dropped, or an agent was asked to play one
    #[error("an empty token cannot be played")]
    InvalidMove,
    /// The column index is not on the board
    #[error("column {0} does not exist, columns must be between 0 and {max}", max = WIDTH - 1)]
    InvalidColumn(usize),
    /// A token was dropped into a column with no empty cell left
    #[error("column {0} is full")]
    ColumnFull(usize),
    /// A token was pulled from a column holding none
    #[error("column {0} is empty")]
    ColumnEmpty(usize),
    /// A layout did not have the board's number of rows or row width
    #[error("layout must be {height} rows of {width} cells, found {rows} rows and a row of {cols} cells", height = HEIGHT, width = WIDTH)]
    MalformedLayout { rows: usize, cols: usize },
    /// A layout had a token with an empty cell below it
    #[error("token at row {row}, column {col} has an empty cell below it")]
    FloatingToken { row: usize, col: usize },
    /// A move string held a character that is not a column number
    #[error("could not parse '{found}' at position {position} as a move")]
    InvalidMoveString { position: usize, found: char },
    /// A move string kept playing after the game was won
    #[error("the game is already over")]
    GameOver,
    /// The agent was asked to move on a full board
    #[error("no legal move remains, every column is full")]
    NoLegalMove,
    /// The search depth is zero or deeper than the board allows
    #[error("search depth must be between 1 and {max}, got {0}", max = crate::search::MAX_DEPTH)]
    InvalidDepth(u32),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
