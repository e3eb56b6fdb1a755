//! The Connect 4 grid with gravity, reversible moves and win detection

use std::fmt;

use crate::{
    error::{GameError, Result},
    HEIGHT, WIDTH, WIN_LENGTH,
};

/// The value of a single cell of the grid
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token {
    Empty,
    PlayerA,
    PlayerB,
}

impl Token {
    pub fn is_empty(&self) -> bool {
        match self {
            Token::Empty => true,
            _ => false,
        }
    }

    /// The token of the other player, `Empty` has no opponent and maps to itself
    pub fn opponent(&self) -> Token {
        match self {
            Token::PlayerA => Token::PlayerB,
            Token::PlayerB => Token::PlayerA,
            Token::Empty => Token::Empty,
        }
    }

    fn from_char(c: char) -> Token {
        match c {
            'A' => Token::PlayerA,
            'B' => Token::PlayerB,
            _ => Token::Empty,
        }
    }

    fn to_char(&self) -> char {
        match self {
            Token::PlayerA => 'A',
            Token::PlayerB => 'B',
            Token::Empty => '.',
        }
    }
}

/// The state of the game, recomputed from the grid on demand
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    Win(Token),
    Tie,
}

// (row, column) steps of the four line directions, rows grow downwards:
// horizontal, vertical, diagonal \ and diagonal /
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect 4 grid
///
/// Row 0 is the top row, tokens fall towards row `HEIGHT - 1`. Within a column
/// every empty cell sits above every filled cell.
///
/// # Move discipline
/// [`pull_token`](GameState::pull_token) removes whatever token is on top of a
/// column, it does not remember which move put it there. Callers using
/// drop/pull to explore moves must undo them in reverse order of application,
/// one pull per drop in the same column, for the grid to return to its
/// previous contents.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GameState {
    cells: [Token; WIDTH * HEIGHT], // cells are stored left-to-right, top-to-bottom
}

impl GameState {
    /// Creates an empty grid
    pub fn new() -> Self {
        Self {
            cells: [Token::Empty; WIDTH * HEIGHT],
        }
    }

    /// Builds a grid from rows of characters, top row first
    ///
    /// `'A'` and `'B'` are tokens of each player, any other character is an
    /// empty cell. Every token must rest on another token or on the bottom
    /// row, otherwise the layout is rejected with
    /// [`FloatingToken`](GameError::FloatingToken).
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let bad_width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .find(|&len| len != WIDTH);
        if rows.len() != HEIGHT || bad_width.is_some() {
            return Err(GameError::MalformedLayout {
                rows: rows.len(),
                cols: bad_width.unwrap_or(WIDTH),
            });
        }

        let mut state = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.as_ref().chars().enumerate() {
                state.cells[Self::index(row, col)] = Token::from_char(c);
            }
        }

        // drop and pull rely on the empty cells of a column sitting above the tokens
        for col in 0..WIDTH {
            let floating = (0..HEIGHT - 1).find(|&row| {
                !state.cells[Self::index(row, col)].is_empty()
                    && state.cells[Self::index(row + 1, col)].is_empty()
            });
            if let Some(row) = floating {
                return Err(GameError::FloatingToken { row, col });
            }
        }
        Ok(state)
    }

    /// Builds a grid by replaying a string of 1-indexed columns, `PlayerA` first
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut state = Self::new();
        let mut token = Token::PlayerA;

        for (position, column_char) in moves.as_ref().chars().enumerate() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if state.outcome() != Outcome::InProgress {
                        return Err(GameError::GameOver);
                    }
                    state.drop_token(column - 1, token)?;
                    token = token.opponent();
                }
                _ => {
                    return Err(GameError::InvalidMoveString {
                        position,
                        found: column_char,
                    })
                }
            }
        }
        Ok(state)
    }

    fn index(row: usize, col: usize) -> usize {
        row * WIDTH + col
    }

    fn check_column(col: usize) -> Result<()> {
        if col >= WIDTH {
            return Err(GameError::InvalidColumn(col));
        }
        Ok(())
    }

    /// The token at `row` (0 is the top) and `col`
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Token {
        assert!(row < HEIGHT && col < WIDTH, "cell ({}, {}) is off the grid", row, col);
        self.cells[Self::index(row, col)]
    }

    /// Returns true if nothing more can be dropped in `col`, including when
    /// `col` is off the grid
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= WIDTH || !self.cells[Self::index(0, col)].is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|col| self.is_column_full(col))
    }

    /// The number of tokens in `col`
    pub fn column_height(&self, col: usize) -> usize {
        if col >= WIDTH {
            return 0;
        }
        (0..HEIGHT)
            .filter(|&row| !self.cells[Self::index(row, col)].is_empty())
            .count()
    }

    /// Columns that can still take a token, left to right
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&col| !self.is_column_full(col))
    }

    pub fn token_count(&self, token: Token) -> usize {
        self.cells.iter().filter(|&&cell| cell == token).count()
    }

    /// Drops `token` into the lowest empty row of `col`
    pub fn drop_token(&mut self, col: usize, token: Token) -> Result<()> {
        if token.is_empty() {
            return Err(GameError::InvalidMove);
        }
        Self::check_column(col)?;
        if self.is_column_full(col) {
            return Err(GameError::ColumnFull(col));
        }

        self.play(col, token);
        Ok(())
    }

    /// Removes the topmost token of `col`
    pub fn pull_token(&mut self, col: usize) -> Result<()> {
        Self::check_column(col)?;
        if self.column_height(col) == 0 {
            return Err(GameError::ColumnEmpty(col));
        }

        self.undo(col);
        Ok(())
    }

    /// Unchecked drop for search, the caller guarantees `col` is in range and
    /// not full and `token` is not empty
    pub(crate) fn play(&mut self, col: usize, token: Token) {
        debug_assert!(!token.is_empty(), "played an empty token");
        debug_assert!(!self.is_column_full(col), "played into full column {}", col);

        // find the first empty row from the bottom
        for row in (0..HEIGHT).rev() {
            let cell = &mut self.cells[Self::index(row, col)];
            if cell.is_empty() {
                *cell = token;
                return;
            }
        }
    }

    /// Unchecked pull for search, the caller guarantees `col` is in range and
    /// holds at least one token
    pub(crate) fn undo(&mut self, col: usize) {
        debug_assert!(self.column_height(col) > 0, "undid a move in empty column {}", col);

        // find the first filled row from the top
        for row in 0..HEIGHT {
            let cell = &mut self.cells[Self::index(row, col)];
            if !cell.is_empty() {
                *cell = Token::Empty;
                return;
            }
        }
    }

    /// Returns whether `token` fills `WIN_LENGTH` cells starting at (`row`, `col`)
    /// and stepping by `step`
    fn line_from(&self, row: usize, col: usize, step: (isize, isize), token: Token) -> bool {
        (0..WIN_LENGTH as isize).all(|i| {
            let r = row as isize + step.0 * i;
            let c = col as isize + step.1 * i;
            r >= 0
                && r < HEIGHT as isize
                && c >= 0
                && c < WIDTH as isize
                && self.cells[Self::index(r as usize, c as usize)] == token
        })
    }

    /// Checks every cell for an alignment of `WIN_LENGTH` tokens
    ///
    /// The scan runs from the bottom row upwards, so when several lines exist
    /// the lowest one is reported. Under alternating play only one player can
    /// ever hold a line.
    pub fn outcome(&self) -> Outcome {
        for row in (0..HEIGHT).rev() {
            for col in 0..WIDTH {
                let token = self.cells[Self::index(row, col)];
                if token.is_empty() {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&step| self.line_from(row, col, step, token))
                {
                    return Outcome::Win(token);
                }
            }
        }

        if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        writeln!(f, "{}", header)?;
        for row in 0..HEIGHT {
            let line: String = (0..WIDTH).map(|col| self.get(row, col).to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
