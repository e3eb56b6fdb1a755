//! A depth-limited minimax agent to play Connect 4

use log::{debug, trace};
use static_assertions::const_assert;

use crate::{
    error::{GameError, Result},
    game_state::*,
    HEIGHT, WIDTH,
};

/// The search depth used by [`SearchAgent::new`]
pub const DEFAULT_DEPTH: u32 = 9;

/// The deepest search allowed, one ply per cell of the board
pub const MAX_DEPTH: u32 = (WIDTH * HEIGHT) as u32;

/// The score of a position the opponent has won
pub const LOSS_SCORE: i32 = i32::MIN;
/// The score of a position cut off by the search horizon
pub const HORIZON_SCORE: i32 = 0;
/// The score of a drawn position
pub const TIE_SCORE: i32 = 100;
/// The base score of a won position, the remaining depth is added on top
pub const WIN_BASE: i32 = 1_000;

const_assert!(LOSS_SCORE < HORIZON_SCORE);
const_assert!(HORIZON_SCORE < TIE_SCORE);
const_assert!(TIE_SCORE < WIN_BASE);
const_assert!(WIN_BASE as i64 + MAX_DEPTH as i64 <= i32::MAX as i64);

/// Returns an array ordering the columns from the middle outwards, left
/// before right, as the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (1 - i % 2) * (i / 2) - (i % 2) * (i / 2 + 1);
        i += 1;
    }
    move_order
}

const MOVE_ORDER: [usize; WIDTH] = move_order();

/// An agent choosing moves for one player with minimax search
///
/// # Position Scoring
/// Scores are from the agent's point of view. A position the agent has won
/// scores [`WIN_BASE`] plus the depth still left to search when the win was
/// found, so faster wins score higher. Any lost position scores [`LOSS_SCORE`],
/// a draw [`TIE_SCORE`], and a position still open at the search horizon
/// [`HORIZON_SCORE`].
///
/// # Scratch board
/// The search explores the tree on a single grid, dropping a token before
/// each recursive call and pulling it back afterwards. Every drop is undone
/// in reverse order before the search returns, leaving the grid exactly as it
/// was handed over.
#[derive(Clone, Debug)]
pub struct SearchAgent {
    token: Token,
    opponent: Token,
    depth: u32,
    pruning: bool,

    /// The number of nodes searched by the last call (for diagnostics only)
    pub node_count: usize,
}

impl SearchAgent {
    /// Creates an agent playing `token` at [`DEFAULT_DEPTH`]
    pub fn new(token: Token) -> Result<Self> {
        if token.is_empty() {
            return Err(GameError::InvalidMove);
        }
        Ok(Self {
            token,
            opponent: token.opponent(),
            depth: DEFAULT_DEPTH,
            pruning: true,
            node_count: 0,
        })
    }

    /// Sets the number of plies searched, between 1 and [`MAX_DEPTH`]
    pub fn with_depth(mut self, depth: u32) -> Result<Self> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(GameError::InvalidDepth(depth));
        }
        self.depth = depth;
        Ok(self)
    }

    /// Turns alpha-beta pruning on or off, the chosen move is the same either way
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the column the agent plays in `state`
    ///
    /// The caller's grid is left untouched, the search runs on a copy.
    pub fn choose_move(&mut self, state: &GameState) -> Result<usize> {
        let mut scratch = *state;
        let (_score, column) = self.evaluate(&mut scratch)?;
        Ok(column)
    }

    /// Performs the top-level search on `state` in place
    ///
    /// Returns the score of the best move (see [Position Scoring]) and its
    /// column. `state` holds its original contents again when this returns.
    ///
    /// [Position Scoring]: #position-scoring
    pub fn evaluate(&mut self, state: &mut GameState) -> Result<(i32, usize)> {
        if state.is_full() {
            return Err(GameError::NoLegalMove);
        }
        let original = *state;
        self.node_count = 0;

        // only replaced on strict improvement so ties keep the more central column
        let mut best: Option<(i32, usize)> = None;
        for &column in MOVE_ORDER.iter() {
            if state.is_column_full(column) {
                continue;
            }

            // a move can only be chosen if it beats the best score so far
            let alpha = match best {
                Some((best_score, _)) if self.pruning => best_score,
                _ => LOSS_SCORE,
            };

            state.play(column, self.token);
            let score = self.search(state, false, self.depth - 1, alpha, i32::MAX);
            state.undo(column);
            trace!("column {} scored {}", column, score);

            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, column)),
            }
        }
        debug_assert_eq!(*state, original, "search did not restore the board");

        let (score, column) = best.ok_or(GameError::NoLegalMove)?;
        debug!(
            "chose column {} with score {} after {} nodes at depth {}",
            column, score, self.node_count, self.depth
        );
        Ok((score, column))
    }

    /// Scores the agent dropping a token in `column`, searching the reply
    /// with a full window
    pub fn score_move(&mut self, state: &mut GameState, column: usize) -> Result<i32> {
        state.drop_token(column, self.token)?;
        let score = self.search(state, false, self.depth - 1, LOSS_SCORE, i32::MAX);
        state.pull_token(column)?;
        Ok(score)
    }

    /// Converts a score to the number of plies until the agent's win,
    /// counting the agent's first move, or `None` if the score is not a win
    pub fn score_to_win_distance(&self, score: i32) -> Option<u32> {
        // a win found with `depth` plies still left to search
        let depth_left = score.checked_sub(WIN_BASE)?;
        if depth_left < 0 {
            return None;
        }
        self.depth.checked_sub(depth_left as u32)
    }

    /// Performs game tree search with `depth` plies left
    ///
    /// Returns the score of the position (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    fn search(
        &mut self,
        state: &mut GameState,
        maximizing: bool,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.node_count += 1;

        match state.outcome() {
            Outcome::Win(token) if token == self.token => return WIN_BASE + depth as i32,
            Outcome::Win(_) => return LOSS_SCORE,
            Outcome::Tie => return TIE_SCORE,
            Outcome::InProgress => {}
        }
        if depth == 0 {
            return HORIZON_SCORE;
        }

        let mover = if maximizing { self.token } else { self.opponent };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for &column in MOVE_ORDER.iter() {
            if state.is_column_full(column) {
                continue;
            }

            state.play(column, mover);
            let score = self.search(state, !maximizing, depth - 1, alpha, beta);
            state.undo(column);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // the other player will never let the game reach this branch
            if self.pruning && alpha >= beta {
                break;
            }
        }
        best
    }
}
