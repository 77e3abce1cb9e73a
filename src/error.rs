//! Error types for position setup and move selection.

use std::fmt;

/// Error type for the checked entry points of [`crate::Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// FEN string rejected by the rules engine
    InvalidFen { fen: String },
    /// Move string is not valid UCI notation
    InvalidMove { notation: String },
    /// Move is well formed but not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidFen { fen } => write!(f, "Invalid FEN '{fen}'"),
            PositionError::InvalidMove { notation } => {
                write!(f, "Invalid move notation '{notation}'")
            }
            PositionError::IllegalMove { notation } => write!(f, "Illegal move '{notation}'"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The root position has no legal move; callers must not ask for a move
    /// in a finished game.
    NoLegalMoves,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMoves => write!(f, "No legal moves in the root position"),
        }
    }
}

impl std::error::Error for SearchError {}
