//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by board access, move
//! validation, notation codecs and the session layer. Each variant carries
//! enough context to build a diagnostic line without re-inspecting the game.
//!
//! Usage guidelines:
//! - Input-shaped variants (`InvalidSquare`, `InvalidAlgebraic`, `InvalidFen`,
//!   `InvalidPromotionChoice`) are recoverable and suitable for showing to a
//!   user.
//! - `InvalidMove` is the per-move rejection; the game state is untouched.
//! - `UnknownPieceSymbol` aborts board setup and is a configuration problem,
//!   not a per-move condition.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Coordinates outside `0..=7` were supplied.
    ///
    /// Payload: the raw (row, col) that was rejected.
    InvalidSquare { row: i32, col: i32 },

    /// The proposed move is not legal in the current game state.
    InvalidMove { from: Square, to: Square },

    /// A square or move string could not be parsed.
    InvalidAlgebraic(String),

    /// A layout symbol is not in the piece catalog.
    UnknownPieceSymbol(char),

    /// A setup layout row does not hold exactly eight symbols.
    InvalidLayout(String),

    /// A FEN string is malformed or describes an impossible setup.
    InvalidFen(String),

    /// A promotion answer outside {Q, R, B, N}.
    InvalidPromotionChoice(char),

    /// The position-evaluation collaborator reported a failure.
    Evaluation(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::InvalidSquare { row, col } => {
                write!(f, "square ({row}, {col}) is off the board")
            }
            ChessErrors::InvalidMove { from, to } => write!(f, "illegal move {from}{to}"),
            ChessErrors::InvalidAlgebraic(text) => write!(f, "invalid algebraic text: {text}"),
            ChessErrors::UnknownPieceSymbol(ch) => write!(f, "unknown piece symbol '{ch}'"),
            ChessErrors::InvalidLayout(msg) => write!(f, "invalid board layout: {msg}"),
            ChessErrors::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidPromotionChoice(ch) => {
                write!(f, "'{ch}' is not a promotion choice (expected Q, R, B or N)")
            }
            ChessErrors::Evaluation(msg) => write!(f, "evaluation failed: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
