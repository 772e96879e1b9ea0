//! Square conversions for algebraic coordinates.
//!
//! Column 0 is the a-file and row 0 is the eighth rank, so `e2` is row 6,
//! column 4.

use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let col = i32::from(file - b'a');
    let row = 8 - i32::from(rank - b'0');
    Square::new(row, col)
}

/// Convert a square to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.col() as u8);
    let rank_char = char::from(b'8' - square.row() as u8);
    format!("{file_char}{rank_char}")
}

impl FromStr for Square {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}
