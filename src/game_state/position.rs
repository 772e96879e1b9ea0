//! 8x8 board of optional pieces.
//!
//! `Position` owns placement only; turn, counters and history live on
//! `GameState`. Cloning is cheap (a fixed array of `Copy` cells), which is
//! what the legality filter relies on for its trial moves.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::STARTING_LAYOUT;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_board_field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard initial layout.
    pub fn starting() -> Self {
        Self::from_layout(&STARTING_LAYOUT).expect("starting layout should always resolve")
    }

    /// Builds a board from eight rows of catalog symbols, eighth rank first.
    /// `' '` and `'.'` are empty squares; any other unknown symbol aborts setup.
    pub fn from_layout(rows: &[&str; 8]) -> Result<Self, ChessErrors> {
        let mut position = Position::empty();

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != 8 {
                return Err(ChessErrors::InvalidLayout(format!(
                    "row {row} has {} symbols",
                    symbols.len()
                )));
            }

            for (col, symbol) in symbols.into_iter().enumerate() {
                if symbol == ' ' || symbol == '.' {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)?;
                position.squares[row][col] = Some(piece);
            }
        }

        Ok(position)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places (or clears) a square and returns the previous occupant.
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[square.row()][square.col()], piece)
    }

    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.set_piece(square, None)
    }

    /// Occupied squares, eighth rank first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count_kind(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == kind)
            .count()
    }

    /// Canonical placement encoding (the FEN board field). Ignores `has_moved`.
    pub fn placement_key(&self) -> String {
        generate_board_field(self)
    }
}
