//! Core value types shared by every layer of the rules engine.
//!
//! Squares use a row/column grid where row 0 is the eighth rank and column 0
//! is the a-file, matching how the board is laid out on screen. The piece
//! catalog (symbol <-> kind/color) also lives here.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::utils::algebraic::square_to_algebraic;

pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline]
    pub const fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row a pawn of this color must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_row(self) -> usize {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }

    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Kinds a pawn may become on the last rank.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    /// Lowercase notation letter.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Piece catalog lookup: uppercase symbols are White, lowercase Black.
    pub fn from_symbol(symbol: char) -> Option<(Color, PieceKind)> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else if symbol.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };

        let kind = match symbol.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        Some((color, kind))
    }

    /// Parses a promotion answer in either case.
    pub fn promotion_from_char(ch: char) -> Result<PieceKind, ChessErrors> {
        match ch.to_ascii_lowercase() {
            'q' => Ok(PieceKind::Queen),
            'r' => Ok(PieceKind::Rook),
            'b' => Ok(PieceKind::Bishop),
            'n' => Ok(PieceKind::Knight),
            _ => Err(ChessErrors::InvalidPromotionChoice(ch)),
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

/// A piece on the board. `has_moved` flips once, on the first relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, ChessErrors> {
        PieceKind::from_symbol(symbol)
            .map(|(color, kind)| Piece::new(kind, color))
            .ok_or(ChessErrors::UnknownPieceSymbol(symbol))
    }

    /// FEN letter: uppercase for White.
    #[inline]
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            Color::Black => self.kind.symbol(),
        }
    }

    #[inline]
    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// Board coordinate. Construction is always range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: i32, col: i32) -> Result<Self, ChessErrors> {
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return Err(ChessErrors::InvalidSquare { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Neighbouring square, or `None` when the step leaves the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Square> {
        Square::new(self.row as i32 + d_row, self.col as i32 + d_col).ok()
    }

    /// All 64 squares, eighth rank first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Squares strictly between two squares on the same row.
    pub(crate) fn between_on_row(a: Square, b: Square) -> impl Iterator<Item = Square> {
        let row = a.row;
        let (lo, hi) = if a.col < b.col {
            (a.col, b.col)
        } else {
            (b.col, a.col)
        };
        (lo + 1..hi).map(move |col| Square { row, col })
    }

    /// Square from trusted in-range coordinates (board loops and rule
    /// constants). Untrusted input goes through `Square::new`.
    #[inline]
    pub(crate) fn on_row(row: usize, col: usize) -> Square {
        debug_assert!(row < 8 && col < 8, "on_row({row}, {col}) is off the board");
        Square {
            row: row as u8,
            col: col as u8,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(*self))
    }
}

/// A move intent as exchanged with collaborators and the UCI codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}
