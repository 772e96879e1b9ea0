//! Canonical chess-rule constants.
//!
//! Static literals for game setup and the draw rules: the starting layout as
//! catalog symbols, its FEN export, and the counter thresholds.

/// Starting layout, eighth rank first. Blank means an empty square.
pub const STARTING_LAYOUT: [&str; 8] = [
    "rnbqkbnr",
    "pppppppp",
    "        ",
    "        ",
    "        ",
    "        ",
    "PPPPPPPP",
    "RNBQKBNR",
];

/// FEN the engine exports for a fresh game (the fullmove field counts
/// completed move pairs, so it starts at 0).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

/// Either half-move counter reaching this value is a draw.
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// Occurrences of one placement needed for a repetition draw.
pub const REPETITION_LIMIT: usize = 3;

/// King columns before and after castling, and the paired rook columns.
pub const KING_START_COL: usize = 4;
pub const KINGSIDE_KING_COL: usize = 6;
pub const QUEENSIDE_KING_COL: usize = 2;
pub const KINGSIDE_ROOK_COL: usize = 7;
pub const QUEENSIDE_ROOK_COL: usize = 0;
pub const KINGSIDE_ROOK_TARGET_COL: usize = 5;
pub const QUEENSIDE_ROOK_TARGET_COL: usize = 3;
