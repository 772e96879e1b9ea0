//! FEN export.
//!
//! The castling field is written in standard form: the available rights in
//! K, Q, k, q order, or a single `-` when no side may castle. A dash is never
//! emitted per missing right, so every exported string is accepted by UCI
//! engines and by `fen_parser`.

use crate::game_state::chess_rules::{
    KING_START_COL, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state.position());
    let side_to_move = game_state.side_to_move().fen_char();
    let castling = generate_castling_field(game_state.position());
    let en_passant = generate_en_passant_field(game_state.en_passant_target());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    )
}

pub fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for row in 0..8 {
        let mut empty_count = 0u8;

        for col in 0..8 {
            match position.piece_at(Square::on_row(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.symbol());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

/// Castling rights read live from the `has_moved` flags of the kings and
/// their home-square rooks, in K, Q, k, q order.
pub fn generate_castling_field(position: &Position) -> String {
    let mut out = String::new();

    for color in [Color::White, Color::Black] {
        for (rook_col, letter) in [(KINGSIDE_ROOK_COL, 'k'), (QUEENSIDE_ROOK_COL, 'q')] {
            if castling_pieces_unmoved(position, color, rook_col) {
                out.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

pub(crate) fn castling_pieces_unmoved(position: &Position, color: Color, rook_col: usize) -> bool {
    let row = color.back_row();
    let king = position.piece_at(Square::on_row(row, KING_START_COL));
    let rook = position.piece_at(Square::on_row(row, rook_col));

    matches!(king, Some(k) if k.is(PieceKind::King, color) && !k.has_moved)
        && matches!(rook, Some(r) if r.is(PieceKind::Rook, color) && !r.has_moved)
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    match square {
        Some(square) => square_to_algebraic(square),
        None => "-".to_owned(),
    }
}
