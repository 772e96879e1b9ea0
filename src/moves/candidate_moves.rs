//! Check-unaware move geometry for any occupied square.
//!
//! This is the only generator the attack scan is allowed to use, so nothing
//! in this module may consult king safety, turn order or game history.

use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::position::Position;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::{pawn_attacks, pawn_moves};
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

/// Pseudo-legal destinations of the piece on `from`; empty for an empty square.
pub fn candidate_moves(position: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    let Some(piece) = position.piece_at(from) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece.color, &mut out),
        PieceKind::Knight => knight_moves(position, from, piece.color, &mut out),
        PieceKind::Bishop => bishop_moves(position, from, piece.color, &mut out),
        PieceKind::Rook => rook_moves(position, from, piece.color, &mut out),
        PieceKind::Queen => queen_moves(position, from, piece.color, &mut out),
        PieceKind::King => king_moves(position, from, piece.color, &mut out),
    }

    out
}

/// Squares the piece on `from` attacks. Identical to `candidate_moves` except
/// that pawns attack both forward diagonals even when those are empty.
pub fn attacked_squares(position: &Position, from: Square) -> Vec<Square> {
    match position.piece_at(from) {
        Some(piece) if piece.kind == PieceKind::Pawn => {
            pawn_attacks(from, piece.color).collect()
        }
        Some(_) => candidate_moves(position, from),
        None => Vec::new(),
    }
}
