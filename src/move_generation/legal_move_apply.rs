//! Board mutation shared by trial moves and accepted moves.
//!
//! `simulate_move` works on a clone so the legality filter never touches the
//! live game; `GameState` calls `relocate_pieces` on its own board once a
//! move has been accepted. Both paths use the same relocation code.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_filter::MoveKind;

/// Moves the piece on `from` (and the paired rook when castling) and returns
/// the captured piece. Every relocated piece is marked as moved.
pub fn relocate_pieces(
    position: &mut Position,
    from: Square,
    to: Square,
    kind: MoveKind,
) -> Option<Piece> {
    let mut moving = position.take_piece(from)?;
    moving.has_moved = true;
    let mut captured = position.set_piece(to, Some(moving));

    match kind {
        MoveKind::EnPassant { captured: pawn_square } => {
            captured = position.take_piece(pawn_square);
        }
        MoveKind::Castling { rook_from, rook_to } => {
            if let Some(mut rook) = position.take_piece(rook_from) {
                rook.has_moved = true;
                position.set_piece(rook_to, Some(rook));
            }
        }
        MoveKind::Standard | MoveKind::DoublePawnPush => {}
    }

    captured
}

/// Applies a move to a copy of `position`.
pub fn simulate_move(position: &Position, from: Square, to: Square, kind: MoveKind) -> Position {
    let mut trial = position.clone();
    relocate_pieces(&mut trial, from, to, kind);
    trial
}

/// Replaces the pawn on `square` with a piece of `kind`, keeping its color.
pub fn promote(position: &mut Position, square: Square, kind: PieceKind) {
    if let Some(mut piece) = position.piece_at(square) {
        piece.kind = kind;
        position.set_piece(square, Some(piece));
    }
}
