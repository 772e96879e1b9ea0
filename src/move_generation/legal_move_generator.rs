//! Full legal move lists.
//!
//! Candidate targets come from the piece geometry plus the special-move
//! squares geometry does not produce (castling targets and en-passant
//! diagonals); each one is then run through the legality filter.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_filter::{classify_move, requires_promotion};
use crate::moves::candidate_moves::candidate_moves;
use crate::moves::pawn_moves::pawn_attacks;

/// Legal moves of the piece on `from`. Promotions appear once per choice.
pub fn legal_moves_from(game_state: &GameState, from: Square) -> Vec<ChessMove> {
    let position = game_state.position();
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };
    if piece.color != game_state.side_to_move() {
        return Vec::new();
    }

    let mut targets = candidate_moves(position, from);
    match piece.kind {
        PieceKind::King => targets.extend([from.offset(0, 2), from.offset(0, -2)].into_iter().flatten()),
        PieceKind::Pawn => targets.extend(pawn_attacks(from, piece.color)),
        _ => {}
    }
    targets.sort();
    targets.dedup();

    let mut out = Vec::with_capacity(targets.len());
    for to in targets {
        if classify_move(game_state, from, to).is_none() {
            continue;
        }
        if requires_promotion(position, from, to) {
            out.extend(
                PROMOTION_KINDS
                    .iter()
                    .map(|&kind| ChessMove::with_promotion(from, to, kind)),
            );
        } else {
            out.push(ChessMove::new(from, to));
        }
    }
    out
}

pub fn all_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    game_state
        .position()
        .pieces_of(game_state.side_to_move())
        .flat_map(|(from, _)| legal_moves_from(game_state, from))
        .collect()
}

pub fn has_any_legal_move(game_state: &GameState) -> bool {
    game_state
        .position()
        .pieces_of(game_state.side_to_move())
        .any(|(from, _)| !legal_moves_from(game_state, from).is_empty())
}
