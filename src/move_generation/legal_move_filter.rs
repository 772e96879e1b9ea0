//! Legality filter for a single proposed move.
//!
//! A move is legal when it is geometrically available (or is one of the
//! history-dependent specials: castling and en passant) and the mover's king
//! is not attacked once it has been made on a trial board.

use crate::game_state::chess_rules::{
    KING_START_COL, KINGSIDE_KING_COL, KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL,
    QUEENSIDE_KING_COL, QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::simulate_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::candidate_moves::candidate_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Standard,
    DoublePawnPush,
    EnPassant { captured: Square },
    Castling { rook_from: Square, rook_to: Square },
}

impl MoveKind {
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::Castling { .. })
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self, MoveKind::EnPassant { .. })
    }
}

/// Maps "king onto its own unmoved rook" to the two-square king move it
/// stands for. Any other input is returned unchanged.
pub fn normalize_target(position: &Position, from: Square, to: Square) -> Square {
    let (Some(king), Some(rook)) = (position.piece_at(from), position.piece_at(to)) else {
        return to;
    };

    let row = king.color.back_row();
    let is_alias = king.kind == PieceKind::King
        && !king.has_moved
        && rook.is(PieceKind::Rook, king.color)
        && !rook.has_moved
        && from.row() == row
        && from.col() == KING_START_COL
        && to.row() == row;

    if !is_alias {
        return to;
    }

    match to.col() {
        KINGSIDE_ROOK_COL => Square::on_row(row, KINGSIDE_KING_COL),
        QUEENSIDE_ROOK_COL => Square::on_row(row, QUEENSIDE_KING_COL),
        _ => to,
    }
}

/// Classifies `from -> to` for the side to move, or returns `None` when the
/// move is illegal. `to` is taken literally; callers normalize aliases first.
pub fn classify_move(game: &GameState, from: Square, to: Square) -> Option<MoveKind> {
    let position = game.position();
    let piece = position.piece_at(from)?;
    if piece.color != game.side_to_move() || from == to {
        return None;
    }

    let is_castling_shape = piece.kind == PieceKind::King
        && from.row() == to.row()
        && from.col().abs_diff(to.col()) == 2;

    let kind = if is_castling_shape {
        castling_move(position, from, to, piece)?
    } else if let Some(kind) = en_passant_move(game, from, to, piece) {
        kind
    } else if candidate_moves(position, from).contains(&to) {
        if piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            MoveKind::DoublePawnPush
        } else {
            MoveKind::Standard
        }
    } else {
        return None;
    };

    let trial = simulate_move(position, from, to, kind);
    if is_king_in_check(&trial, piece.color) {
        None
    } else {
        Some(kind)
    }
}

pub fn is_legal(game: &GameState, from: Square, to: Square) -> bool {
    let to = normalize_target(game.position(), from, to);
    classify_move(game, from, to).is_some()
}

/// True when the piece on `from` is a pawn heading for its last rank.
pub fn requires_promotion(position: &Position, from: Square, to: Square) -> bool {
    matches!(
        position.piece_at(from),
        Some(piece) if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row()
    )
}

fn castling_move(position: &Position, from: Square, to: Square, king: Piece) -> Option<MoveKind> {
    let color = king.color;
    let row = color.back_row();
    if king.has_moved || from.row() != row || from.col() != KING_START_COL {
        return None;
    }

    let (rook_col, rook_target_col) = match to.col() {
        KINGSIDE_KING_COL => (KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL),
        QUEENSIDE_KING_COL => (QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL),
        _ => return None,
    };

    let rook_from = Square::on_row(row, rook_col);
    match position.piece_at(rook_from) {
        Some(rook) if rook.is(PieceKind::Rook, color) && !rook.has_moved => {}
        _ => return None,
    }

    if Square::between_on_row(from, rook_from).any(|sq| !position.is_empty(sq)) {
        return None;
    }

    // Start, transit and destination squares must all be safe.
    let enemy = color.opposite();
    let (low, high) = (from.col().min(to.col()), from.col().max(to.col()));
    if (low..=high).any(|col| is_square_attacked(position, Square::on_row(row, col), enemy)) {
        return None;
    }

    Some(MoveKind::Castling {
        rook_from,
        rook_to: Square::on_row(row, rook_target_col),
    })
}

fn en_passant_move(game: &GameState, from: Square, to: Square, pawn: Piece) -> Option<MoveKind> {
    if pawn.kind != PieceKind::Pawn {
        return None;
    }

    let last = game.last_move()?;
    let color = pawn.color;
    if !last.is_double_pawn_push() || last.piece.color == color {
        return None;
    }

    let beside = from.row() == color.en_passant_row()
        && last.to.row() == from.row()
        && last.to.col().abs_diff(from.col()) == 1;
    let behind = Some(to) == last.to.offset(color.forward(), 0);
    if !beside || !behind || !game.position().is_empty(to) {
        return None;
    }

    match game.position().piece_at(last.to) {
        Some(victim) if victim.is(PieceKind::Pawn, color.opposite()) => {
            Some(MoveKind::EnPassant { captured: last.to })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_move, is_legal, normalize_target, requires_promotion, MoveKind};
    use crate::game_state::chess_types::{GameState, Square};
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        name.parse().expect("square should parse")
    }

    fn game(fen: &str) -> GameState {
        parse_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn opening_moves_are_classified() {
        let start = GameState::new_game();
        assert_eq!(
            classify_move(&start, sq("e2"), sq("e4")),
            Some(MoveKind::DoublePawnPush)
        );
        assert_eq!(
            classify_move(&start, sq("g1"), sq("f3")),
            Some(MoveKind::Standard)
        );
        assert_eq!(classify_move(&start, sq("e2"), sq("e5")), None);
        assert_eq!(classify_move(&start, sq("e7"), sq("e5")), None);
        assert_eq!(classify_move(&start, sq("e4"), sq("e5")), None);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let pinned = game("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!is_legal(&pinned, sq("e2"), sq("c3")));
        assert!(is_legal(&pinned, sq("e1"), sq("d1")));
    }

    #[test]
    fn castling_requires_safe_transit() {
        let open = game("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(matches!(
            classify_move(&open, sq("e1"), sq("g1")),
            Some(MoveKind::Castling { .. })
        ));
        assert!(is_legal(&open, sq("e1"), sq("c1")));

        let f1_attacked = game("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!is_legal(&f1_attacked, sq("e1"), sq("g1")));
        assert!(is_legal(&f1_attacked, sq("e1"), sq("c1")));

        let in_check = game("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!is_legal(&in_check, sq("e1"), sq("g1")));
        assert!(!is_legal(&in_check, sq("e1"), sq("c1")));
    }

    #[test]
    fn castling_needs_empty_path_and_unmoved_pieces() {
        let blocked = game("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(!is_legal(&blocked, sq("e1"), sq("g1")));
        assert!(!is_legal(&blocked, sq("e1"), sq("c1")));

        let no_rights = game("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert!(!is_legal(&no_rights, sq("e1"), sq("g1")));
    }

    #[test]
    fn king_onto_own_rook_means_castling() {
        let open = game("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let position = open.position();
        assert_eq!(normalize_target(position, sq("e1"), sq("h1")), sq("g1"));
        assert_eq!(normalize_target(position, sq("e1"), sq("a1")), sq("c1"));
        assert_eq!(normalize_target(position, sq("e1"), sq("f1")), sq("f1"));
        assert!(is_legal(&open, sq("e1"), sq("h1")));
    }

    #[test]
    fn en_passant_only_right_after_the_double_push() {
        let ready = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(
            classify_move(&ready, sq("e5"), sq("d6")),
            Some(MoveKind::EnPassant { captured: sq("d5") })
        );

        let stale = game("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        assert_eq!(classify_move(&stale, sq("e5"), sq("d6")), None);
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_rejected() {
        let pinned = game("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
        assert!(!is_legal(&pinned, sq("e5"), sq("d6")));
    }

    #[test]
    fn promotion_detection() {
        let near = game("4k3/P7/8/8/8/8/7p/4K3 w - - 0 1");
        assert!(requires_promotion(near.position(), sq("a7"), sq("a8")));
        assert!(requires_promotion(near.position(), sq("h2"), sq("h1")));
        assert!(!requires_promotion(near.position(), sq("e1"), sq("e2")));
    }
}
