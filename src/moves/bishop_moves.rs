use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::rays::{trace_rays, DIAGONAL_DIRECTIONS};

pub fn bishop_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Square>) {
    trace_rays(position, from, color, &DIAGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::bishop_moves;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::position::Position;

    fn sq(name: &str) -> Square {
        name.parse().expect("square should parse")
    }

    #[test]
    fn bishop_from_d4_sees_thirteen_squares() {
        let mut out = Vec::new();
        bishop_moves(&Position::empty(), sq("d4"), Color::Black, &mut out);
        assert_eq!(out.len(), 13);
    }

    #[test]
    fn bishop_captures_enemy_blocker_only() {
        let mut position = Position::empty();
        position.set_piece(sq("f6"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        position.set_piece(sq("b2"), Some(Piece::new(PieceKind::Pawn, Color::White)));

        let mut out = Vec::new();
        bishop_moves(&position, sq("d4"), Color::White, &mut out);

        assert!(out.contains(&sq("e5")));
        assert!(out.contains(&sq("f6")));
        assert!(!out.contains(&sq("g7")));
        assert!(out.contains(&sq("c3")));
        assert!(!out.contains(&sq("b2")));
    }
}
