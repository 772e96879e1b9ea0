use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::knight_moves::step_moves;

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One-square king steps. Castling is not geometry and is decided by the
/// legality filter.
pub fn king_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Square>) {
    step_moves(position, from, color, &KING_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::king_moves;
    use crate::game_state::chess_types::{Color, Square};
    use crate::game_state::position::Position;

    #[test]
    fn king_in_corner_has_three_steps() {
        let a1: Square = "a1".parse().expect("a1 should parse");
        let mut out = Vec::new();
        king_moves(&Position::empty(), a1, Color::White, &mut out);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn king_does_not_castle_geometrically() {
        let e1: Square = "e1".parse().expect("e1 should parse");
        let mut out = Vec::new();
        king_moves(&Position::starting(), e1, Color::White, &mut out);
        assert!(out.is_empty());
    }
}
