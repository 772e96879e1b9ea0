use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;

/// Pushes and diagonal captures onto occupied enemy squares. En passant is
/// not geometry and is decided by the legality filter.
pub fn pawn_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Square>) {
    let forward = color.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if position.is_empty(one_step) {
            out.push(one_step);

            if from.row() == color.pawn_start_row() {
                if let Some(two_step) = from.offset(2 * forward, 0) {
                    if position.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for target in pawn_attacks(from, color) {
        if let Some(occupant) = position.piece_at(target) {
            if occupant.color != color {
                out.push(target);
            }
        }
    }
}

/// The two forward diagonals a pawn covers, whether occupied or not.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let forward = color.forward();
    [-1, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(forward, d_col))
}
