use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn knight_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Square>) {
    step_moves(position, from, color, &KNIGHT_OFFSETS, out);
}

/// Fixed-offset targets, skipping squares held by `color`.
pub(crate) fn step_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i32, i32)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match position.piece_at(to) {
            Some(occupant) if occupant.color == color => {}
            _ => out.push(to),
        }
    }
}
