//! Ray casting shared by the sliding pieces.

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;

pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Walks from `from` (exclusive) until the edge or the first occupied square.
/// The blocker is included only when it belongs to the other side.
pub fn trace_ray(
    position: &Position,
    from: Square,
    color: Color,
    (d_row, d_col): (i32, i32),
    out: &mut Vec<Square>,
) {
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        match position.piece_at(next) {
            None => out.push(next),
            Some(blocker) => {
                if blocker.color != color {
                    out.push(next);
                }
                break;
            }
        }
        current = next;
    }
}

pub fn trace_rays(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i32, i32)],
    out: &mut Vec<Square>,
) {
    for &direction in directions {
        trace_ray(position, from, color, direction, out);
    }
}
