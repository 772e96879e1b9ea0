use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::rays::{trace_rays, ORTHOGONAL_DIRECTIONS};

pub fn rook_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Square>) {
    trace_rays(position, from, color, &ORTHOGONAL_DIRECTIONS, out);
}
