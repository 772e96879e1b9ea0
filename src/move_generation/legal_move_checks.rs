//! Attack detection for king safety.
//!
//! Everything here runs on a bare `Position` and uses only the check-unaware
//! geometry in `moves::candidate_moves`. It must never call back into the
//! legality filter: the filter asks these functions about trial positions,
//! so a call in the other direction would recurse without bound.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::candidate_moves::attacked_squares;

/// A side without a king on the board is never in check.
#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    position
        .pieces_of(attacker_color)
        .any(|(from, _)| attacked_squares(position, from).contains(&square))
}
