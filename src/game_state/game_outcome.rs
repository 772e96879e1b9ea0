//! Game status evaluation run after every accepted move.
//!
//! Checks are made in a fixed order and the first match wins: checkmate,
//! check, stalemate, insufficient material, the fifty-move rule, then
//! threefold repetition. A position that is both in check and drawn by a
//! counter therefore reports `Check`.

use std::fmt;

use crate::game_state::chess_rules::{FIFTY_MOVE_LIMIT, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    DrawInsufficientMaterial,
    DrawFiftyMove,
    DrawThreefoldRepetition,
}

impl GameStatus {
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawInsufficientMaterial
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawThreefoldRepetition
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate) || self.is_draw()
    }

    /// PGN result tag. `side_to_move` is the side that would move next, so
    /// after checkmate it is the loser.
    pub fn pgn_result(self, side_to_move: Color) -> &'static str {
        match self {
            GameStatus::Checkmate => match side_to_move {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            status if status.is_draw() => "1/2-1/2",
            _ => "*",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Ongoing => "in progress",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "draw by stalemate",
            GameStatus::DrawInsufficientMaterial => "draw by insufficient material",
            GameStatus::DrawFiftyMove => "draw by the fifty-move rule",
            GameStatus::DrawThreefoldRepetition => "draw by threefold repetition",
        };
        f.write_str(text)
    }
}

pub fn evaluate_outcome(game_state: &GameState) -> GameStatus {
    let to_move = game_state.side_to_move();
    let in_check = is_king_in_check(game_state.position(), to_move);
    let can_move = has_any_legal_move(game_state);

    if in_check && !can_move {
        GameStatus::Checkmate
    } else if in_check {
        GameStatus::Check
    } else if !can_move {
        GameStatus::Stalemate
    } else if is_insufficient_material(game_state.position()) {
        GameStatus::DrawInsufficientMaterial
    } else if is_fifty_move_draw(game_state) {
        GameStatus::DrawFiftyMove
    } else if is_threefold_repetition(game_state) {
        GameStatus::DrawThreefoldRepetition
    } else {
        GameStatus::Ongoing
    }
}

/// Each side has at most one piece besides its king, and that piece (if
/// any) is a bishop or a knight.
pub fn is_insufficient_material(position: &Position) -> bool {
    [Color::White, Color::Black].into_iter().all(|color| {
        let mut others = position
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind != PieceKind::King);

        match (others.next(), others.next()) {
            (None, _) => true,
            (Some((_, piece)), None) => {
                matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight)
            }
            (Some(_), Some(_)) => false,
        }
    })
}

/// Either counter reaching the limit triggers the draw.
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmoves_since_pawn_move() >= FIFTY_MOVE_LIMIT
        || game_state.halfmoves_since_capture() >= FIFTY_MOVE_LIMIT
}

pub fn is_threefold_repetition(game_state: &GameState) -> bool {
    game_state.repetition_count() >= REPETITION_LIMIT
}
