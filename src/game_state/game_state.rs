//! Authoritative game state.
//!
//! `GameState` owns the board plus everything a rule needs beyond placement:
//! whose turn it is, the last move (for en passant), the two draw counters,
//! the repetition table, capture inventories and the move log. All mutation
//! goes through `apply_move` and its wrappers, and nothing is changed until
//! the move has passed the legality filter and the promotion choice (if any)
//! has been resolved.

use std::collections::HashMap;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{request_promotion, FixedPromotion, PromotionChooser};
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::{evaluate_outcome, GameStatus};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{promote, relocate_pieces};
use crate::move_generation::legal_move_filter::{
    classify_move, normalize_target, requires_promotion, MoveKind,
};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::{decode_uci, move_to_uci};

/// The previous move as seen by the en-passant rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

impl LastMove {
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Square a capturing pawn would land on.
    pub fn en_passant_target(&self) -> Option<Square> {
        if !self.is_double_pawn_push() {
            return None;
        }
        self.from.offset(self.piece.color.forward(), 0)
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub chess_move: ChessMove,
    pub moved: PieceKind,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
    pub uci: String,
    pub status: GameStatus,
}

/// Starting point for a game that does not begin at move zero.
#[derive(Debug, Clone)]
pub(crate) struct GameSetup {
    pub position: Position,
    pub side_to_move: Color,
    pub last_move: Option<LastMove>,
    pub halfmove_clock: u32,
    pub ply_offset: u32,
}

#[derive(Debug, Clone)]
pub struct GameState {
    position: Position,
    side_to_move: Color,
    last_move: Option<LastMove>,

    move_list: Vec<ChessMove>,
    uci_moves: Vec<String>,

    // Placement key -> times seen, including the starting placement.
    position_counts: HashMap<String, usize>,

    halfmoves_since_pawn_move: u32,
    halfmoves_since_capture: u32,

    captured_by_white: Vec<PieceKind>,
    captured_by_black: Vec<PieceKind>,

    // Plies played before `move_list` starts, for FEN imports.
    ply_offset: u32,
    initial_fen: String,
    status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        Self::from_setup(GameSetup {
            position: Position::starting(),
            side_to_move: Color::White,
            last_move: None,
            halfmove_clock: 0,
            ply_offset: 0,
        })
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    pub(crate) fn from_setup(setup: GameSetup) -> Self {
        let mut position_counts = HashMap::new();
        position_counts.insert(setup.position.placement_key(), 1);

        let mut state = Self {
            position: setup.position,
            side_to_move: setup.side_to_move,
            last_move: setup.last_move,
            move_list: Vec::new(),
            uci_moves: Vec::new(),
            position_counts,
            halfmoves_since_pawn_move: setup.halfmove_clock,
            halfmoves_since_capture: setup.halfmove_clock,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            ply_offset: setup.ply_offset,
            initial_fen: String::new(),
            status: GameStatus::Ongoing,
        };
        state.initial_fen = generate_fen(&state);
        state.status = evaluate_outcome(&state);
        state
    }

    /// Back to the standard starting position with empty history.
    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.last_move.and_then(|last| last.en_passant_target())
    }

    pub fn move_list(&self) -> &[ChessMove] {
        &self.move_list
    }

    pub fn uci_moves(&self) -> &[String] {
        &self.uci_moves
    }

    pub fn halfmoves_since_pawn_move(&self) -> u32 {
        self.halfmoves_since_pawn_move
    }

    pub fn halfmoves_since_capture(&self) -> u32 {
        self.halfmoves_since_capture
    }

    /// FEN halfmove clock: plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmoves_since_pawn_move.min(self.halfmoves_since_capture)
    }

    /// Plies since the start of the game, including any imported from FEN.
    pub fn ply_count(&self) -> u32 {
        self.ply_offset + self.move_list.len() as u32
    }

    /// Completed move pairs, so a fresh game reports 0.
    pub fn fullmove_number(&self) -> u32 {
        self.ply_count() / 2
    }

    /// Kinds captured by `color`, in capture order.
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    /// Occurrences of the current placement, this one included.
    pub fn repetition_count(&self) -> usize {
        self.position_counts
            .get(&self.position.placement_key())
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Plays `from -> to` for the side to move. A pawn reaching its last rank
    /// asks `chooser` until it answers Q, R, B or N.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, ChessErrors> {
        let requested_to = to;
        let to = normalize_target(&self.position, from, to);
        let kind = classify_move(self, from, to).ok_or(ChessErrors::InvalidMove {
            from,
            to: requested_to,
        })?;
        let mover = self.position.piece_at(from).ok_or(ChessErrors::InvalidMove {
            from,
            to: requested_to,
        })?;

        let promotion = if requires_promotion(&self.position, from, to) {
            Some(request_promotion(chooser, to, mover.color))
        } else {
            None
        };

        let captured = relocate_pieces(&mut self.position, from, to, kind);
        if let Some(promoted) = promotion {
            promote(&mut self.position, to, promoted);
        }

        if let Some(captured) = captured {
            match mover.color {
                Color::White => self.captured_by_white.push(captured.kind),
                Color::Black => self.captured_by_black.push(captured.kind),
            }
        }

        self.halfmoves_since_pawn_move = if mover.kind == PieceKind::Pawn {
            0
        } else {
            self.halfmoves_since_pawn_move + 1
        };
        self.halfmoves_since_capture = if captured.is_some() {
            0
        } else {
            self.halfmoves_since_capture + 1
        };

        let chess_move = ChessMove {
            from,
            to,
            promotion,
        };
        let uci = move_to_uci(&self.position, from, to, mover.kind);
        self.move_list.push(chess_move);
        self.uci_moves.push(uci.clone());
        self.last_move = Some(LastMove {
            from,
            to,
            piece: mover,
        });

        *self
            .position_counts
            .entry(self.position.placement_key())
            .or_insert(0) += 1;

        self.side_to_move = self.side_to_move.opposite();
        self.status = evaluate_outcome(self);

        Ok(AppliedMove {
            chess_move,
            moved: mover.kind,
            captured,
            kind,
            promotion,
            uci,
            status: self.status,
        })
    }

    /// Plays a fully specified move. A promotion piece on the move is used as
    /// is; without one, `chooser` is asked as in `apply_move`.
    pub fn apply_chess_move(
        &mut self,
        chess_move: ChessMove,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, ChessErrors> {
        let Some(kind) = chess_move.promotion else {
            return self.apply_move(chess_move.from, chess_move.to, chooser);
        };

        if !kind.is_promotion_choice() {
            return Err(ChessErrors::InvalidPromotionChoice(
                kind.symbol().to_ascii_uppercase(),
            ));
        }
        if !requires_promotion(&self.position, chess_move.from, chess_move.to) {
            return Err(ChessErrors::InvalidMove {
                from: chess_move.from,
                to: chess_move.to,
            });
        }

        self.apply_move(chess_move.from, chess_move.to, &mut FixedPromotion(kind))
    }

    /// Plays a move given in UCI long algebraic form (`e2e4`, `e7e8Q`).
    pub fn apply_uci(
        &mut self,
        text: &str,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, ChessErrors> {
        let chess_move = decode_uci(text)?;
        self.apply_chess_move(chess_move, chooser)
    }
}
