use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::FixedPromotion;
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameStatus;
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf nodes (and what the last move did) `depth` plies below
/// `game_state`. Every node is reached through `GameState::apply_chess_move`,
/// so this exercises the same path as interactive play.
pub fn perft(game_state: &GameState, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(game_state) {
        let mut child = game_state.clone();
        let applied = child.apply_chess_move(mv, &mut FixedPromotion::default())?;

        if depth == 1 {
            total.nodes += 1;
            total.captures += usize::from(applied.captured.is_some());
            total.en_passant += usize::from(applied.kind.is_en_passant());
            total.castles += usize::from(applied.kind.is_castling());
            total.promotions += usize::from(applied.promotion.is_some());
            total.checks += usize::from(matches!(
                applied.status,
                GameStatus::Check | GameStatus::Checkmate
            ));
            total.checkmates += usize::from(applied.status == GameStatus::Checkmate);
        } else {
            total.merge(perft(&child, depth - 1)?);
        }
    }

    Ok(total)
}

/// Per-root-move node counts, sorted by UCI text.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Result<Vec<(String, usize)>, ChessErrors> {
    let mut out = Vec::new();
    for mv in all_legal_moves(game_state) {
        let mut child = game_state.clone();
        let applied = child.apply_chess_move(mv, &mut FixedPromotion::default())?;
        let nodes = perft(&child, depth.saturating_sub(1))?.nodes;
        out.push((applied.uci, nodes));
    }
    out.sort();
    Ok(out)
}
