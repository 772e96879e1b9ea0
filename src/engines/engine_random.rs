//! Uniform random mover.
//!
//! Picks any legal move with equal probability. It never scores positions;
//! the CLI uses it for `random`, and tests use a seeded instance for
//! reproducible self-play.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::PromotionChooser;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::all_legal_moves;

pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A legal move for the side to move, promotion piece included, or
    /// `None` when there is none.
    pub fn choose_move(&mut self, game_state: &GameState) -> Option<ChessMove> {
        let legal_moves = all_legal_moves(game_state);
        legal_moves.choose(&mut self.rng).copied()
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl PromotionChooser for RandomMover {
    fn choose_promotion(&mut self, _square: Square, _color: Color) -> Option<char> {
        PROMOTION_KINDS
            .choose(&mut self.rng)
            .map(|kind| kind.symbol().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::RandomMover;
    use crate::game_state::chess_types::GameState;
    use crate::move_generation::legal_move_generator::all_legal_moves;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn chosen_move_is_legal() {
        let game = GameState::new_game();
        let mut mover = RandomMover::seeded(7);
        let legal = all_legal_moves(&game);
        for _ in 0..20 {
            let mv = mover.choose_move(&game).expect("start position has moves");
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = RandomMover::seeded(42);
        let mut b = RandomMover::seeded(42);
        let mut game_a = GameState::new_game();
        let mut game_b = GameState::new_game();

        for _ in 0..30 {
            let (Some(mv_a), Some(mv_b)) = (a.choose_move(&game_a), b.choose_move(&game_b)) else {
                break;
            };
            assert_eq!(mv_a, mv_b);
            game_a.apply_chess_move(mv_a, &mut a).expect("random move should be legal");
            game_b.apply_chess_move(mv_b, &mut b).expect("random move should be legal");
        }
        assert_eq!(game_a.get_fen(), game_b.get_fen());
    }

    #[test]
    fn no_move_when_mated() {
        let mated = parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert_eq!(RandomMover::seeded(1).choose_move(&mated), None);
    }
}
