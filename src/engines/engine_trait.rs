//! Collaborator interfaces the rules core calls out to.
//!
//! The core never picks or scores moves itself. When a pawn reaches its last
//! rank it asks a `PromotionChooser`; a session that wants a score for the
//! current position hands its FEN to a `PositionEvaluator`.

use crate::game_state::chess_types::*;

/// Answers the promotion question for a pawn that has reached `square`.
///
/// Returning `None` or anything other than Q, R, B or N (either case) makes
/// the core ask again.
pub trait PromotionChooser {
    fn choose_promotion(&mut self, square: Square, color: Color) -> Option<char>;
}

/// Always answers with the same piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub PieceKind);

impl Default for FixedPromotion {
    fn default() -> Self {
        Self(PieceKind::Queen)
    }
}

impl PromotionChooser for FixedPromotion {
    fn choose_promotion(&mut self, _square: Square, _color: Color) -> Option<char> {
        Some(self.0.symbol().to_ascii_uppercase())
    }
}

/// Asks `chooser` until it gives a valid promotion piece.
pub fn request_promotion(
    chooser: &mut dyn PromotionChooser,
    square: Square,
    color: Color,
) -> PieceKind {
    loop {
        if let Some(answer) = chooser.choose_promotion(square, color) {
            if let Ok(kind) = PieceKind::promotion_from_char(answer) {
                return kind;
            }
        }
    }
}

/// Score reported by an external evaluator, from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Centipawns(i32),
    /// Moves to mate; positive when White mates.
    Mate(i32),
}

impl Evaluation {
    pub fn white_win_probability(&self) -> f64 {
        match *self {
            Evaluation::Centipawns(cp) => 1.0 / (1.0 + (-0.004 * f64::from(cp)).exp()),
            Evaluation::Mate(moves) if moves > 0 => 1.0,
            Evaluation::Mate(_) => 0.0,
        }
    }
}

pub trait PositionEvaluator: Send {
    fn name(&self) -> &str {
        "evaluator"
    }

    /// Scores a FEN at the requested search depth. Errors are reported as
    /// text and never affect the game.
    fn evaluate(&mut self, fen: &str, depth: u8) -> Result<Evaluation, String>;
}

#[cfg(test)]
mod tests {
    use super::{request_promotion, Evaluation, FixedPromotion, PromotionChooser};
    use crate::game_state::chess_types::{Color, PieceKind, Square};

    struct CountingChooser {
        answers: Vec<Option<char>>,
        asked: usize,
    }

    impl PromotionChooser for CountingChooser {
        fn choose_promotion(&mut self, _square: Square, _color: Color) -> Option<char> {
            self.asked += 1;
            self.answers.remove(0)
        }
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let mut chooser = CountingChooser {
            answers: vec![None, Some('p'), Some('k'), Some('r')],
            asked: 0,
        };
        let square = Square::new(0, 0).expect("a8 should be valid");
        assert_eq!(
            request_promotion(&mut chooser, square, Color::White),
            PieceKind::Rook
        );
        assert_eq!(chooser.asked, 4);
    }

    #[test]
    fn fixed_promotion_answers_uppercase() {
        let square = Square::new(7, 3).expect("d1 should be valid");
        let mut chooser = FixedPromotion(PieceKind::Bishop);
        assert_eq!(chooser.choose_promotion(square, Color::Black), Some('B'));
        assert_eq!(FixedPromotion::default().0, PieceKind::Queen);
    }

    #[test]
    fn win_probability_curve() {
        assert!((Evaluation::Centipawns(0).white_win_probability() - 0.5).abs() < 1e-12);
        assert!(Evaluation::Centipawns(400).white_win_probability() > 0.8);
        assert!(Evaluation::Centipawns(-400).white_win_probability() < 0.2);
        assert_eq!(Evaluation::Mate(3).white_win_probability(), 1.0);
        assert_eq!(Evaluation::Mate(-2).white_win_probability(), 0.0);
    }
}
