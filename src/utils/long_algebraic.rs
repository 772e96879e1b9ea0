//! UCI long algebraic move text: `e2e4`, `e7e8Q`.
//!
//! Encoding writes the promotion letter in uppercase. Decoding accepts it in
//! either case and only checks shape; legality is decided by `GameState`.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn encode_uci(chess_move: &ChessMove) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(chess_move.from));
    out.push_str(&square_to_algebraic(chess_move.to));
    if let Some(kind) = chess_move.promotion {
        out.push(kind.symbol().to_ascii_uppercase());
    }
    out
}

pub fn decode_uci(text: &str) -> Result<ChessMove, ChessErrors> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    match text[4..].chars().next() {
        None => Ok(ChessMove::new(from, to)),
        Some(letter) => {
            let kind = PieceKind::promotion_from_char(letter)?;
            Ok(ChessMove::with_promotion(from, to, kind))
        }
    }
}

/// UCI text for a move that has just been applied. The promotion letter is
/// read from the piece now standing on `to`, so it reflects what the pawn
/// actually became.
pub fn move_to_uci(position_after: &Position, from: Square, to: Square, moved: PieceKind) -> String {
    let promotion = match position_after.piece_at(to) {
        Some(piece) if moved == PieceKind::Pawn && piece.kind != PieceKind::Pawn => {
            Some(piece.kind)
        }
        _ => None,
    };
    encode_uci(&ChessMove {
        from,
        to,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_uci, encode_uci, move_to_uci};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::{ChessMove, Color, Piece, PieceKind, Square};
    use crate::game_state::position::Position;

    fn sq(name: &str) -> Square {
        name.parse().expect("square should parse")
    }

    #[test]
    fn promotion_letter_is_uppercase() {
        let mv = ChessMove::with_promotion(sq("e7"), sq("e8"), PieceKind::Queen);
        assert_eq!(encode_uci(&mv), "e7e8Q");
        assert_eq!(encode_uci(&ChessMove::new(sq("g1"), sq("f3"))), "g1f3");
    }

    #[test]
    fn decode_accepts_either_case() {
        let upper = decode_uci("b2b1N").expect("uppercase promotion should decode");
        let lower = decode_uci("b2b1n").expect("lowercase promotion should decode");
        assert_eq!(upper, lower);
        assert_eq!(upper.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn decode_rejects_bad_shapes() {
        assert!(matches!(decode_uci("e2"), Err(ChessErrors::InvalidAlgebraic(_))));
        assert!(matches!(decode_uci("e2e4e6"), Err(ChessErrors::InvalidAlgebraic(_))));
        assert!(matches!(decode_uci("z2e4"), Err(ChessErrors::InvalidAlgebraic(_))));
        assert_eq!(
            decode_uci("e7e8K"),
            Err(ChessErrors::InvalidPromotionChoice('K'))
        );
    }

    #[test]
    fn applied_promotion_reads_the_new_occupant() {
        let mut after = Position::empty();
        after.set_piece(sq("c1"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(move_to_uci(&after, sq("c2"), sq("c1"), PieceKind::Pawn), "c2c1R");
        assert_eq!(move_to_uci(&after, sq("c3"), sq("c1"), PieceKind::Rook), "c3c1");
    }
}
