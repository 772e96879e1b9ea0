//! Terminal board renderer for the CLI and debugging.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Board from White's side with file and rank labels.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_position(game_state.position());
    out.push('\n');
    out.push_str(&format!(
        "{} to move, {}",
        game_state.side_to_move(),
        game_state.status()
    ));
    out
}

pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8 {
        let rank_label = char::from(b'8' - row as u8);
        out.push(rank_label);
        out.push(' ');

        for col in 0..8 {
            match position.piece_at(Square::on_row(row, col)) {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
