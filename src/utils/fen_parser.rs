//! FEN-to-GameState parser.
//!
//! Builds a full game state from a Forsyth-Edwards Notation string. Fields
//! that FEN stores explicitly but the engine derives (castling rights, the
//! en-passant target) are mapped back onto `has_moved` flags and a
//! synthesized last move, so exporting the parsed state reproduces the input.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{KING_START_COL, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameSetup, LastMove};
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessErrors::InvalidFen("FEN has extra trailing fields".to_owned()));
    }

    let mut position = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut position)?;
    let last_move = parse_en_passant(en_passant_part, side_to_move, &position)?;

    let halfmove_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| ChessErrors::InvalidFen(format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u32>()
        .map_err(|_| ChessErrors::InvalidFen(format!("invalid fullmove number: {fullmove_part}")))?;

    let ply_offset = fullmove_number
        .saturating_mul(2)
        .saturating_add(u32::from(side_to_move == Color::Black));

    Ok(GameState::from_setup(GameSetup {
        position,
        side_to_move,
        last_move,
        halfmove_clock,
        ply_offset,
    }))
}

/// Checks a FEN string without keeping the result.
pub fn validate_fen(fen: &str) -> Result<(), ChessErrors> {
    parse_fen(fen).map(|_| ())
}

fn missing(field: &str) -> ChessErrors {
    ChessErrors::InvalidFen(format!("missing {field}"))
}

fn parse_board(board_part: &str) -> Result<Position, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut position = Position::empty();

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as usize;
                continue;
            }

            let mut piece = Piece::from_symbol(ch)
                .map_err(|_| ChessErrors::InvalidFen(format!("invalid piece character '{ch}'")))?;

            if col >= 8 {
                return Err(ChessErrors::InvalidFen(format!("rank {} has too many files", 8 - row)));
            }

            if piece.kind == PieceKind::Pawn {
                if row == 0 || row == 7 {
                    return Err(ChessErrors::InvalidFen(format!(
                        "pawn on back rank {}",
                        8 - row
                    )));
                }
                piece.has_moved = row != piece.color.pawn_start_row();
            }
            if piece.kind == PieceKind::King {
                piece.has_moved = row != piece.color.back_row() || col != KING_START_COL;
            }
            if piece.kind == PieceKind::Rook {
                // Cleared again below for rooks that still hold a right.
                piece.has_moved = true;
            }

            position.set_piece(Square::on_row(row, col), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFen(format!(
                "rank {} does not sum to 8 files",
                8 - row
            )));
        }
    }

    for color in [Color::White, Color::Black] {
        if position.count_kind(PieceKind::King, color) > 1 {
            return Err(ChessErrors::InvalidFen(format!("{color} has more than one king")));
        }
    }

    Ok(position)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn apply_castling_rights(castling_part: &str, position: &mut Position) -> Result<(), ChessErrors> {
    let mut kings_with_rights = Vec::<Color>::new();

    if castling_part != "-" {
        for ch in castling_part.chars() {
            let (color, rook_col) = match ch {
                'K' => (Color::White, KINGSIDE_ROOK_COL),
                'Q' => (Color::White, QUEENSIDE_ROOK_COL),
                'k' => (Color::Black, KINGSIDE_ROOK_COL),
                'q' => (Color::Black, QUEENSIDE_ROOK_COL),
                _ => {
                    return Err(ChessErrors::InvalidFen(format!(
                        "invalid castling rights character: {ch}"
                    )))
                }
            };

            let row = color.back_row();
            let king_sq = Square::on_row(row, KING_START_COL);
            let rook_sq = Square::on_row(row, rook_col);
            let king_home = matches!(position.piece_at(king_sq), Some(p) if p.is(PieceKind::King, color));
            let rook = position.piece_at(rook_sq).filter(|p| p.is(PieceKind::Rook, color));

            let Some(mut rook) = rook.filter(|_| king_home) else {
                return Err(ChessErrors::InvalidFen(format!(
                    "castling right '{ch}' without king and rook on their home squares"
                )));
            };
            rook.has_moved = false;
            position.set_piece(rook_sq, Some(rook));
            kings_with_rights.push(color);
        }
    }

    for color in [Color::White, Color::Black] {
        if kings_with_rights.contains(&color) {
            continue;
        }
        if let Some(king_sq) = position.king_square(color) {
            if let Some(mut king) = position.piece_at(king_sq) {
                king.has_moved = true;
                position.set_piece(king_sq, Some(king));
            }
        }
    }

    Ok(())
}

/// Turns the target square back into the double push that created it.
fn parse_en_passant(
    en_passant_part: &str,
    side_to_move: Color,
    position: &Position,
) -> Result<Option<LastMove>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessErrors::InvalidFen(format!("invalid en-passant square: {en_passant_part}")))?;

    let pusher = side_to_move.opposite();
    let invalid = || {
        ChessErrors::InvalidFen(format!(
            "en-passant square {en_passant_part} does not follow a {pusher} double push"
        ))
    };

    // The pusher advanced from its start row, through the target, by two rows.
    let from = target.offset(-pusher.forward(), 0).ok_or_else(invalid)?;
    let to = target.offset(pusher.forward(), 0).ok_or_else(invalid)?;
    if from.row() != pusher.pawn_start_row() || !position.is_empty(target) {
        return Err(invalid());
    }

    match position.piece_at(to) {
        Some(piece) if piece.is(PieceKind::Pawn, pusher) => Ok(Some(LastMove {
            from,
            to,
            piece: Piece::new(PieceKind::Pawn, pusher),
        })),
        _ => Err(invalid()),
    }
}
