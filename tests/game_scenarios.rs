use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use plum_rules::chess_errors::ChessErrors;
use plum_rules::engines::engine_random::RandomMover;
use plum_rules::engines::engine_trait::FixedPromotion;
use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::chess_types::{Color, PieceKind, Square};
use plum_rules::game_state::game_outcome::GameStatus;
use plum_rules::game_state::game_state::GameState;
use plum_rules::game_state::position::Position;
use plum_rules::move_generation::legal_move_checks::is_king_in_check;
use plum_rules::move_generation::legal_move_generator::all_legal_moves;
use plum_rules::utils::fen_parser::parse_fen;
use plum_rules::utils::long_algebraic::{decode_uci, encode_uci};

fn sq(name: &str) -> Square {
    name.parse().expect("square should parse")
}

fn play(game: &mut GameState, moves: &[&str]) {
    for mv in moves {
        game.apply_uci(mv, &mut FixedPromotion::default())
            .unwrap_or_else(|err| panic!("{mv} should be legal: {err}"));
    }
}

#[test]
fn starting_position_offers_twenty_moves() {
    let game = GameState::new_game();
    assert_eq!(all_legal_moves(&game).len(), 20);
    assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
}

#[test]
fn scholars_mate_is_checkmate_for_black() {
    let mut game = GameState::new_game();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );

    assert_eq!(game.status(), GameStatus::Checkmate);
    assert_eq!(game.side_to_move(), Color::Black);
    assert!(all_legal_moves(&game).is_empty());
    assert_eq!(game.captured_by(Color::White), [PieceKind::Pawn]);
}

#[test]
fn fifty_quiet_plies_draw_the_game() {
    let mut game = GameState::new_game();
    let cycle = [
        "b1c3", "b8c6", "c3b5", "c6b4", "b5a3", "b4a6", "a3b1", "a6b8", "g1f3", "g8f6", "f3g1",
        "f6g8",
    ];

    for (ply, mv) in cycle.iter().cycle().take(50).enumerate() {
        assert_ne!(game.status(), GameStatus::DrawFiftyMove, "early draw at ply {ply}");
        game.apply_uci(mv, &mut FixedPromotion::default())
            .unwrap_or_else(|err| panic!("{mv} should be legal: {err}"));
    }

    assert_eq!(game.halfmoves_since_pawn_move(), 50);
    assert_eq!(game.status(), GameStatus::DrawFiftyMove);

    play(&mut game, &["e2e4"]);
    assert_eq!(game.halfmoves_since_pawn_move(), 0);
    assert_eq!(game.halfmoves_since_capture(), 51);
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "h7h6", "e4e5", "d7d5"]);
    assert_eq!(game.en_passant_target(), Some(sq("d6")));

    play(&mut game, &["e5d6"]);
    assert!(game.position().is_empty(sq("d5")));
    let pawn = game.position().piece_at(sq("d6")).expect("pawn should land on d6");
    assert!(pawn.is(PieceKind::Pawn, Color::White));
    assert_eq!(game.captured_by(Color::White), [PieceKind::Pawn]);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "h7h6", "e4e5", "d7d5", "a2a3", "a7a6"]);
    let err = game
        .apply_uci("e5d6", &mut FixedPromotion::default())
        .expect_err("late en passant should be rejected");
    assert!(matches!(err, ChessErrors::InvalidMove { .. }));
}

#[test]
fn castling_through_an_attacked_square_is_rejected() {
    let mut game = parse_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").expect("FEN should parse");
    assert!(game
        .apply_uci("e1g1", &mut FixedPromotion::default())
        .is_err());

    let mut clear = parse_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
    play(&mut clear, &["e1g1"]);
    assert!(clear
        .position()
        .piece_at(sq("f1"))
        .is_some_and(|piece| piece.is(PieceKind::Rook, Color::White)));
}

#[test]
fn minor_piece_versus_bare_king_is_drawn() {
    let mut bishop = parse_fen("4k3/8/8/8/8/8/3p4/2B1K3 w - - 0 1").expect("FEN should parse");
    play(&mut bishop, &["c1d2"]);
    assert_eq!(bishop.status(), GameStatus::DrawInsufficientMaterial);

    let mut rook = parse_fen("4k3/8/8/8/8/8/3p4/3RK3 w - - 0 1").expect("FEN should parse");
    play(&mut rook, &["d1d2"]);
    assert_eq!(rook.status(), GameStatus::Ongoing);
}

#[test]
fn layout_setup_rejects_unknown_symbols() {
    let rows = [
        "rnbqkbnr", "pppppppp", "        ", "        ", "    z   ", "        ", "PPPPPPPP",
        "RNBQKBNR",
    ];
    assert_eq!(
        Position::from_layout(&rows),
        Err(ChessErrors::UnknownPieceSymbol('z'))
    );
}

#[test]
fn every_legal_move_round_trips_through_uci() {
    let fens = [
        STARTING_POSITION_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ];

    for fen in fens {
        let game = parse_fen(fen).expect("FEN should parse");
        for mv in all_legal_moves(&game) {
            let text = encode_uci(&mv);
            assert_eq!(decode_uci(&text), Ok(mv), "round trip failed for {text}");

            let mut child = game.clone();
            let applied = child
                .apply_uci(&text, &mut FixedPromotion::default())
                .expect("listed move should be accepted");
            assert_eq!(applied.uci, text);
        }
    }
}

#[test]
fn random_playouts_never_leave_own_king_in_check() {
    let mut seeds = StdRng::seed_from_u64(2024);

    for _ in 0..8 {
        let mut mover = RandomMover::seeded(seeds.random_range(0..u64::MAX));
        let mut game = GameState::new_game();

        for _ in 0..200 {
            if game.status().is_terminal() {
                break;
            }
            let Some(mv) = mover.choose_move(&game) else {
                break;
            };
            let mover_color = game.side_to_move();
            let fen = game.get_fen();

            game.apply_chess_move(mv, &mut mover)
                .unwrap_or_else(|err| panic!("random move failed in {fen}: {err}"));
            assert!(!is_king_in_check(game.position(), mover_color));
            assert_eq!(game.side_to_move(), mover_color.opposite());
            assert!(parse_fen(&game.get_fen()).is_ok());
        }
    }
}

#[test]
fn threefold_repetition_counts_the_initial_position() {
    let mut game = GameState::new_game();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut game, &shuffle);
    assert_eq!(game.status(), GameStatus::Ongoing);
    play(&mut game, &shuffle);
    assert_eq!(game.status(), GameStatus::DrawThreefoldRepetition);
}

#[test]
fn fen_export_round_trips_mid_game() {
    let mut game = GameState::new_game();
    play(&mut game, &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4"]);

    let fen = game.get_fen();
    assert_eq!(
        fen,
        "rnbqk2r/pppp1ppp/4pn2/8/1bPP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 2 3"
    );
    assert_eq!(parse_fen(&fen).expect("exported FEN should parse").get_fen(), fen);
}
