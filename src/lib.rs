//! Crate root module declarations for the Plum Rules chess engine.
//!
//! Exposes the rules core (board, move geometry, legality, game state and
//! outcome), the collaborator interfaces, notation codecs and the command
//! line front end so binaries, benches and integration tests share one set
//! of module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_outcome;
    pub mod game_state;
    pub mod position;
    pub mod session;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod candidate_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rays;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_filter;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_uci_process;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}

pub mod cli {
    pub mod cli_top;
}
