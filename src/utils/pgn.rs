//! PGN export of a finished or in-progress game.
//!
//! Movetext uses the UCI strings recorded by `GameState`, numbered from the
//! game's own ply count so FEN-started games keep their numbering. The
//! result tag is derived from the current status.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::game_state::GameState;

pub fn write_pgn(game_state: &GameState) -> String {
    write_pgn_dated(game_state, Local::now().date_naive())
}

pub fn write_pgn_dated(game_state: &GameState, date: NaiveDate) -> String {
    let result = game_state
        .status()
        .pgn_result(game_state.side_to_move())
        .to_owned();

    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Plum Rules Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result);

    let initial_fen = game_state.initial_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen.to_owned());
    }

    write_pgn_with_headers(game_state, &headers)
}

pub fn write_pgn_with_headers(game_state: &GameState, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let moves = game_state.uci_moves();
    let first_ply = game_state.ply_count() as usize - moves.len();
    let mut movetext_parts = Vec::<String>::with_capacity(moves.len() + 1);

    for (index, uci) in moves.iter().enumerate() {
        let ply = first_ply + index;
        let number = ply / 2 + 1;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{number}. {uci}"));
        } else if index == 0 {
            movetext_parts.push(format!("{number}... {uci}"));
        } else {
            movetext_parts.push(uci.clone());
        }
    }

    let result = headers.get("Result").map(String::as_str).unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
