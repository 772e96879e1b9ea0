//! Line-oriented command front end.
//!
//! Reads one command per line, drives a `GameSession`, and writes plain text
//! replies. Promotion choices are read from the same input, so the whole
//! loop can be exercised with in-memory readers and writers.

use std::io::{self, BufRead, Write};

use crate::engines::engine_random::RandomMover;
use crate::engines::engine_trait::{Evaluation, FixedPromotion, PositionEvaluator, PromotionChooser};
use crate::engines::engine_uci_process::UciProcessEvaluator;
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameStatus;
use crate::game_state::session::{GameSession, SessionConfig};
use crate::move_generation::legal_move_generator::{all_legal_moves, legal_moves_from};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::long_algebraic::{decode_uci, encode_uci};
use crate::utils::pgn::write_pgn;
use crate::utils::render_game_state::render_game_state;

const HELP_TEXT: &str = "commands: <move> | move <move> | board | fen | moves [square] | \
status | captured | history | pgn | eval | random | new | help | quit";

pub fn run_stdio_loop(config: SessionConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let engine_path = config.engine_path.clone();
    let mut cli = CliState::new(config);

    if let Some(path) = engine_path {
        match UciProcessEvaluator::spawn(&path) {
            Ok(evaluator) => cli.attach_evaluator(Box::new(evaluator)),
            Err(err) => writeln!(stdout, "error: evaluator unavailable: {err}")?,
        }
    }

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let should_quit = cli.handle_command(&line, &mut input, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

/// Asks for the promotion piece on the command stream. A closed or failing
/// stream answers queen so the game cannot stall; the first I/O error is
/// kept and reported once the move has been played.
struct PromptChooser<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    out: &'a mut W,
    io_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> PromptChooser<'_, R, W> {
    fn ask(&mut self, square: Square, color: Color) -> io::Result<Option<char>> {
        write!(self.out, "promote {color} pawn on {square} to (Q/R/B/N): ")?;
        self.out.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(Some('Q'));
        }
        Ok(answer.trim().chars().next())
    }
}

impl<R: BufRead, W: Write> PromotionChooser for PromptChooser<'_, R, W> {
    fn choose_promotion(&mut self, square: Square, color: Color) -> Option<char> {
        match self.ask(square, color) {
            Ok(answer) => answer,
            Err(err) => {
                self.io_error.get_or_insert(err);
                Some('Q')
            }
        }
    }
}

pub struct CliState {
    session: GameSession,
    random_mover: RandomMover,
}

impl CliState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: GameSession::new(config),
            random_mover: RandomMover::new(),
        }
    }

    pub fn with_random_seed(config: SessionConfig, seed: u64) -> Self {
        Self {
            session: GameSession::new(config),
            random_mover: RandomMover::seeded(seed),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn attach_evaluator(&mut self, evaluator: Box<dyn PositionEvaluator>) {
        self.session.set_evaluator(Some(evaluator));
    }

    /// Runs one command. Returns `Ok(true)` when the loop should stop.
    pub fn handle_command(
        &mut self,
        line: &str,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();

        match command {
            "quit" | "exit" => return Ok(true),
            "help" => writeln!(out, "{HELP_TEXT}")?,
            "board" => writeln!(out, "{}", render_game_state(self.session.game()))?,
            "fen" => writeln!(out, "{}", self.session.current_fen())?,
            "status" => writeln!(out, "{}", self.session.status())?,
            "moves" => self.write_moves(argument, out)?,
            "captured" => self.write_captured(out)?,
            "history" => writeln!(out, "{}", self.session.uci_moves().join(" "))?,
            "pgn" => write!(out, "{}", write_pgn(self.session.game()))?,
            "eval" => self.write_evaluation(out)?,
            "random" => self.play_random(out)?,
            "new" => {
                self.session.restart();
                writeln!(out, "new game")?;
            }
            "move" => match argument {
                Some(text) => self.play_text(text, input, out)?,
                None => writeln!(out, "error: move needs a move such as e2e4")?,
            },
            text if decode_uci(text).is_ok() => self.play_text(text, input, out)?,
            other => writeln!(out, "error: unknown command '{other}'")?,
        }

        self.flush_diagnostics(out)?;
        Ok(false)
    }

    fn play_text(
        &mut self,
        text: &str,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let chess_move = match decode_uci(text) {
            Ok(chess_move) => chess_move,
            Err(err) => return writeln!(out, "error: {err}"),
        };

        let mut chooser = PromptChooser {
            input,
            out: &mut *out,
            io_error: None,
        };
        let result = self.session.submit_chess_move(chess_move, &mut chooser);
        if let Some(err) = chooser.io_error {
            return Err(err);
        }

        match result {
            Ok(applied) => Self::write_applied(&applied.uci, applied.status, out),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn play_random(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(chess_move) = self.random_mover.choose_move(self.session.game()) else {
            return writeln!(out, "error: no legal moves");
        };

        match self
            .session
            .submit_chess_move(chess_move, &mut FixedPromotion::default())
        {
            Ok(applied) => Self::write_applied(&applied.uci, applied.status, out),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn write_applied(uci: &str, status: GameStatus, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "ok {uci} ({status})")
    }

    fn write_moves(&self, argument: Option<&str>, out: &mut impl Write) -> io::Result<()> {
        let game = self.session.game();
        let moves = match argument {
            Some(text) => match algebraic_to_square(text) {
                Ok(square) => legal_moves_from(game, square),
                Err(err) => return writeln!(out, "error: {err}"),
            },
            None => all_legal_moves(game),
        };

        let listed: Vec<String> = moves.iter().map(encode_uci).collect();
        writeln!(out, "{}", listed.join(" "))
    }

    fn write_evaluation(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(evaluation) = self.session.last_evaluation() else {
            return writeln!(out, "no evaluation");
        };

        let score = match evaluation {
            Evaluation::Centipawns(cp) => format!("cp {cp}"),
            Evaluation::Mate(moves) => format!("mate {moves}"),
        };
        writeln!(
            out,
            "{score} (white win probability {:.3})",
            evaluation.white_win_probability()
        )
    }

    fn write_captured(&self, out: &mut impl Write) -> io::Result<()> {
        for color in [Color::White, Color::Black] {
            let kinds = self.session.captured_by(color);
            let symbols: Vec<String> = kinds.iter().map(|kind| kind.symbol().to_string()).collect();
            let listed = if symbols.is_empty() {
                "-".to_owned()
            } else {
                symbols.join(" ")
            };
            writeln!(out, "{color}: {listed}")?;
        }
        Ok(())
    }

    fn flush_diagnostics(&mut self, out: &mut impl Write) -> io::Result<()> {
        let lines = self.session.take_diagnostics();
        if self.session.config().verbose {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}
