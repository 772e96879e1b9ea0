//! Position evaluator backed by an external UCI engine process.
//!
//! The engine is started once, handshaken with `uci`/`isready`, and then
//! asked `position fen ...` / `go depth N` for every evaluation. The last
//! `info ... score` line before `bestmove` is the result. UCI scores are
//! relative to the side to move and are flipped to White's point of view.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::engines::engine_trait::{Evaluation, PositionEvaluator};

pub struct UciProcessEvaluator {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    name: String,
}

impl UciProcessEvaluator {
    pub fn spawn(path: &str) -> Result<Self, String> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("cannot start {path}: {e}"))?;

        let stdin = child.stdin.take().ok_or("engine stdin unavailable")?;
        let stdout = child.stdout.take().ok_or("engine stdout unavailable")?;

        let mut evaluator = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            name: path.to_owned(),
        };
        if let Some(name) = handshake(&mut evaluator.stdout, &mut evaluator.stdin)? {
            evaluator.name = name;
        }
        Ok(evaluator)
    }
}

impl PositionEvaluator for UciProcessEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&mut self, fen: &str, depth: u8) -> Result<Evaluation, String> {
        search_position(&mut self.stdout, &mut self.stdin, fen, depth)
    }
}

impl Drop for UciProcessEvaluator {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "quit");
        let _ = self.stdin.flush();
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Runs `uci` and `isready`. Returns the engine's `id name`, if it sent one.
pub fn handshake(reader: &mut impl BufRead, writer: &mut impl Write) -> Result<Option<String>, String> {
    send(writer, "uci")?;
    let mut name = None;
    loop {
        let line = read_engine_line(reader)?;
        if let Some(id) = line.strip_prefix("id name ") {
            name = Some(id.trim().to_owned());
        }
        if line == "uciok" {
            break;
        }
    }

    send(writer, "isready")?;
    while read_engine_line(reader)? != "readyok" {}
    Ok(name)
}

/// One `position`/`go` round trip, with the score turned to White's view.
pub fn search_position(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    fen: &str,
    depth: u8,
) -> Result<Evaluation, String> {
    send(writer, &format!("position fen {fen}"))?;
    send(writer, &format!("go depth {depth}"))?;

    let mut latest = None;
    loop {
        let line = read_engine_line(reader)?;
        if line.starts_with("bestmove") {
            break;
        }
        if let Some(score) = parse_score(&line) {
            latest = Some(score);
        }
    }

    let score = latest.ok_or_else(|| format!("engine reported no score for {fen}"))?;
    let black_to_move = fen.split_whitespace().nth(1) == Some("b");
    Ok(if black_to_move { negate(score) } else { score })
}

/// Reads the score from an `info` line (`score cp 31`, `score mate -2`).
pub fn parse_score(line: &str) -> Option<Evaluation> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.first() != Some(&"info") {
        return None;
    }

    let i = tokens.iter().position(|x| *x == "score")?;
    let value = tokens.get(i + 2).and_then(|x| x.parse::<i32>().ok())?;
    match tokens.get(i + 1) {
        Some(&"cp") => Some(Evaluation::Centipawns(value)),
        Some(&"mate") => Some(Evaluation::Mate(value)),
        _ => None,
    }
}

fn negate(score: Evaluation) -> Evaluation {
    match score {
        Evaluation::Centipawns(cp) => Evaluation::Centipawns(-cp),
        Evaluation::Mate(moves) => Evaluation::Mate(-moves),
    }
}

fn send(writer: &mut impl Write, line: &str) -> Result<(), String> {
    writeln!(writer, "{line}").map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())
}

fn read_engine_line(reader: &mut impl BufRead) -> Result<String, String> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| e.to_string())?;
    if read == 0 {
        return Err("engine closed its output".to_owned());
    }
    Ok(line.trim().to_owned())
}
