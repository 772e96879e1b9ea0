//! One interactive game plus its evaluation bookkeeping.
//!
//! `GameSession` is what a front end drives: it forwards moves to its
//! `GameState`, keeps the current FEN, and (when an evaluator is attached)
//! asks for a score after accepted moves. Evaluation is throttled: nothing is
//! sent when the FEN has not changed since the last request or when less
//! than `evaluation_interval` has passed. Evaluator failures only produce
//! diagnostics; the game is never touched by them.

use std::time::{Duration, Instant};

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{
    Evaluation, FixedPromotion, PositionEvaluator, PromotionChooser,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameStatus;
use crate::game_state::game_state::AppliedMove;
use crate::utils::fen_parser::validate_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub evaluation_depth: u8,
    pub evaluation_interval: Duration,
    pub verbose: bool,
    /// External UCI engine used as the evaluator, if any.
    pub engine_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            evaluation_depth: 12,
            evaluation_interval: Duration::from_millis(500),
            verbose: false,
            engine_path: None,
        }
    }
}

pub struct GameSession {
    game: GameState,
    config: SessionConfig,
    evaluator: Option<Box<dyn PositionEvaluator>>,
    current_fen: String,
    last_evaluated_fen: Option<String>,
    last_evaluation: Option<Evaluation>,
    last_evaluated_at: Option<Instant>,
    diagnostics: Vec<String>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let game = GameState::new_game();
        let current_fen = game.get_fen();
        Self {
            game,
            config,
            evaluator: None,
            current_fen,
            last_evaluated_fen: None,
            last_evaluation: None,
            last_evaluated_at: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_evaluator(config: SessionConfig, evaluator: Box<dyn PositionEvaluator>) -> Self {
        let mut session = Self::new(config);
        session.evaluator = Some(evaluator);
        session
    }

    pub fn set_evaluator(&mut self, evaluator: Option<Box<dyn PositionEvaluator>>) {
        self.evaluator = evaluator;
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn current_fen(&self) -> &str {
        &self.current_fen
    }

    pub fn uci_moves(&self) -> &[String] {
        self.game.uci_moves()
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn last_evaluation(&self) -> Option<Evaluation> {
        self.last_evaluation
    }

    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        self.game.captured_by(color)
    }

    /// Drains the `info string` lines gathered since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, ChessErrors> {
        let result = self.game.apply_move(from, to, chooser);
        self.after_submit(result)
    }

    pub fn submit_chess_move(
        &mut self,
        chess_move: ChessMove,
        chooser: &mut dyn PromotionChooser,
    ) -> Result<AppliedMove, ChessErrors> {
        let result = self.game.apply_chess_move(chess_move, chooser);
        self.after_submit(result)
    }

    /// Plays UCI text. A promotion without a letter becomes a queen.
    pub fn submit_uci(&mut self, text: &str) -> Result<AppliedMove, ChessErrors> {
        let result = self.game.apply_uci(text, &mut FixedPromotion::default());
        self.after_submit(result)
    }

    pub fn restart(&mut self) {
        self.game.reset();
        self.current_fen = self.game.get_fen();
        self.last_evaluated_fen = None;
        self.last_evaluation = None;
        self.last_evaluated_at = None;
        self.info("new game".to_owned());
    }

    fn after_submit(
        &mut self,
        result: Result<AppliedMove, ChessErrors>,
    ) -> Result<AppliedMove, ChessErrors> {
        let applied = match result {
            Ok(applied) => applied,
            Err(err) => {
                self.info(format!("rejected: {err}"));
                return Err(err);
            }
        };

        self.current_fen = self.game.get_fen();
        self.info(format!("applied {} fen {}", applied.uci, self.current_fen));
        if applied.status != GameStatus::Ongoing {
            self.info(format!("status {}", applied.status));
        }

        self.refresh_evaluation(Instant::now());
        Ok(applied)
    }

    fn refresh_evaluation(&mut self, now: Instant) {
        let Some(evaluator) = self.evaluator.as_mut() else {
            return;
        };

        if self.last_evaluated_fen.as_deref() == Some(self.current_fen.as_str()) {
            return;
        }
        if let Some(at) = self.last_evaluated_at {
            if now.duration_since(at) < self.config.evaluation_interval {
                return;
            }
        }

        if let Err(err) = validate_fen(&self.current_fen) {
            self.diagnostics
                .push(format!("info string evaluator not called: {err}"));
            return;
        }

        self.last_evaluated_fen = Some(self.current_fen.clone());
        self.last_evaluated_at = Some(now);

        match evaluator.evaluate(&self.current_fen, self.config.evaluation_depth) {
            Ok(evaluation) => {
                self.last_evaluation = Some(evaluation);
                self.diagnostics.push(format!(
                    "info string {} {:?} white win probability {:.3}",
                    evaluator.name(),
                    evaluation,
                    evaluation.white_win_probability()
                ));
            }
            Err(msg) => {
                let err = ChessErrors::Evaluation(msg);
                self.diagnostics.push(format!("info string {err}"));
            }
        }
    }

    fn info(&mut self, line: String) {
        self.diagnostics.push(format!("info string {line}"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::{GameSession, SessionConfig};
    use crate::engines::engine_trait::{Evaluation, FixedPromotion, PositionEvaluator};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::game_state::game_outcome::GameStatus;

    /// Records every FEN it is asked about.
    struct RecordingEvaluator {
        seen: Arc<Mutex<Vec<(String, u8)>>>,
        reply: Result<Evaluation, String>,
    }

    impl PositionEvaluator for RecordingEvaluator {
        fn evaluate(&mut self, fen: &str, depth: u8) -> Result<Evaluation, String> {
            self.seen
                .lock()
                .expect("evaluator log should not be poisoned")
                .push((fen.to_owned(), depth));
            self.reply.clone()
        }
    }

    fn unthrottled() -> SessionConfig {
        SessionConfig {
            evaluation_interval: Duration::ZERO,
            ..SessionConfig::default()
        }
    }

    fn recording_session(
        config: SessionConfig,
        reply: Result<Evaluation, String>,
    ) -> (GameSession, Arc<Mutex<Vec<(String, u8)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let evaluator = RecordingEvaluator {
            seen: Arc::clone(&seen),
            reply,
        };
        (GameSession::with_evaluator(config, Box::new(evaluator)), seen)
    }

    fn sq(name: &str) -> Square {
        name.parse().expect("square should parse")
    }

    #[test]
    fn default_config_values() {
        let config = SessionConfig::default();
        assert_eq!(config.evaluation_depth, 12);
        assert_eq!(config.evaluation_interval, Duration::from_millis(500));
        assert!(!config.verbose);
        assert_eq!(config.engine_path, None);
    }

    #[test]
    fn accepted_move_refreshes_fen_and_evaluates() {
        let (mut session, seen) =
            recording_session(unthrottled(), Ok(Evaluation::Centipawns(35)));
        session
            .submit_move(sq("e2"), sq("e4"), &mut FixedPromotion::default())
            .expect("e2e4 should be legal");

        assert_eq!(session.current_fen(), session.game().get_fen());
        assert_eq!(session.last_evaluation(), Some(Evaluation::Centipawns(35)));
        let seen = seen.lock().expect("evaluator log should not be poisoned");
        assert_eq!(seen.as_slice(), [(session.current_fen().to_owned(), 12)]);
    }

    #[test]
    fn throttle_skips_requests_inside_the_interval() {
        let config = SessionConfig {
            evaluation_interval: Duration::from_secs(3600),
            ..SessionConfig::default()
        };
        let (mut session, seen) = recording_session(config, Ok(Evaluation::Centipawns(0)));
        session.submit_uci("e2e4").expect("e2e4 should be legal");
        session.submit_uci("e7e5").expect("e7e5 should be legal");

        assert_eq!(
            seen.lock().expect("evaluator log should not be poisoned").len(),
            1
        );
    }

    #[test]
    fn evaluator_error_is_only_a_diagnostic() {
        let (mut session, _) =
            recording_session(unthrottled(), Err("engine offline".to_owned()));
        session.submit_uci("g1f3").expect("g1f3 should be legal");

        assert_eq!(session.last_evaluation(), None);
        assert_eq!(session.uci_moves(), ["g1f3".to_owned()]);
        let lines = session.take_diagnostics();
        assert!(lines
            .iter()
            .any(|line| line == "info string evaluation failed: engine offline"));
        assert!(session.take_diagnostics().is_empty());
    }

    #[test]
    fn rejected_move_is_reported() {
        let mut session = GameSession::new(SessionConfig::default());
        assert!(session.submit_uci("e2e5").is_err());
        assert_eq!(session.current_fen(), STARTING_POSITION_FEN);
        assert_eq!(
            session.take_diagnostics(),
            vec!["info string rejected: illegal move e2e5".to_owned()]
        );
    }

    #[test]
    fn restart_clears_game_and_cache() {
        let (mut session, _) = recording_session(unthrottled(), Ok(Evaluation::Mate(2)));
        for mv in ["e2e4", "d7d5", "e4d5"] {
            session.submit_uci(mv).expect("scripted move should be legal");
        }
        assert_eq!(session.captured_by(Color::White), [PieceKind::Pawn]);

        session.restart();
        assert_eq!(session.current_fen(), STARTING_POSITION_FEN);
        assert_eq!(session.last_evaluation(), None);
        assert!(session.uci_moves().is_empty());
        assert_eq!(session.status(), GameStatus::Ongoing);
    }
}
