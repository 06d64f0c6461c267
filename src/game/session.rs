use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::alpha_beta_searcher::{analyze, find_best_move, Analysis, SearchContext, SearchError};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::square::Square;
use crate::board::Board;
use crate::dama_move::notation::parse_move_input;
use crate::dama_move::{DamaMove, MoveKind};
use crate::evaluate::{self, DrawReason, GameEnding, WeightedEvaluator, Weights, WinReason};
use crate::move_generator::{MoveGenerator, MoveSet};

const MIN_ENGINE_TIME: Duration = Duration::from_secs(1);
const MAX_ENGINE_TIME: Duration = Duration::from_secs(6);

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("illegal move: {reason}")]
    IllegalMove { reason: String },
    #[error("the game is over")]
    GameOver,
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("invalid time control `{0}`, expected `<seconds>` or `<seconds>_<increment>`")]
    InvalidTimeControl(String),
    #[error("the game has no time control")]
    NoTimeControl,
}

impl SessionError {
    fn illegal(reason: &str) -> Self {
        SessionError::IllegalMove {
            reason: reason.to_string(),
        }
    }
}

/// Starting time for each side plus the bonus added after every move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeControl {
    pub initial: Duration,
    pub increment: Duration,
}

/// Parses `"300"` or `"300_5"`, both in whole seconds.
impl FromStr for TimeControl {
    type Err = SessionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidTimeControl(input.to_string());
        let mut parts = input.trim().splitn(2, '_');
        let initial: u64 = parts
            .next()
            .and_then(|seconds| seconds.parse().ok())
            .ok_or_else(invalid)?;
        let increment: u64 = match parts.next() {
            Some(seconds) => seconds.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if initial == 0 {
            return Err(invalid());
        }
        Ok(Self {
            initial: Duration::from_secs(initial),
            increment: Duration::from_secs(increment),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Clock {
    white: Duration,
    black: Duration,
    increment: Duration,
}

impl Clock {
    fn new(time_control: TimeControl) -> Self {
        Self {
            white: time_control.initial,
            black: time_control.initial,
            increment: time_control.increment,
        }
    }

    fn remaining(&self, color: Color) -> Duration {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn set(&mut self, color: Color, remaining: Duration) {
        match color {
            Color::White => self.white = remaining,
            Color::Black => self.black = remaining,
        }
    }

    fn flagged(&self) -> Option<Color> {
        Color::ALL
            .iter()
            .copied()
            .find(|&color| self.remaining(color) == Duration::ZERO)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Engine strength between 0 and 100.
    pub difficulty: u8,
    /// Number of candidate lines reported by `engine_analysis`.
    pub top_moves: usize,
    /// Per-side clocks for games between two people; `None` is untimed.
    pub time_control: Option<TimeControl>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: 50,
            top_moves: 3,
            time_control: None,
        }
    }
}

impl SessionConfig {
    /// Maps the difficulty linearly onto a 1 to 6 second thinking time.
    pub fn engine_time(&self) -> Duration {
        let difficulty = self.difficulty.min(100) as f64 / 100.0;
        let span = (MAX_ENGINE_TIME - MIN_ENGINE_TIME).as_secs_f64();
        MIN_ENGINE_TIME + Duration::from_secs_f64(span * difficulty)
    }
}

/// A game in progress between two players, either of which may ask the
/// engine to move for them.
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    history: Vec<Board>,
    notation: Vec<String>,
    plies_without_capture: u32,
    last_move: Option<DamaMove>,
    captured_last_turn: Vec<Square>,
    ending: Option<GameEnding>,
    clock: Option<Clock>,
    move_generator: MoveGenerator,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::from_position(Board::starting_position(), config)
    }

    pub fn from_position(board: Board, config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            board,
            history: vec![board],
            notation: Vec::new(),
            plies_without_capture: 0,
            last_move: None,
            captured_last_turn: Vec::new(),
            ending: None,
            clock: config.time_control.map(Clock::new),
            move_generator: MoveGenerator::new(),
        };
        session.update_ending();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.config.difficulty = difficulty.min(100);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    /// Every position of the game so far, the current one included.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn notation(&self) -> &[String] {
        &self.notation
    }

    pub fn last_move(&self) -> Option<&DamaMove> {
        self.last_move.as_ref()
    }

    /// Squares emptied by the captures of the most recent move.
    pub fn captured_pieces(&self) -> &[Square] {
        &self.captured_last_turn
    }

    pub fn plies_without_capture(&self) -> u32 {
        self.plies_without_capture
    }

    pub fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    pub fn winner(&self) -> Option<Color> {
        self.ending.and_then(|ending| ending.winner())
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Legal moves for the side to move. Moves that would repeat a position
    /// for the third time are left out while an alternative exists.
    pub fn legal_moves(&self) -> MoveSet {
        self.move_generator
            .generate_moves_with_history(&self.board, self.turn(), &self.history)
    }

    /// Pieces that must capture this turn; empty when no capture is available.
    pub fn mandatory_capture_squares(&self) -> Vec<Square> {
        self.legal_moves().mandatory_capture_squares()
    }

    pub fn valid_destinations(&self, from: Square) -> Vec<Square> {
        if self.is_over() {
            return Vec::new();
        }
        self.legal_moves().destinations_from(from)
    }

    /// Plays the legal move of the side to move that starts on `from` and
    /// ends on `to`. A capture may also be named by its first landing square,
    /// in which case the whole chain is played. The board is left untouched
    /// when the move is rejected.
    pub fn play_turn(&mut self, from: Square, to: Square) -> Result<DamaMove, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }

        match self.board.get(from) {
            None => return Err(SessionError::illegal("empty square")),
            Some((_, color)) if color != self.turn() => {
                return Err(SessionError::illegal("not your piece"))
            }
            _ => (),
        }

        let legal_moves = self.legal_moves();
        let found = legal_moves
            .find(from, to)
            .into_iter()
            .next()
            .or_else(|| legal_moves.find_by_first_step(from, to).into_iter().next());
        let dama_move = match found {
            Some(found) => found.clone(),
            None => {
                // a piece that cannot capture while another one can
                let reason = if legal_moves.kind() == MoveKind::Capture
                    && !legal_moves.mandatory_capture_squares().contains(&from)
                {
                    "a capture is mandatory"
                } else {
                    "no such move"
                };
                return Err(SessionError::illegal(reason));
            }
        };

        self.apply_move(dama_move.clone())?;
        Ok(dama_move)
    }

    /// Parses input such as `c3-c4` or `c3xc5` and plays it.
    pub fn play_input(&mut self, input: &str) -> Result<DamaMove, SessionError> {
        let (from, to) = parse_move_input(input)?;
        self.play_turn(from, to)
    }

    /// Lets the engine pick and play a move for the side to move.
    pub fn request_engine_move(
        &mut self,
        context: &mut SearchContext,
        weights: &Weights,
    ) -> Result<DamaMove, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }

        context.set_time_limit(self.config.engine_time());
        let evaluator = WeightedEvaluator::new(*weights);
        let outcome = find_best_move(context, &self.board, self.turn(), &self.history, &evaluator)?;
        debug!(
            "engine chose {} at depth {} after {} nodes",
            outcome.best_move, outcome.depth, outcome.nodes
        );

        self.apply_move(outcome.best_move.clone())?;
        Ok(outcome.best_move)
    }

    /// Win probability and the best lines for the side to move.
    pub fn engine_analysis(
        &self,
        context: &mut SearchContext,
        weights: &Weights,
    ) -> Result<Analysis, SessionError> {
        let evaluator = WeightedEvaluator::new(*weights);
        let analysis = analyze(
            context,
            &self.board,
            self.turn(),
            &evaluator,
            self.config.top_moves,
        )?;
        Ok(analysis)
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        let winner = self.turn().opposite();
        info!("{} resigns", self.turn());
        self.ending = Some(GameEnding::Win {
            winner,
            reason: WinReason::Resignation,
        });
        Ok(())
    }

    /// Time left on `color`'s clock, or `None` in an untimed game.
    pub fn remaining_time(&self, color: Color) -> Option<Duration> {
        self.clock.map(|clock| clock.remaining(color))
    }

    /// Records the time the side to move has left and adds the increment.
    /// Untimed games ignore the call.
    pub fn update_time(&mut self, remaining: Duration) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        let turn = self.turn();
        if let Some(clock) = self.clock.as_mut() {
            let increment = clock.increment;
            clock.set(turn, remaining + increment);
        }
        Ok(())
    }

    /// The side to move ran out of time and loses.
    pub fn handle_timeout(&mut self) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        let turn = self.turn();
        let clock = self.clock.as_mut().ok_or(SessionError::NoTimeControl)?;
        clock.set(turn, Duration::ZERO);
        self.update_ending();
        Ok(())
    }

    fn apply_move(&mut self, dama_move: DamaMove) -> Result<(), SessionError> {
        let next = dama_move.apply(&self.board)?;

        if dama_move.is_capture() {
            self.plies_without_capture = 0;
        } else {
            self.plies_without_capture += 1;
        }

        self.board = next;
        self.history.push(next);
        self.notation.push(dama_move.to_string());
        self.captured_last_turn = dama_move.captures().to_vec();
        self.last_move = Some(dama_move);
        self.update_ending();
        Ok(())
    }

    fn update_ending(&mut self) {
        self.ending = evaluate::game_ending(
            &self.board,
            &self.move_generator,
            self.turn(),
            self.plies_without_capture,
        );
        let decided = matches!(self.ending, Some(GameEnding::Win { .. }));
        if let Some(flagged) = self.clock.and_then(|clock| clock.flagged()) {
            if !decided {
                self.ending = Some(GameEnding::Win {
                    winner: flagged.opposite(),
                    reason: WinReason::Timeout,
                });
            }
        }
        if self.ending.is_none() && evaluate::is_threefold_repetition(&self.board, &self.history) {
            self.ending = Some(GameEnding::Draw(DrawReason::Repetition));
        }
        if let Some(ending) = self.ending {
            info!("game over: {:?}", ending);
        }
    }
}
