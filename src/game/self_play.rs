//! Engine-vs-engine games used by the trainer and the tournament.

use std::time::Duration;

use log::trace;

use crate::alpha_beta_searcher::{find_best_move, EngineConfig, SearchContext, SearchError};
use crate::board::color::Color;
use crate::board::Board;
use crate::dama_move::DamaMove;
use crate::evaluate::{self, BlendedEvaluator, DrawReason, GameEnding, WinReason, Weights};
use crate::move_generator::MoveGenerator;

const BASELINE_RATING: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfPlayConfig {
    /// Per-move budget of a player at or below the baseline rating.
    pub base_time: Duration,
    /// Upper bound for the rating-scaled budget.
    pub max_time: Duration,
    pub max_plies: u32,
    pub max_depth: u8,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            base_time: Duration::from_millis(50),
            max_time: Duration::from_secs(2),
            max_plies: 150,
            max_depth: 64,
        }
    }
}

impl SelfPlayConfig {
    /// Stronger players think longer: one extra second per 1000 rating points
    /// above the baseline.
    pub fn time_for_rating(&self, rating: f64) -> Duration {
        let bonus = ((rating - BASELINE_RATING) / 1000.0).max(0.0);
        let budget = self.base_time.as_secs_f64() + bonus;
        Duration::from_secs_f64(budget.min(self.max_time.as_secs_f64()))
    }
}

/// One side of a self-play game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contestant {
    pub weights: Weights,
    pub time_per_move: Duration,
}

impl Contestant {
    pub fn new(weights: Weights, time_per_move: Duration) -> Self {
        Self {
            weights,
            time_per_move,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub ending: GameEnding,
    pub moves: Vec<DamaMove>,
    pub final_position: Board,
}

impl GameRecord {
    /// 1 for a win, 0.5 for a draw, 0 for a loss.
    pub fn score_for(&self, color: Color) -> f64 {
        match self.ending.winner() {
            Some(winner) if winner == color => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }

    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }
}

/// Plays a full game from the starting position. Every move is searched
/// with the mover's own weights and time budget.
pub fn play_game(
    white: &Contestant,
    black: &Contestant,
    config: &SelfPlayConfig,
) -> Result<GameRecord, SearchError> {
    play_game_from(Board::starting_position(), white, black, config, |_, _| {})
}

/// Like `play_game`, starting from `board` and reporting every move to
/// `on_move` together with the resulting position.
pub fn play_game_from<F>(
    mut board: Board,
    white: &Contestant,
    black: &Contestant,
    config: &SelfPlayConfig,
    mut on_move: F,
) -> Result<GameRecord, SearchError>
where
    F: FnMut(&DamaMove, &Board),
{
    let move_generator = MoveGenerator::new();
    let mut white_context = SearchContext::new(EngineConfig {
        time_limit: white.time_per_move,
        max_depth: config.max_depth,
    });
    let mut black_context = SearchContext::new(EngineConfig {
        time_limit: black.time_per_move,
        max_depth: config.max_depth,
    });

    let mut history = vec![board];
    let mut moves = Vec::new();
    let mut plies_without_capture = 0;

    let ending = loop {
        let turn = board.turn();
        if let Some(ending) =
            evaluate::game_ending(&board, &move_generator, turn, plies_without_capture)
        {
            break ending;
        }
        if moves.len() as u32 >= config.max_plies {
            break GameEnding::Draw(DrawReason::MoveLimit);
        }

        let (contestant, context) = match turn {
            Color::White => (white, &mut white_context),
            Color::Black => (black, &mut black_context),
        };
        let evaluator = BlendedEvaluator::new(contestant.weights);

        let outcome = match find_best_move(context, &board, turn, &history, &evaluator) {
            Ok(outcome) => outcome,
            Err(SearchError::NoAvailableMoves) => {
                break GameEnding::Win {
                    winner: turn.opposite(),
                    reason: WinReason::Blocked,
                }
            }
            Err(error) => return Err(error),
        };

        let dama_move = outcome.best_move;
        trace!("{} plays {} (depth {})", turn, dama_move, outcome.depth);
        board = dama_move.apply(&board)?;

        if dama_move.is_capture() {
            plies_without_capture = 0;
        } else {
            plies_without_capture += 1;
        }

        on_move(&dama_move, &board);
        history.push(board);
        moves.push(dama_move);
    };

    Ok(GameRecord {
        ending,
        moves,
        final_position: board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dama_position;

    fn quick_contestant() -> Contestant {
        Contestant::new(Weights::default(), Duration::from_millis(5))
    }

    fn quick_config(max_plies: u32) -> SelfPlayConfig {
        SelfPlayConfig {
            base_time: Duration::from_millis(5),
            max_time: Duration::from_millis(5),
            max_plies,
            max_depth: 2,
        }
    }

    #[test]
    fn test_time_for_rating() {
        let config = SelfPlayConfig::default();
        assert_eq!(Duration::from_millis(50), config.time_for_rating(900.0));
        assert_eq!(Duration::from_millis(50), config.time_for_rating(1000.0));
        assert!((config.time_for_rating(1500.0).as_secs_f64() - 0.55).abs() < 1e-6);
        assert_eq!(Duration::from_secs(2), config.time_for_rating(9000.0));
    }

    #[test]
    fn test_move_limit_ends_in_a_draw() {
        let contestant = quick_contestant();
        let record = play_game(&contestant, &contestant, &quick_config(4)).unwrap();

        assert_eq!(GameEnding::Draw(DrawReason::MoveLimit), record.ending);
        assert_eq!(4, record.ply_count());
        assert_eq!(0.5, record.score_for(Color::White));
        assert_eq!(0.5, record.score_for(Color::Black));
    }

    #[test]
    fn test_game_ends_when_a_side_is_wiped_out() {
        let board = dama_position! {
            ........
            ........
            ........
            ........
            ...b....
            ...w....
            ........
            ........
        };
        let contestant = quick_contestant();
        let mut observed = Vec::new();

        let record = play_game_from(
            board,
            &contestant,
            &contestant,
            &quick_config(10),
            |dama_move, _| observed.push(dama_move.clone()),
        )
        .unwrap();

        assert_eq!(
            GameEnding::Win {
                winner: Color::White,
                reason: WinReason::AllPiecesCaptured
            },
            record.ending
        );
        assert_eq!(1.0, record.score_for(Color::White));
        assert_eq!(0.0, record.score_for(Color::Black));
        assert_eq!(record.moves, observed);
        assert_eq!(0, record.final_position.piece_count(Color::Black));
    }

    #[test]
    fn test_blocked_side_loses() {
        let mut board = dama_position! {
            ........
            ........
            ........
            ........
            ........
            ........
            bww.....
            w.......
        };
        board.set_turn(Color::Black);
        let contestant = quick_contestant();

        let record =
            play_game_from(board, &contestant, &contestant, &quick_config(10), |_, _| {}).unwrap();

        assert_eq!(Some(Color::White), record.ending.winner());
        assert_eq!(0, record.ply_count());
    }
}
