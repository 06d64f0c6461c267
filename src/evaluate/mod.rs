use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::move_generator::MoveGenerator;

mod weights;

pub use weights::{Weights, MIN_WEIGHT};

// These scores are significantly larger than any possible material value,
// and therefore will incentivize the engine to select for (or against) a
// decided game.
pub const WIN_SCORE: f64 = 10_000.0;
/// Scores at or beyond this magnitude are proven wins or losses.
pub const PROVEN_SCORE_THRESHOLD: f64 = 9_000.0;
const WIN_PROBABILITY_SCALE: f64 = 150.0;

/// Below this many pieces on the board the blended evaluator leans on material.
pub const ENDGAME_PIECE_COUNT: u32 = 10;
const ENDGAME_MATERIAL_SHARE: f64 = 0.6;

/// Plies without a capture after which the game is drawn.
pub const NO_CAPTURE_LIMIT: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinReason {
    AllPiecesCaptured,
    Blocked,
    Resignation,
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    NoCaptureLimit,
    MoveLimit,
    Repetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    Win { winner: Color, reason: WinReason },
    Draw(DrawReason),
}

impl GameEnding {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameEnding::Win { winner, .. } => Some(*winner),
            GameEnding::Draw(_) => None,
        }
    }
}

/// Scores a position from the point of view of `perspective`; positive values
/// favor that player.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board, perspective: Color) -> f64;
}

/// The weighted positional evaluator used by the search engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEvaluator {
    weights: Weights,
}

impl WeightedEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

impl Evaluator for WeightedEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color) -> f64 {
        positional_score(board, perspective, &self.weights)
    }
}

/// Shifts towards pure material as the board empties, where positional terms
/// tend to mislead. Used by the trainer's self-play games.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedEvaluator {
    weights: Weights,
}

impl BlendedEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }
}

impl Evaluator for BlendedEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color) -> f64 {
        let positional = positional_score(board, perspective, &self.weights);
        if board.total_piece_count() >= ENDGAME_PIECE_COUNT {
            return positional;
        }
        let material = material_score(board, perspective, &self.weights);
        ENDGAME_MATERIAL_SHARE * material + (1.0 - ENDGAME_MATERIAL_SHARE) * positional
    }
}

fn base_value(piece: Piece, weights: &Weights) -> f64 {
    match piece {
        Piece::Man => weights.piece_value,
        Piece::King => weights.king_value,
    }
}

/// Piece values only.
pub fn material_score(board: &Board, perspective: Color, weights: &Weights) -> f64 {
    board
        .iter_pieces()
        .map(|(_, piece, color)| {
            let value = base_value(piece, weights);
            if color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Piece values plus advancement, defensive and center-control bonuses.
pub fn positional_score(board: &Board, perspective: Color, weights: &Weights) -> f64 {
    board
        .iter_pieces()
        .map(|(square, piece, color)| {
            let row = square.row() as f64;
            let col = square.col() as f64;

            let advancement = color.advancement(square.row()) as f64 * weights.advancement_bonus;
            // rows still inside the player's own half
            let defensive = match color {
                Color::White if row >= 4.0 => (row - 4.0) * weights.defensive_bonus,
                Color::Black if row <= 3.0 => (3.0 - row) * weights.defensive_bonus,
                _ => 0.0,
            };
            let center = (3.5 - (3.5 - col).abs()) * weights.center_control_bonus;

            let value = base_value(piece, weights) + advancement + defensive + center;
            if color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Score of a decided game for the searching player. Wins found with more
/// remaining depth (sooner) score higher, losses found sooner score lower.
pub fn terminal_score(perspective_wins: bool, remaining_depth: u8) -> f64 {
    let magnitude = WIN_SCORE + remaining_depth as f64;
    if perspective_wins {
        magnitude
    } else {
        -magnitude
    }
}

/// Maps a raw score onto a 0-100 winning chance.
pub fn win_probability(score: f64) -> f64 {
    if score >= PROVEN_SCORE_THRESHOLD {
        return 100.0;
    }
    if score <= -PROVEN_SCORE_THRESHOLD {
        return 0.0;
    }
    100.0 / (1.0 + (-score / WIN_PROBABILITY_SCALE).exp())
}

/// Returns the game ending state if the game has ended, otherwise returns None.
/// Repetition and move limits depend on the game record and are checked by
/// the drivers that own it.
pub fn game_ending(
    board: &Board,
    move_generator: &MoveGenerator,
    current_turn: Color,
    plies_without_capture: u32,
) -> Option<GameEnding> {
    for &color in Color::ALL.iter() {
        if board.piece_count(color) == 0 {
            return Some(GameEnding::Win {
                winner: color.opposite(),
                reason: WinReason::AllPiecesCaptured,
            });
        }
    }

    if move_generator.is_blocked(board, current_turn) {
        return Some(GameEnding::Win {
            winner: current_turn.opposite(),
            reason: WinReason::Blocked,
        });
    }

    if plies_without_capture >= NO_CAPTURE_LIMIT {
        return Some(GameEnding::Draw(DrawReason::NoCaptureLimit));
    }

    None
}

/// True when `board` already appears at least three times in `history`.
pub fn is_threefold_repetition(board: &Board, history: &[Board]) -> bool {
    history.iter().filter(|&seen| seen == board).count() >= 3
}
