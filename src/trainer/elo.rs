//! Elo rating arithmetic.

pub const K_FACTOR: f64 = 32.0;
pub const BASELINE_RATING: f64 = 1000.0;

/// Expected score of a player rated `rating` against `opponent`. A 400 point
/// lead means ten-to-one odds.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// New rating after a game with `score` 1 (win), 0.5 (draw) or 0 (loss).
pub fn update(rating: f64, opponent: f64, score: f64, k_factor: f64) -> f64 {
    rating + k_factor * (score - expected_score(rating, opponent))
}

/// Rates both sides of one game from the first player's `score`.
pub fn update_pair(first: f64, second: f64, score: f64, k_factor: f64) -> (f64, f64) {
    (
        update(first, second, score, k_factor),
        update(second, first, 1.0 - score, k_factor),
    )
}
