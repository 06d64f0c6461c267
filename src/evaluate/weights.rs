use rand::Rng;
use serde::{Deserialize, Serialize};

/// Coefficients of the evaluation features. Every field must stay strictly
/// positive; breeding clamps mutated values to `MIN_WEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub piece_value: f64,
    #[serde(alias = "dama_value")]
    pub king_value: f64,
    pub advancement_bonus: f64,
    pub center_control_bonus: f64,
    pub defensive_bonus: f64,
}

pub const MIN_WEIGHT: f64 = 0.01;

impl Default for Weights {
    fn default() -> Self {
        Self {
            piece_value: 10.0,
            king_value: 27.5,
            advancement_bonus: 0.3,
            center_control_bonus: 0.2,
            defensive_bonus: 0.15,
        }
    }
}

impl Weights {
    pub const FEATURE_COUNT: usize = 5;

    /// A fresh configuration for a newly created agent.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            piece_value: rng.gen_range(8.0..12.0),
            king_value: rng.gen_range(25.0..35.0),
            advancement_bonus: rng.gen_range(0.1..0.6),
            center_control_bonus: rng.gen_range(0.1..0.6),
            defensive_bonus: rng.gen_range(0.05..0.4),
        }
    }

    pub fn features(&self) -> [f64; Self::FEATURE_COUNT] {
        [
            self.piece_value,
            self.king_value,
            self.advancement_bonus,
            self.center_control_bonus,
            self.defensive_bonus,
        ]
    }

    pub fn from_features(features: [f64; Self::FEATURE_COUNT]) -> Self {
        Self {
            piece_value: features[0],
            king_value: features[1],
            advancement_bonus: features[2],
            center_control_bonus: features[3],
            defensive_bonus: features[4],
        }
    }

    /// True when every feature differs by at most `tolerance`.
    pub fn is_close_to(&self, other: &Weights, tolerance: f64) -> bool {
        self.features()
            .iter()
            .zip(other.features().iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn is_valid(&self) -> bool {
        self.features().iter().all(|w| w.is_finite() && *w > 0.0)
    }
}
