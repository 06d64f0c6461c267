use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluate::Weights;

use super::elo::BASELINE_RATING;

const LINEAGE_LENGTH: usize = 3;

/// True for a tag of three uppercase letters.
pub fn is_valid_lineage(lineage: &str) -> bool {
    lineage.len() == LINEAGE_LENGTH && lineage.chars().all(|c| c.is_ascii_uppercase())
}

/// A member of the training population: an evaluation configuration plus its
/// rating and ancestry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    #[serde(default)]
    pub generation: u32,
    #[serde(default)]
    pub creation_order: u32,
    pub lineage: String,
    #[serde(alias = "elo")]
    pub rating: f64,
    pub weights: Weights,
}

impl Agent {
    /// A first-generation agent with random weights.
    pub fn random<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Self {
        Self {
            id,
            generation: 0,
            creation_order: id,
            lineage: random_lineage(rng),
            rating: BASELINE_RATING,
            weights: Weights::random(rng),
        }
    }

    pub fn name(&self) -> String {
        format!("AI-{:03}", self.id + 1)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] gen {} #{} rating {:.2}",
            self.name(),
            self.lineage,
            self.generation,
            self.creation_order,
            self.rating
        )
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    (b'A' + rng.gen_range(0..26u8)) as char
}

pub fn random_lineage<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LINEAGE_LENGTH).map(|_| random_letter(rng)).collect()
}

/// A fresh tag that keeps the last character of the primary parent's tag.
pub fn inherited_lineage<R: Rng + ?Sized>(rng: &mut R, parent: &str) -> String {
    let mut lineage: String = (0..LINEAGE_LENGTH - 1)
        .map(|_| random_letter(rng))
        .collect();
    match parent.chars().last() {
        Some(inherited) => lineage.push(inherited),
        None => lineage.push(random_letter(rng)),
    }
    lineage
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_name() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!("AI-001", Agent::random(0, &mut rng).name());
        assert_eq!("AI-042", Agent::random(41, &mut rng).name());
    }

    #[test]
    fn test_lineage() {
        let mut rng = StdRng::seed_from_u64(3);
        let parent = random_lineage(&mut rng);
        assert_eq!(3, parent.len());
        assert!(parent.chars().all(|c| c.is_ascii_uppercase()));

        let child = inherited_lineage(&mut rng, &parent);
        assert_eq!(3, child.len());
        assert_eq!(parent.chars().last(), child.chars().last());
        assert!(is_valid_lineage(&parent));
        assert!(is_valid_lineage(&child));
    }

    #[test]
    fn test_legacy_records_deserialize() {
        let json = r#"{
            "id": 4,
            "name": "AI-005",
            "lineage": "QRT",
            "elo": 1032.5,
            "weights": {
                "piece_value": 10.0,
                "dama_value": 27.5,
                "advancement_bonus": 0.3,
                "center_control_bonus": 0.2,
                "defensive_bonus": 0.15
            }
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();

        assert_eq!("AI-005", agent.name());
        assert_eq!(1032.5, agent.rating);
        assert_eq!(0, agent.generation);
        assert_eq!(Weights::default(), agent.weights);
    }

    #[test]
    fn test_record_without_rating_is_rejected() {
        let json = r#"{
            "id": 0,
            "lineage": "ABC",
            "weights": {
                "piece_value": 10.0,
                "king_value": 25.0,
                "advancement_bonus": 0.3,
                "center_control_bonus": 0.2,
                "defensive_bonus": 0.15
            }
        }"#;
        assert!(serde_json::from_str::<Agent>(json).is_err());
    }

    #[test]
    fn test_is_valid_lineage() {
        assert!(is_valid_lineage("ABC"));
        assert!(!is_valid_lineage(""));
        assert!(!is_valid_lineage("AB"));
        assert!(!is_valid_lineage("ABCD"));
        assert!(!is_valid_lineage("aBC"));
    }
}
