use std::time::Duration;

use log::info;
use rayon::prelude::*;

use crate::alpha_beta_searcher::SearchError;
use crate::board::color::Color;
use crate::evaluate::Weights;
use crate::game::self_play::{play_game, Contestant, SelfPlayConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct Entrant {
    pub name: String,
    pub weights: Weights,
    pub time_per_move: Duration,
}

impl Entrant {
    fn contestant(&self) -> Contestant {
        Contestant::new(self.weights, self.time_per_move)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: f64,
}

impl Standing {
    fn record(&mut self, score: f64) {
        if score >= 1.0 {
            self.wins += 1;
        } else if score <= 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        self.points += score;
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Plays every pair of entrants twice, once with each color, and returns the
/// standings sorted by points.
pub fn run_round_robin(
    entrants: &[Entrant],
    config: &SelfPlayConfig,
) -> Result<Vec<Standing>, SearchError> {
    let pairings: Vec<(usize, usize)> = (0..entrants.len())
        .flat_map(|a| ((a + 1)..entrants.len()).flat_map(move |b| vec![(a, b), (b, a)]))
        .collect();
    info!(
        "round robin: {} entrants, {} games",
        entrants.len(),
        pairings.len()
    );

    let results = pairings
        .par_iter()
        .map(|&(white, black)| -> Result<(usize, usize, f64), SearchError> {
            let record = play_game(
                &entrants[white].contestant(),
                &entrants[black].contestant(),
                config,
            )?;
            Ok((white, black, record.score_for(Color::White)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut standings: Vec<Standing> = entrants
        .iter()
        .map(|entrant| Standing {
            name: entrant.name.clone(),
            ..Standing::default()
        })
        .collect();

    for (white, black, white_score) in results {
        standings[white].record(white_score);
        standings[black].record(1.0 - white_score);
    }

    standings.sort_by(|a, b| b.points.total_cmp(&a.points));
    Ok(standings)
}
