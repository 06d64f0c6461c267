//! Evolutionary training of evaluation weights through rated self-play.
//!
//! # Generation
//!
//! 1. Match phase: random pairings play complete games. The games run in
//!    parallel against the ratings frozen at the start of the phase; the
//!    results are then applied to the ratings one game at a time, in pairing
//!    order.
//! 2. Selection: the pool is sorted by rating. The top slice breeds, the
//!    bottom slice is retired to the graveyard and its slots are refilled.
//! 3. Reproduction: uniform crossover of two distinct elite parents followed
//!    by multiplicative mutation. Children matching any living or retired
//!    configuration are rejected and bred again.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use crate::alpha_beta_searcher::SearchError;
use crate::board::color::Color;
use crate::evaluate::{Weights, MIN_WEIGHT};
use crate::game::self_play::{play_game, Contestant, SelfPlayConfig};

use super::agent::{inherited_lineage, Agent};
use super::elo::{self, BASELINE_RATING, K_FACTOR};
use super::population::{PopulationError, PopulationSource, PopulationStore};

const LEADERBOARD_SIZE: usize = 10;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("population error: {0}")]
    Population(#[from] PopulationError),
    #[error("self-play error: {0}")]
    Search(#[from] SearchError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainerConfig {
    pub population_size: usize,
    pub games_per_agent: usize,
    pub elite_rate: f64,
    pub relegation_rate: f64,
    pub mutation_rate: f64,
    pub mutation_amount: f64,
    pub k_factor: f64,
    pub baseline_rating: f64,
    pub max_breeding_attempts: usize,
    pub duplicate_tolerance: f64,
    /// Seed for pairings and breeding; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub self_play: SelfPlayConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            games_per_agent: 10,
            elite_rate: 0.2,
            relegation_rate: 0.5,
            mutation_rate: 0.1,
            mutation_amount: 0.05,
            k_factor: K_FACTOR,
            baseline_rating: BASELINE_RATING,
            max_breeding_attempts: 100,
            duplicate_tolerance: 1e-9,
            seed: None,
            self_play: SelfPlayConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pairing {
    white: usize,
    black: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    pub generation: u32,
    pub games_played: usize,
    pub recreated: usize,
    /// Relegated slots for which no unique child could be bred.
    pub unchanged: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainingReport {
    pub source: PopulationSource,
    pub first_generation: u32,
    pub last_generation: u32,
    /// The final pool, best rated first.
    pub pool: Vec<Agent>,
}

pub struct Trainer {
    config: TrainerConfig,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn create_population(&mut self) -> Vec<Agent> {
        (0..self.config.population_size as u32)
            .map(|id| {
                let mut agent = Agent::random(id, &mut self.rng);
                agent.rating = self.config.baseline_rating;
                agent
            })
            .collect()
    }

    /// Number of agents allowed to breed. At least two, so children always
    /// have two distinct parents once the pool is big enough.
    pub fn elite_count(&self, pool_size: usize) -> usize {
        let by_rate = (pool_size as f64 * self.config.elite_rate).round() as usize;
        by_rate.max(pool_size.min(2)).min(pool_size)
    }

    pub fn relegation_count(&self, pool_size: usize) -> usize {
        let by_rate = (pool_size as f64 * self.config.relegation_rate).round() as usize;
        by_rate.min(pool_size)
    }

    /// Plays the match phase and updates ratings in place. Returns the number
    /// of games played.
    pub fn play_matches(&mut self, pool: &mut [Agent]) -> Result<usize, TrainerError> {
        if pool.len() < 2 {
            return Ok(0);
        }

        let match_count = pool.len() * self.config.games_per_agent / 2;
        let pairings: Vec<Pairing> = (0..match_count)
            .map(|_| {
                let picked = index::sample(&mut self.rng, pool.len(), 2);
                let (first, second) = (picked.index(0), picked.index(1));
                if self.rng.gen_bool(0.5) {
                    Pairing {
                        white: first,
                        black: second,
                    }
                } else {
                    Pairing {
                        white: second,
                        black: first,
                    }
                }
            })
            .collect();

        let self_play = self.config.self_play;
        let contestants: Vec<Contestant> = pool
            .iter()
            .map(|agent| Contestant::new(agent.weights, self_play.time_for_rating(agent.rating)))
            .collect();

        let roster: &[Agent] = pool;
        let scores = pairings
            .par_iter()
            .map(|pairing| -> Result<f64, SearchError> {
                let record = play_game(
                    &contestants[pairing.white],
                    &contestants[pairing.black],
                    &self_play,
                )?;
                debug!(
                    "{} vs {}: {:?} after {} plies",
                    roster[pairing.white].name(),
                    roster[pairing.black].name(),
                    record.ending,
                    record.ply_count()
                );
                Ok(record.score_for(Color::White))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (pairing, white_score) in pairings.iter().zip(scores) {
            let (white, black) = elo::update_pair(
                pool[pairing.white].rating,
                pool[pairing.black].rating,
                white_score,
                self.config.k_factor,
            );
            pool[pairing.white].rating = white;
            pool[pairing.black].rating = black;
        }

        Ok(pairings.len())
    }

    /// Runs one generation: matches, selection and reproduction. Retired
    /// agents are appended to `graveyard`.
    pub fn run_generation(
        &mut self,
        pool: &mut Vec<Agent>,
        graveyard: &mut Vec<Agent>,
        generation: u32,
    ) -> Result<GenerationReport, TrainerError> {
        info!("generation {}: {} agents", generation, pool.len());
        let games_played = self.play_matches(pool)?;

        pool.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        let elite_count = self.elite_count(pool.len());
        let relegated = self.relegation_count(pool.len());
        let mut report = GenerationReport {
            generation,
            games_played,
            recreated: 0,
            unchanged: 0,
        };
        if elite_count == 0 || relegated == 0 {
            return Ok(report);
        }

        let elite: Vec<(Weights, String)> = pool[..elite_count]
            .iter()
            .map(|agent| (agent.weights, agent.lineage.clone()))
            .collect();
        let relegation_start = pool.len() - relegated;
        graveyard.extend(pool[relegation_start..].iter().cloned());

        for (creation_order, slot) in (relegation_start..pool.len()).enumerate() {
            match self.breed_unique(&elite, pool, graveyard) {
                Some((weights, parent_lineage)) => {
                    let lineage = inherited_lineage(&mut self.rng, &parent_lineage);
                    let agent = &mut pool[slot];
                    agent.generation = generation;
                    agent.creation_order = creation_order as u32;
                    agent.lineage = lineage;
                    agent.rating = self.config.baseline_rating;
                    agent.weights = weights;
                    report.recreated += 1;
                }
                None => {
                    warn!(
                        "no unique child for {} after {} attempts, leaving it unchanged",
                        pool[slot].name(),
                        self.config.max_breeding_attempts
                    );
                    report.unchanged += 1;
                }
            }
        }

        info!(
            "generation {}: {} games, {} agents recreated, best {}",
            generation, report.games_played, report.recreated, pool[0]
        );
        Ok(report)
    }

    /// Loads the population (or creates a fresh one), trains it for
    /// `generations` generations and stores it after each of them.
    pub fn run_session<S: PopulationStore + ?Sized>(
        &mut self,
        store: &mut S,
        generations: u32,
    ) -> Result<TrainingReport, TrainerError> {
        let size = self.config.population_size;
        let (mut pool, source) = match store.load_pool() {
            Ok(Some(pool)) if pool.len() == size => (pool, PopulationSource::Loaded),
            Ok(Some(pool)) => {
                info!(
                    "stored pool has {} agents but {} are configured, creating a fresh pool",
                    pool.len(),
                    size
                );
                (self.create_population(), PopulationSource::Fresh)
            }
            Ok(None) => {
                info!("no stored pool, creating {} agents", size);
                (self.create_population(), PopulationSource::Fresh)
            }
            Err(error) => {
                warn!("could not load the pool ({}), creating a fresh one", error);
                (self.create_population(), PopulationSource::Fresh)
            }
        };

        let first_generation = match source {
            PopulationSource::Loaded => pool.iter().map(|a| a.generation).max().unwrap_or(0) + 1,
            PopulationSource::Fresh => 1,
        };

        let mut graveyard = match store.load_graveyard() {
            Ok(graveyard) => graveyard,
            Err(error) => {
                warn!("could not load the graveyard ({}), starting an empty one", error);
                Vec::new()
            }
        };

        let last_generation = first_generation + generations.saturating_sub(1);
        for generation in first_generation..first_generation + generations {
            self.run_generation(&mut pool, &mut graveyard, generation)?;
            store.save_pool(&pool)?;
            store.save_graveyard(&graveyard)?;
        }

        pool.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        info!("top {} by rating:", LEADERBOARD_SIZE);
        for (rank, agent) in pool.iter().take(LEADERBOARD_SIZE).enumerate() {
            info!("{}. {}", rank + 1, agent);
        }

        Ok(TrainingReport {
            source,
            first_generation,
            last_generation,
            pool,
        })
    }

    fn breed_unique(
        &mut self,
        elite: &[(Weights, String)],
        pool: &[Agent],
        graveyard: &[Agent],
    ) -> Option<(Weights, String)> {
        for _ in 0..self.config.max_breeding_attempts {
            let (primary, secondary) = self.select_parents(elite);
            let offspring = self.crossover(&elite[primary].0, &elite[secondary].0);
            let child = self.mutate(offspring);
            if !self.is_duplicate(&child, pool, graveyard) {
                return Some((child, elite[primary].1.clone()));
            }
        }
        None
    }

    fn select_parents(&mut self, elite: &[(Weights, String)]) -> (usize, usize) {
        if elite.len() < 2 {
            return (0, 0);
        }
        let picked = index::sample(&mut self.rng, elite.len(), 2);
        (picked.index(0), picked.index(1))
    }

    fn crossover(&mut self, primary: &Weights, secondary: &Weights) -> Weights {
        let mut features = primary.features();
        for (feature, other) in features.iter_mut().zip(secondary.features().iter()) {
            if self.rng.gen_bool(0.5) {
                *feature = *other;
            }
        }
        Weights::from_features(features)
    }

    fn mutate(&mut self, weights: Weights) -> Weights {
        let amount = self.config.mutation_amount;
        let mut features = weights.features();
        for feature in features.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                let factor = 1.0 + self.rng.gen_range(-amount..=amount);
                *feature = (*feature * factor).max(MIN_WEIGHT);
            }
        }
        Weights::from_features(features)
    }

    fn is_duplicate(&self, weights: &Weights, pool: &[Agent], graveyard: &[Agent]) -> bool {
        let tolerance = self.config.duplicate_tolerance;
        pool.iter()
            .chain(graveyard.iter())
            .any(|agent| agent.weights.is_close_to(weights, tolerance))
    }
}
