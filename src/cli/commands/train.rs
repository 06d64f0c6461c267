//! Train command - evolve the agent pool through rated self-play.

use std::path::PathBuf;
use std::time::Duration;

use dama::game::SelfPlayConfig;
use dama::trainer::{PopulationSource, Trainer, TrainerConfig};
use structopt::StructOpt;

use super::util::{open_store, DEFAULT_GRAVEYARD_PATH, DEFAULT_POOL_PATH};
use super::Command;

#[derive(StructOpt)]
pub struct TrainArgs {
    #[structopt(short, long, default_value = "1")]
    pub generations: u32,
    #[structopt(long = "games", default_value = "10", help = "Games per agent per generation")]
    pub games_per_agent: usize,
    #[structopt(long = "size", default_value = "100", help = "Number of agents in the pool")]
    pub population_size: usize,
    #[structopt(long = "pool", default_value = DEFAULT_POOL_PATH, parse(from_os_str))]
    pub pool_path: PathBuf,
    #[structopt(long = "graveyard", default_value = DEFAULT_GRAVEYARD_PATH, parse(from_os_str))]
    pub graveyard_path: PathBuf,
    #[structopt(long, help = "Seed for pairings and breeding")]
    pub seed: Option<u64>,
    #[structopt(
        long = "base-time",
        default_value = "50",
        help = "Milliseconds per move for an agent at the baseline rating"
    )]
    pub base_time_ms: u64,
    #[structopt(
        long = "max-time",
        default_value = "2000",
        help = "Upper bound in milliseconds for the rating-scaled time per move"
    )]
    pub max_time_ms: u64,
}

impl Command for TrainArgs {
    fn execute(self) {
        let config = TrainerConfig {
            population_size: self.population_size,
            games_per_agent: self.games_per_agent,
            seed: self.seed,
            self_play: SelfPlayConfig {
                base_time: Duration::from_millis(self.base_time_ms),
                max_time: Duration::from_millis(self.max_time_ms),
                ..SelfPlayConfig::default()
            },
            ..TrainerConfig::default()
        };
        let mut store = open_store(self.pool_path, self.graveyard_path);
        let mut trainer = Trainer::new(config);

        match trainer.run_session(&mut store, self.generations) {
            Ok(report) => {
                if report.source == PopulationSource::Fresh {
                    println!("Started from a fresh pool of {} agents.", report.pool.len());
                }
                println!(
                    "Trained generations {} to {}.",
                    report.first_generation, report.last_generation
                );
                println!("Top 10 by rating:");
                for (rank, agent) in report.pool.iter().take(10).enumerate() {
                    println!("{:>3}. {}", rank + 1, agent);
                }
            }
            Err(error) => {
                eprintln!("Training failed: {}", error);
                std::process::exit(1);
            }
        }
    }
}
