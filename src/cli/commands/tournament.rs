//! Tournament command - round robin between the best stored agents.

use std::path::PathBuf;
use std::time::Duration;

use dama::game::{run_round_robin, Entrant, SelfPlayConfig};
use dama::trainer::PopulationStore;
use structopt::StructOpt;

use super::util::{open_store, DEFAULT_GRAVEYARD_PATH, DEFAULT_POOL_PATH};
use super::Command;

#[derive(StructOpt)]
pub struct TournamentArgs {
    #[structopt(short, long, default_value = "4")]
    pub entrants: usize,
    #[structopt(short, long = "time", default_value = "100", help = "Milliseconds per move")]
    pub time_ms: u64,
    #[structopt(long = "pool", default_value = DEFAULT_POOL_PATH, parse(from_os_str))]
    pub pool_path: PathBuf,
}

impl Command for TournamentArgs {
    fn execute(self) {
        let mut store = open_store(self.pool_path, PathBuf::from(DEFAULT_GRAVEYARD_PATH));
        let pool = match store.load_pool() {
            Ok(Some(pool)) if pool.len() >= 2 => pool,
            Ok(_) => {
                eprintln!("The stored pool needs at least two agents; run `dama train` first.");
                return;
            }
            Err(error) => {
                eprintln!("Failed to load the pool: {}", error);
                return;
            }
        };

        let time_ms = self.time_ms;
        let entrants: Vec<Entrant> = pool
            .iter()
            .take(self.entrants)
            .map(|agent| Entrant {
                name: agent.name(),
                weights: agent.weights,
                time_per_move: Duration::from_millis(time_ms),
            })
            .collect();

        match run_round_robin(&entrants, &SelfPlayConfig::default()) {
            Ok(standings) => {
                println!("{:<8} {:>4} {:>4} {:>4} {:>6}", "agent", "W", "D", "L", "pts");
                for standing in standings {
                    println!(
                        "{:<8} {:>4} {:>4} {:>4} {:>6.1}",
                        standing.name, standing.wins, standing.draws, standing.losses, standing.points
                    );
                }
            }
            Err(error) => eprintln!("Tournament failed: {}", error),
        }
    }
}
