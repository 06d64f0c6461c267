//! Analyze command - win probability and best lines for a position.

use std::path::PathBuf;
use std::time::Duration;

use dama::alpha_beta_searcher::{analyze, EngineConfig, SearchContext};
use dama::board::Board;
use dama::evaluate::WeightedEvaluator;
use structopt::StructOpt;

use super::util::{best_weights, open_store, DEFAULT_GRAVEYARD_PATH, DEFAULT_POOL_PATH};
use super::Command;

#[derive(StructOpt)]
pub struct AnalyzeArgs {
    #[structopt(short, long = "time", default_value = "1000", help = "Milliseconds to search")]
    pub time_ms: u64,
    #[structopt(long, default_value = "3")]
    pub top: usize,
    #[structopt(long = "position", help = "64 cells from a8 to h1 plus the side to move")]
    pub position: Option<Board>,
    #[structopt(long = "pool", default_value = DEFAULT_POOL_PATH, parse(from_os_str))]
    pub pool_path: PathBuf,
}

impl Command for AnalyzeArgs {
    fn execute(self) {
        let mut store = open_store(self.pool_path, PathBuf::from(DEFAULT_GRAVEYARD_PATH));
        let evaluator = WeightedEvaluator::new(best_weights(&mut store));
        let board = self.position.unwrap_or_else(Board::starting_position);
        let mut context = SearchContext::new(EngineConfig::with_time_limit(
            Duration::from_millis(self.time_ms),
        ));

        println!("{}", board);
        match analyze(&mut context, &board, board.turn(), &evaluator, self.top) {
            Ok(analysis) => {
                println!(
                    "* Win probability for {}: {:.1}%",
                    board.turn(),
                    analysis.win_probability
                );
                println!(
                    "* Positions searched: {} (depth: {})",
                    analysis.nodes, analysis.depth
                );
                for (rank, line) in analysis.top_moves.iter().enumerate() {
                    println!(
                        "{}. {} ({:.1}%)",
                        rank + 1,
                        line.notation(),
                        line.win_probability
                    );
                }
            }
            Err(error) => eprintln!("Failed to analyze the position: {}", error),
        }
    }
}
