//! Watch command - watch the engine play against itself.

use std::path::PathBuf;
use std::time::Duration;

use dama::board::Board;
use dama::game::{play_game_from, Contestant, SelfPlayConfig};
use structopt::StructOpt;

use super::util::{best_weights, open_store, DEFAULT_GRAVEYARD_PATH, DEFAULT_POOL_PATH};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long = "time", default_value = "500", help = "Milliseconds per move")]
    pub time_ms: u64,
    #[structopt(long = "position", help = "64 cells from a8 to h1 plus the side to move")]
    pub starting_position: Option<Board>,
    #[structopt(long = "plies", default_value = "150")]
    pub max_plies: u32,
    #[structopt(long = "pool", default_value = DEFAULT_POOL_PATH, parse(from_os_str))]
    pub pool_path: PathBuf,
}

impl Command for WatchArgs {
    fn execute(self) {
        let mut store = open_store(self.pool_path, PathBuf::from(DEFAULT_GRAVEYARD_PATH));
        let contestant = Contestant::new(
            best_weights(&mut store),
            Duration::from_millis(self.time_ms),
        );
        let config = SelfPlayConfig {
            max_plies: self.max_plies,
            ..SelfPlayConfig::default()
        };
        let board = self
            .starting_position
            .unwrap_or_else(Board::starting_position);

        println!("{}", board);
        let mut ply = 0;
        let result = play_game_from(board, &contestant, &contestant, &config, |dama_move, next| {
            ply += 1;
            println!("{}. {}", ply, dama_move);
            println!("{}", next);
        });

        match result {
            Ok(record) => println!("Game over after {} plies: {:?}", record.ply_count(), record.ending),
            Err(error) => eprintln!("error: {}", error),
        }
    }
}
