//! Count positions command - count reachable positions at a given depth.

use std::time::Instant;

use dama::board::Board;
use dama::move_generator::MoveGenerator;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let board = Board::starting_position();
        let move_generator = MoveGenerator::new();

        let start = Instant::now();
        let count = move_generator.count_positions(self.depth, &board, board.turn());
        let duration = start.elapsed();

        let positions_per_second = count as f64 / duration.as_secs_f64();
        println!(
            "depth: {}, positions: {}, positions per second: {:.0}",
            self.depth, count, positions_per_second
        );
    }
}
