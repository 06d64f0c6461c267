//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    analyze::AnalyzeArgs, count_positions::CountPositionsArgs, tournament::TournamentArgs,
    train::TrainArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "dama",
    about = "A Turkish draughts (Dama) engine with an evolutionary self-play trainer"
)]
pub enum Dama {
    #[structopt(
        name = "train",
        about = "Evolve the agent pool through rated self-play for `--generations` generations (default: 1). The pool and its graveyard are read from and written to JSON files; a fresh pool is created when none can be loaded."
    )]
    Train(TrainArgs),
    #[structopt(
        name = "watch",
        about = "Watch the engine play against itself with `--time` milliseconds per move (default: 500), printing every ply. The initial position can be given with `--position` (default: starting position)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "analyze",
        about = "Report the win probability of the side to move and its `--top` best lines (default: 3) after searching for `--time` milliseconds (default: 1000). The position can be given with `--position` (default: starting position)."
    )]
    Analyze(AnalyzeArgs),
    #[structopt(
        name = "tournament",
        about = "Play a double round robin between the `--entrants` best rated agents of the stored pool (default: 4) and print the standings."
    )]
    Tournament(TournamentArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the number of reachable positions for a given `--depth` (default: 4), and report the time it took to do so."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Dama {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Train(cmd),
            Watch(cmd),
            Analyze(cmd),
            Tournament(cmd),
            CountPositions(cmd),
        }
    }
}
