mod cli;

use cli::commands::Command;
use cli::Dama;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    Dama::from_args().execute();
}
