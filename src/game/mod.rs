pub mod self_play;
pub mod session;
pub mod tournament;

pub use self_play::{play_game, play_game_from, Contestant, GameRecord, SelfPlayConfig};
pub use session::{GameSession, SessionConfig, SessionError};
pub use tournament::{run_round_robin, Entrant, Standing};
