//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod analyze;
pub mod count_positions;
pub mod tournament;
pub mod train;
pub mod watch;

// Shared utilities for commands
pub(crate) mod util;
