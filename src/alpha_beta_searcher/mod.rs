//! Time-bounded iterative-deepening alpha-beta search for Dama positions.

mod search;
mod transposition_table;


pub use search::{
    analyze, find_best_move, Analysis, CandidateLine, EngineConfig, SearchContext, SearchError,
    SearchOutcome,
};
pub use transposition_table::{BoundType, TTEntry, TranspositionTable};
