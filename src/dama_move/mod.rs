pub mod dama_move;
pub mod notation;

pub use dama_move::{DamaMove, MoveKind, MovePath};
