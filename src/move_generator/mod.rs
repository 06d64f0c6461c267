mod generator;
mod move_set;

#[cfg(test)]
mod tests;

pub use generator::MoveGenerator;
pub use move_set::{DamaMoveList, MoveSet};
