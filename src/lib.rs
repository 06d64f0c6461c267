pub mod alpha_beta_searcher;
pub mod board;
pub mod dama_move;
pub mod evaluate;
pub mod game;
pub mod move_generator;
pub mod trainer;
