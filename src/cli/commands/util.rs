use std::path::PathBuf;

use dama::evaluate::Weights;
use dama::trainer::{JsonFileStore, PopulationStore};
use log::warn;

pub const DEFAULT_POOL_PATH: &str = "ai_pool.json";
pub const DEFAULT_GRAVEYARD_PATH: &str = "ai_graveyard.json";

pub fn open_store(pool: PathBuf, graveyard: PathBuf) -> JsonFileStore {
    JsonFileStore::new(pool, graveyard)
}

/// Weights of the best rated stored agent, or the defaults when there is no
/// usable pool.
pub fn best_weights(store: &mut JsonFileStore) -> Weights {
    match store.load_pool() {
        Ok(Some(pool)) if !pool.is_empty() => pool[0].weights,
        Ok(_) => Weights::default(),
        Err(error) => {
            warn!("could not load the pool ({}), using default weights", error);
            Weights::default()
        }
    }
}
