//! Storage for the active population and the graveyard of retired agents.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::agent::{is_valid_lineage, Agent};

#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("population I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed population data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("agent {id} has invalid weights")]
    InvalidWeights { id: u32 },
    #[error("agent {id} has an invalid lineage `{lineage}`")]
    InvalidLineage { id: u32, lineage: String },
}

/// Whether a pool came from storage or had to be created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationSource {
    Loaded,
    Fresh,
}

pub trait PopulationStore {
    /// The stored pool sorted by rating, or `None` when nothing was saved yet.
    fn load_pool(&mut self) -> Result<Option<Vec<Agent>>, PopulationError>;
    fn save_pool(&mut self, pool: &[Agent]) -> Result<(), PopulationError>;
    fn load_graveyard(&mut self) -> Result<Vec<Agent>, PopulationError>;
    fn save_graveyard(&mut self, graveyard: &[Agent]) -> Result<(), PopulationError>;
}

fn sorted_by_rating(mut agents: Vec<Agent>) -> Vec<Agent> {
    agents.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    agents
}

fn validate(agents: &[Agent]) -> Result<(), PopulationError> {
    for agent in agents {
        if !agent.weights.is_valid() {
            return Err(PopulationError::InvalidWeights { id: agent.id });
        }
        if !is_valid_lineage(&agent.lineage) {
            return Err(PopulationError::InvalidLineage {
                id: agent.id,
                lineage: agent.lineage.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    pool: Option<Vec<Agent>>,
    graveyard: Vec<Agent>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: Vec<Agent>) -> Self {
        Self {
            pool: Some(pool),
            graveyard: Vec::new(),
        }
    }

    pub fn pool(&self) -> Option<&[Agent]> {
        self.pool.as_deref()
    }

    pub fn graveyard(&self) -> &[Agent] {
        &self.graveyard
    }
}

impl PopulationStore for InMemoryStore {
    fn load_pool(&mut self) -> Result<Option<Vec<Agent>>, PopulationError> {
        match &self.pool {
            Some(pool) => {
                validate(pool)?;
                Ok(Some(sorted_by_rating(pool.clone())))
            }
            None => Ok(None),
        }
    }

    fn save_pool(&mut self, pool: &[Agent]) -> Result<(), PopulationError> {
        self.pool = Some(sorted_by_rating(pool.to_vec()));
        Ok(())
    }

    fn load_graveyard(&mut self) -> Result<Vec<Agent>, PopulationError> {
        Ok(self.graveyard.clone())
    }

    fn save_graveyard(&mut self, graveyard: &[Agent]) -> Result<(), PopulationError> {
        self.graveyard = graveyard.to_vec();
        Ok(())
    }
}

/// Keeps the pool and the graveyard as pretty-printed JSON arrays.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    pool_path: PathBuf,
    graveyard_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(pool_path: impl Into<PathBuf>, graveyard_path: impl Into<PathBuf>) -> Self {
        Self {
            pool_path: pool_path.into(),
            graveyard_path: graveyard_path.into(),
        }
    }

    pub fn pool_path(&self) -> &Path {
        &self.pool_path
    }

    pub fn graveyard_path(&self) -> &Path {
        &self.graveyard_path
    }

    fn read(path: &Path) -> Result<Option<Vec<Agent>>, PopulationError> {
        if !path.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(path)?);
        let agents: Vec<Agent> = serde_json::from_reader(reader)?;
        validate(&agents)?;
        Ok(Some(agents))
    }

    fn write(path: &Path, agents: &[Agent]) -> Result<(), PopulationError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, agents)?;
        writer.flush()?;
        Ok(())
    }
}

impl PopulationStore for JsonFileStore {
    fn load_pool(&mut self) -> Result<Option<Vec<Agent>>, PopulationError> {
        let pool = Self::read(&self.pool_path)?.map(sorted_by_rating);
        if let Some(pool) = &pool {
            info!(
                "loaded {} agents from {}",
                pool.len(),
                self.pool_path.display()
            );
        }
        Ok(pool)
    }

    fn save_pool(&mut self, pool: &[Agent]) -> Result<(), PopulationError> {
        Self::write(&self.pool_path, &sorted_by_rating(pool.to_vec()))?;
        info!("saved {} agents to {}", pool.len(), self.pool_path.display());
        Ok(())
    }

    fn load_graveyard(&mut self) -> Result<Vec<Agent>, PopulationError> {
        Ok(Self::read(&self.graveyard_path)?.unwrap_or_default())
    }

    fn save_graveyard(&mut self, graveyard: &[Agent]) -> Result<(), PopulationError> {
        Self::write(&self.graveyard_path, graveyard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::Weights;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agents(count: u32) -> Vec<Agent> {
        let mut rng = StdRng::seed_from_u64(11);
        (0..count)
            .map(|id| {
                let mut agent = Agent::random(id, &mut rng);
                agent.rating = 1000.0 + id as f64 * 10.0;
                agent
            })
            .collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dama-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_in_memory_store_sorts_by_rating() {
        let mut store = InMemoryStore::new();
        assert_eq!(None, store.load_pool().unwrap());

        store.save_pool(&agents(3)).unwrap();
        let pool = store.load_pool().unwrap().unwrap();

        let ratings: Vec<f64> = pool.iter().map(|agent| agent.rating).collect();
        assert_eq!(vec![1020.0, 1010.0, 1000.0], ratings);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = scratch_dir("round-trip");
        let mut store = JsonFileStore::new(dir.join("pool.json"), dir.join("graveyard.json"));
        assert_eq!(None, store.load_pool().unwrap());
        assert!(store.load_graveyard().unwrap().is_empty());

        let pool = agents(4);
        store.save_pool(&pool).unwrap();
        store.save_graveyard(&pool[..1]).unwrap();

        let loaded = store.load_pool().unwrap().unwrap();
        assert_eq!(4, loaded.len());
        assert_eq!(pool[3].id, loaded[0].id);
        assert_eq!(pool[3].lineage, loaded[0].lineage);
        assert!(pool[3].weights.is_close_to(&loaded[0].weights, 1e-9));

        let graveyard = store.load_graveyard().unwrap();
        assert_eq!(1, graveyard.len());
        assert_eq!(pool[0].id, graveyard[0].id);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_pool_is_an_error() {
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let pool_path = dir.join("pool.json");
        std::fs::write(&pool_path, "[{\"id\": 1,").unwrap();

        let mut store = JsonFileStore::new(&pool_path, dir.join("graveyard.json"));
        assert!(matches!(store.load_pool(), Err(PopulationError::Json(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_record_without_rating_or_lineage_is_an_error() {
        let dir = scratch_dir("incomplete");
        std::fs::create_dir_all(&dir).unwrap();
        let pool_path = dir.join("pool.json");
        let weights = serde_json::to_string(&Weights::default()).unwrap();

        std::fs::write(&pool_path, format!("[{{\"id\": 0, \"weights\": {}}}]", weights)).unwrap();
        let mut store = JsonFileStore::new(&pool_path, dir.join("graveyard.json"));
        assert!(matches!(store.load_pool(), Err(PopulationError::Json(_))));

        std::fs::write(
            &pool_path,
            format!("[{{\"id\": 0, \"lineage\": \"\", \"rating\": 1000.0, \"weights\": {}}}]", weights),
        )
        .unwrap();
        assert!(matches!(
            store.load_pool(),
            Err(PopulationError::InvalidLineage { id: 0, .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let mut pool = agents(2);
        pool[1].weights.king_value = -1.0;
        let id = pool[1].id;

        let mut store = InMemoryStore::with_pool(pool);
        assert!(matches!(
            store.load_pool(),
            Err(PopulationError::InvalidWeights { id: bad }) if bad == id
        ));
    }
}
