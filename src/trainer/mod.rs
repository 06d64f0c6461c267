pub mod agent;
pub mod elo;
pub mod evolution;
pub mod population;

pub use agent::Agent;
pub use evolution::{GenerationReport, Trainer, TrainerConfig, TrainerError, TrainingReport};
pub use population::{
    InMemoryStore, JsonFileStore, PopulationError, PopulationSource, PopulationStore,
};
