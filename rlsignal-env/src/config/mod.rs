mod env_config;
mod experiment_config;

pub use env_config::{RenderMode, SumoEnvConfig, SumoSeed};
pub use experiment_config::{AgentConfig, DqnConfig, ExperimentConfig};
