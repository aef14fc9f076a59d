use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::SumoEnvConfig;
use crate::EnvError;

/// hyperparameters handed to the external DQN trainer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DqnConfig {
    pub policy: String,
    pub learning_rate: f64,
    pub learning_starts: u64,
    pub train_freq: u64,
    pub target_update_interval: u64,
    pub exploration_initial_eps: f64,
    pub exploration_final_eps: f64,
    pub total_timesteps: u64,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            policy: String::from("MlpPolicy"),
            learning_rate: 0.001,
            learning_starts: 0,
            train_freq: 1,
            target_update_interval: 500,
            exploration_initial_eps: 0.05,
            exploration_final_eps: 0.01,
            total_timesteps: 5400,
        }
    }
}

/// the agent controlling the traffic signal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AgentConfig {
    /// cycles through every phase in index order, one phase per action step
    RoundRobin {
        #[serde(default = "default_phases")]
        phases: usize,
    },
    /// cycles through an explicit phase order
    PhaseSequence { phases: Vec<usize> },
    Dqn(DqnConfig),
}

fn default_phases() -> usize {
    4
}

impl AgentConfig {
    pub fn name(&self) -> &'static str {
        match self {
            AgentConfig::RoundRobin { .. } => "round_robin",
            AgentConfig::PhaseSequence { .. } => "phase_sequence",
            AgentConfig::Dqn(_) => "dqn",
        }
    }
}

/// an experiment: one environment, one agent and a number of episodes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExperimentConfig {
    pub env: SumoEnvConfig,
    pub agent: AgentConfig,
    #[serde(default = "default_episodes")]
    pub episodes: usize,
    /// seed of the first episode. subsequent episodes add their episode offset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_episodes() -> usize {
    1
}

impl ExperimentConfig {
    pub fn from_file(path: &Path) -> Result<ExperimentConfig, EnvError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| EnvError::ReadError {
                path: path.to_owned(),
                message: e.to_string(),
            })?;
        let experiment = config
            .try_deserialize::<ExperimentConfig>()
            .map_err(|e| EnvError::ReadError {
                path: path.to_owned(),
                message: format!("invalid experiment configuration: {e}"),
            })?;
        experiment.env.validate()?;
        Ok(experiment)
    }

    pub fn episode_seed(&self, episode: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(episode as u64))
    }
}
