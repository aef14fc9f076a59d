use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::{sampling, TripsError};

/// parameters of a single trip schedule generation.
///
/// node and probability lists are positional. sources and destinations
/// are kept in S, W, N, E order so that a turn offset applied to a source
/// index lands on the intended destination. turn probabilities are kept
/// in U-turn, left, straight, right order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TripsConfig {
    /// Weibull shape parameter controlling how departures cluster in time
    pub shape: f64,
    /// number of trips to generate
    pub number_cars: usize,
    /// horizon that departure times are rescaled into
    pub total_timesteps: u64,
    pub src_nodes: Vec<String>,
    pub dst_nodes: Vec<String>,
    /// probability of each source node, one entry per source
    pub src_prob: Vec<f64>,
    /// probability of each turn offset applied to the source index
    pub turn_prob: Vec<f64>,
    /// probability that any trip is an emergency vehicle
    pub emergency_prob: f64,
}

impl Default for TripsConfig {
    fn default() -> Self {
        Self {
            shape: 2.0,
            number_cars: 1000,
            total_timesteps: 5400,
            src_nodes: ["S-IN", "W-IN", "N-IN", "E-IN"].map(String::from).to_vec(),
            dst_nodes: ["S-OUT", "W-OUT", "N-OUT", "E-OUT"].map(String::from).to_vec(),
            src_prob: vec![0.25, 0.25, 0.25, 0.25],
            turn_prob: vec![0.0, 0.125, 0.75, 0.125],
            emergency_prob: 0.05,
        }
    }
}

impl TripsConfig {
    /// reads a configuration file. missing keys fall back to [`TripsConfig::default`].
    pub fn from_file(path: &Path) -> Result<TripsConfig, TripsError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| TripsError::ReadError {
                path: path.to_owned(),
                message: e.to_string(),
            })?;
        config
            .try_deserialize::<TripsConfig>()
            .map_err(|e| TripsError::ReadError {
                path: path.to_owned(),
                message: format!("invalid trips configuration: {e}"),
            })
    }

    /// confirms the node lists and distributions are consistent with each other.
    pub fn validate(&self) -> Result<(), TripsError> {
        if !(self.shape.is_finite() && self.shape > 0.0) {
            return Err(TripsError::InvalidUserInput(format!(
                "shape must be a positive number, found {}",
                self.shape
            )));
        }
        if self.number_cars == 0 {
            return Err(TripsError::InvalidUserInput(String::from(
                "number_cars must be positive",
            )));
        }
        if self.total_timesteps == 0 {
            return Err(TripsError::InvalidUserInput(String::from(
                "total_timesteps must be positive",
            )));
        }
        if !(0.0..=1.0).contains(&self.emergency_prob) {
            return Err(TripsError::InvalidUserInput(format!(
                "emergency_prob must be in [0, 1], found {}",
                self.emergency_prob
            )));
        }
        if self.src_nodes.is_empty() {
            return Err(TripsError::InvalidUserInput(String::from(
                "src_nodes must not be empty",
            )));
        }
        if self.src_nodes.len() != self.dst_nodes.len() {
            return Err(TripsError::InvalidUserInput(format!(
                "src_nodes and dst_nodes must have equal length, found {} and {}",
                self.src_nodes.len(),
                self.dst_nodes.len()
            )));
        }
        if self.src_prob.len() != self.src_nodes.len() {
            return Err(TripsError::InvalidUserInput(format!(
                "src_prob must have one entry per source node, found {} entries for {} nodes",
                self.src_prob.len(),
                self.src_nodes.len()
            )));
        }
        sampling::validate_pmf("src_prob", &self.src_prob)?;
        sampling::validate_pmf("turn_prob", &self.turn_prob)?;
        Ok(())
    }
}
