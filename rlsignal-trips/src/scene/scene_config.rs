use std::{collections::HashSet, path::Path};

use config::{Config, File};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{emergency_directory_name, SceneJob};
use crate::trips::{TripsConfig, TripsError};

/// a named traffic scenario. each scene overrides the source distribution
/// and the vehicle count of the base trips configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub name: String,
    pub src_prob: Vec<f64>,
    pub number_cars: usize,
}

/// configures a batch of route files: every scene is generated for every
/// environment type and every emergency probability.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScenesConfig {
    /// base trips configuration shared by all scenes
    #[serde(default)]
    pub trips: TripsConfig,
    pub scenes: Vec<SceneConfig>,
    #[serde(default = "default_env_types")]
    pub env_types: Vec<String>,
    /// defaults to no emergency vehicles plus the base emergency probability
    #[serde(default)]
    pub emergency_probs: Option<Vec<f64>>,
    /// road network passed to the route converter
    #[serde(default = "default_network_file")]
    pub network_file: String,
    /// name of the converted route file in each job directory
    #[serde(default = "default_route_filename")]
    pub route_filename: String,
}

fn default_env_types() -> Vec<String> {
    vec![String::from("test"), String::from("train")]
}

fn default_network_file() -> String {
    String::from("intersection.net.xml")
}

fn default_route_filename() -> String {
    String::from("intersection.rou.xml")
}

impl ScenesConfig {
    pub fn from_file(path: &Path) -> Result<ScenesConfig, TripsError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| TripsError::ReadError {
                path: path.to_owned(),
                message: e.to_string(),
            })?;
        config
            .try_deserialize::<ScenesConfig>()
            .map_err(|e| TripsError::ReadError {
                path: path.to_owned(),
                message: format!("invalid scenes configuration: {e}"),
            })
    }

    /// distinct emergency probabilities in configured order. values that share
    /// an output directory (`0.0` and `-0.0`, repeats) are kept once.
    pub fn emergency_probs(&self) -> Vec<f64> {
        let probs = match &self.emergency_probs {
            Some(probs) => probs.clone(),
            None => vec![0.0, self.trips.emergency_prob],
        };
        probs
            .into_iter()
            .unique_by(|p| emergency_directory_name(*p))
            .collect_vec()
    }

    /// enumerates one job per (scene, env type, emergency probability), in that
    /// nesting order, each with a fully resolved and validated trips configuration.
    pub fn jobs(&self, output_directory: &Path) -> Result<Vec<SceneJob>, TripsError> {
        if self.scenes.is_empty() {
            return Err(TripsError::InvalidUserInput(String::from(
                "scenes configuration has no scenes",
            )));
        }
        let mut names: HashSet<&str> = HashSet::new();
        for scene in self.scenes.iter() {
            validate_directory_component("scene", &scene.name)?;
            if !names.insert(scene.name.as_str()) {
                return Err(TripsError::InvalidUserInput(format!(
                    "scene '{}' is defined more than once",
                    scene.name
                )));
            }
        }
        let mut env_types: HashSet<&str> = HashSet::new();
        for env_type in self.env_types.iter() {
            validate_directory_component("env type", env_type)?;
            if !env_types.insert(env_type.as_str()) {
                return Err(TripsError::InvalidUserInput(format!(
                    "env type '{env_type}' is listed more than once"
                )));
            }
        }

        let emergency_probs = self.emergency_probs();
        let mut jobs = Vec::new();
        for scene in self.scenes.iter() {
            for env_type in self.env_types.iter() {
                for emergency_prob in emergency_probs.iter() {
                    let trips = TripsConfig {
                        src_prob: scene.src_prob.clone(),
                        number_cars: scene.number_cars,
                        emergency_prob: *emergency_prob,
                        ..self.trips.clone()
                    };
                    trips.validate().map_err(|e| {
                        TripsError::InvalidUserInput(format!("scene '{}': {e}", scene.name))
                    })?;
                    let job = SceneJob::new(
                        jobs.len(),
                        &scene.name,
                        env_type,
                        *emergency_prob,
                        output_directory,
                        trips,
                    );
                    jobs.push(job);
                }
            }
        }
        Ok(jobs)
    }
}

/// scene names and env types become single directories of the output tree.
fn validate_directory_component(kind: &str, name: &str) -> Result<(), TripsError> {
    if name.trim().is_empty() {
        return Err(TripsError::InvalidUserInput(format!(
            "{kind} name must not be empty"
        )));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(TripsError::InvalidUserInput(format!(
            "{kind} name '{name}' must not be a relative path or contain path separators"
        )));
    }
    Ok(())
}
