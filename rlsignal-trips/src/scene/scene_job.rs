use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::trips::{trips_ops::DEFAULT_TRIPS_FILENAME, TripsConfig};

pub const METADATA_FILENAME: &str = "trips-metadata.json";

/// one route file to generate: a scene under one environment type and one
/// emergency probability.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneJob {
    /// position of the job in the batch, used as its random stream
    pub job_index: usize,
    pub scene: String,
    pub env_type: String,
    pub emergency_prob: f64,
    /// `<output>/<scene>/<env_type>/emergency_<p>`
    pub directory: PathBuf,
    pub trips: TripsConfig,
}

impl SceneJob {
    pub fn new(
        job_index: usize,
        scene: &str,
        env_type: &str,
        emergency_prob: f64,
        output_directory: &Path,
        trips: TripsConfig,
    ) -> SceneJob {
        let directory = output_directory
            .join(scene)
            .join(env_type)
            .join(emergency_directory_name(emergency_prob));
        SceneJob {
            job_index,
            scene: scene.to_string(),
            env_type: env_type.to_string(),
            emergency_prob,
            directory,
            trips,
        }
    }

    /// the random source of this job: the batch seed on the job's own
    /// ChaCha stream, so draws do not depend on which thread runs the job.
    pub fn rng(&self, seed: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(self.job_index as u64);
        rng
    }

    pub fn trips_file(&self) -> PathBuf {
        self.directory.join(DEFAULT_TRIPS_FILENAME)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.directory.join(METADATA_FILENAME)
    }

    pub fn routes_file(&self, route_filename: &str) -> PathBuf {
        self.directory.join(route_filename)
    }
}

/// `emergency_0`, `emergency_0.05`, ...
pub fn emergency_directory_name(emergency_prob: f64) -> String {
    // -0.0 shares the directory of 0.0
    let emergency_prob = if emergency_prob == 0.0 {
        0.0
    } else {
        emergency_prob
    };
    format!("emergency_{emergency_prob}")
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_emergency_directory_name() {
        assert_eq!(emergency_directory_name(0.0), "emergency_0");
        assert_eq!(emergency_directory_name(0.05), "emergency_0.05");
        assert_eq!(emergency_directory_name(1.0), "emergency_1");
        assert_eq!(emergency_directory_name(-0.0), "emergency_0");
    }

    #[test]
    fn test_job_streams_differ() {
        let out = Path::new("routes");
        let a = SceneJob::new(0, "s", "train", 0.0, out, TripsConfig::default());
        let b = SceneJob::new(1, "s", "train", 0.05, out, TripsConfig::default());
        let (x, y): (u64, u64) = (a.rng(10).random(), b.rng(10).random());
        assert_ne!(x, y);
        assert_eq!(x, a.rng(10).random::<u64>());
    }
}
