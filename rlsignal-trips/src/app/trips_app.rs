use std::path::Path;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{
    scene::{scene_ops, Duarouter, ScenesConfig, SkipConversion, DEFAULT_DUAROUTER_BINARY},
    trips::{trips_ops, TripsConfig, TripsError, TripsSummary, VehicleClass},
};

/// Command line tool for generating Weibull-distributed trip schedules and
/// SUMO route files for traffic-signal reinforcement learning experiments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TripsApp {
    #[command(subcommand)]
    pub op: TripsOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TripsOperation {
    /// generate a single trips document
    Generate {
        /// TOML trips configuration. if not provided, the built-in defaults
        /// (four-leg intersection, 1000 cars over 5400 timesteps) are used.
        #[arg(short, long)]
        configuration_file: Option<String>,

        /// trips document to write. an existing file is overwritten.
        #[arg(short, long, default_value_t = String::from(trips_ops::DEFAULT_TRIPS_FILENAME))]
        output_file: String,

        /// seed for the random source. if not provided, a seed is drawn and logged.
        #[arg(short, long)]
        seed: Option<u64>,

        /// override the number of trips from the configuration
        #[arg(long)]
        number_cars: Option<usize>,

        /// override the emergency vehicle probability from the configuration
        #[arg(long)]
        emergency_prob: Option<f64>,

        /// also write a JSON summary of the generated schedule
        #[arg(long)]
        metadata_file: Option<String>,
    },
    /// generate trips and route files for every scene, environment type and
    /// emergency probability of a scenes configuration
    Scenes {
        /// TOML scenes configuration
        #[arg(short, long)]
        configuration_file: String,

        /// root directory of the generated `<scene>/<env_type>/emergency_<p>` tree
        #[arg(short, long, default_value_t = String::from("routes"))]
        output_directory: String,

        /// batch seed. each job draws from its own stream of this seed.
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        parallelism: usize,

        /// write trips documents only, without running the route converter
        #[arg(long)]
        skip_routing: bool,

        /// route converter executable
        #[arg(long, default_value_t = String::from(DEFAULT_DUAROUTER_BINARY))]
        duarouter_binary: String,
    },
    /// print the default trips configuration as TOML
    DefaultConfig,
}

impl TripsOperation {
    pub fn run(&self) -> Result<(), TripsError> {
        match self {
            TripsOperation::Generate {
                configuration_file,
                output_file,
                seed,
                number_cars,
                emergency_prob,
                metadata_file,
            } => {
                let mut config = match configuration_file {
                    Some(f) => TripsConfig::from_file(Path::new(f))?,
                    None => TripsConfig::default(),
                };
                if let Some(n) = number_cars {
                    config.number_cars = *n;
                }
                if let Some(p) = emergency_prob {
                    config.emergency_prob = *p;
                }
                let summary = generate(&config, Path::new(output_file), *seed)?;
                if let Some(f) = metadata_file {
                    summary.write_json(Path::new(f))?;
                }
                Ok(())
            }
            TripsOperation::Scenes {
                configuration_file,
                output_directory,
                seed,
                parallelism,
                skip_routing,
                duarouter_binary,
            } => {
                let config = ScenesConfig::from_file(Path::new(configuration_file))?;
                let (_, seed) = trips_ops::seeded_rng(*seed);
                let outdir = Path::new(output_directory);
                let summaries = if *skip_routing {
                    scene_ops::run_scenes(&config, outdir, seed, *parallelism, &SkipConversion)
                } else {
                    let router = Duarouter::new(duarouter_binary);
                    scene_ops::run_scenes(&config, outdir, seed, *parallelism, &router)
                }?;
                let total: usize = summaries.iter().map(|s| s.trips).sum();
                log::info!(
                    "wrote {} scene jobs with {total} trips to {output_directory} (seed {seed})",
                    summaries.len()
                );
                Ok(())
            }
            TripsOperation::DefaultConfig => {
                let contents = toml::to_string_pretty(&TripsConfig::default()).map_err(|e| {
                    TripsError::Internal(format!("failure serializing default configuration: {e}"))
                })?;
                println!("{contents}");
                Ok(())
            }
        }
    }
}

/// generates a schedule from `config` and writes it to `output_file`.
pub fn generate(
    config: &TripsConfig,
    output_file: &Path,
    seed: Option<u64>,
) -> Result<TripsSummary, TripsError> {
    let (mut rng, seed) = trips_ops::seeded_rng(seed);
    log::info!(
        "generating {} trips over {} timesteps (shape {}, seed {seed})",
        config.number_cars,
        config.total_timesteps,
        config.shape
    );
    let trips = trips_ops::generate_trips(config, &mut rng)?;
    trips_ops::write_trips_file(&trips, output_file)?;
    let summary = TripsSummary::new(&trips, seed, None);
    log::info!(
        "wrote {} trips ({} emergency) to {}",
        summary.trips,
        summary.count(VehicleClass::Emergency),
        output_file.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        TripsApp::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_arguments() {
        let app = TripsApp::try_parse_from([
            "rlsignal-trips",
            "generate",
            "--seed",
            "3",
            "--number-cars",
            "10",
            "--output-file",
            "out.trips.xml",
        ])
        .expect("should parse");
        match app.op {
            TripsOperation::Generate {
                seed,
                number_cars,
                output_file,
                configuration_file,
                ..
            } => {
                assert_eq!(seed, Some(3));
                assert_eq!(number_cars, Some(10));
                assert_eq!(output_file, "out.trips.xml");
                assert!(configuration_file.is_none());
            }
            _ => panic!("expected generate operation"),
        }
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let contents = toml::to_string_pretty(&TripsConfig::default()).expect("serialize");
        let parsed: TripsConfig = toml::from_str(&contents).expect("deserialize");
        assert_eq!(parsed, TripsConfig::default());
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = std::env::temp_dir().join("rlsignal-trips-test-app-generate");
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("trips.trips.xml");
        let config = TripsConfig {
            number_cars: 25,
            ..Default::default()
        };
        let summary = generate(&config, &path, Some(4)).expect("should generate");
        assert_eq!(summary.trips, 25);
        assert_eq!(summary.seed, 4);
        let document = std::fs::read_to_string(&path).expect("should read");
        assert_eq!(document.matches("<trip ").count(), 25);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
