use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use itertools::Itertools;
use kdam::{Bar, BarBuilder, BarExt};
use rayon::prelude::*;

use super::{RouteConverter, SceneJob, ScenesConfig};
use crate::{
    trips::{batch_processing_error, trips_ops, TripsError, TripsSummary},
    util::fs::create_dirs,
};

/// generates the trips document, metadata and route file of every scene job.
///
/// jobs run on `parallelism` chunks of the rayon pool. each job draws from
/// its own stream of `seed`, so output does not depend on scheduling. all
/// job failures are collected and returned together.
///
/// # Arguments
///
/// * `config` - scenes to generate
/// * `output_directory` - root of the `<scene>/<env_type>/emergency_<p>` tree
/// * `seed` - batch seed
/// * `parallelism` - number of chunks the jobs are split into
/// * `converter` - produces the route file from each trips document
pub fn run_scenes<C>(
    config: &ScenesConfig,
    output_directory: &Path,
    seed: u64,
    parallelism: usize,
    converter: &C,
) -> Result<Vec<TripsSummary>, TripsError>
where
    C: RouteConverter + Sync,
{
    let jobs = config.jobs(output_directory)?;
    for job in jobs.iter() {
        create_dirs(&job.directory)?;
    }
    log::info!(
        "generating {} scene jobs into {} with seed {seed}",
        jobs.len(),
        output_directory.display()
    );

    let network_file = Path::new(&config.network_file);
    let chunk_size = std::cmp::max(1, jobs.len().div_ceil(std::cmp::max(1, parallelism)));

    // a progress bar shared across threads
    let bar: Arc<Mutex<Bar>> = Arc::new(Mutex::new(
        BarBuilder::default()
            .desc("scene trips generation")
            .total(jobs.len())
            .animation("fillup")
            .build()
            .map_err(|e| TripsError::Internal(format!("failure building progress bar: {e}")))?,
    ));

    let (summaries, errors): (Vec<TripsSummary>, Vec<TripsError>) = jobs
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .map(|job| {
                    let result = run_job(job, seed, network_file, &config.route_filename, converter)
                        .map_err(|e| {
                            TripsError::BatchProcessing(format!(
                                "while processing {}: {e}",
                                job.directory.display()
                            ))
                        });
                    if let Ok(mut bar) = bar.clone().lock() {
                        let _ = bar.update(1);
                    }
                    result
                })
                .collect_vec()
        })
        .collect_vec_list()
        .into_iter()
        .flat_map(|chunks| chunks.into_iter().flatten())
        .partition_result();

    eprintln!(); // end progress bar

    if !errors.is_empty() {
        return Err(batch_processing_error(&errors));
    }
    Ok(summaries)
}

/// generates and writes a single scene job.
pub fn run_job<C>(
    job: &SceneJob,
    seed: u64,
    network_file: &Path,
    route_filename: &str,
    converter: &C,
) -> Result<TripsSummary, TripsError>
where
    C: RouteConverter + ?Sized,
{
    let mut rng = job.rng(seed);
    let trips = trips_ops::generate_trips(&job.trips, &mut rng)?;
    let trips_file = job.trips_file();
    trips_ops::write_trips_file(&trips, &trips_file)?;

    let summary = TripsSummary::new(&trips, seed, Some(job.job_index as u64));
    summary.write_json(&job.metadata_file())?;

    converter.convert(network_file, &trips_file, &job.routes_file(route_filename))?;
    log::debug!(
        "scene '{}' ({}, emergency {}) wrote {} trips",
        job.scene,
        job.env_type,
        job.emergency_prob,
        summary.trips
    );
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        scene::{SceneConfig, SkipConversion},
        trips::{TripsConfig, VehicleClass},
    };
    use std::path::PathBuf;

    /// records conversions and fails for one scene.
    struct FailingConverter {
        fail_scene: String,
    }

    impl RouteConverter for FailingConverter {
        fn convert(
            &self,
            _network_file: &Path,
            trips_file: &Path,
            _routes_file: &Path,
        ) -> Result<(), TripsError> {
            if trips_file.to_string_lossy().contains(&self.fail_scene) {
                Err(TripsError::RouteConversion(String::from("boom")))
            } else {
                Ok(())
            }
        }
    }

    fn small_config() -> ScenesConfig {
        ScenesConfig {
            trips: TripsConfig::default(),
            scenes: vec![
                SceneConfig {
                    name: String::from("light"),
                    src_prob: vec![0.25; 4],
                    number_cars: 20,
                },
                SceneConfig {
                    name: String::from("heavy"),
                    src_prob: vec![0.4, 0.1, 0.4, 0.1],
                    number_cars: 60,
                },
            ],
            env_types: vec![String::from("test"), String::from("train")],
            emergency_probs: None,
            network_file: String::from("intersection.net.xml"),
            route_filename: String::from("intersection.rou.xml"),
        }
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rlsignal-trips-test-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_run_scenes_writes_every_job() {
        let out = test_dir("run-scenes");
        let conf = small_config();
        let summaries = run_scenes(&conf, &out, 17, 3, &SkipConversion).expect("should run");
        assert_eq!(summaries.len(), 8);
        for job in conf.jobs(&out).expect("jobs") {
            assert!(job.trips_file().is_file(), "missing {:?}", job.trips_file());
            assert!(job.metadata_file().is_file());
            let contents = std::fs::read_to_string(job.metadata_file()).expect("metadata");
            let summary: TripsSummary = serde_json::from_str(&contents).expect("json");
            assert_eq!(summary.trips, job.trips.number_cars);
            assert_eq!(summary.stream, Some(job.job_index as u64));
            if job.emergency_prob == 0.0 {
                assert_eq!(summary.count(VehicleClass::Emergency), 0);
            }
        }
        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn test_run_scenes_independent_of_parallelism() {
        let conf = small_config();
        let out_a = test_dir("parallelism-a");
        let out_b = test_dir("parallelism-b");
        run_scenes(&conf, &out_a, 99, 1, &SkipConversion).expect("serial run");
        run_scenes(&conf, &out_b, 99, 4, &SkipConversion).expect("parallel run");
        for (a, b) in conf
            .jobs(&out_a)
            .expect("jobs a")
            .iter()
            .zip(conf.jobs(&out_b).expect("jobs b").iter())
        {
            let doc_a = std::fs::read_to_string(a.trips_file()).expect("doc a");
            let doc_b = std::fs::read_to_string(b.trips_file()).expect("doc b");
            assert_eq!(doc_a, doc_b);
        }
        let _ = std::fs::remove_dir_all(&out_a);
        let _ = std::fs::remove_dir_all(&out_b);
    }

    #[test]
    fn test_run_scenes_collects_failures() {
        let out = test_dir("collects-failures");
        let converter = FailingConverter {
            fail_scene: String::from("heavy"),
        };
        match run_scenes(&small_config(), &out, 1, 2, &converter) {
            Err(TripsError::BatchProcessing(msg)) => {
                // heavy scene: 2 env types x 2 emergency probabilities
                assert_eq!(msg.matches("boom").count(), 4);
            }
            other => panic!("expected BatchProcessing error, found {other:?}"),
        }
        let _ = std::fs::remove_dir_all(&out);
    }

    #[test]
    fn test_run_scenes_one_job_per_output_directory() {
        let out = test_dir("zero-emergency");
        let mut conf = small_config();
        conf.trips.emergency_prob = 0.0;
        let summaries = run_scenes(&conf, &out, 5, 4, &SkipConversion).expect("should run");
        // 2 scenes x 2 env types x the single emergency probability 0
        assert_eq!(summaries.len(), 4);
        for summary in summaries.iter() {
            assert_eq!(summary.count(VehicleClass::Emergency), 0);
        }
        let _ = std::fs::remove_dir_all(&out);
    }
}
