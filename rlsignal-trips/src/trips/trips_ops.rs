use std::{fs::File, io::BufWriter, path::Path};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{
    route_document, weibull_times, TripEvent, TripSampler, TripsConfig, TripsError,
};

/// default name of the trips document consumed by the route converter.
pub const DEFAULT_TRIPS_FILENAME: &str = "trips.trips.xml";

/// generates a time-sorted trip schedule.
///
/// departure times are drawn first. then, for each departure in time order,
/// a source, a turn and a vehicle class are drawn. the trip index is the
/// position of the departure in the sorted schedule.
pub fn generate_trips<R: Rng + ?Sized>(
    config: &TripsConfig,
    rng: &mut R,
) -> Result<Vec<TripEvent>, TripsError> {
    config.validate()?;
    let sampler = TripSampler::try_from(config)?;
    let times = weibull_times::generate_weibull_times(
        config.shape,
        config.number_cars,
        config.total_timesteps,
        rng,
    )?;
    times
        .into_iter()
        .enumerate()
        .map(|(index, depart)| {
            let (source_index, destination_index) = sampler.choose_src_dst(rng);
            let vehicle_class = sampler.choose_vehicle_class(rng);
            let source = config.src_nodes.get(source_index).ok_or_else(|| {
                TripsError::Internal(format!("source index {source_index} out of range"))
            })?;
            let destination = config.dst_nodes.get(destination_index).ok_or_else(|| {
                TripsError::Internal(format!(
                    "destination index {destination_index} out of range"
                ))
            })?;
            Ok(TripEvent {
                index,
                depart,
                source_index,
                destination_index,
                source: source.clone(),
                destination: destination.clone(),
                vehicle_class,
            })
        })
        .collect()
}

/// writes the trips document, replacing any existing file at `path`.
pub fn write_trips_file(trips: &[TripEvent], path: &Path) -> Result<(), TripsError> {
    let file = File::create(path).map_err(|e| TripsError::WriteError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    let sink = route_document::write_routes_document(trips, BufWriter::new(file))?;
    sink.into_inner()
        .map_err(|e| TripsError::WriteError {
            path: path.to_owned(),
            message: e.to_string(),
        })?
        .sync_all()
        .map_err(|e| TripsError::WriteError {
            path: path.to_owned(),
            message: e.to_string(),
        })
}

/// builds the random source for a generation run. without a user seed,
/// one is drawn from the thread rng so the run can still be reproduced
/// from its logged seed.
pub fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}
