use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use super::{TripEvent, TripsError, VehicleClass};

/// descriptive statistics of a generated trip schedule, written next to the
/// trips file so a run can be audited and reproduced.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TripsSummary {
    /// seed of the random source used for generation
    pub seed: u64,
    /// ChaCha stream of the random source, set when a batch shares one seed
    pub stream: Option<u64>,
    pub trips: usize,
    pub first_depart: Option<u64>,
    pub last_depart: Option<u64>,
    pub vehicle_classes: BTreeMap<String, usize>,
    pub sources: BTreeMap<String, usize>,
    pub destinations: BTreeMap<String, usize>,
}

impl TripsSummary {
    pub fn new(trips: &[TripEvent], seed: u64, stream: Option<u64>) -> TripsSummary {
        let mut vehicle_classes: BTreeMap<String, usize> = VehicleClass::ALL
            .iter()
            .map(|c| (c.to_string(), 0))
            .collect();
        let mut sources: BTreeMap<String, usize> = BTreeMap::new();
        let mut destinations: BTreeMap<String, usize> = BTreeMap::new();
        for trip in trips.iter() {
            *vehicle_classes
                .entry(trip.vehicle_class.to_string())
                .or_default() += 1;
            *sources.entry(trip.source.clone()).or_default() += 1;
            *destinations.entry(trip.destination.clone()).or_default() += 1;
        }
        TripsSummary {
            seed,
            stream,
            trips: trips.len(),
            first_depart: trips.first().map(|t| t.depart),
            last_depart: trips.last().map(|t| t.depart),
            vehicle_classes,
            sources,
            destinations,
        }
    }

    pub fn count(&self, vehicle_class: VehicleClass) -> usize {
        self.vehicle_classes
            .get(vehicle_class.type_id())
            .copied()
            .unwrap_or_default()
    }

    pub fn write_json(&self, path: &Path) -> Result<(), TripsError> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TripsError::Internal(format!("failure serializing trips summary: {e}"))
        })?;
        std::fs::write(path, contents).map_err(|e| TripsError::WriteError {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }
}
