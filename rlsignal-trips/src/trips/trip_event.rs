use serde::{Deserialize, Serialize};

use super::VehicleClass;

/// a single scheduled vehicle departure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TripEvent {
    /// ordinal position in the time-sorted schedule, used as the trip id
    pub index: usize,
    /// departure timestep in [0, total_timesteps]
    pub depart: u64,
    /// position of the source node in the configured source node list
    pub source_index: usize,
    /// position of the destination node in the configured destination node list
    pub destination_index: usize,
    pub source: String,
    pub destination: String,
    pub vehicle_class: VehicleClass,
}

impl TripEvent {
    pub fn id(&self) -> String {
        self.index.to_string()
    }

    /// departure time as written to the route document, which expects
    /// a two-decimal float.
    pub fn depart_attribute(&self) -> String {
        format!("{}.00", self.depart)
    }
}
