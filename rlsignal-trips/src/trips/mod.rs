mod route_document;
mod trip_event;
mod trips_config;
mod trips_error;
mod trips_summary;
mod vehicle_class;

pub mod sampling;
pub mod trips_ops;
pub mod weibull_times;

pub use route_document::{
    routes_document_string, write_routes_document, ROUTES_SCHEMA_LOCATION, XSI_NAMESPACE,
};
pub use sampling::TripSampler;
pub use trip_event::TripEvent;
pub use trips_config::TripsConfig;
pub use trips_error::{batch_processing_error, TripsError};
pub use trips_summary::TripsSummary;
pub use vehicle_class::VehicleClass;
