mod trips_app;

pub use trips_app::{generate, TripsApp, TripsOperation};
