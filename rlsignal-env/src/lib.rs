//! environment-side support for traffic-signal reinforcement learning on SUMO:
//! typed environment configuration, per-episode route file selection, simulator
//! command construction and fixed-time baseline policies.
pub mod baseline;
pub mod config;
pub mod episode;

mod error;

pub use error::EnvError;
