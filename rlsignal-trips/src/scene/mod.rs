mod route_converter;
mod scene_config;
mod scene_job;

pub mod scene_ops;

pub use route_converter::{Duarouter, RouteConverter, SkipConversion, DEFAULT_DUAROUTER_BINARY};
pub use scene_config::{SceneConfig, ScenesConfig};
pub use scene_job::{emergency_directory_name, SceneJob, METADATA_FILENAME};
