mod route_discovery;
mod route_selector;
mod sumo_command;
mod sumo_episode;

pub use route_discovery::discover_route_files;
pub use route_selector::RouteFileSelector;
pub use sumo_command::sumo_command;
pub use sumo_episode::{EpisodeStart, SumoEpisode};
