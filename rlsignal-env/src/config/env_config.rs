use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::EnvError;

/// seed passed to the simulator on start.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SumoSeed {
    /// the simulator picks its own seed (`--random`)
    #[default]
    Random,
    Fixed(u64),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Human,
    RgbArray,
}

/// construction arguments of the SUMO traffic-signal environment.
///
/// every field except `net_file` and `route_files` has a default matching the
/// environment wrapper's defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SumoEnvConfig {
    /// road network (`.net.xml`)
    pub net_file: PathBuf,
    /// candidate route files, one of which is loaded per episode
    pub route_files: Vec<PathBuf>,
    /// prefix of the per-episode metrics CSV files
    #[serde(default)]
    pub out_csv_name: Option<String>,
    #[serde(default)]
    pub use_gui: bool,
    /// window size used with `rgb_array` rendering
    #[serde(default = "default_virtual_display")]
    pub virtual_display: (u32, u32),
    #[serde(default)]
    pub begin_time: u64,
    /// simulated seconds per episode
    #[serde(default = "default_num_seconds")]
    pub num_seconds: u64,
    /// -1 disables the maximum departure delay
    #[serde(default = "default_disabled")]
    pub max_depart_delay: i64,
    #[serde(default = "default_waiting_time_memory")]
    pub waiting_time_memory: u64,
    /// -1 disables teleporting of jammed vehicles
    #[serde(default = "default_disabled")]
    pub time_to_teleport: i64,
    /// simulated seconds between agent actions
    #[serde(default = "default_delta_time")]
    pub delta_time: u64,
    #[serde(default = "default_yellow_time")]
    pub yellow_time: u64,
    #[serde(default = "default_min_green")]
    pub min_green: u64,
    #[serde(default = "default_max_green")]
    pub max_green: u64,
    #[serde(default = "default_true")]
    pub single_agent: bool,
    #[serde(default = "default_reward_fn")]
    pub reward_fn: String,
    #[serde(default = "default_true")]
    pub add_system_info: bool,
    #[serde(default = "default_true")]
    pub add_per_agent_info: bool,
    #[serde(default)]
    pub sumo_seed: SumoSeed,
    /// run the signal programs in the network file instead of agent actions
    #[serde(default)]
    pub fixed_ts: bool,
    #[serde(default = "default_true")]
    pub sumo_warnings: bool,
    /// extra whitespace-separated simulator arguments
    #[serde(default)]
    pub additional_sumo_cmd: Option<String>,
    #[serde(default)]
    pub render_mode: Option<RenderMode>,
    /// simulator executable. defaults to `sumo-gui` when a GUI or render mode
    /// is requested and `sumo` otherwise.
    #[serde(default)]
    pub sumo_binary: Option<String>,
}

fn default_virtual_display() -> (u32, u32) {
    (3200, 1800)
}

fn default_num_seconds() -> u64 {
    20000
}

fn default_disabled() -> i64 {
    -1
}

fn default_waiting_time_memory() -> u64 {
    1000
}

fn default_delta_time() -> u64 {
    5
}

fn default_yellow_time() -> u64 {
    2
}

fn default_min_green() -> u64 {
    5
}

fn default_max_green() -> u64 {
    50
}

fn default_true() -> bool {
    true
}

fn default_reward_fn() -> String {
    String::from("diff-waiting-time")
}

impl SumoEnvConfig {
    /// configuration with default values for everything except the network
    /// and the route files.
    pub fn new(net_file: PathBuf, route_files: Vec<PathBuf>) -> SumoEnvConfig {
        SumoEnvConfig {
            net_file,
            route_files,
            out_csv_name: None,
            use_gui: false,
            virtual_display: default_virtual_display(),
            begin_time: 0,
            num_seconds: default_num_seconds(),
            max_depart_delay: default_disabled(),
            waiting_time_memory: default_waiting_time_memory(),
            time_to_teleport: default_disabled(),
            delta_time: default_delta_time(),
            yellow_time: default_yellow_time(),
            min_green: default_min_green(),
            max_green: default_max_green(),
            single_agent: true,
            reward_fn: default_reward_fn(),
            add_system_info: true,
            add_per_agent_info: true,
            sumo_seed: SumoSeed::default(),
            fixed_ts: false,
            sumo_warnings: true,
            additional_sumo_cmd: None,
            render_mode: None,
            sumo_binary: None,
        }
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if self.route_files.is_empty() {
            return Err(EnvError::InvalidConfig(String::from(
                "at least one route file is required",
            )));
        }
        if self.delta_time == 0 {
            return Err(EnvError::InvalidConfig(String::from(
                "delta_time must be positive",
            )));
        }
        if self.yellow_time >= self.delta_time {
            return Err(EnvError::InvalidConfig(format!(
                "yellow_time ({}) must be shorter than delta_time ({})",
                self.yellow_time, self.delta_time
            )));
        }
        if self.min_green > self.max_green {
            return Err(EnvError::InvalidConfig(format!(
                "min_green ({}) must not exceed max_green ({})",
                self.min_green, self.max_green
            )));
        }
        Ok(())
    }

    /// a GUI window is opened for `use_gui` and for any render mode.
    pub fn uses_gui(&self) -> bool {
        self.use_gui || self.render_mode.is_some()
    }

    pub fn sumo_binary(&self) -> String {
        match &self.sumo_binary {
            Some(binary) => binary.clone(),
            None if self.uses_gui() => String::from("sumo-gui"),
            None => String::from("sumo"),
        }
    }
}
