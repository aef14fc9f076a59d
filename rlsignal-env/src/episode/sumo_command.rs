use std::path::Path;

use crate::config::{RenderMode, SumoEnvConfig, SumoSeed};

/// builds the simulator command line that starts one episode on `route_file`.
pub fn sumo_command(config: &SumoEnvConfig, route_file: &Path) -> Vec<String> {
    let mut cmd = vec![
        config.sumo_binary(),
        String::from("-n"),
        config.net_file.to_string_lossy().to_string(),
        String::from("-r"),
        route_file.to_string_lossy().to_string(),
        String::from("--max-depart-delay"),
        config.max_depart_delay.to_string(),
        String::from("--waiting-time-memory"),
        config.waiting_time_memory.to_string(),
        String::from("--time-to-teleport"),
        config.time_to_teleport.to_string(),
    ];
    if config.begin_time > 0 {
        cmd.push(String::from("-b"));
        cmd.push(config.begin_time.to_string());
    }
    match config.sumo_seed {
        SumoSeed::Random => cmd.push(String::from("--random")),
        SumoSeed::Fixed(seed) => {
            cmd.push(String::from("--seed"));
            cmd.push(seed.to_string());
        }
    }
    if !config.sumo_warnings {
        cmd.push(String::from("--no-warnings"));
    }
    if let Some(additional) = &config.additional_sumo_cmd {
        cmd.extend(additional.split_whitespace().map(String::from));
    }
    if config.uses_gui() {
        cmd.push(String::from("--start"));
        cmd.push(String::from("--quit-on-end"));
        if config.render_mode == Some(RenderMode::RgbArray) {
            let (width, height) = config.virtual_display;
            cmd.push(String::from("--window-size"));
            cmd.push(format!("{width},{height}"));
        }
    }
    cmd
}
