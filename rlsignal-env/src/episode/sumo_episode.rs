use std::path::PathBuf;

use super::{sumo_command, RouteFileSelector};
use crate::{
    config::{SumoEnvConfig, SumoSeed},
    EnvError,
};

/// what the environment needs to start an episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeStart {
    /// 1-based number of the episode being started
    pub episode: u64,
    pub route_file: PathBuf,
    /// simulator command line for this episode
    pub command: Vec<String>,
    /// metrics file of the episode that just ended, if any should be written
    pub metrics_file: Option<PathBuf>,
}

/// episode bookkeeping of the environment wrapper: on every reset the
/// previous episode's metrics file is named, the episode counter advances and
/// a new route file is drawn.
#[derive(Clone, Debug)]
pub struct SumoEpisode {
    config: SumoEnvConfig,
    label: String,
    selector: RouteFileSelector,
    episode: u64,
}

impl SumoEpisode {
    /// # Arguments
    ///
    /// * `config` - environment configuration, validated here
    /// * `label` - connection label, part of the metrics file name
    /// * `seed` - seed for route file selection. without one, selection is
    ///   seeded from the thread rng until a reset provides a seed.
    pub fn new(
        config: SumoEnvConfig,
        label: &str,
        seed: Option<u64>,
    ) -> Result<SumoEpisode, EnvError> {
        config.validate()?;
        let selector = RouteFileSelector::new(config.route_files.clone(), seed)?;
        Ok(SumoEpisode {
            config,
            label: label.to_string(),
            selector,
            episode: 0,
        })
    }

    /// starts the next episode. a seed fixes the simulator seed and restarts
    /// route file selection from it.
    pub fn reset(&mut self, seed: Option<u64>) -> EpisodeStart {
        let metrics_file = if self.episode > 0 {
            self.metrics_file(self.episode)
        } else {
            None
        };
        self.episode += 1;

        if let Some(s) = seed {
            self.config.sumo_seed = SumoSeed::Fixed(s);
            self.selector.reseed(s);
        }
        let route_file = self.selector.select().to_path_buf();
        let command = sumo_command(&self.config, &route_file);
        log::info!(
            "episode {} using route file {}",
            self.episode,
            route_file.display()
        );
        EpisodeStart {
            episode: self.episode,
            route_file,
            command,
            metrics_file,
        }
    }

    /// `<out_csv_name>_conn<label>_ep<episode>.csv`
    pub fn metrics_file(&self, episode: u64) -> Option<PathBuf> {
        self.config
            .out_csv_name
            .as_ref()
            .map(|name| PathBuf::from(format!("{name}_conn{}_ep{episode}.csv", self.label)))
    }

    pub fn episode(&self) -> u64 {
        self.episode
    }

    pub fn config(&self) -> &SumoEnvConfig {
        &self.config
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> SumoEnvConfig {
        let mut conf = SumoEnvConfig::new(
            PathBuf::from("intersection.net.xml"),
            vec![PathBuf::from("a.rou.xml"), PathBuf::from("b.rou.xml")],
        );
        conf.out_csv_name = Some(String::from("outputs/dqn"));
        conf
    }

    #[test]
    fn test_metrics_file_of_previous_episode() {
        let mut episodes = SumoEpisode::new(config(), "0", Some(3)).expect("valid");
        let first = episodes.reset(None);
        assert_eq!(first.episode, 1);
        assert_eq!(first.metrics_file, None);
        let second = episodes.reset(None);
        assert_eq!(second.episode, 2);
        assert_eq!(
            second.metrics_file,
            Some(PathBuf::from("outputs/dqn_conn0_ep1.csv"))
        );
    }

    #[test]
    fn test_no_metrics_without_output_name() {
        let mut conf = config();
        conf.out_csv_name = None;
        let mut episodes = SumoEpisode::new(conf, "0", Some(3)).expect("valid");
        episodes.reset(None);
        assert_eq!(episodes.reset(None).metrics_file, None);
    }

    #[test]
    fn test_seeded_reset_fixes_simulator_seed() {
        let mut episodes = SumoEpisode::new(config(), "1", None).expect("valid");
        let start = episodes.reset(Some(21));
        assert_eq!(episodes.config().sumo_seed, SumoSeed::Fixed(21));
        let seed_pos = start
            .command
            .iter()
            .position(|a| a == "--seed")
            .expect("seed flag present");
        assert_eq!(start.command[seed_pos + 1], "21");
        assert!(!start.command.contains(&String::from("--random")));
        assert_eq!(start.command[4], start.route_file.to_string_lossy());
    }

    #[test]
    fn test_same_reset_seed_same_route() {
        let mut a = SumoEpisode::new(config(), "0", None).expect("valid");
        let mut b = SumoEpisode::new(config(), "0", None).expect("valid");
        for seed in 0..20 {
            assert_eq!(a.reset(Some(seed)).route_file, b.reset(Some(seed)).route_file);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut conf = config();
        conf.route_files.clear();
        assert!(SumoEpisode::new(conf, "0", None).is_err());
    }
}
