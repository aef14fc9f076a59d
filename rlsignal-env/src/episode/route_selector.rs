use std::path::{Path, PathBuf};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::EnvError;

/// picks the route file loaded by each episode uniformly at random from a
/// fixed candidate list. the random source is owned by the selector so that
/// a seeded selector always produces the same sequence.
#[derive(Clone, Debug)]
pub struct RouteFileSelector {
    route_files: Vec<PathBuf>,
    rng: ChaCha8Rng,
}

impl RouteFileSelector {
    pub fn new(
        route_files: Vec<PathBuf>,
        seed: Option<u64>,
    ) -> Result<RouteFileSelector, EnvError> {
        if route_files.is_empty() {
            return Err(EnvError::InvalidConfig(String::from(
                "route file selector requires at least one route file",
            )));
        }
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(RouteFileSelector { route_files, rng })
    }

    /// restarts the selection sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn select(&mut self) -> &Path {
        let idx = self.rng.random_range(0..self.route_files.len());
        &self.route_files[idx]
    }

    pub fn route_files(&self) -> &[PathBuf] {
        &self.route_files
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn files() -> Vec<PathBuf> {
        (0..4)
            .map(|i| PathBuf::from(format!("routes/{i}/intersection.rou.xml")))
            .collect()
    }

    #[test]
    fn test_selects_only_candidates() {
        let mut selector = RouteFileSelector::new(files(), Some(1)).expect("valid selector");
        let candidates: HashSet<PathBuf> = files().into_iter().collect();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let choice = selector.select().to_path_buf();
            assert!(candidates.contains(&choice));
            seen.insert(choice);
        }
        assert_eq!(seen.len(), 4, "every candidate should be chosen eventually");
    }

    #[test]
    fn test_reseed_reproduces_sequence() {
        let mut selector = RouteFileSelector::new(files(), None).expect("valid selector");
        selector.reseed(42);
        let first: Vec<PathBuf> = (0..10).map(|_| selector.select().to_path_buf()).collect();
        selector.reseed(42);
        let second: Vec<PathBuf> = (0..10).map(|_| selector.select().to_path_buf()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_candidates_rejected() {
        assert!(RouteFileSelector::new(vec![], Some(0)).is_err());
    }
}
