use itertools::Itertools;
use rand::prelude::*;
use rand_distr::Weibull;

use super::TripsError;

/// added to the largest sample before rescaling so that no departure lands
/// exactly on the horizon.
pub const RESCALE_EPSILON: f64 = 0.1;

/// generates sorted departure timesteps following a Weibull distribution.
///
/// samples are drawn with unit scale, divided by `max(sample) + 0.1`,
/// stretched over `total_timesteps` and truncated to whole timesteps.
/// a shape below 1 clusters departures early with a long tail, a shape of 1
/// behaves like exponential arrivals and larger shapes spread departures
/// more evenly.
///
/// # Arguments
///
/// * `shape` - Weibull shape parameter, must be positive
/// * `number_cars` - number of departures to generate
/// * `total_timesteps` - horizon the departures are spread over
/// * `rng` - caller-owned random source
pub fn generate_weibull_times<R: Rng + ?Sized>(
    shape: f64,
    number_cars: usize,
    total_timesteps: u64,
    rng: &mut R,
) -> Result<Vec<u64>, TripsError> {
    let weibull = Weibull::new(1.0, shape)
        .map_err(|e| TripsError::Sampling(format!("invalid Weibull shape {shape}: {e}")))?;
    let samples = (0..number_cars)
        .map(|_| rng.sample(&weibull))
        .collect_vec();
    let max = samples.iter().copied().fold(0.0_f64, f64::max);
    let scale = total_timesteps as f64 / (max + RESCALE_EPSILON);
    let mut times = samples
        .into_iter()
        .map(|t| (t * scale) as u64)
        .collect_vec();
    times.sort_unstable();
    Ok(times)
}

#[cfg(test)]
mod test {
    use super::generate_weibull_times;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_times_sorted_and_within_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for shape in [0.5, 1.0, 2.0, 5.0] {
            let times = generate_weibull_times(shape, 2000, 5400, &mut rng).expect("should sample");
            assert_eq!(times.len(), 2000);
            assert!(times.is_sorted());
            assert!(times.iter().all(|t| *t <= 5400));
        }
    }

    #[test]
    fn test_latest_departure_near_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let times = generate_weibull_times(2.0, 1000, 5400, &mut rng).expect("should sample");
        let last = *times.last().expect("non-empty");
        // the maximum sample is rescaled to horizon * max / (max + 0.1)
        assert!(last < 5400);
        assert!(last > 4500, "latest departure {last} is far from the horizon");
    }

    #[test]
    fn test_small_shape_clusters_early() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let heavy = generate_weibull_times(0.5, 5000, 5400, &mut rng).expect("should sample");
        let spread = generate_weibull_times(3.0, 5000, 5400, &mut rng).expect("should sample");
        let median = |v: &Vec<u64>| v[v.len() / 2];
        assert!(median(&heavy) < median(&spread));
    }

    #[test]
    fn test_same_seed_same_times() {
        let a = generate_weibull_times(2.0, 100, 5400, &mut ChaCha8Rng::seed_from_u64(77));
        let b = generate_weibull_times(2.0, 100, 5400, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a.expect("a"), b.expect("b"));
    }

    #[test]
    fn test_invalid_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(generate_weibull_times(-1.0, 10, 5400, &mut rng).is_err());
    }
}
