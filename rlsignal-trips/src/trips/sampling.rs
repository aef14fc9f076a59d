//! categorical draws that assign each departure its source, destination
//! and vehicle class.
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

use super::{TripsConfig, TripsError, VehicleClass};

/// a probability vector must sum to 1 within this tolerance, the square
/// root of f64 machine epsilon.
pub const PROBABILITY_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8;

/// confirms that `probabilities` is a probability mass function.
pub fn validate_pmf(name: &str, probabilities: &[f64]) -> Result<(), TripsError> {
    let invalid = |message: String| TripsError::InvalidDistribution {
        name: name.to_string(),
        message,
    };
    if probabilities.is_empty() {
        return Err(invalid(String::from("must have at least one entry")));
    }
    if let Some((idx, p)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(invalid(format!(
            "entry {idx} must be a non-negative number, found {p}"
        )));
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(invalid(format!("probabilities do not sum to 1, found {sum}")));
    }
    Ok(())
}

/// categorical distribution over the indices of a probability vector.
#[derive(Clone, Debug)]
pub struct Categorical {
    index: WeightedIndex<f64>,
    len: usize,
}

impl Categorical {
    pub fn new(name: &str, probabilities: &[f64]) -> Result<Categorical, TripsError> {
        validate_pmf(name, probabilities)?;
        let index = WeightedIndex::new(probabilities).map_err(|e| {
            TripsError::Sampling(format!("failure building '{name}' distribution: {e}"))
        })?;
        Ok(Categorical {
            index,
            len: probabilities.len(),
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.sample(&self.index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// draws source/destination pairs and vehicle classes for trips.
#[derive(Clone, Debug)]
pub struct TripSampler {
    source: Categorical,
    turn: Categorical,
    emergency_prob: f64,
}

impl TripSampler {
    pub fn new(
        src_prob: &[f64],
        turn_prob: &[f64],
        emergency_prob: f64,
    ) -> Result<TripSampler, TripsError> {
        if !(0.0..=1.0).contains(&emergency_prob) {
            return Err(TripsError::InvalidUserInput(format!(
                "emergency probability must be in [0, 1], found {emergency_prob}"
            )));
        }
        Ok(TripSampler {
            source: Categorical::new("src_prob", src_prob)?,
            turn: Categorical::new("turn_prob", turn_prob)?,
            emergency_prob,
        })
    }

    /// chooses a source index, then a turn offset which is applied circularly
    /// to the source index to find the destination index.
    ///
    /// a zero offset (U-turn) yields a destination with the same index as its source.
    pub fn choose_src_dst<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let src = self.source.sample(rng);
        let turn = self.turn.sample(rng);
        let dst = (src + turn) % self.source.len();
        (src, dst)
    }

    pub fn choose_vehicle_class<R: Rng + ?Sized>(&self, rng: &mut R) -> VehicleClass {
        let chance: f64 = rng.random();
        if chance < self.emergency_prob {
            VehicleClass::Emergency
        } else {
            VehicleClass::Default
        }
    }
}

impl TryFrom<&TripsConfig> for TripSampler {
    type Error = TripsError;

    fn try_from(value: &TripsConfig) -> Result<Self, Self::Error> {
        TripSampler::new(&value.src_prob, &value.turn_prob, value.emergency_prob)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_validate_pmf_accepts_zero_entries() {
        validate_pmf("turn_prob", &[0.0, 0.125, 0.75, 0.125]).expect("should be valid");
    }

    #[test]
    fn test_validate_pmf_rejects_negative_entry() {
        let result = validate_pmf("src_prob", &[1.5, -0.5]);
        match result {
            Err(TripsError::InvalidDistribution { message, .. }) => {
                assert!(message.contains("entry 1"))
            }
            other => panic!("expected InvalidDistribution, found {other:?}"),
        }
    }

    #[test]
    fn test_validate_pmf_rejects_empty() {
        assert!(validate_pmf("src_prob", &[]).is_err());
    }

    #[test]
    fn test_destination_wraps_around_node_list() {
        // only right turns: the last source must wrap to the first destination
        let sampler =
            TripSampler::new(&[0.0, 0.0, 0.0, 1.0], &[0.0, 0.0, 0.0, 1.0], 0.0).expect("valid");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sampler.choose_src_dst(&mut rng), (3, 2));
        }
    }

    #[test]
    fn test_straight_only_turns() {
        let sampler =
            TripSampler::new(&[0.25; 4], &[0.0, 0.0, 1.0, 0.0], 0.0).expect("valid sampler");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let (src, dst) = sampler.choose_src_dst(&mut rng);
            assert_eq!(dst, (src + 2) % 4);
        }
    }

    #[test]
    fn test_u_turn_only_maps_source_onto_itself() {
        let sampler =
            TripSampler::new(&[0.25; 4], &[1.0, 0.0, 0.0, 0.0], 0.0).expect("valid sampler");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let (src, dst) = sampler.choose_src_dst(&mut rng);
            assert_eq!(src, dst);
        }
    }

    #[test]
    fn test_emergency_fraction_converges() {
        let p = 0.05;
        let n = 100_000;
        let sampler = TripSampler::new(&[1.0], &[1.0], p).expect("valid sampler");
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let emergencies = (0..n)
            .filter(|_| sampler.choose_vehicle_class(&mut rng) == VehicleClass::Emergency)
            .count();
        let observed = emergencies as f64 / n as f64;
        // five standard errors
        let tolerance = 5.0 * (p * (1.0 - p) / n as f64).sqrt();
        assert!(
            (observed - p).abs() < tolerance,
            "observed {observed}, expected {p} +- {tolerance}"
        );
    }

    #[test]
    fn test_emergency_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let never = TripSampler::new(&[1.0], &[1.0], 0.0).expect("valid sampler");
        let always = TripSampler::new(&[1.0], &[1.0], 1.0).expect("valid sampler");
        for _ in 0..500 {
            assert_eq!(never.choose_vehicle_class(&mut rng), VehicleClass::Default);
            assert_eq!(always.choose_vehicle_class(&mut rng), VehicleClass::Emergency);
        }
    }
}
