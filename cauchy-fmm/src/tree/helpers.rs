//! Helpers for handling points, primarily for testing and benchmarking.
use num::Float;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::Distribution;
use rand::{rngs::StdRng, SeedableRng};

/// Points fixture for testing, uniformly samples in each axis from min to max.
///
/// # Arguments
/// * `n_points` - The number of points to sample.
/// * `min` - The minimum coordinate value.
/// * `max` - The maximum coordinate value.
/// * `seed` - Random seed, defaults to 0.
pub fn points_fixture<T: Float + SampleUniform>(
    n_points: usize,
    min: Option<T>,
    max: Option<T>,
    seed: Option<u64>,
) -> Vec<T> {
    // Generate a set of randomly distributed points
    let seed = seed.unwrap_or(0);
    let mut range = StdRng::seed_from_u64(seed);

    let between;
    if let (Some(min), Some(max)) = (min, max) {
        between = rand::distributions::Uniform::from(min..max);
    } else {
        between = rand::distributions::Uniform::from(T::zero()..T::one());
    }

    (0..n_points).map(|_| between.sample(&mut range)).collect()
}
