use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::WeightGen;
use crate::{MatrixErr, Result};

/// Inclusive lower bound of the default fill range.
pub const DEFAULT_LOW: f32 = 0.;

/// Inclusive upper bound of the default fill range.
pub const DEFAULT_HIGH: f32 = 0.5;

/// A weight generator that follows a certain probabilistic distribution.
///
/// The generator owns its random number generator, there's no process-wide source of
/// randomness involved.
pub struct RandWeightGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandWeightGen<R, D> {
    /// Creates a new `RandWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandWeightGen<R, Uniform<f32>> {
    /// Creates a new `RandWeightGen` weight generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or non finite bounds).
    pub fn uniform(rng: R, low: f32, high: f32) -> Result<Self> {
        let distribution =
            Uniform::new_inclusive(low, high).map_err(|e| MatrixErr::invalid_range(low, high, e))?;

        Ok(Self::new(rng, distribution))
    }

    /// Creates a new `RandWeightGen` weight generator over `[DEFAULT_LOW, DEFAULT_HIGH]`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    pub fn default_range(rng: R) -> Self {
        Self::new(rng, default_distribution())
    }
}

impl RandWeightGen<StdRng, Uniform<f32>> {
    /// Creates a deterministic generator over the default range.
    ///
    /// # Arguments
    /// * `seed` - The seed for the underlying `StdRng`.
    pub fn seeded(seed: u64) -> Self {
        Self::default_range(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator over the default range seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::default_range(StdRng::from_os_rng())
    }
}

impl<R: Rng, D: Distribution<f32>> WeightGen for RandWeightGen<R, D> {
    fn sample(&mut self, n: usize) -> Vec<f32> {
        (0..n)
            .map(|_| self.distribution.sample(&mut self.rng))
            .collect()
    }
}

/// The default uniform distribution over `[DEFAULT_LOW, DEFAULT_HIGH]`.
pub(crate) fn default_distribution() -> Uniform<f32> {
    Uniform::new_inclusive(DEFAULT_LOW, DEFAULT_HIGH).expect("default bounds are a valid range")
}
