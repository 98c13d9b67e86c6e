use ht_core::traits::UniformSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Adapte un générateur `rand` en [`UniformSource`].
///
/// # Example
/// ```
/// use ht_core::traits::UniformSource;
/// use ht_dither::rng::RngSource;
///
/// let mut a = RngSource::seeded(42);
/// let mut b = RngSource::seeded(42);
/// assert_eq!(a.next_u8(), b.next_u8());
/// let v = a.next_in_range(-32, 32);
/// assert!((-32..=32).contains(&v));
/// ```
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[must_use]
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    #[inline]
    fn next_u8(&mut self) -> u8 {
        self.rng.random()
    }

    #[inline]
    fn next_in_range(&mut self, low: i16, high: i16) -> i16 {
        self.rng.random_range(low..=high)
    }
}
