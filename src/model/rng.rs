use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Seeded random stream owned by a single simulation run.
///
/// Every run instantiates exactly one of these; the same seed reproduces the
/// same sequence of draws and therefore the same simulation bit for bit.
pub struct SimRng {
    inner: ChaCha8Rng
}

impl SimRng {
    pub fn new(seed: u64) -> SimRng {
        SimRng {
            inner: ChaCha8Rng::seed_from_u64(seed)
        }
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Standard-normal real.
    pub fn standard_normal(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }

    /// Uniform integer in `[0, k)`.
    pub fn below(&mut self, k: usize) -> usize {
        self.inner.random_range(0..k)
    }
}
