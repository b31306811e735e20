//! Deterministic random stream owned by a model
//!
//! Nothing in the simulation draws from a thread or process RNG. Each model
//! owns one `SimRng` and passes it explicitly to every system that needs
//! randomness, so two models built from the same seed and stepped the same
//! way produce identical trajectories.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded uniform stream in [0, 1) plus the few derived draws the model needs
#[derive(Debug, Clone, PartialEq)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    pub fn new(seed: u32) -> Self {
        Self(ChaCha8Rng::seed_from_u64(u64::from(seed)))
    }

    /// Uniform float in [0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Uniform float in [low, high)
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Bernoulli trial: true with probability `p`
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Normal sample from two uniform draws (Box-Muller)
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // ln(0) is -inf; nudge the first draw off zero
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    /// Uniform in-place permutation (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
