//! Deterministic generation RNG.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Every
//! stage of a generation run draws from the same `CityRng`, so identical
//! seeds produce identical blueprints.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG threaded through one generation run.
///
/// Stages take `&mut rng.0` (a `ChaCha8Rng` implementing `rand::Rng`).
pub struct CityRng(pub ChaCha8Rng);

impl CityRng {
    /// Create a new `CityRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draw a seed for a noise generator (`fastnoise-lite` takes `i32`).
    pub fn noise_seed(&mut self) -> i32 {
        self.0.gen()
    }
}

/// Generate a seed from the current system time, for runs without one.
pub fn random_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// Uniform sample in `[lo, hi)`, returning `lo` for an empty range instead
/// of panicking like `gen_range` does.
pub fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
