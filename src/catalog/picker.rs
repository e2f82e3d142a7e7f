//! Variant selection
//!
//! Tiles with several sprite variants pick one of them. Production runs pick
//! at random; tests and reproducible renders use a seed or a fixed index.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses one of `count` variants. `count` is never zero.
pub trait VariantPicker {
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform random choice backed by a seedable generator.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: ChaCha8Rng,
}

impl RandomPicker {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeded generator on its own ChaCha stream, independent of [`Self::seeded`] with the same seed.
    pub fn seeded_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// The underlying generator, for draws that are not variant picks.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl VariantPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

/// Always the same index, clamped to the last variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl VariantPicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.0.min(count - 1)
    }
}
