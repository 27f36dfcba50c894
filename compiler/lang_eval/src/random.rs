//! The pseudo-random generator behind `func.rand`.
//!
//! One generator may be shared by several interpreters, so it lives behind a
//! `parking_lot::Mutex` in an `Arc`.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest value `func.rand` returns, exposed as `$LANG_RAND_MAX`.
pub const LANG_RAND_MAX: i32 = i32::MAX;

#[derive(Clone, Debug)]
pub struct RandomGenerator {
    rng: StdRng,
}

impl RandomGenerator {
    /// Reproducible sequence for `seed`.
    pub fn with_seed(seed: u64) -> Self {
        RandomGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        RandomGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Next value in `0..=LANG_RAND_MAX`.
    pub fn next_int(&mut self) -> i32 {
        self.rng.gen_range(0..=LANG_RAND_MAX)
    }
}

pub type SharedRandom = Arc<Mutex<RandomGenerator>>;

/// Create a shared generator, entropy seeded unless `seed` is given.
pub fn shared_random(seed: Option<u64>) -> SharedRandom {
    let generator = seed.map_or_else(RandomGenerator::from_entropy, RandomGenerator::with_seed);
    Arc::new(Mutex::new(generator))
}
