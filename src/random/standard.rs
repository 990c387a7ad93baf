//! This module mimicks the interface of RanfGenerator on top of the
//! abstractions of the standard "random" crate.

use crate::numeric::Float;
use rand::{Rng, SeedableRng};

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Facade which makes the rand crate look like RanfGenerator
#[derive(Clone)]
pub struct RandGenerator {
    rng: Engine,
}
//
impl RandGenerator {
    /// Create the generator of some event batch
    pub fn for_batch(seed: u32, batch_id: usize) -> Self {
        let mut rng = Engine::seed_from_u64(seed as u64);
        for _ in 0..batch_id {
            rng.jump();
        }
        Self { rng }
    }

    /// Generate a random floating-point number between 0 and 1
    pub fn random(&mut self) -> Float {
        self.rng.gen()
    }
}
