//! Random number generation, from Knuth's ranf (in Seminumerical Algorithm)

use crate::numeric::Float;

// Generated random numbers will have a granularity of 1/MODULO
type Integer = i32;
const MODULO: Integer = 1_000_000_000;
const INV_MODULO: Float = 1e-9;

/// Offset between the seeds of successive event batches
const BATCH_SEED_STRIDE: i64 = 123_456_789;

/// Random number generator
#[derive(Clone)]
pub struct RanfGenerator {
    /// Current set of random numbers
    numbers: [Integer; 56],

    /// Index of the current random number
    index: usize,
}
//
impl RanfGenerator {
    // ### CONSTRUCTION ###

    /// Create the generator of some event batch
    ///
    /// Each batch gets its own, reproducible, random number stream. This is
    /// what makes results independent of how batches are scheduled.
    ///
    pub fn for_batch(seed: u32, batch_id: usize) -> Self {
        let seed = (seed as i64 + BATCH_SEED_STRIDE * batch_id as i64) % (MODULO as i64);
        Self::seeded_new(seed as Integer)
    }

    /// Create a new generator with an arbitrary seed in [0; MODULO[
    fn seeded_new(seed: Integer) -> Self {
        debug_assert!((0..MODULO).contains(&seed));

        // Start by zero-initializing the generator state
        let mut result = Self {
            numbers: [0; 56],
            index: 55,
        };

        // Run the IN55 initialization algorithm
        result.numbers[55] = seed;
        let mut j = seed;
        let mut k = 1;
        for i in 1..55 {
            let ii = (21 * i) % 55;
            result.numbers[ii] = k;
            k = j - k;
            if k < 0 {
                k += MODULO
            };
            j = result.numbers[ii];
        }

        // Warm up the sequence a bit
        for _ in 0..10 {
            result.reset();
        }

        // Return the initialized generator
        result
    }

    // ### RANDOM NUMBER GENERATION ###

    /// Generate a random number between 0 and 1, with INV_MODULO granularity
    pub fn random(&mut self) -> Float {
        if self.index == 0 {
            self.reset();
            self.index = 55;
        }
        let result = (self.numbers[self.index] as Float) * INV_MODULO;
        self.index -= 1;
        result
    }

    /// Generate 55 new random numbers between 0 and 1/FMODUL
    fn reset(&mut self) {
        for i in 1..25 {
            self.numbers[i] -= self.numbers[i + 31];
            if self.numbers[i] < 0 {
                self.numbers[i] += MODULO
            };
        }
        for i in 25..56 {
            self.numbers[i] -= self.numbers[i - 24];
            if self.numbers[i] < 0 {
                self.numbers[i] += MODULO
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval() {
        let mut rng = RanfGenerator::for_batch(crate::random::DEFAULT_SEED, 0);
        for _ in 0..1000 {
            let x = rng.random();
            assert!((0. ..1.).contains(&x));
        }
    }

    #[test]
    fn reproducible_streams() {
        let mut rng1 = RanfGenerator::for_batch(42, 3);
        let mut rng2 = RanfGenerator::for_batch(42, 3);
        let mut rng3 = RanfGenerator::for_batch(42, 4);
        let s1 = (0..100).map(|_| rng1.random()).collect::<Vec<_>>();
        let s2 = (0..100).map(|_| rng2.random()).collect::<Vec<_>>();
        let s3 = (0..100).map(|_| rng3.random()).collect::<Vec<_>>();
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }
}
