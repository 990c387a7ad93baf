//! Random number generation module. Uses either a port of Knuth's ranf random
//! number generator or the "rand" crate that is the Rust standard for RNGs.

#[cfg(not(feature = "standard-random"))]
mod ranf;
#[cfg(feature = "standard-random")]
mod standard;

/// Select the RNG implementation in use
#[cfg(not(feature = "standard-random"))]
pub use self::ranf::RanfGenerator as RandomGenerator;
#[cfg(feature = "standard-random")]
pub use self::standard::RandGenerator as RandomGenerator;

/// Seed used when the configuration does not specify one
pub const DEFAULT_SEED: u32 = 234_612_947;
