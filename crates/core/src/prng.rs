//! Uniform random sources for dot placement.
//!
//! [`UniformSource`] is the one capability a [`DotField`](crate::DotField)
//! needs from its generator: batches of uniform draws over `[lo, hi)`.
//! [`Xorshift64`] is the bundled implementation. Same seed always produces
//! the same sequence of values across all platforms (pure integer
//! arithmetic in the core algorithm).

use serde::{Deserialize, Serialize};

/// A seedable source of uniform reals.
///
/// Implementors only supply [`next_f64`](UniformSource::next_f64); the range
/// and batch helpers are derived from it so every source places dots the
/// same way for the same underlying stream.
pub trait UniformSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Draws `n` independent values uniformly from [lo, hi).
    fn uniform_n(&mut self, lo: f64, hi: f64, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.uniform(lo, hi)).collect()
    }
}

impl<R: UniformSource + ?Sized> UniformSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses `0x5EED_DEAD_BEEF_CAFE` as a fallback.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a PRNG seeded from operating-system entropy.
    ///
    /// Falls back to the system clock if the OS source is unavailable.
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        let seed = match getrandom::getrandom(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(e) => {
                tracing::warn!(error = %e, "OS entropy unavailable, seeding from clock");
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(Self::FALLBACK_SEED)
            }
        };
        Self::new(seed)
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UniformSource for Xorshift64 {
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
