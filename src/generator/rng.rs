use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64;
use xxhash_rust::xxh3::xxh3_64;

/// The single random stream a generation run draws from.
///
/// Every choice the generator makes consumes draws in a fixed order, so
/// two streams built from the same seed string produce the same ship.
/// Each run owns its stream; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct RngStream {
    inner: Pcg64,
}

impl RngStream {
    /// Seeds from a string. A missing or empty seed draws a fresh seed
    /// from the thread RNG, making the run non-reproducible.
    #[must_use]
    pub fn new(seed: Option<&str>) -> Self {
        match seed {
            Some(s) if !s.is_empty() => Self::from_u64(xxh3_64(s.as_bytes())),
            _ => Self::from_u64(rand::random::<u64>()),
        }
    }

    /// Seeds directly from a 64-bit value.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: Pcg64::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Draws once and reports whether the value exceeds `threshold`.
    pub fn exceeds(&mut self, threshold: f64) -> bool {
        self.unit() > threshold
    }

    /// Uniform draw between `lo` and `hi`. Always consumes one draw.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Integer in `[lo, hi]`. Returns `lo` without drawing when `hi <= lo`.
    pub fn int_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    /// Integer in `[lo, hi)`. Returns `lo` without drawing when the range
    /// holds a single value or none.
    pub fn int_range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo + 1 {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }
}

impl RngCore for RngStream {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }
}
