//! Injectable random source.
//!
//! Obstacle placement, the Simple tier and the advisor fallback all draw a
//! uniform index through [`RandomSource`]. Any `rand::Rng` qualifies, so tests
//! pass a seeded `StdRng` and the binary passes `rand::rng()` or a seeded one.

use rand::Rng;

/// Source of uniform integers in `0..upper`.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `0..upper`.
    ///
    /// `upper` must be non-zero.
    fn uniform(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn uniform(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// Picks one element uniformly, or `None` for an empty slice.
pub fn choose<T: Copy, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.uniform(items.len())])
    }
}
