//! Random source backed by the thread-local RNG
//!
//! Each worker thread owns an independently seeded generator, so
//! concurrent requests never share or serialize on RNG state.

use application::ports::RandomSource;
use rand::Rng;

/// `RandomSource` using `rand`'s thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl ThreadRngSource {
    /// Create the adapter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRngSource {
    fn below(&self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        rand::rng().random_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread};

    use super::*;

    #[test]
    fn draws_stay_below_n() {
        let source = ThreadRngSource::new();
        for n in [1, 3, 6, 8, 100] {
            for _ in 0..1000 {
                assert!(source.below(n) < n);
            }
        }
    }

    #[test]
    fn zero_range_yields_zero() {
        assert_eq!(ThreadRngSource.below(0), 0);
    }

    #[test]
    fn every_face_shows_up() {
        let source = ThreadRngSource::new();
        let seen: HashSet<u32> = (0..10_000).map(|_| source.below(8)).collect();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn threads_draw_independently() {
        let source: Arc<dyn RandomSource> = Arc::new(ThreadRngSource::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || (0..32).map(|_| source.below(100)).collect::<Vec<_>>())
            })
            .collect();

        let sequences: HashSet<Vec<u32>> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(sequences.len(), 8, "threads produced identical sequences");
    }
}
