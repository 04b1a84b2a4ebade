//! Uniform random draws used to pick a game instance.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, rng};

use quiz_core::model::{ContentIndex, InstanceIndex};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Thread-local RNG; a fresh draw on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rng().random::<f64>()
    }
}

/// Deterministic RNG for tests and reproducible sessions.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random::<f64>()
    }
}

/// Map a draw onto the pool: `floor(draw * instance_count)`.
///
/// The draw is clamped to `[0, 1]` and the result to the last index, so the
/// selection is always inside the pool.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn select_instance(index: &ContentIndex, draw: f64) -> InstanceIndex {
    let count = index.instance_count().get();
    let draw = if draw.is_nan() { 0.0 } else { draw.clamp(0.0, 1.0) };
    let scaled = (draw * f64::from(count)).floor() as u32;
    InstanceIndex::new(scaled.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn pool(n: u32) -> ContentIndex {
        ContentIndex::new(NonZeroU32::new(n).unwrap())
    }

    #[test]
    fn selection_maps_draws_to_buckets() {
        let three = pool(3);
        assert_eq!(select_instance(&three, 0.0).value(), 0);
        assert_eq!(select_instance(&three, 0.34).value(), 1);
        assert_eq!(select_instance(&three, 0.5).value(), 1);
        assert_eq!(select_instance(&three, 0.999_999).value(), 2);
    }

    #[test]
    fn selection_stays_in_bounds_for_degenerate_draws() {
        let three = pool(3);
        assert_eq!(select_instance(&three, 1.0).value(), 2);
        assert_eq!(select_instance(&three, -0.5).value(), 0);
        assert_eq!(select_instance(&three, f64::NAN).value(), 0);
        assert_eq!(select_instance(&pool(1), 0.9).value(), 0);
    }

    #[test]
    fn selection_is_always_in_range() {
        let random = SeededRandom::new(7);
        for n in 1..=50 {
            let index = pool(n);
            for _ in 0..200 {
                let selected = select_instance(&index, random.next_unit());
                assert!(index.contains(selected), "{selected} outside 0..{n}");
            }
        }
    }

    #[test]
    fn selection_reaches_every_bucket() {
        let random = SeededRandom::new(42);
        let index = pool(4);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[select_instance(&index, random.next_unit()).value() as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(99);
        let b = SeededRandom::new(99);
        for _ in 0..10 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
        }
    }

    #[test]
    fn thread_random_draws_unit_interval() {
        let random = ThreadRandom;
        for _ in 0..100 {
            let draw = random.next_unit();
            assert!((0.0..1.0).contains(&draw));
        }
    }
}
