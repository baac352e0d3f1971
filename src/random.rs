// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Injectable randomness for synthetic telemetry, memory estimates, and
//! canned chat replies.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random values shared by the service components.
pub trait RandomSource: Send + Sync {
    /// Uniform float in `[low, high]`.
    fn uniform(&self, low: f64, high: f64) -> f64;

    /// Uniform whole number in `[low, high]`.
    fn uniform_int(&self, low: u64, high: u64) -> u64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::rng().random_range(low..=high)
    }

    fn uniform_int(&self, low: u64, high: u64) -> u64 {
        rand::rng().random_range(low..=high)
    }

    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic generator: the same seed yields the same sequence.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Seeded random lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        f(&mut rng)
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.with_rng(|rng| rng.random_range(low..=high))
    }

    fn uniform_int(&self, low: u64, high: u64) -> u64 {
        self.with_rng(|rng| rng.random_range(low..=high))
    }

    fn index(&self, len: usize) -> usize {
        self.with_rng(|rng| rng.random_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        for _ in 0..16 {
            assert_eq!(a.uniform(0.0, 100.0), b.uniform(0.0, 100.0));
            assert_eq!(a.uniform_int(10, 20), b.uniform_int(10, 20));
            assert_eq!(a.index(4), b.index(4));
        }
    }

    #[test]
    fn test_seeded_random_bounds() {
        let random = SeededRandom::new(7);
        for _ in 0..1000 {
            let f = random.uniform(45.0, 75.0);
            assert!((45.0..=75.0).contains(&f));
            let n = random.uniform_int(4000, 16000);
            assert!((4000..=16000).contains(&n));
            assert!(random.index(3) < 3);
        }
    }

    #[test]
    fn test_thread_random_bounds() {
        let random = ThreadRandom;
        for _ in 0..100 {
            assert!((1.0..=2.0).contains(&random.uniform(1.0, 2.0)));
            assert!(random.uniform_int(5, 5) == 5);
            assert_eq!(random.index(1), 0);
        }
    }
}
