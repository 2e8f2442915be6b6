// Sanin - Anomaly injection engine
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Seeded random source.
//!
//! All stochastic decisions draw from one stream seeded at construction.
//! The stream is advanced by every draw and never reset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random stream owned by an injector.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
    draws: u64,
}

impl RandomSource {
    /// Create a stream from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Seed the stream was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform integer in the closed range `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    pub fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low <= high);
        self.draws += 1;
        let value = self.rng.gen_range(low..=high);
        #[cfg(feature = "logging")]
        log::trace!("draw #{} in [{}, {}] -> {}", self.draws, low, high, value);
        value
    }
}
