//! Synthetic request generation.
//!
//! The allocator is exercised by a stream of randomly sized, randomly
//! leased requests. The generator is an explicit seeded object rather than
//! process-wide random state, so any run can be reproduced from its seed
//! and tests can script exact request sequences through the [`Workload`]
//! trait.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One allocation request drawn from a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Requested block size in address units.
    pub size: u64,
    /// Requested lease duration in ticks.
    pub lease: u64,
}

/// Source of synthetic allocation requests.
pub trait Workload {
    /// Draws the next request.
    fn next_request(&mut self) -> Request;
}

/// Uniformly distributed sizes and lease durations over inclusive ranges.
#[derive(Debug)]
pub struct UniformWorkload {
    rng: StdRng,
    size: RangeInclusive<u64>,
    lease: RangeInclusive<u64>,
}

impl UniformWorkload {
    /// Default size range, in address units.
    pub const DEFAULT_SIZE: RangeInclusive<u64> = 50..=350;
    /// Default lease duration range, in ticks.
    pub const DEFAULT_LEASE: RangeInclusive<u64> = 40..=70;

    /// Creates a workload drawing sizes from `size` and lease durations
    /// from `lease`, both inclusive. Both range minima must be positive so
    /// the allocator's preconditions always hold.
    pub fn new(seed: u64, size: RangeInclusive<u64>, lease: RangeInclusive<u64>) -> Self {
        debug_assert!(*size.start() > 0 && size.start() <= size.end());
        debug_assert!(*lease.start() > 0 && lease.start() <= lease.end());
        Self {
            rng: StdRng::seed_from_u64(seed),
            size,
            lease,
        }
    }

    /// Creates a workload with the default ranges.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Self::DEFAULT_SIZE, Self::DEFAULT_LEASE)
    }
}

impl Workload for UniformWorkload {
    fn next_request(&mut self) -> Request {
        Request {
            size: self.rng.random_range(self.size.clone()),
            lease: self.rng.random_range(self.lease.clone()),
        }
    }
}
