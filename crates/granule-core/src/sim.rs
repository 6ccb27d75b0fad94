//! Discrete-time simulation driver.
//!
//! Owns the clock and enforces the per-tick ordering the engine's
//! correctness depends on: all reclamation for tick `t` completes before
//! the request for tick `t` (if any) is processed, and the full allocation
//! attempt — including the merge-and-retry fallback — completes before the
//! next tick begins.

use core::fmt;

use crate::allocator::{LeaseAllocator, RequestError};
use crate::block::{Block, Lease};
use crate::stats::Summary;
use crate::workload::Workload;

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Total address space; the free list starts as `[0, memory_size)`.
    pub memory_size: u64,
    /// Number of ticks to run.
    pub time_limit: u64,
    /// Ticks between workload requests. A request is drawn whenever
    /// `tick % request_interval == 0`, including tick 0.
    pub request_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_size: 1000,
            time_limit: 1000,
            request_interval: 10,
        }
    }
}

/// Rejected simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `memory_size` was zero.
    EmptyMemory,
    /// `request_interval` was zero.
    ZeroInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMemory => write!(f, "memory size must be positive"),
            Self::ZeroInterval => write!(f, "request interval must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// What one tick did, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The tick that was executed.
    pub now: u64,
    /// Leases reclaimed at the start of the tick.
    pub reclaimed: usize,
    /// The request processed this tick, if the cadence produced one.
    pub request: Option<RequestOutcome>,
}

/// Result of one workload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was placed.
    Granted {
        /// The carved block.
        block: Block,
        /// Tick at which the lease runs out.
        expiry: u64,
    },
    /// The request could not be placed even after merging.
    Denied {
        /// The size that was asked for.
        size: u64,
    },
}

/// Final state of a finished (or in-progress) simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Free blocks sorted by start address.
    pub free: Vec<Block>,
    /// Outstanding leases sorted by start address.
    pub leases: Vec<Lease>,
    /// Statistics with averages finalized.
    pub summary: Summary,
}

/// Clock-stepping driver around a [`LeaseAllocator`] and a [`Workload`].
#[derive(Debug)]
pub struct Simulation<W> {
    config: SimConfig,
    allocator: LeaseAllocator,
    workload: W,
    clock: u64,
}

impl<W: Workload> Simulation<W> {
    /// Creates a simulation at tick 0 with the whole address space free.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a zero memory size or request
    /// interval.
    pub fn new(config: SimConfig, workload: W) -> Result<Self, ConfigError> {
        if config.memory_size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        if config.request_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            allocator: LeaseAllocator::new(config.memory_size),
            workload,
            clock: 0,
            config,
        })
    }

    /// Executes one tick: reclaim expired leases, then process the tick's
    /// request if the cadence calls for one, then advance the clock.
    ///
    /// # Errors
    ///
    /// Propagates [`RequestError`] if the workload produced a request that
    /// violates the allocator's preconditions.
    pub fn tick(&mut self) -> Result<TickOutcome, RequestError> {
        let now = self.clock;
        let reclaimed = self.allocator.reclaim_expired(now);

        let request = if now % self.config.request_interval == 0 {
            let req = self.workload.next_request();
            let outcome = match self.allocator.allocate(req.size, req.lease, now)? {
                Some(block) => RequestOutcome::Granted {
                    block,
                    expiry: now + req.lease,
                },
                None => RequestOutcome::Denied { size: req.size },
            };
            Some(outcome)
        } else {
            None
        };

        self.clock += 1;
        Ok(TickOutcome {
            now,
            reclaimed,
            request,
        })
    }

    /// Runs the remaining ticks up to the configured time limit.
    pub fn run(&mut self) -> Result<(), RequestError> {
        while self.clock < self.config.time_limit {
            self.tick()?;
        }
        Ok(())
    }

    /// The next tick to execute.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// The parameters the simulation was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The allocator's live state.
    pub fn allocator(&self) -> &LeaseAllocator {
        &self.allocator
    }

    /// Snapshot of the final lists (sorted by start address) and the
    /// finalized statistics.
    pub fn report(&self) -> Report {
        Report {
            free: self.allocator.free_blocks_sorted(),
            leases: self.allocator.leases_sorted(),
            summary: self.allocator.stats().summarize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{Request, UniformWorkload};

    /// Replays a fixed request sequence, then repeats the last entry.
    struct Scripted {
        requests: Vec<Request>,
        next: usize,
    }

    impl Scripted {
        fn new(requests: &[(u64, u64)]) -> Self {
            Self {
                requests: requests
                    .iter()
                    .map(|&(size, lease)| Request { size, lease })
                    .collect(),
                next: 0,
            }
        }
    }

    impl Workload for Scripted {
        fn next_request(&mut self) -> Request {
            let req = self.requests[self.next.min(self.requests.len() - 1)];
            self.next += 1;
            req
        }
    }

    fn config(memory_size: u64, time_limit: u64, request_interval: u64) -> SimConfig {
        SimConfig {
            memory_size,
            time_limit,
            request_interval,
        }
    }

    #[test]
    fn rejects_degenerate_configs() {
        let workload = Scripted::new(&[(1, 1)]);
        assert_eq!(
            Simulation::new(config(0, 10, 1), workload).err(),
            Some(ConfigError::EmptyMemory)
        );
        let workload = Scripted::new(&[(1, 1)]);
        assert_eq!(
            Simulation::new(config(10, 10, 0), workload).err(),
            Some(ConfigError::ZeroInterval)
        );
    }

    #[test]
    fn request_cadence_includes_tick_zero() {
        let mut sim = Simulation::new(config(1000, 30, 10), Scripted::new(&[(10, 5)])).unwrap();
        let mut requests = 0;
        for _ in 0..30 {
            if sim.tick().unwrap().request.is_some() {
                requests += 1;
            }
        }
        // Ticks 0, 10, 20.
        assert_eq!(requests, 3);
        assert_eq!(sim.allocator().stats().total_requests, 3);
    }

    #[test]
    fn reclaim_runs_before_the_request_of_the_same_tick() {
        // One request fills memory exactly; its lease expires at tick 2,
        // where the next request arrives. The reclaim must land first or
        // the second request would be denied.
        let mut sim = Simulation::new(config(100, 4, 2), Scripted::new(&[(100, 2)])).unwrap();
        let first = sim.tick().unwrap();
        assert!(matches!(
            first.request,
            Some(RequestOutcome::Granted { block, expiry: 2 }) if block == Block::new(0, 100)
        ));

        let idle = sim.tick().unwrap();
        assert_eq!(idle.reclaimed, 0);
        assert_eq!(idle.request, None);

        let third = sim.tick().unwrap();
        assert_eq!(third.reclaimed, 1);
        assert!(matches!(third.request, Some(RequestOutcome::Granted { .. })));
    }

    #[test]
    fn denied_requests_surface_in_the_outcome() {
        let mut sim = Simulation::new(config(50, 1, 1), Scripted::new(&[(60, 5)])).unwrap();
        let outcome = sim.tick().unwrap();
        assert_eq!(outcome.request, Some(RequestOutcome::Denied { size: 60 }));
        assert_eq!(sim.allocator().stats().unsatisfied_requests, 1);
    }

    #[test]
    fn precondition_breach_propagates() {
        let mut sim = Simulation::new(config(100, 1, 1), Scripted::new(&[(0, 5)])).unwrap();
        assert_eq!(sim.tick(), Err(RequestError::ZeroSize));
    }

    #[test]
    fn report_sorts_both_lists_and_finalizes_averages() {
        let mut sim = Simulation::new(
            config(1000, 1, 1),
            Scripted::new(&[(100, 50)]),
        )
        .unwrap();
        sim.run().unwrap();
        let report = sim.report();
        assert_eq!(report.leases.len(), 1);
        assert_eq!(report.free, vec![Block::new(101, 899)]);
        assert_eq!(report.summary.average_block_size, 100);
        assert_eq!(report.summary.average_lease_duration, 50);
    }

    /// Every block an observer can see must lie inside the address space,
    /// and no two blocks (free or leased) may overlap.
    fn assert_disjoint_within(sim: &Simulation<UniformWorkload>, memory_size: u64) {
        let mut spans: Vec<(u64, u64)> = sim
            .allocator()
            .free_blocks()
            .iter()
            .chain(sim.allocator().leases().iter().map(|l| &l.block))
            .map(|b| (b.start, b.end()))
            .collect();
        spans.sort_unstable();
        for window in spans.windows(2) {
            assert!(window[0].1 <= window[1].0, "overlapping blocks: {spans:?}");
        }
        if let Some(&(_, end)) = spans.last() {
            assert!(end <= memory_size, "block past end of memory: {spans:?}");
        }
    }

    #[test]
    fn full_run_preserves_disjointness_every_tick() {
        let config = SimConfig::default();
        let mut sim = Simulation::new(config, UniformWorkload::with_seed(0xBEEF)).unwrap();
        for _ in 0..config.time_limit {
            sim.tick().unwrap();
            assert_disjoint_within(&sim, config.memory_size);
        }
        let stats = sim.allocator().stats();
        assert_eq!(stats.total_requests, 100);
        assert_eq!(
            stats.satisfied_requests + stats.unsatisfied_requests,
            stats.total_requests
        );
        assert!(stats.satisfied_requests > 0);
    }

    #[test]
    fn identical_seeds_give_identical_reports() {
        let run = |seed| {
            let mut sim =
                Simulation::new(SimConfig::default(), UniformWorkload::with_seed(seed)).unwrap();
            sim.run().unwrap();
            sim.report()
        };
        assert_eq!(run(7), run(7));
    }
}
