//! First-fit lease allocator over the simulated address space.
//!
//! [`LeaseAllocator`] owns the free list, the lease list, and the running
//! [`Statistics`]. Allocation is first-fit with a single merge-and-retry
//! fallback; reclamation returns expired blocks to the free list unmerged
//! and leaves coalescing to the next failed allocation (lazy compaction).

use core::fmt;

use crate::block::{Block, Lease};
use crate::free_list;
use crate::stats::Statistics;

/// Precondition violations reported by [`LeaseAllocator::allocate`].
///
/// These are programming-contract breaches, not modeled outcomes: a request
/// the allocator cannot place is recorded in the statistics and returns
/// `Ok(None)`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// The requested size was zero.
    ZeroSize,
    /// The requested lease duration was zero.
    ZeroLease,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "allocation request with zero size"),
            Self::ZeroLease => write!(f, "allocation request with zero lease duration"),
        }
    }
}

impl std::error::Error for RequestError {}

/// First-fit allocator with time-bounded leases.
///
/// # Algorithm
///
/// - **Allocate**: scan the free list in current order for the first block
///   large enough; carve the request off its front, reserving a one-unit
///   gap before the remainder. On a full-scan miss, merge adjacent free
///   blocks once and retry the identical scan.
/// - **Reclaim**: move every lease with `expiry <= now` back to the free
///   list verbatim; no sorting or merging happens here.
#[derive(Debug)]
pub struct LeaseAllocator {
    /// Free blocks, unordered between coalescer runs.
    free: Vec<Block>,
    /// Outstanding leases, one per granted request.
    leases: Vec<Lease>,
    stats: Statistics,
}

impl LeaseAllocator {
    /// Creates an allocator whose free list holds the single block
    /// `[0, memory_size)`.
    pub fn new(memory_size: u64) -> Self {
        debug_assert!(memory_size > 0, "empty address space");
        Self {
            free: vec![Block::new(0, memory_size)],
            leases: Vec::new(),
            stats: Statistics::default(),
        }
    }

    /// Attempts to place a request of `size` units leased for
    /// `lease_duration` ticks starting at tick `now`.
    ///
    /// Returns the granted block, or `None` if the request cannot be placed
    /// even after merging adjacent free blocks — in which case the drop is
    /// visible only in [`Statistics::unsatisfied_requests`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] without touching any state if `size` or
    /// `lease_duration` is zero. The synthetic workload never produces
    /// these; the check guards hand-written callers.
    pub fn allocate(
        &mut self,
        size: u64,
        lease_duration: u64,
        now: u64,
    ) -> Result<Option<Block>, RequestError> {
        if size == 0 {
            return Err(RequestError::ZeroSize);
        }
        if lease_duration == 0 {
            return Err(RequestError::ZeroLease);
        }

        self.stats.total_requests += 1;

        if let Some(block) = self.carve_first_fit(size) {
            self.grant(block, lease_duration, now);
            return Ok(Some(block));
        }

        // Miss: coalesce on demand, then retry the identical scan once.
        self.stats.unsatisfied_requests += 1;
        self.stats.merge_count += free_list::merge_adjacent(&mut self.free);

        if let Some(block) = self.carve_first_fit(size) {
            self.grant(block, lease_duration, now);
            // The miss is retracted once the merge made room.
            self.stats.unsatisfied_requests -= 1;
            return Ok(Some(block));
        }

        Ok(None)
    }

    /// Returns every expired lease's block to the free list, unmerged.
    ///
    /// A single pass removes all leases with `expiry <= now`; the index
    /// only advances past entries that are kept, so removal neither skips
    /// nor double-visits. Returns the number of leases reclaimed.
    pub fn reclaim_expired(&mut self, now: u64) -> usize {
        let mut reclaimed = 0;
        let mut i = 0;
        while i < self.leases.len() {
            if self.leases[i].is_expired(now) {
                let lease = self.leases.remove(i);
                self.free.push(lease.block);
                reclaimed += 1;
            } else {
                i += 1;
            }
        }
        reclaimed
    }

    /// First-fit scan over the free list in its current order.
    ///
    /// Carves `size` units off the front of the first block that fits. The
    /// remainder keeps the tail of the entry minus a one-unit gap reserved
    /// after the carved block; when no remainder would survive the gap
    /// (entry at most one unit larger than the request), the entry is
    /// removed outright and the leftover unit, if any, becomes the gap.
    fn carve_first_fit(&mut self, size: u64) -> Option<Block> {
        for i in 0..self.free.len() {
            let entry = self.free[i];
            if entry.size >= size {
                if entry.size - size <= 1 {
                    self.free.remove(i);
                } else {
                    self.free[i] = Block::new(entry.start + size + 1, entry.size - size - 1);
                }
                return Some(Block::new(entry.start, size));
            }
        }
        None
    }

    fn grant(&mut self, block: Block, lease_duration: u64, now: u64) {
        self.leases.push(Lease {
            block,
            expiry: now + lease_duration,
        });
        self.stats.record_grant(block.size, lease_duration);
    }

    // -----------------------------------------------------------------------
    // Reporting surface
    // -----------------------------------------------------------------------

    /// Free blocks in their current (not necessarily sorted) order.
    pub fn free_blocks(&self) -> &[Block] {
        &self.free
    }

    /// Outstanding leases in grant order.
    pub fn leases(&self) -> &[Lease] {
        &self.leases
    }

    /// The live counters.
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Snapshot of the free list sorted by start address.
    pub fn free_blocks_sorted(&self) -> Vec<Block> {
        let mut free = self.free.clone();
        free.sort_unstable_by_key(|b| b.start);
        free
    }

    /// Snapshot of the lease list sorted by start address.
    pub fn leases_sorted(&self) -> Vec<Lease> {
        let mut leases = self.leases.clone();
        leases.sort_unstable_by_key(|l| l.block.start);
        leases
    }
}
