//! Running counters for allocator behavior, and their finalized summary.

use core::fmt;

/// Live aggregate counters, mutated only by the allocator and coalescer.
///
/// Sums and counts are kept separate while the simulation runs; averages
/// exist only in the [`Summary`] produced by [`Statistics::summarize`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Requests handed to the allocator.
    pub total_requests: u64,
    /// Requests granted (first-fit or on the post-merge retry).
    pub satisfied_requests: u64,
    /// Requests still unsatisfied after the merge-and-retry fallback.
    pub unsatisfied_requests: u64,
    /// Smallest granted block size. Meaningful only once a grant exists.
    pub smallest_block: u64,
    /// Largest granted block size.
    pub largest_block: u64,
    /// Sum of granted block sizes (averaged in the summary).
    pub sum_block_size: u64,
    /// Shortest granted lease duration. Meaningful only once a grant exists.
    pub shortest_lease: u64,
    /// Longest granted lease duration.
    pub longest_lease: u64,
    /// Sum of granted lease durations (averaged in the summary).
    pub sum_lease_duration: u64,
    /// Free-block merges performed by the coalescer.
    pub merge_count: u64,
}

impl Statistics {
    /// Records a granted request of `size` address units for `lease` ticks.
    ///
    /// The min/max extrema are seeded by the first grant rather than by
    /// zero, so an early denied request cannot pin `smallest_block` at 0.
    pub(crate) fn record_grant(&mut self, size: u64, lease: u64) {
        if self.satisfied_requests == 0 {
            self.smallest_block = size;
            self.shortest_lease = lease;
        } else {
            self.smallest_block = self.smallest_block.min(size);
            self.shortest_lease = self.shortest_lease.min(lease);
        }
        self.largest_block = self.largest_block.max(size);
        self.longest_lease = self.longest_lease.max(lease);
        self.sum_block_size += size;
        self.sum_lease_duration += lease;
        self.satisfied_requests += 1;
    }

    /// Finalizes the counters into a [`Summary`], dividing the running sums
    /// by the request count. With zero requests both averages are 0.
    pub fn summarize(&self) -> Summary {
        let avg = |sum: u64| {
            if self.total_requests == 0 {
                0
            } else {
                sum / self.total_requests
            }
        };
        Summary {
            stats: *self,
            average_block_size: avg(self.sum_block_size),
            average_lease_duration: avg(self.sum_lease_duration),
        }
    }
}

/// Finalized statistics: the raw counters plus computed averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// The counters the averages were derived from.
    pub stats: Statistics,
    /// `sum_block_size / total_requests` (0 when no requests were made).
    pub average_block_size: u64,
    /// `sum_lease_duration / total_requests` (0 when no requests were made).
    pub average_lease_duration: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "Total requests:          {}", s.total_requests)?;
        writeln!(f, "Satisfied requests:      {}", s.satisfied_requests)?;
        writeln!(f, "Unsatisfied requests:    {}", s.unsatisfied_requests)?;
        writeln!(f, "Smallest block size:     {}", s.smallest_block)?;
        writeln!(f, "Largest block size:      {}", s.largest_block)?;
        writeln!(f, "Average block size:      {}", self.average_block_size)?;
        writeln!(f, "Shortest lease duration: {}", s.shortest_lease)?;
        writeln!(f, "Longest lease duration:  {}", s.longest_lease)?;
        writeln!(f, "Average lease duration:  {}", self.average_lease_duration)?;
        write!(f, "Merges performed:        {}", s.merge_count)
    }
}
