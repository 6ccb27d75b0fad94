//! Value types for the simulated address space.

/// A contiguous span of the simulated address space.
///
/// Occupies addresses `start .. start + size`. The allocator reserves one
/// unused address unit between a carved block and the free remainder that
/// follows it, so two free blocks are mergeable exactly when one such gap
/// separates them (see [`Block::is_adjacent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First address of the span.
    pub start: u64,
    /// Length of the span in address units. Always `> 0`.
    pub size: u64,
}

impl Block {
    /// Creates a block. `size` must be non-zero.
    pub fn new(start: u64, size: u64) -> Self {
        debug_assert!(size > 0, "zero-size block");
        Self { start, size }
    }

    /// First address past the span.
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    /// Returns `true` if `other` follows `self` with exactly the one-unit
    /// inter-block gap between them, i.e. the two can be merged into one
    /// block absorbing the gap.
    pub fn is_adjacent(&self, other: &Block) -> bool {
        self.start + self.size + 1 == other.start
    }
}

/// A granted allocation: a block plus the tick its lease runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lease {
    /// The leased block.
    pub block: Block,
    /// Clock tick at (or after) which the lease must be reclaimed.
    pub expiry: u64,
}

impl Lease {
    /// Returns `true` once the lease is due for reclamation.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry <= now
    }
}
