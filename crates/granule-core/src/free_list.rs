//! Free-list maintenance: sorting and adjacency coalescing.
//!
//! Reclaimed blocks are appended to the free list unmerged; coalescing is
//! deferred until the allocator actually needs it (after a failed first-fit
//! scan). This trades a little fragmentation risk for not re-sorting the
//! list on every reclamation.

use crate::block::Block;

/// Merges every pair of gap-adjacent free blocks, in place.
///
/// Sorts the list by start address, then scans left to right: whenever two
/// neighbors satisfy [`Block::is_adjacent`], they collapse into one block
/// whose size also absorbs the one-unit gap between them. The merged block
/// is re-tested against its new right neighbor before the scan advances, so
/// runs of adjacent blocks collapse in a single call.
///
/// Returns the number of merges performed (the caller folds this into its
/// statistics). A list with fewer than two entries is left untouched.
///
/// Postcondition: the list is sorted by start address and no two entries
/// are adjacent; calling this again is a no-op.
pub fn merge_adjacent(free: &mut Vec<Block>) -> u64 {
    if free.len() < 2 {
        return 0;
    }

    free.sort_unstable_by_key(|b| b.start);

    let mut merges = 0;
    let mut i = 0;
    while i + 1 < free.len() {
        if free[i].is_adjacent(&free[i + 1]) {
            // Absorb the right neighbor plus the gap unit between them.
            free[i].size += free[i + 1].size + 1;
            free.remove(i + 1);
            merges += 1;
        } else {
            i += 1;
        }
    }
    merges
}
