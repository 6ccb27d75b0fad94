//! Discrete-time simulation engine for a first-fit memory allocator with
//! time-bounded leases.
//!
//! The engine models a fixed-size linear address space carved into free and
//! leased blocks. A driver advances a logical clock; every tick expired
//! leases are reclaimed, and at a configurable cadence a synthetic request
//! (random size, random lease duration) is handed to the allocator, which
//! satisfies it first-fit or — after one deferred merge of adjacent free
//! blocks — records it as unsatisfied.
//!
//! Addresses are abstract integers, not pointers: the simulator measures
//! allocator behavior (satisfaction rate, fragmentation via merge counts,
//! block/lease distributions), it does not back real memory.
//!
//! ```text
//!   granule-core
//!   ├── block      - Block and Lease value types
//!   ├── free_list  - adjacency coalescing over the free list
//!   ├── allocator  - first-fit allocation with merge-and-retry
//!   ├── stats      - running counters and finalized summary
//!   ├── workload   - seeded random request generation
//!   └── sim        - clock-stepping driver and reporting
//! ```

pub mod allocator;
pub mod block;
pub mod free_list;
pub mod sim;
pub mod stats;
pub mod workload;

pub use allocator::{LeaseAllocator, RequestError};
pub use block::{Block, Lease};
pub use sim::{ConfigError, Report, RequestOutcome, SimConfig, Simulation, TickOutcome};
pub use stats::{Statistics, Summary};
pub use workload::{Request, UniformWorkload, Workload};
