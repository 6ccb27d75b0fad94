//! Final report printing.

use granule_core::Report;

use crate::verbose::dprintln;

/// Prints the end-of-run report: statistics, then — unless quiet mode is
/// active — the final free and lease lists sorted by start address.
pub fn print(report: &Report) {
    println!("Simulation results:");
    println!("{}", report.summary);

    dprintln!();
    dprintln!("Free list:");
    for block in &report.free {
        dprintln!("  start {:>6}  size {:>6}", block.start, block.size);
    }

    dprintln!();
    dprintln!("Lease list:");
    for lease in &report.leases {
        dprintln!(
            "  start {:>6}  size {:>6}  expiry {:>6}",
            lease.block.start,
            lease.block.size,
            lease.expiry
        );
    }
}
