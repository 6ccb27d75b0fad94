//! granule — first-fit lease-allocator simulator.
//!
//! Drives one discrete-time simulation of the `granule-core` engine under
//! a seeded uniform workload and prints the resulting statistics and final
//! list states.
//!
//! Pipeline: parse CLI → resolve config (defaults ← granule.toml ← flags)
//!           → run simulation tick by tick → print report.

mod cli;
mod config;
mod report;
mod verbose;

use anyhow::{Context, Result};
use clap::Parser;
use granule_core::{RequestOutcome, Simulation, TickOutcome, UniformWorkload};
use verbose::{dprintln, vprintln};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    let run = config::resolve(&cli)?;

    // Without a pinned seed, draw one and show it so the run can be
    // replayed with `--seed`.
    let seed = run.seed.unwrap_or_else(rand::random);
    dprintln!("Seed: {seed}");

    let workload = UniformWorkload::new(seed, run.size.clone(), run.lease.clone());
    let mut sim =
        Simulation::new(run.sim, workload).context("invalid simulation parameters")?;

    for _ in 0..run.sim.time_limit {
        let outcome = sim
            .tick()
            .context("workload produced an invalid request")?;
        trace_tick(&outcome);
    }

    report::print(&sim.report());
    Ok(())
}

/// Traces one tick's events in verbose mode.
fn trace_tick(outcome: &TickOutcome) {
    if outcome.reclaimed > 0 {
        vprintln!(
            "[{:>5}] reclaimed {} lease(s)",
            outcome.now,
            outcome.reclaimed
        );
    }
    match outcome.request {
        Some(RequestOutcome::Granted { block, expiry }) => {
            vprintln!(
                "[{:>5}] granted {:>4} units at {:>6}, lease until {}",
                outcome.now,
                block.size,
                block.start,
                expiry
            );
        }
        Some(RequestOutcome::Denied { size }) => {
            vprintln!("[{:>5}] denied request for {size} units", outcome.now);
        }
        None => {}
    }
}
