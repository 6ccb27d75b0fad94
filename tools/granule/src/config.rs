//! Configuration resolution for granule.
//!
//! Run parameters come from three layers, later layers winning:
//! built-in defaults, an optional `granule.toml`, then CLI flags.

use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use granule_core::{SimConfig, UniformWorkload};
use serde::Deserialize;

use crate::cli::Cli;

/// Contents of `granule.toml`. Every field is optional; absent fields fall
/// through to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// `[simulation]` section.
    #[serde(default)]
    pub simulation: SimulationSection,
    /// `[workload]` section.
    #[serde(default)]
    pub workload: WorkloadSection,
}

/// `[simulation]` section of `granule.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Total address space in units.
    #[serde(rename = "memory-size")]
    pub memory_size: Option<u64>,
    /// Number of clock ticks to simulate.
    #[serde(rename = "time-limit")]
    pub time_limit: Option<u64>,
    /// Ticks between workload requests.
    #[serde(rename = "request-interval")]
    pub request_interval: Option<u64>,
}

/// `[workload]` section of `granule.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkloadSection {
    /// Workload RNG seed.
    pub seed: Option<u64>,
    /// Minimum request size in units.
    #[serde(rename = "size-min")]
    pub size_min: Option<u64>,
    /// Maximum request size in units.
    #[serde(rename = "size-max")]
    pub size_max: Option<u64>,
    /// Minimum lease duration in ticks.
    #[serde(rename = "lease-min")]
    pub lease_min: Option<u64>,
    /// Maximum lease duration in ticks.
    #[serde(rename = "lease-max")]
    pub lease_max: Option<u64>,
}

/// Fully resolved and validated run parameters.
#[derive(Debug)]
pub struct RunConfig {
    /// Simulation parameters handed to the engine.
    pub sim: SimConfig,
    /// Workload seed, if pinned by flag or file.
    pub seed: Option<u64>,
    /// Inclusive request size range.
    pub size: RangeInclusive<u64>,
    /// Inclusive lease duration range.
    pub lease: RangeInclusive<u64>,
}

/// Resolves the run configuration from defaults, the optional config file,
/// and CLI overrides, then validates the result.
pub fn resolve(cli: &Cli) -> Result<RunConfig> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };

    let defaults = SimConfig::default();
    let sim = SimConfig {
        memory_size: cli
            .memory_size
            .or(file.simulation.memory_size)
            .unwrap_or(defaults.memory_size),
        time_limit: cli
            .time_limit
            .or(file.simulation.time_limit)
            .unwrap_or(defaults.time_limit),
        request_interval: cli
            .request_interval
            .or(file.simulation.request_interval)
            .unwrap_or(defaults.request_interval),
    };

    let size_min = cli
        .min_size
        .or(file.workload.size_min)
        .unwrap_or(*UniformWorkload::DEFAULT_SIZE.start());
    let size_max = cli
        .max_size
        .or(file.workload.size_max)
        .unwrap_or(*UniformWorkload::DEFAULT_SIZE.end());
    let lease_min = cli
        .min_lease
        .or(file.workload.lease_min)
        .unwrap_or(*UniformWorkload::DEFAULT_LEASE.start());
    let lease_max = cli
        .max_lease
        .or(file.workload.lease_max)
        .unwrap_or(*UniformWorkload::DEFAULT_LEASE.end());

    ensure!(sim.memory_size > 0, "memory-size must be positive");
    ensure!(sim.request_interval > 0, "request-interval must be positive");
    ensure!(size_min > 0, "size-min must be positive");
    ensure!(
        size_min <= size_max,
        "size-min ({size_min}) exceeds size-max ({size_max})"
    );
    ensure!(lease_min > 0, "lease-min must be positive");
    ensure!(
        lease_min <= lease_max,
        "lease-min ({lease_min}) exceeds lease-max ({lease_max})"
    );

    Ok(RunConfig {
        sim,
        seed: cli.seed.or(file.workload.seed),
        size: size_min..=size_max,
        lease: lease_min..=lease_max,
    })
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
