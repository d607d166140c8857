//! CLI arguments and subcommands for procsnap.
//!
//! This module defines the command-line interface structure using the clap
//! library, including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Snapshot rendering formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "procsnap",
    about = "Samples /proc and /sys counters into per-cycle utilization snapshots",
    long_about = "Samples /proc and /sys counters into per-cycle utilization snapshots.\n\n\
                  Each cycle reads the process table, CPU/memory/swap totals, block-device \
                  counters and the mount table, derives utilization percentages and prints \
                  one complete snapshot. Metrics whose counters cannot be read are reported \
                  as unavailable rather than dropped.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root of the proc pseudo-filesystem
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Root of the sysfs pseudo-filesystem
    #[arg(long)]
    pub sys_root: Option<PathBuf>,

    /// Seconds between sampling cycles
    #[arg(short = 'i', long)]
    pub interval: Option<u64>,

    /// Number of sampling cycles (0 = run until interrupted)
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Snapshot output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate pseudo-filesystem access and exit
    Check,
}
