//! procsnap - /proc and /sys sampling engine
//!
//! Converts raw kernel counters from Linux pseudo-files into per-cycle
//! utilization snapshots. Each [`Sampler::sample`] call reads the process
//! table, CPU/memory/swap totals, block-device counters and the mount
//! table, and derives one complete [`MetricsSnapshot`]. The engine is
//! stateless between calls and single-threaded; scheduling and display are
//! the caller's concern.
//!
//! # Usage
//!
//! ```no_run
//! use procsnap::Sampler;
//!
//! let sampler = Sampler::new("/proc", "/sys");
//! let snapshot = sampler.sample();
//!
//! println!("CPU: {}", snapshot.cpu);
//! println!("Memory: {}", snapshot.memory);
//! for process in &snapshot.processes {
//!     println!("{} {} {:.2}", process.pid, process.command, process.cpu_ticks);
//! }
//! ```
//!
//! Collectors take explicit root paths, so tests (and callers sampling a
//! container's view of /proc) can point the engine at any directory tree.

pub mod cli;
pub mod collectors;
pub mod config;
pub mod percent;
pub mod readers;
pub mod snapshot;
pub mod startup_checks;

// Re-export main types for convenience
pub use collectors::disk::BlockDeviceTotals;
pub use collectors::mounts::{FilesystemUsage, MountEntry};
pub use collectors::process::ProcessSample;
pub use percent::Utilization;
pub use snapshot::{MetricsSnapshot, Sampler};
