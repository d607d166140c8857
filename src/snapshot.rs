//! Per-cycle aggregation of all collectors into one snapshot.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::collectors::cpu::cpu_usage_percent;
use crate::collectors::disk::aggregate_disk_usage;
use crate::collectors::memory::{memory_usage_percent, swap_usage_percent};
use crate::collectors::mounts::{list_writable_filesystems, FilesystemUsage};
use crate::collectors::process::{sample_all_processes, ProcessSample};
use crate::percent::Utilization;

/// All metrics derived in one sampling cycle.
///
/// The shape is always complete: a metric whose counters could not be read
/// is present as [`Utilization::Unavailable`], never omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub processes: Vec<ProcessSample>,
    pub cpu: Utilization,
    pub memory: Utilization,
    pub swap: Utilization,
    pub disk: Utilization,
    pub filesystems: Vec<FilesystemUsage>,
}

/// Stateless sampling engine rooted at configurable pseudo-filesystem paths.
///
/// Every call re-reads the current pseudo-file contents; nothing is cached
/// or carried between cycles.
#[derive(Debug, Clone)]
pub struct Sampler {
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl Sampler {
    pub fn new(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn sys_root(&self) -> &Path {
        &self.sys_root
    }

    /// Produces one complete snapshot. Each metric is computed in
    /// isolation; one failure never suppresses the sibling metrics.
    pub fn sample(&self) -> MetricsSnapshot {
        let processes = sample_all_processes(&self.proc_root);

        let cpu = metric("cpu", cpu_usage_percent(&self.proc_root));
        let memory = metric("memory", memory_usage_percent(&self.proc_root));
        let swap = metric("swap", swap_usage_percent(&self.proc_root));

        let disk = match aggregate_disk_usage(&self.proc_root, &self.sys_root, None) {
            Ok(totals) => totals.usage_percent(),
            Err(e) => {
                debug!("disk usage unavailable: {}", e);
                Utilization::Unavailable
            }
        };

        let filesystems = match list_writable_filesystems(&self.proc_root, &self.sys_root) {
            Ok(list) => list,
            Err(e) => {
                warn!("filesystem report unavailable: {}", e);
                Vec::new()
            }
        };

        MetricsSnapshot {
            processes,
            cpu,
            memory,
            swap,
            disk,
            filesystems,
        }
    }
}

fn metric(name: &str, result: Result<f64, String>) -> Utilization {
    match result {
        Ok(value) => Utilization::percent(value),
        Err(e) => {
            debug!("{} usage unavailable: {}", name, e);
            Utilization::Unavailable
        }
    }
}
