//! Block-device usage aggregation.
//!
//! Joins two independent sources by device name: the partition table gives
//! each matched device's size in 1024-byte blocks, and the per-device sysfs
//! stat file gives cumulative read/write sector counters. The sector sum is
//! an I/O-activity proxy for "used", not a capacity measure.

use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::percent::Utilization;
use crate::readers::{read_pseudo_file, read_required_file, tokenize};

/// Partition-table and sysfs block counters are in 1024-byte units.
pub const BLOCK_SIZE_BYTES: u64 = 1024;

/// Device-name prefixes of the physical/virtual block devices we track.
const DEVICE_PREFIXES: [&str; 3] = ["sd", "hd", "vd"];

/// Sector-counter field indices in `/sys/class/block/<dev>/stat`.
const READ_SECTORS_FIELD: usize = 2;
const WRITE_SECTORS_FIELD: usize = 10;

/// Aggregate size and activity across all matched block devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockDeviceTotals {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl BlockDeviceTotals {
    pub fn usage_percent(&self) -> Utilization {
        Utilization::from_ratio(self.used_bytes as f64, self.total_bytes as f64)
    }
}

fn is_tracked_device(name: &str) -> bool {
    DEVICE_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Sums block counts and cumulative sector counters across all tracked
/// devices under `proc_root`/`sys_root`.
///
/// `scope` carries the backing device of a per-mount call, but matching is
/// not narrowed to it: every invocation aggregates the same whole-system
/// totals. Devices whose sysfs stat entry is missing are skipped.
pub fn aggregate_disk_usage(
    proc_root: &Path,
    sys_root: &Path,
    scope: Option<&str>,
) -> Result<BlockDeviceTotals, String> {
    if let Some(scope) = scope {
        debug!(
            "Aggregating across all tracked devices (scope hint: {})",
            scope
        );
    }

    let partitions = read_required_file(&proc_root.join("partitions"))?;
    let mut total_blocks: u64 = 0;
    for line in partitions.lines() {
        let parts = tokenize(line);
        // Header and blank lines fall out of the field-count check.
        if parts.len() < 4 || !is_tracked_device(parts[3]) {
            continue;
        }
        total_blocks += parts[2].parse::<u64>().unwrap_or(0);
    }

    let diskstats = read_required_file(&proc_root.join("diskstats"))?;
    let mut used_sectors: u64 = 0;
    for line in diskstats.lines() {
        let parts = tokenize(line);
        if parts.len() < 3 || !is_tracked_device(parts[2]) {
            continue;
        }
        used_sectors += read_device_sectors(sys_root, parts[2]).unwrap_or(0);
    }

    Ok(BlockDeviceTotals {
        total_bytes: total_blocks * BLOCK_SIZE_BYTES,
        used_bytes: used_sectors * BLOCK_SIZE_BYTES,
    })
}

/// Reads the cumulative read + write sector counters for one device.
fn read_device_sectors(sys_root: &Path, device: &str) -> Option<u64> {
    let stat_path = sys_root.join("class/block").join(device).join("stat");
    let content = match read_pseudo_file(&stat_path) {
        Ok(c) => c,
        Err(e) => {
            debug!("Skipping {}: {}", stat_path.display(), e);
            return None;
        }
    };

    let line = content.lines().next().unwrap_or("");
    let stats = tokenize(line);
    if stats.len() <= WRITE_SECTORS_FIELD {
        debug!(
            "Skipping {}: {} fields, expected at least {}",
            stat_path.display(),
            stats.len(),
            WRITE_SECTORS_FIELD + 1
        );
        return None;
    }

    let read: u64 = stats[READ_SECTORS_FIELD].parse().unwrap_or(0);
    let written: u64 = stats[WRITE_SECTORS_FIELD].parse().unwrap_or(0);
    Some(read + written)
}
