//! Memory and swap utilization from /proc/meminfo.
//!
//! Lines are matched by their label rather than by position, so a kernel
//! that reorders or inserts fields does not shift the swap figures.

use std::collections::HashMap;
use std::path::Path;

use crate::readers::{read_required_file, tokenize};

/// Percentage of physical memory in use: `100 * (MemTotal - MemFree) / MemTotal`.
pub fn memory_usage_percent(proc_root: &Path) -> Result<f64, String> {
    usage_from_labels(proc_root, "MemTotal", "MemFree")
}

/// Percentage of swap in use: `100 * (SwapTotal - SwapFree) / SwapTotal`.
pub fn swap_usage_percent(proc_root: &Path) -> Result<f64, String> {
    usage_from_labels(proc_root, "SwapTotal", "SwapFree")
}

fn usage_from_labels(proc_root: &Path, total_label: &str, free_label: &str) -> Result<f64, String> {
    let info = read_meminfo(proc_root)?;
    let total = *info
        .get(total_label)
        .ok_or_else(|| format!("{} not found in meminfo", total_label))?;
    let free = *info
        .get(free_label)
        .ok_or_else(|| format!("{} not found in meminfo", free_label))?;

    if total == 0 {
        return Err(format!("{} is zero", total_label));
    }
    let used = total.saturating_sub(free);
    Ok((100.0 * used as f64 / total as f64).clamp(0.0, 100.0))
}

/// Parses /proc/meminfo into a label -> kB map. Malformed lines are skipped.
fn read_meminfo(proc_root: &Path) -> Result<HashMap<String, u64>, String> {
    let content = read_required_file(&proc_root.join("meminfo"))?;

    let mut values = HashMap::new();
    for line in content.lines() {
        let (label, rest) = match line.split_once(':') {
            Some(v) => v,
            None => continue,
        };
        let fields = tokenize(rest);
        if let Some(Ok(kb)) = fields.first().map(|f| f.parse::<u64>()) {
            values.insert(label.trim().to_string(), kb);
        }
    }

    if values.is_empty() {
        return Err("No parseable fields in meminfo".to_string());
    }
    Ok(values)
}
