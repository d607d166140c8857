//! CPU utilization from the aggregate /proc/stat counters.

use std::path::Path;

use crate::readers::{read_required_file, tokenize};

/// Index of the idle counter among the tick fields after the "cpu" label.
const IDLE_FIELD: usize = 3;

/// Derives the instantaneous non-idle CPU percentage from the aggregate
/// "cpu" line: `100 * (1 - idle / total)` over all accumulated ticks.
///
/// This is a single-read ratio over the counters since boot, not a delta
/// between two samples. Zero accumulated ticks is an error so the caller
/// reports the metric as unavailable instead of dividing by zero.
pub fn cpu_usage_percent(proc_root: &Path) -> Result<f64, String> {
    let content = read_required_file(&proc_root.join("stat"))?;
    let line = content
        .lines()
        .find(|l| tokenize(l).first() == Some(&"cpu"))
        .ok_or_else(|| "No aggregate cpu line in stat".to_string())?;

    let parts = tokenize(line);
    let ticks = parts[1..]
        .iter()
        .map(|f| {
            f.parse::<u64>()
                .map_err(|e| format!("Failed to parse cpu tick field {:?}: {}", f, e))
        })
        .collect::<Result<Vec<u64>, String>>()?;

    if ticks.len() <= IDLE_FIELD {
        return Err(format!(
            "cpu line has {} tick fields, expected at least {}",
            ticks.len(),
            IDLE_FIELD + 1
        ));
    }

    let total: u64 = ticks.iter().sum();
    if total == 0 {
        return Err("No CPU ticks accumulated yet".to_string());
    }
    let idle = ticks[IDLE_FIELD];

    Ok((100.0 * (1.0 - idle as f64 / total as f64)).clamp(0.0, 100.0))
}
