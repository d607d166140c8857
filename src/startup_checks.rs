//! Startup requirement validation for procsnap.
//!
//! Validates pseudo-filesystem access before the sampling loop starts, so
//! a misconfigured root fails fast instead of producing all-unavailable
//! snapshots every cycle.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("proc root {path} is not readable: {source}")]
    ProcRootUnreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Validate runtime requirements against the configured roots.
///
/// An unreadable proc root is fatal; missing individual counter files only
/// degrade the affected metrics, so they warn instead of failing.
pub fn validate_requirements(proc_root: &Path, sys_root: &Path) -> Result<(), ValidationError> {
    info!("Validating pseudo-filesystem access...");

    fs::read_dir(proc_root).map_err(|e| ValidationError::ProcRootUnreadable {
        path: proc_root.display().to_string(),
        source: e,
    })?;

    for counter in ["stat", "meminfo", "partitions", "diskstats", "mounts"] {
        let path = proc_root.join(counter);
        if fs::metadata(&path).is_err() {
            warn!(
                "{} not readable - the dependent metric will be unavailable",
                path.display()
            );
        }
    }

    let block_dir = sys_root.join("class/block");
    if fs::metadata(&block_dir).is_err() {
        warn!(
            "{} not readable - disk activity counters will be zero",
            block_dir.display()
        );
    }

    info!("Pseudo-filesystem access validated");
    Ok(())
}
