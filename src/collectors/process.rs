//! Process table sampling from per-PID stat records.
//!
//! Enumerates the live PID directories under the proc root and parses each
//! process's single-line stat record into a [`ProcessSample`]. A PID that
//! disappears between the listing and the read is a normal outcome, not an
//! error; a malformed record is skipped without aborting the sweep.

use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::readers::{read_pseudo_file, tokenize};

/// One process observed during a sampling cycle.
///
/// Ephemeral: a PID reused in a later cycle is an unrelated sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub command: String,
    /// Accumulated user + kernel tick counts from the stat record.
    pub cpu_ticks: f64,
}

/// Samples every live process under `proc_root`, ascending by PID.
///
/// An unreadable proc root yields an empty list with a warning; a single
/// bad record never suppresses the remaining processes.
pub fn sample_all_processes(proc_root: &Path) -> Vec<ProcessSample> {
    let mut out = Vec::new();
    let entries = match std::fs::read_dir(proc_root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}: {}", proc_root.display(), e);
            return out;
        }
    };

    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let pid: u32 = match name.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };

        match read_pseudo_file(&entry.path().join("stat")) {
            Ok(content) => match parse_stat_record(pid, &content) {
                Ok(sample) => out.push(sample),
                Err(e) => debug!("Skipping PID {}: {}", pid, e),
            },
            // Process exited between the listing and the read.
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => debug!("Failed to read stat for PID {}: {}", pid, e),
        }
    }

    out.sort_by_key(|s| s.pid);
    out
}

/// Parses one `/proc/<pid>/stat` line.
///
/// Field 1 is the command wrapped in parentheses; fields 13 and 14 are the
/// user-mode and kernel-mode tick counters.
fn parse_stat_record(pid: u32, content: &str) -> Result<ProcessSample, String> {
    let line = content.lines().next().unwrap_or("");
    let parts = tokenize(line);
    if parts.len() < 15 {
        return Err(format!(
            "stat record has {} fields, expected at least 15",
            parts.len()
        ));
    }

    let command = parts[1]
        .trim_start_matches('(')
        .trim_end_matches(')')
        .to_string();
    let utime: f64 = parts[13]
        .parse()
        .map_err(|e| format!("Failed to parse utime {:?}: {}", parts[13], e))?;
    let stime: f64 = parts[14]
        .parse()
        .map_err(|e| format!("Failed to parse stime {:?}: {}", parts[14], e))?;

    Ok(ProcessSample {
        pid,
        command,
        cpu_ticks: utime + stime,
    })
}
