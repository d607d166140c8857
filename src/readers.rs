//! Shared pseudo-file reading and tokenizing utilities.
//!
//! Every collector reads kernel counters through these helpers so the
//! "missing file" vs "unreadable file" distinction is handled in one place.

use std::fs;
use std::io;
use std::path::Path;

/// Reads the full contents of a pseudo-file.
///
/// Returns the raw `io::Error` so callers can distinguish a missing entry
/// (an expected outcome for exited processes and absent devices) from a
/// real read failure.
pub fn read_pseudo_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Reads a pseudo-file, mapping any failure to a message with the path.
///
/// Used by collectors whose backing file is expected to exist; a failure
/// here makes the whole metric unavailable for the cycle.
pub fn read_required_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Splits a line into whitespace-delimited fields.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
