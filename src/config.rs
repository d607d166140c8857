//! Configuration management for procsnap.
//!
//! Handles loading, merging, and validating configuration from files and
//! CLI arguments. Supports YAML, JSON, and TOML formats by file extension.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::{Args, OutputFormat};

// Default configuration constants
pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_SYS_ROOT: &str = "/sys";
pub const DEFAULT_INTERVAL_SECONDS: u64 = 1;

/// Config file locations tried when no explicit path is given.
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["procsnap.yaml", "/etc/procsnap/config.yaml"];

/// Effective sampling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the proc pseudo-filesystem
    pub proc_root: PathBuf,

    /// Root of the sysfs pseudo-filesystem
    pub sys_root: PathBuf,

    /// Seconds between sampling cycles
    pub interval_seconds: u64,

    /// Number of cycles to run; 0 means until interrupted
    pub iterations: u64,

    /// Snapshot output format
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            sys_root: PathBuf::from(DEFAULT_SYS_ROOT),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            iterations: 0,
            format: OutputFormat::Text,
        }
    }
}

/// Loads a config file, picking the parser from the file extension.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let config = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        other => bail!("Unsupported config extension {:?} for {}", other, path.display()),
    };

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolves the effective config: CLI flags override file values, which
/// override defaults.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else if let Some(path) = &args.config {
        load_config_file(path)?
    } else {
        load_default_config()
    };

    if let Some(proc_root) = &args.proc_root {
        config.proc_root = proc_root.clone();
    }
    if let Some(sys_root) = &args.sys_root {
        config.sys_root = sys_root.clone();
    }
    if let Some(interval) = args.interval {
        config.interval_seconds = interval;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(format) = args.format {
        config.format = format;
    }

    Ok(config)
}

/// Tries the default config locations; a missing file is not an error.
fn load_default_config() -> Config {
    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            match load_config_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring {}: {:#}", path.display(), e);
                }
            }
        }
    }
    Config::default()
}
