//! Writable device-backed filesystem reporting from the mount table.

use serde::Serialize;
use std::path::Path;
use tracing::warn;

use crate::collectors::disk::{aggregate_disk_usage, BlockDeviceTotals};
use crate::percent::Utilization;
use crate::readers::{read_required_file, tokenize};

/// Mounts are device-backed when the device field lives under this prefix.
const DEVICE_NAMESPACE: &str = "/dev/";

/// Mount option granting write access.
const WRITABLE_OPTION: &str = "rw";

/// One line of the mount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub writable: bool,
}

/// Sizing result for one reported mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesystemUsage {
    pub mount: MountEntry,
    pub totals: BlockDeviceTotals,
    pub percent: Utilization,
}

fn parse_mount_line(line: &str) -> Option<MountEntry> {
    let parts = tokenize(line);
    if parts.len() < 4 {
        return None;
    }
    Some(MountEntry {
        device: parts[0].to_string(),
        mountpoint: parts[1].to_string(),
        fstype: parts[2].to_string(),
        writable: parts[3].split(',').any(|opt| opt == WRITABLE_OPTION),
    })
}

/// Reports every writable, device-backed mount with its aggregated block
/// device totals.
///
/// A mount whose aggregation fails or resolves to zero total capacity is
/// logged and skipped; the remaining mounts are still reported.
pub fn list_writable_filesystems(
    proc_root: &Path,
    sys_root: &Path,
) -> Result<Vec<FilesystemUsage>, String> {
    let content = read_required_file(&proc_root.join("mounts"))?;

    let mut out = Vec::new();
    for line in content.lines() {
        let mount = match parse_mount_line(line) {
            Some(m) => m,
            None => continue,
        };
        if !mount.device.starts_with(DEVICE_NAMESPACE) || !mount.writable {
            continue;
        }

        let totals = match aggregate_disk_usage(proc_root, sys_root, Some(&mount.device)) {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping {}: {}", mount.mountpoint, e);
                continue;
            }
        };
        if totals.total_bytes == 0 {
            warn!("Skipping {}: no matched block devices", mount.mountpoint);
            continue;
        }

        let percent = totals.usage_percent();
        out.push(FilesystemUsage {
            mount,
            totals,
            percent,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fixture(mounts: &str) -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempdir().expect("Failed to create temp dir");
        let proc_root = dir.path().join("proc");
        let sys_root = dir.path().join("sys");
        fs::create_dir_all(&proc_root).unwrap();
        fs::write(proc_root.join("mounts"), mounts).unwrap();
        fs::write(
            proc_root.join("partitions"),
            "major minor  #blocks  name\n\n   8        0    2000000 sda\n",
        )
        .unwrap();
        fs::write(
            proc_root.join("diskstats"),
            "   8       0 sda 120 0 900 40 310 0 1200 90 0 100 130\n",
        )
        .unwrap();
        let block_dir = sys_root.join("class/block/sda");
        fs::create_dir_all(&block_dir).unwrap();
        fs::write(
            block_dir.join("stat"),
            "4000 0 300000 900 6000 0 150000 1400 0 1200 200000\n",
        )
        .unwrap();
        (dir, proc_root, sys_root)
    }

    #[test]
    fn test_parse_mount_line() {
        let m = parse_mount_line("/dev/sda1 / ext4 rw,relatime 0 0").unwrap();
        assert_eq!(m.device, "/dev/sda1");
        assert_eq!(m.mountpoint, "/");
        assert_eq!(m.fstype, "ext4");
        assert!(m.writable);

        let m = parse_mount_line("/dev/sda2 /backup ext4 ro,noatime 0 0").unwrap();
        assert!(!m.writable);

        assert!(parse_mount_line("truncated line").is_none());
    }

    #[test]
    fn test_writable_marker_is_exact_option_token() {
        // "rwx" or "errors=remount-ro" must not count as writable markers.
        let m = parse_mount_line("/dev/sda1 /x ext4 noatime,errors=remount-ro 0 0").unwrap();
        assert!(!m.writable);
    }

    #[test]
    fn test_list_filters_readonly_and_pseudo_mounts() {
        let (_dir, proc_root, sys_root) = fixture(
            "/dev/sda1 / ext4 rw,relatime 0 0\n\
             /dev/sda2 /backup ext4 ro,relatime 0 0\n\
             proc /proc proc rw,nosuid 0 0\n\
             tmpfs /tmp tmpfs rw,nosuid 0 0\n",
        );
        let reported = list_writable_filesystems(&proc_root, &sys_root).unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].mount.mountpoint, "/");
        assert_eq!(reported[0].totals.total_bytes, 2_048_000_000);
        assert_eq!(reported[0].percent.to_string(), "25.00");
    }

    #[test]
    fn test_zero_total_mount_skipped() {
        let (_dir, proc_root, sys_root) = fixture("/dev/sda1 / ext4 rw,relatime 0 0\n");
        // Drop every tracked device from the partition table.
        fs::write(proc_root.join("partitions"), "major minor  #blocks  name\n").unwrap();
        let reported = list_writable_filesystems(&proc_root, &sys_root).unwrap();
        assert!(reported.is_empty());
    }

    #[test]
    fn test_missing_mount_table_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(list_writable_filesystems(dir.path(), dir.path()).is_err());
    }
}
