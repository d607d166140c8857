//! End-to-end tests for the sampling engine against fixture pseudo-file
//! trees.

use std::fs;
use std::path::{Path, PathBuf};

use procsnap::{Sampler, Utilization};
use tempfile::{tempdir, TempDir};

struct FakeHost {
    _dir: TempDir,
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl FakeHost {
    fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp dir");
        let proc_root = dir.path().join("proc");
        let sys_root = dir.path().join("sys");
        fs::create_dir_all(&proc_root).unwrap();
        fs::create_dir_all(&sys_root).unwrap();
        Self {
            _dir: dir,
            proc_root,
            sys_root,
        }
    }

    fn write(&self, root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_proc(&self, rel: &str, content: &str) {
        self.write(&self.proc_root, rel, content);
    }

    fn write_sys(&self, rel: &str, content: &str) {
        self.write(&self.sys_root, rel, content);
    }

    fn sampler(&self) -> Sampler {
        Sampler::new(&self.proc_root, &self.sys_root)
    }
}

const PID1_STAT: &str = "1 (systemd) S 0 1 1 0 -1 4194304 100 0 0 0 700 500 0 0 20 0 1 0 30 1000000 200 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";
const PID6_STAT: &str = "6 (sshd) S 1 6 6 0 -1 4194304 100 0 0 0 40 10 0 0 20 0 1 0 30 1000000 200 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";

fn populate_full_host(host: &FakeHost) {
    host.write_proc("stat", "cpu 100 0 50 850 0 0 0\ncpu0 100 0 50 850 0 0 0\n");
    host.write_proc(
        "meminfo",
        "MemTotal: 1000 kB\nMemFree: 400 kB\nSwapTotal: 2000 kB\nSwapFree: 1500 kB\n",
    );
    host.write_proc(
        "partitions",
        "major minor  #blocks  name\n\n   8        0    2000000 sda\n",
    );
    host.write_proc(
        "diskstats",
        "   8       0 sda 120 0 900 40 310 0 1200 90 0 100 130\n",
    );
    // Sector fields 2 + 10 sum to 500000.
    host.write_sys(
        "class/block/sda/stat",
        "4000 0 300000 900 6000 0 150000 1400 0 1200 200000\n",
    );
    host.write_proc(
        "mounts",
        "/dev/sda1 / ext4 rw,relatime 0 0\n\
         /dev/sda2 /backup ext4 ro,relatime 0 0\n\
         proc /proc proc rw,nosuid 0 0\n",
    );
    host.write_proc("1/stat", PID1_STAT);
    host.write_proc("6/stat", PID6_STAT);
}

#[test]
fn full_snapshot_matches_known_counter_values() {
    let host = FakeHost::new();
    populate_full_host(&host);

    let snapshot = host.sampler().sample();

    assert_eq!(snapshot.cpu.to_string(), "15.00");
    assert_eq!(snapshot.memory.to_string(), "60.00");
    assert_eq!(snapshot.swap.to_string(), "25.00");
    assert_eq!(snapshot.disk.to_string(), "25.00");

    assert_eq!(snapshot.filesystems.len(), 1);
    let fs_usage = &snapshot.filesystems[0];
    assert_eq!(fs_usage.mount.device, "/dev/sda1");
    assert_eq!(fs_usage.mount.mountpoint, "/");
    assert_eq!(fs_usage.mount.fstype, "ext4");
    assert!(fs_usage.mount.writable);
    assert_eq!(fs_usage.totals.total_bytes, 2_048_000_000);
    assert_eq!(fs_usage.totals.used_bytes, 512_000_000);
    assert_eq!(fs_usage.percent.to_string(), "25.00");

    let pids: Vec<u32> = snapshot.processes.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![1, 6]);
    assert_eq!(snapshot.processes[0].command, "systemd");
    assert!((snapshot.processes[0].cpu_ticks - 1200.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.processes[1].command, "sshd");
    assert!((snapshot.processes[1].cpu_ticks - 50.0).abs() < f64::EPSILON);
}

#[test]
fn malformed_process_record_does_not_abort_the_sweep() {
    let host = FakeHost::new();
    populate_full_host(&host);
    host.write_proc("5/stat", "5 (broken");

    let snapshot = host.sampler().sample();
    let pids: Vec<u32> = snapshot.processes.iter().map(|p| p.pid).collect();
    assert!(!pids.contains(&5));
    assert!(pids.contains(&6), "PID 6 must survive PID 5's bad record");
}

#[test]
fn zero_denominators_are_unavailable_not_nan() {
    let host = FakeHost::new();
    host.write_proc("stat", "cpu 0 0 0 0 0 0 0\n");
    host.write_proc(
        "meminfo",
        "MemTotal: 0 kB\nMemFree: 0 kB\nSwapTotal: 0 kB\nSwapFree: 0 kB\n",
    );
    host.write_proc("partitions", "major minor  #blocks  name\n");
    host.write_proc("diskstats", "");
    host.write_proc("mounts", "/dev/sda1 / ext4 rw 0 0\n");

    let snapshot = host.sampler().sample();
    assert_eq!(snapshot.cpu, Utilization::Unavailable);
    assert_eq!(snapshot.memory, Utilization::Unavailable);
    assert_eq!(snapshot.swap, Utilization::Unavailable);
    assert_eq!(snapshot.disk, Utilization::Unavailable);
    // The zero-capacity mount is skipped, not reported as NaN.
    assert!(snapshot.filesystems.is_empty());

    let rendered = serde_json::to_string(&snapshot).unwrap();
    assert!(!rendered.contains("NaN"));
}

#[test]
fn repeated_sampling_of_identical_contents_is_identical() {
    let host = FakeHost::new();
    populate_full_host(&host);

    let sampler = host.sampler();
    let first = sampler.sample();
    let second = sampler.sample();
    assert_eq!(first, second);

    // Nothing is carried between cycles: a fresh engine agrees too.
    let third = host.sampler().sample();
    assert_eq!(first, third);
}

#[test]
fn readonly_and_pseudo_mounts_are_excluded() {
    let host = FakeHost::new();
    populate_full_host(&host);
    host.write_proc(
        "mounts",
        "tmpfs /run tmpfs rw,nosuid 0 0\n\
         /dev/sda2 /backup ext4 ro,relatime 0 0\n\
         sysfs /sys sysfs rw,nosuid 0 0\n",
    );

    let snapshot = host.sampler().sample();
    assert!(snapshot.filesystems.is_empty());
}

#[test]
fn one_unreadable_counter_file_leaves_siblings_intact() {
    let host = FakeHost::new();
    populate_full_host(&host);
    fs::remove_file(host.proc_root.join("meminfo")).unwrap();

    let snapshot = host.sampler().sample();
    assert_eq!(snapshot.memory, Utilization::Unavailable);
    assert_eq!(snapshot.swap, Utilization::Unavailable);
    assert_eq!(snapshot.cpu.to_string(), "15.00");
    assert_eq!(snapshot.disk.to_string(), "25.00");
    assert_eq!(snapshot.processes.len(), 2);
}

#[test]
fn snapshot_serializes_with_unavailable_as_null() {
    let host = FakeHost::new();
    populate_full_host(&host);
    fs::remove_file(host.proc_root.join("meminfo")).unwrap();

    let snapshot = host.sampler().sample();
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&snapshot).unwrap())
        .unwrap();

    assert!(json["memory"].is_null());
    assert_eq!(json["cpu"], serde_json::json!(15.0));
    assert_eq!(json["filesystems"][0]["percent"], serde_json::json!(25.0));
    assert_eq!(json["processes"][0]["command"], "systemd");
}
