//! procsnap - entry point.
//!
//! Resolves configuration, validates pseudo-filesystem access and drives
//! the stateless sampling engine on a fixed-interval ticker, rendering one
//! snapshot per cycle.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::{info, Level};

use procsnap::cli::{Args, Commands, LogLevel, OutputFormat};
use procsnap::config::{resolve_config, Config};
use procsnap::snapshot::MetricsSnapshot;
use procsnap::startup_checks::validate_requirements;
use procsnap::{Sampler, Utilization};

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        // Snapshots go to stdout; keep diagnostics out of the data stream.
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    let config = resolve_config(&args)?;

    if args.show_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    if let Some(Commands::Check) = args.command {
        validate_requirements(&config.proc_root, &config.sys_root)?;
        println!("OK");
        return Ok(());
    }

    validate_requirements(&config.proc_root, &config.sys_root)?;
    run_sampling_loop(&config)
}

/// Drives the engine once per interval. The ticker lives here, outside the
/// engine: stopping the loop is the only cancellation mechanism.
fn run_sampling_loop(config: &Config) -> Result<()> {
    let sampler = Sampler::new(&config.proc_root, &config.sys_root);
    info!(
        "Sampling {} every {}s",
        sampler.proc_root().display(),
        config.interval_seconds
    );

    let mut cycle: u64 = 0;
    loop {
        cycle += 1;
        let snapshot = sampler.sample();
        render_snapshot(&snapshot, config.format)?;

        if config.iterations != 0 && cycle >= config.iterations {
            break;
        }
        std::thread::sleep(Duration::from_secs(config.interval_seconds));
    }
    Ok(())
}

fn render_snapshot(snapshot: &MetricsSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(snapshot)?),
        OutputFormat::Text => print_text(snapshot),
    }
    Ok(())
}

/// Plain-text rendering, one section per metric group.
fn print_text(snapshot: &MetricsSnapshot) {
    println!("CPU Usage: {}", suffix_percent(&snapshot.cpu));
    println!("Memory Usage: {}", suffix_percent(&snapshot.memory));
    println!("Swap Usage: {}", suffix_percent(&snapshot.swap));
    println!("Disk Usage: {}", suffix_percent(&snapshot.disk));

    for fs in &snapshot.filesystems {
        println!(
            "Device: {}, Mountpoint: {}, Type: {}, Total: {:.2} GB, Used: {:.2} GB ({})",
            fs.mount.device,
            fs.mount.mountpoint,
            fs.mount.fstype,
            gigabytes(fs.totals.total_bytes),
            gigabytes(fs.totals.used_bytes),
            suffix_percent(&fs.percent),
        );
    }

    for process in &snapshot.processes {
        println!(
            "PID: {}, Command: {}, CPU Time: {:.2}",
            process.pid, process.command, process.cpu_ticks
        );
    }
    println!();
}

fn suffix_percent(value: &Utilization) -> String {
    match value {
        Utilization::Percent(_) => format!("{}%", value),
        Utilization::Unavailable => value.to_string(),
    }
}

fn gigabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0 * 1024.0)
}
