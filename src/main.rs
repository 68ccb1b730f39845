//! DMD Monitor - MN88436 demodulator telemetry
//!
//! Brings up a demodulator session from environment configuration, polls
//! its telemetry and writes one JSON snapshot per line to stdout.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::RecvTimeoutError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mn88436_dmd::config::Config;
use mn88436_dmd::device::DemodMonitor;

fn main() -> Result<()> {
    // Initialize logging (stdout carries the snapshots)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("mn88436_dmd=info".parse()?);
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("===========================================");
    info!("   DMD Monitor - MN88436 demodulator");
    info!("===========================================");

    let config = Config::from_env();

    info!("Configuration:");
    info!("  Device ID: {}", config.device_id);
    info!("  Chip index: {}", config.devid);
    info!("  System: {}", config.standard);
    info!("  Frequency: {} kHz", config.freq_khz);
    info!("  TS output: {:?}", config.ts_output);
    info!("  Echo enhancement: {:?}", config.echo);

    let monitor = DemodMonitor::new(config.clone());
    let snapshot_rx = monitor.start()?;

    let stdout = std::io::stdout();
    let mut last_heartbeat = Instant::now();
    let mut snapshots = 0u64;
    let heartbeat_timeout = Duration::from_millis(config.poll_interval_ms.saturating_mul(5).max(500));

    loop {
        match snapshot_rx.recv_timeout(Duration::from_millis(500)) {
            Ok(snapshot) => {
                snapshots += 1;
                let line = serde_json::to_string(&snapshot).context("Failed to encode snapshot")?;
                let mut out = stdout.lock();
                writeln!(out, "{}", line).context("Failed to write snapshot")?;
                out.flush()?;
                last_heartbeat = Instant::now();
            }
            Err(RecvTimeoutError::Timeout) => {
                if last_heartbeat.elapsed() >= heartbeat_timeout {
                    warn!("No telemetry for {:?}", last_heartbeat.elapsed());
                    last_heartbeat = Instant::now();
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                info!("Monitor channel closed");
                break;
            }
        }
    }

    monitor.stop();

    let stats = monitor.stats();
    info!(
        "Shutdown complete. Snapshots: {} | Poll errors: {} | Dropped: {}",
        snapshots,
        stats.get_poll_errors(),
        stats.get_dropped()
    );
    Ok(())
}
