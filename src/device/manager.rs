//! Device manager - runs a demodulator session and polls its telemetry

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::dmd::{DemodParameter, Demodulator, DmdResult};
use crate::hal::sim::{SimBus, SimDevice, SimTuner};
use crate::hal::{DemodDevice, RegisterBus, Tuner};
use crate::info::ids;

use super::state::{MonitorStats, TelemetrySnapshot};

/// Capacity of the snapshot channel
const SNAPSHOT_QUEUE: usize = 64;

/// Open, initialize, select the system and tune, as configured. A session
/// that fails after opening is closed again.
pub fn bring_up<B, T, D>(
    demod: &mut Demodulator<B, T, D>,
    param: &mut DemodParameter,
    config: &Config,
) -> DmdResult<()>
where
    B: RegisterBus,
    T: Tuner,
    D: DemodDevice,
{
    demod.open(param)?;

    let result = configure(demod, param, config);
    if result.is_err() {
        if let Err(e) = demod.close(param) {
            warn!("Demodulator close after failed bring-up: {}", e);
        }
    }
    result
}

fn configure<B, T, D>(
    demod: &mut Demodulator<B, T, D>,
    param: &mut DemodParameter,
    config: &Config,
) -> DmdResult<()>
where
    B: RegisterBus,
    T: Tuner,
    D: DemodDevice,
{
    demod.set_devid(param, config.devid)?;
    demod.init(param)?;
    demod.init_tuner(param)?;

    param.system = config.standard;
    param.bw = config.bandwidth;
    param.ts_out = config.ts_output;
    param.echo_set = config.echo;
    param.set_freq_khz(config.freq_khz);

    demod.set_system(param)?;
    demod.tune(param)
}

/// Refresh every slot and capture a snapshot with the derived figures
pub fn poll<B, T, D>(
    demod: &mut Demodulator<B, T, D>,
    param: &mut DemodParameter,
    device_id: &str,
) -> DmdResult<TelemetrySnapshot>
where
    B: RegisterBus,
    T: Tuner,
    D: DemodDevice,
{
    demod.get_info(param, ids::ALL)?;
    let cnr_db = demod.cnr_db(param)?;
    let ber = demod.ber(param)?;
    let per = demod.per(param)?;
    let sqi = demod.sqi(param)?;

    let mut snapshot = TelemetrySnapshot::capture(device_id, param, demod.state());
    snapshot.cnr_db = cnr_db;
    snapshot.ber = ber;
    snapshot.per = per;
    snapshot.sqi = sqi;
    Ok(snapshot)
}

/// Runs a simulated demodulator on its own thread and streams snapshots
pub struct DemodMonitor {
    config: Config,
    running: Arc<AtomicBool>,
    stats: Arc<MonitorStats>,
}

impl DemodMonitor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(MonitorStats::new()),
        }
    }

    /// Start monitoring and return a receiver for snapshots
    pub fn start(&self) -> Result<Receiver<TelemetrySnapshot>> {
        info!("Starting demodulator monitor for {}", self.config.device_id);
        info!("  System: {}", self.config.standard);
        info!("  Frequency: {} kHz", self.config.freq_khz);
        info!("  Bandwidth: {:?}", self.config.bandwidth);
        info!("  Poll interval: {} ms", self.config.poll_interval_ms);

        let (snapshot_tx, snapshot_rx) = bounded::<TelemetrySnapshot>(SNAPSHOT_QUEUE);

        let config = self.config.clone();
        let running = self.running.clone();
        let stats = self.stats.clone();

        running.store(true, Ordering::SeqCst);

        let spawned = thread::Builder::new()
            .name("dmd-monitor".to_string())
            .spawn(move || {
                let result = run_monitor(config, &running, &stats, &snapshot_tx);
                // Mark stopped before the channel disconnects
                running.store(false, Ordering::SeqCst);
                if let Err(e) = result {
                    error!("Demodulator monitor error: {:#}", e);
                }
            });
        if let Err(e) = spawned {
            self.running.store(false, Ordering::SeqCst);
            return Err(e).context("Failed to spawn monitor thread");
        }

        Ok(snapshot_rx)
    }

    /// Stop monitoring
    pub fn stop(&self) {
        info!("Stopping demodulator monitor...");
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> &Arc<MonitorStats> {
        &self.stats
    }
}

/// Main monitor loop (runs in dedicated thread)
fn run_monitor(
    config: Config,
    running: &AtomicBool,
    stats: &MonitorStats,
    snapshot_tx: &Sender<TelemetrySnapshot>,
) -> Result<()> {
    let mut demod = Demodulator::new(
        SimBus::with_signal(config.signal_profile()),
        SimTuner::new(),
        SimDevice::new(),
    );
    let mut param = DemodParameter::new();

    bring_up(&mut demod, &mut param, &config).context("Demodulator bring-up failed")?;
    info!(
        "Demodulator {} up: {} at {} kHz ({})",
        config.device_id,
        param.system,
        param.freq_khz(),
        param.bw.label()
    );

    let interval = Duration::from_millis(config.poll_interval_ms);
    let mut last_status_log = Instant::now();
    let mut polls = 0u64;

    while running.load(Ordering::SeqCst) {
        match poll(&mut demod, &mut param, &config.device_id) {
            Ok(snapshot) => {
                stats.record_poll();
                if stats.update_lock(snapshot.locked) {
                    if snapshot.locked {
                        info!("{} locked (CNR {:.2} dB, SQI {})", config.device_id, snapshot.cnr_db, snapshot.sqi);
                    } else {
                        warn!("{} lost lock", config.device_id);
                    }
                }

                match snapshot_tx.try_send(snapshot) {
                    Ok(()) => stats.record_sent(),
                    Err(TrySendError::Full(_)) => {
                        debug!("Snapshot channel full, dropping snapshot");
                        stats.record_dropped();
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        info!("Snapshot receiver closed");
                        break;
                    }
                }
            }
            Err(e) => {
                stats.record_poll_error();
                warn!("Telemetry poll failed: {}", e);
            }
        }

        polls += 1;
        if config.max_polls != 0 && polls >= config.max_polls {
            debug!("Reached {} polls", polls);
            break;
        }

        // Periodic stats logging (every 10 seconds)
        if last_status_log.elapsed() >= Duration::from_secs(10) {
            info!(
                "[Stats] Polls: {} | Errors: {} | Sent: {} | Dropped: {} | Lock changes: {}",
                stats.get_polls(),
                stats.get_poll_errors(),
                stats.get_sent(),
                stats.get_dropped(),
                stats.get_lock_changes()
            );
            last_status_log = Instant::now();
        }

        thread::sleep(interval);
    }

    if let Err(e) = demod.term(&mut param) {
        warn!("Demodulator terminate failed: {}", e);
    }
    demod.close(&mut param)?;

    info!(
        "Demodulator monitor stopped. Polls: {}, Sent: {}, Dropped: {}",
        stats.get_polls(),
        stats.get_sent(),
        stats.get_dropped()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmd::{DmdError, SessionState, Standard};
    use crate::hal::sim::{CallLog, SignalProfile};
    use std::collections::HashMap;

    fn test_config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_bring_up_and_poll() {
        let config = test_config(&[
            ("DMD_DEVID", "2"),
            ("DMD_STANDARD", "DVBT2"),
            ("DMD_FREQ_KHZ", "514000"),
            ("DMD_SIM_CNR_CENTI", "3000"),
        ]);
        let mut demod = Demodulator::new(
            SimBus::with_signal(config.signal_profile()),
            SimTuner::new(),
            SimDevice::new(),
        );
        let mut param = DemodParameter::new();
        bring_up(&mut demod, &mut param, &config).unwrap();
        assert_eq!(demod.state(), SessionState::Tuned);
        assert_eq!(param.devid, 2);
        assert_eq!(demod.tuner().tuned_khz(), Some(514_000));

        let snap = poll(&mut demod, &mut param, "unit").unwrap();
        assert_eq!(snap.system, Standard::Dvbt2);
        assert!(snap.locked);
        assert!((snap.cnr_db - 30.0).abs() < 1e-9);
        assert_eq!(snap.ber, 0.0);
        assert_eq!(snap.sqi, 100);
        // default profile modulation
        assert_eq!(snap.field(ids::DVBT2_DAT_PLP_MOD).unwrap().value, "64QAM");
        assert_eq!(snap.field(ids::STATUS).unwrap().value, "13_Sync");
    }

    #[test]
    fn test_poll_unlocked_signal() {
        let config = test_config(&[]);
        let mut demod = Demodulator::new(
            SimBus::with_signal(SignalProfile {
                locked: false,
                ..SignalProfile::default()
            }),
            SimTuner::new(),
            SimDevice::new(),
        );
        let mut param = DemodParameter::new();
        bring_up(&mut demod, &mut param, &config).unwrap();

        let snap = poll(&mut demod, &mut param, "unit").unwrap();
        assert!(!snap.locked);
        assert_eq!(snap.field(ids::LOCK).unwrap().value, "NOSYNC");
        assert_eq!(snap.ber, 1.0);
        assert_eq!(snap.cnr_db, 0.0);
    }

    #[test]
    fn test_bring_up_failure_propagates() {
        let config = test_config(&[]);
        let mut device = SimDevice::new();
        device.fail_on("load autocontrol");
        let mut demod = Demodulator::new(SimBus::with_signal(SignalProfile::default()), SimTuner::new(), device);
        let mut param = DemodParameter::new();
        assert!(bring_up(&mut demod, &mut param, &config).is_err());
        assert_eq!(demod.state(), SessionState::Closed);
        assert!(!demod.bus().is_open());
    }

    #[test]
    fn test_bring_up_closes_after_set_system_failure() {
        let config = test_config(&[]);
        let log = CallLog::new();
        let mut device = SimDevice::with_log(log.clone());
        device.fail_on("echo enhancement");
        let mut demod = Demodulator::new(
            SimBus::with_signal(SignalProfile::default()),
            SimTuner::with_log(log.clone()),
            device,
        );
        let mut param = DemodParameter::new();

        assert_eq!(
            bring_up(&mut demod, &mut param, &config),
            Err(DmdError::device("echo enhancement"))
        );
        assert_eq!(demod.state(), SessionState::Closed);
        assert_eq!(log.calls().last(), Some(&"device close"));
        assert!(!log.calls().contains(&"pre tune"));
    }

    #[test]
    fn test_monitor_thread_streams_snapshots() {
        let config = test_config(&[("DMD_POLL_INTERVAL_MS", "1"), ("DMD_MAX_POLLS", "3")]);
        let monitor = DemodMonitor::new(config);
        let rx = monitor.start().unwrap();

        let mut received = Vec::new();
        while let Ok(snap) = rx.recv_timeout(Duration::from_secs(5)) {
            received.push(snap);
        }

        assert_eq!(received.len(), 3);
        assert!(received.iter().all(|s| s.locked && s.system == Standard::Dvbt));
        assert_eq!(monitor.stats().get_polls(), 3);
        assert_eq!(monitor.stats().get_sent(), 3);
        assert_eq!(monitor.stats().get_lock_changes(), 1);
        assert!(!monitor.is_running());
    }
}
