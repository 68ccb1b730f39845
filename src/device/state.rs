//! Per-device state tracking

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;

use crate::dmd::{DemodParameter, SessionState, Standard};
use crate::info::{self, InfoId};

/// Statistics for a monitored demodulator
#[derive(Debug, Default)]
pub struct MonitorStats {
    pub polls: AtomicU64,
    pub poll_errors: AtomicU64,
    pub snapshots_sent: AtomicU64,
    pub snapshots_dropped: AtomicU64,
    pub lock_changes: AtomicU64,
    pub locked: AtomicBool,
}

impl MonitorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_poll(&self) {
        self.polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poll_error(&self) {
        self.poll_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.snapshots_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.snapshots_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Store the lock flag; returns true when it changed
    pub fn update_lock(&self, locked: bool) -> bool {
        let changed = self.locked.swap(locked, Ordering::Relaxed) != locked;
        if changed {
            self.lock_changes.fetch_add(1, Ordering::Relaxed);
        }
        changed
    }

    pub fn get_polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }

    pub fn get_poll_errors(&self) -> u64 {
        self.poll_errors.load(Ordering::Relaxed)
    }

    pub fn get_sent(&self) -> u64 {
        self.snapshots_sent.load(Ordering::Relaxed)
    }

    pub fn get_dropped(&self) -> u64 {
        self.snapshots_dropped.load(Ordering::Relaxed)
    }

    pub fn get_lock_changes(&self) -> u64 {
        self.lock_changes.load(Ordering::Relaxed)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// One decoded telemetry field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryField {
    pub id: InfoId,
    pub title: &'static str,
    pub value: String,
    pub raw: u32,
}

/// Point-in-time view of a session, sent from the monitor thread
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySnapshot {
    pub device_id: String,
    pub timestamp_ms: u64,
    pub devid: u32,
    pub system: Standard,
    pub freq_khz: u32,
    pub bandwidth: &'static str,
    pub state: SessionState,
    pub locked: bool,
    pub cnr_db: f64,
    pub ber: f64,
    pub per: f64,
    pub sqi: u32,
    pub fields: Vec<TelemetryField>,
}

impl TelemetrySnapshot {
    /// Snapshot of `param` with every field defined for its system
    pub fn capture(device_id: &str, param: &DemodParameter, state: SessionState) -> Self {
        let defined = info::defined_ids(param.system);
        let fields = param
            .slots(info::ids::ALL + 1..defined.end)
            .map(|slot| TelemetryField {
                id: slot.id,
                title: info::info_title(param.system, slot.id),
                value: info::info_value(param.system, slot.id, slot.raw).into_owned(),
                raw: slot.raw,
            })
            .collect();

        Self {
            device_id: device_id.to_string(),
            timestamp_ms: chrono::Utc::now().timestamp_millis() as u64,
            devid: param.devid,
            system: param.system,
            freq_khz: param.freq_khz(),
            bandwidth: param.bw.label(),
            state,
            locked: param.info(info::ids::LOCK) == 0 && state == SessionState::Tuned,
            cnr_db: 0.0,
            ber: 1.0,
            per: 1.0,
            sqi: 0,
            fields,
        }
    }

    pub fn field(&self, id: InfoId) -> Option<&TelemetryField> {
        self.fields.iter().find(|f| f.id == id)
    }
}
