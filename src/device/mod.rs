//! Demodulator monitoring: lifecycle bring-up, telemetry polling and
//! snapshot streaming from a dedicated thread

pub mod manager;
pub mod state;

pub use manager::{bring_up, poll, DemodMonitor};
pub use state::{MonitorStats, TelemetryField, TelemetrySnapshot};
