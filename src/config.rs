//! Configuration loaded from environment variables

use crate::dmd::{Bandwidth, EchoEnhance, Standard, TsOutput};
use crate::hal::sim::SignalProfile;

/// Bits counted per simulated BER measurement
const SIM_BIT_TOTAL: u32 = 1_000_000;

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Device ID string for identification
    pub device_id: String,

    /// Chip index on the bus
    pub devid: u32,

    /// Broadcast system to bring up
    pub standard: Standard,

    /// Channel frequency in kHz
    pub freq_khz: u32,

    pub bandwidth: Bandwidth,

    pub ts_output: TsOutput,

    pub echo: EchoEnhance,

    /// Telemetry polling interval in milliseconds
    pub poll_interval_ms: u64,

    /// Stop after this many polls (0 runs until stopped)
    pub max_polls: u64,

    /// Simulated CNR in 1/100 dB
    pub sim_cnr_centi: u16,

    /// Simulated bit errors per million bits
    pub sim_ber_ppm: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            devid: var("DMD_DEVID")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),

            device_id: var("DMD_DEVICE_ID").unwrap_or_else(|| "MN88436-0".to_string()),

            standard: var("DMD_STANDARD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Standard::Dvbt),

            freq_khz: var("DMD_FREQ_KHZ")
                .and_then(|s| s.parse().ok())
                .unwrap_or(crate::dmd::DEFAULT_FREQ_KHZ),

            bandwidth: var("DMD_BANDWIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Bandwidth::Mhz8),

            ts_output: var("DMD_TS_OUTPUT")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),

            echo: var("DMD_ECHO")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),

            poll_interval_ms: var("DMD_POLL_INTERVAL_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),

            max_polls: var("DMD_MAX_POLLS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),

            sim_cnr_centi: var("DMD_SIM_CNR_CENTI")
                .and_then(|s| s.parse().ok())
                .unwrap_or(2_500),

            sim_ber_ppm: var("DMD_SIM_BER_PPM")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Signal the simulated chip reports for this configuration
    pub fn signal_profile(&self) -> SignalProfile {
        SignalProfile {
            cnr_centi: self.sim_cnr_centi,
            bit_errors: self.sim_ber_ppm.min(SIM_BIT_TOTAL),
            bit_total: SIM_BIT_TOTAL,
            ..SignalProfile::default()
        }
    }
}
