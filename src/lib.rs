//! MN88436 digital broadcast demodulator driver core
//!
//! Drives the demodulator through its session lifecycle over pluggable
//! bus, tuner and device collaborators, and decodes the chip's telemetry
//! into titled, human-readable fields for DVB-T, DVB-T2, DVB-C, ISDB-T,
//! ISDB-S, ATSC and QAM.

pub mod config;
pub mod device;
pub mod dmd;
pub mod hal;
pub mod info;

pub use dmd::{
    ber_scaled, compute_sqi, integer_log10, DemodParameter, Demodulator, DmdError, DmdResult,
    SessionState, Standard,
};
pub use info::{info_title, info_value, value_text};
