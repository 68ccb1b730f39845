//! Collaborator interfaces consumed by the demodulator core
//!
//! The core never touches hardware directly. A board integration supplies
//! three pieces:
//! - a `RegisterBus` (I2C or similar) addressed by slave and register
//! - a `Tuner` front end
//! - a `DemodDevice` with the chip-specific register programming
//!
//! The tuner and the device receive the bus on every call, so the bus is
//! owned in one place and never shared.
//!
//! `sim` provides an in-memory implementation of all three.

pub mod sim;

use crate::dmd::{DemodParameter, DmdResult};
use crate::info::InfoId;

/// Byte-wide register access to the demodulator's slave addresses
pub trait RegisterBus: Send {
    /// Open the bus for transfers
    fn open(&mut self) -> DmdResult<()>;

    /// Release the bus
    fn close(&mut self) -> DmdResult<()>;

    /// Read one register
    fn read(&mut self, slave: u8, reg: u8) -> DmdResult<u8>;

    /// Write one register
    fn write(&mut self, slave: u8, reg: u8, value: u8) -> DmdResult<()>;
}

/// RF tuner in front of the demodulator
pub trait Tuner: Send {
    fn init(&mut self, bus: &mut dyn RegisterBus, param: &DemodParameter) -> DmdResult<()>;

    /// Configure for `param.system` and `param.bw`
    fn set_system(&mut self, bus: &mut dyn RegisterBus, param: &DemodParameter) -> DmdResult<()>;

    /// Tune to `param.freq` in `param.funit`
    fn tune(&mut self, bus: &mut dyn RegisterBus, param: &DemodParameter) -> DmdResult<()>;

    /// Stop all tuner bus activity
    fn term(&mut self, bus: &mut dyn RegisterBus) -> DmdResult<()>;
}

/// Chip-specific demodulator programming
///
/// Telemetry goes through `get_info`: the device refreshes the slot for
/// `id` in `param.info` from its registers and returns the raw value.
pub trait DemodDevice: Send {
    fn open(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    /// Reset and program the default register set
    fn init(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    /// Load the on-chip automatic control sequence
    fn load_autocontrol_sequence(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
    ) -> DmdResult<()>;

    fn pre_tune(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    fn post_tune(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    /// Transfer control bus (TCB) mode for tuner access through the demod
    fn set_transfer_mode(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    fn set_echo_enhancement(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
    ) -> DmdResult<()>;

    fn set_ts_output(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    fn get_info(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
    ) -> DmdResult<u32>;

    fn set_info(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
        value: u32,
    ) -> DmdResult<()>;

    fn close(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;

    fn term(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()>;
}
