//! MN88436 demodulator core
//!
//! Session lifecycle, register batching and the fixed-point signal
//! quality math. Register-level chip programming lives behind the
//! `hal::DemodDevice` trait.

mod driver;
mod error;
pub mod math;
pub mod registers;
pub mod sqi;
mod types;

pub use driver::{Demodulator, SessionState};
pub use error::{DmdError, DmdResult, ErrorAccumulator};
pub use math::{ber_scaled, integer_log10, BER_UNIT};
pub use registers::{dump_bank, mask_write, RegisterTransferList, RegisterWrite};
pub use sqi::{calc_sqi, compute_sqi};
pub use types::{
    Bandwidth, DemodParameter, EchoEnhance, FreqUnit, InformationSlot, Standard, TsOutput,
    DEFAULT_FREQ_KHZ, INFORMATION_MAX,
};
