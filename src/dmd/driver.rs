//! Demodulator session
//!
//! `Demodulator` owns the bus and the two collaborators and sequences them
//! through the session lifecycle:
//! `Closed -> Opened -> Initialized -> SystemSet -> Tuned -> Closed`.
//! The caller owns the `DemodParameter` record and passes it to every call.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::error::{DmdError, DmdResult, ErrorAccumulator};
use super::registers::{dump_bank, BANK_SIZE};
use super::sqi::calc_sqi;
use super::types::{DemodParameter, Standard, INFORMATION_MAX};
use crate::hal::{DemodDevice, RegisterBus, Tuner};
use crate::info::ids::{self, InfoId};

/// Lifecycle position of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Closed,
    Opened,
    Initialized,
    SystemSet,
    Tuned,
}

/// One demodulator session over a bus, a tuner and a device
pub struct Demodulator<B, T, D> {
    bus: B,
    tuner: T,
    device: D,
    state: SessionState,
}

impl<B: RegisterBus, T: Tuner, D: DemodDevice> Demodulator<B, T, D> {
    pub fn new(bus: B, tuner: T, device: D) -> Self {
        Self {
            bus,
            tuner,
            device,
            state: SessionState::Closed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != SessionState::Closed
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn tuner(&self) -> &T {
        &self.tuner
    }

    pub fn tuner_mut(&mut self) -> &mut T {
        &mut self.tuner
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn ensure_open(&self, op: &'static str) -> DmdResult<()> {
        if self.state == SessionState::Closed {
            warn!("{} on a closed session", op);
            return Err(DmdError::device(op));
        }
        Ok(())
    }

    /// Tuning needs `set_system` to have completed
    fn ensure_system_set(&self, op: &'static str) -> DmdResult<()> {
        self.ensure_open(op)?;
        if !matches!(self.state, SessionState::SystemSet | SessionState::Tuned) {
            warn!("{} before set system ({:?})", op, self.state);
            return Err(DmdError::device(op));
        }
        Ok(())
    }

    /// Select which chip on the bus this session addresses
    pub fn set_devid(&mut self, param: &mut DemodParameter, id: u32) -> DmdResult<()> {
        param.devid = id;
        Ok(())
    }

    /// Reset the session record to its defaults, then open the device and
    /// the bus. The session stays closed if either fails, and a device
    /// opened before the bus failed is closed again.
    pub fn open(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        param.reset();

        if let Err(e) = self.device.open(&mut self.bus, param) {
            error!("Demodulator open failed: {}", e);
            return Err(e);
        }
        if let Err(e) = self.bus.open() {
            error!("I2C open failed: {}", e);
            if let Err(close_err) = self.device.close(&mut self.bus, param) {
                warn!("Demodulator close after failed open: {}", close_err);
            }
            return Err(e);
        }

        self.state = SessionState::Opened;
        info!(
            "Demodulator {} opened ({} kHz, echo {:?})",
            param.devid,
            param.freq_khz(),
            param.echo_set
        );
        Ok(())
    }

    /// Initialize the chip and load its autocontrol sequence
    pub fn init(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        self.ensure_open("init")?;

        if let Err(e) = self.device.init(&mut self.bus, param) {
            error!("Demodulator initialize failed: {}", e);
            return Err(e);
        }
        if let Err(e) = self.device.load_autocontrol_sequence(&mut self.bus, param) {
            error!("Autocontrol sequence load failed: {}", e);
            return Err(e);
        }

        self.state = SessionState::Initialized;
        info!("Demodulator {} initialized", param.devid);
        Ok(())
    }

    /// Initialize the tuner. Run after `init` when the tuner sits behind
    /// the demodulator's bus repeater.
    pub fn init_tuner(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        self.ensure_open("tuner init")?;

        if let Err(e) = self.tuner.init(&mut self.bus, param) {
            error!("Tuner initialize failed: {}", e);
            return Err(e);
        }
        debug!("Tuner initialized");
        Ok(())
    }

    /// Configure tuner and chip for `param.system`. Stops at the first
    /// failing step; steps already applied are not undone.
    pub fn set_system(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        self.ensure_open("set system")?;

        if let Err(e) = self.tuner.set_system(&mut self.bus, param) {
            error!("Tuner set system failed: {}", e);
            return Err(e);
        }
        if let Err(e) = self.device.set_ts_output(&mut self.bus, param) {
            error!("Set TS output failed: {}", e);
            return Err(e);
        }
        if let Err(e) = self.device.set_transfer_mode(&mut self.bus, param) {
            error!("Set TCB mode failed: {}", e);
            return Err(e);
        }
        if let Err(e) = self.device.set_echo_enhancement(&mut self.bus, param) {
            error!("Set echo enhancement failed: {}", e);
            return Err(e);
        }

        self.state = SessionState::SystemSet;
        info!(
            "System set to {} (bw {:?}, TS {:?})",
            param.system, param.bw, param.ts_out
        );
        Ok(())
    }

    /// Pre-tune, tuner tune and post-tune. Every step runs even when an
    /// earlier one failed; the first failure is returned. Requires
    /// `set_system` first.
    pub fn tune(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        self.ensure_system_set("tune")?;

        let acc = self.tune_sequence(param);
        let failures = acc.failures();
        acc.finish().map_err(|e| {
            error!("Tune to {} kHz failed ({} steps): {}", param.freq_khz(), failures, e);
            e
        })?;

        self.state = SessionState::Tuned;
        info!("Tuned to {} kHz", param.freq_khz());
        Ok(())
    }

    /// Same sequence as `tune`, for channel scans. Lock detection is left
    /// to the caller, polling `get_info(LOCK)`.
    pub fn scan(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        self.ensure_system_set("scan")?;

        let acc = self.tune_sequence(param);
        acc.finish().map_err(|e| {
            debug!("Scan at {} kHz failed: {}", param.freq_khz(), e);
            e
        })?;

        self.state = SessionState::Tuned;
        debug!("Scan step at {} kHz", param.freq_khz());
        Ok(())
    }

    fn tune_sequence(&mut self, param: &mut DemodParameter) -> ErrorAccumulator {
        let mut acc = ErrorAccumulator::new();
        acc.record(self.device.pre_tune(&mut self.bus, param));
        acc.record(self.tuner.tune(&mut self.bus, param));
        acc.record(self.device.post_tune(&mut self.bus, param));
        acc
    }

    /// Terminate the device and stop the tuner, then release the bus.
    /// Both steps run; a closed session is left as is.
    pub fn term(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }

        let mut acc = ErrorAccumulator::new();
        acc.record(self.device.term(&mut self.bus, param));
        acc.record(self.tuner.term(&mut self.bus));
        self.release_bus();

        self.state = SessionState::Closed;
        match acc.finish() {
            Ok(()) => {
                info!("Demodulator {} terminated", param.devid);
                Ok(())
            }
            Err(e) => {
                error!("Terminate failed: {}", e);
                Err(e)
            }
        }
    }

    /// Close the device and release the bus. A closed session is left as is.
    pub fn close(&mut self, param: &mut DemodParameter) -> DmdResult<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }

        let result = self.device.close(&mut self.bus, param);
        self.release_bus();

        self.state = SessionState::Closed;
        match result {
            Ok(()) => {
                info!("Demodulator {} closed", param.devid);
                Ok(())
            }
            Err(e) => {
                error!("Close failed: {}", e);
                Err(e)
            }
        }
    }

    fn release_bus(&mut self) {
        if let Err(e) = self.bus.close() {
            warn!("I2C close failed: {}", e);
        }
    }

    fn check_id(&self, id: InfoId, op: &'static str) -> DmdResult<()> {
        self.ensure_open(op)?;
        if id as usize >= INFORMATION_MAX {
            warn!("{}: information id {} out of range", op, id);
            return Err(DmdError::device(op));
        }
        Ok(())
    }

    /// Refresh the slot for `id` from the chip and return its raw value.
    /// `ids::ALL` refreshes every slot of the current system.
    pub fn get_info(&mut self, param: &mut DemodParameter, id: InfoId) -> DmdResult<u32> {
        self.check_id(id, "get info")?;
        self.device.get_info(&mut self.bus, param, id)
    }

    pub fn set_info(&mut self, param: &mut DemodParameter, id: InfoId, value: u32) -> DmdResult<()> {
        self.check_id(id, "set info")?;
        self.device.set_info(&mut self.bus, param, id, value)
    }

    fn refresh(&mut self, param: &mut DemodParameter, list: &[InfoId]) -> DmdResult<()> {
        for &id in list {
            self.get_info(param, id)?;
        }
        Ok(())
    }

    /// Bit error rate; 1.0 when no bits were counted
    pub fn ber(&mut self, param: &mut DemodParameter) -> DmdResult<f64> {
        self.refresh(param, &[ids::BERRNUM, ids::BITNUM])?;
        Ok(ratio(param.info(ids::BERRNUM), param.info(ids::BITNUM)))
    }

    /// Packet error rate; 1.0 when no packets were counted
    pub fn per(&mut self, param: &mut DemodParameter) -> DmdResult<f64> {
        self.refresh(param, &[ids::PERRNUM, ids::PACKETNUM])?;
        Ok(ratio(param.info(ids::PERRNUM), param.info(ids::PACKETNUM)))
    }

    /// CNR in dB
    pub fn cnr_db(&mut self, param: &mut DemodParameter) -> DmdResult<f64> {
        self.refresh(param, &[ids::CNR_INT, ids::CNR_DEC])?;
        Ok(f64::from(param.info(ids::CNR_INT)) + f64::from(param.info(ids::CNR_DEC)) / 100.0)
    }

    /// Signal Quality Indicator from freshly read CNR, BER and modulation
    pub fn sqi(&mut self, param: &mut DemodParameter) -> DmdResult<u32> {
        self.refresh(param, &[ids::CNR_INT, ids::CNR_DEC, ids::BERRNUM, ids::BITNUM])?;
        let inputs: &[InfoId] = match param.system {
            Standard::Dvbt => &[ids::DVBT_CONSTELLATION, ids::DVBT_LP_CODERATE],
            Standard::Dvbt2 => &[ids::DVBT2_DAT_PLP_MOD, ids::DVBT2_DAT_PLP_COD],
            _ => &[],
        };
        self.refresh(param, inputs)?;
        Ok(calc_sqi(param))
    }

    /// Read and log whole register banks
    pub fn dump_registers(&mut self, slaves: &[u8]) -> DmdResult<Vec<[u8; BANK_SIZE]>> {
        self.ensure_open("dump registers")?;
        slaves
            .iter()
            .map(|&slave| dump_bank(&mut self.bus, slave))
            .collect()
    }
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        1.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::{CallLog, SignalProfile, SimBus, SimDevice, SimTuner, BANK_MAIN, BANK_USR};

    type SimDemod = Demodulator<SimBus, SimTuner, SimDevice>;

    fn demod(signal: SignalProfile) -> (SimDemod, CallLog) {
        let log = CallLog::new();
        let demod = Demodulator::new(
            SimBus::with_signal(signal),
            SimTuner::with_log(log.clone()),
            SimDevice::with_log(log.clone()),
        );
        (demod, log)
    }

    fn bring_up(demod: &mut SimDemod, param: &mut DemodParameter, system: Standard) {
        demod.open(param).unwrap();
        demod.init(param).unwrap();
        param.system = system;
        demod.set_system(param).unwrap();
        demod.tune(param).unwrap();
    }

    #[test]
    fn test_open_defaults() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        param.system = Standard::Dvbt;
        param.info[ids::CNR_INT as usize] = 99;
        param.devid = 3;

        demod.open(&mut param).unwrap();
        assert_eq!(demod.state(), SessionState::Opened);
        assert_eq!(param.system, Standard::NotDefined);
        assert_eq!(param.devid, 0);
        assert_eq!(param.freq_khz(), 666_000);
        assert_eq!(demod.get_info(&mut param, ids::CNR_INT).unwrap(), 0);
        assert_eq!(log.calls()[0], "device open");
        assert!(demod.bus().is_open());
    }

    #[test]
    fn test_open_failure_stays_closed() {
        let (mut demod, _) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.bus_mut().fail_open(true);
        assert_eq!(demod.open(&mut param), Err(DmdError::device("I2C open")));
        assert_eq!(demod.state(), SessionState::Closed);

        demod.bus_mut().clear_faults();
        demod.device_mut().fail_on("device open");
        assert!(demod.open(&mut param).is_err());
        assert!(!demod.bus().is_open());
    }

    #[test]
    fn test_bus_open_failure_closes_device() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.bus_mut().fail_open(true);

        assert_eq!(demod.open(&mut param), Err(DmdError::device("I2C open")));
        assert_eq!(log.calls(), vec!["device open", "device close"]);
        assert_eq!(demod.state(), SessionState::Closed);

        // A failing close still reports the bus error
        log.clear();
        demod.device_mut().fail_on("device close");
        assert_eq!(demod.open(&mut param), Err(DmdError::device("I2C open")));
        assert_eq!(log.calls(), vec!["device open", "device close"]);
    }

    #[test]
    fn test_tune_requires_system_set() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        log.clear();

        assert_eq!(demod.tune(&mut param), Err(DmdError::device("tune")));
        assert_eq!(demod.scan(&mut param), Err(DmdError::device("scan")));
        assert_eq!(demod.state(), SessionState::Opened);

        demod.init(&mut param).unwrap();
        assert!(demod.tune(&mut param).is_err());
        assert_eq!(demod.state(), SessionState::Initialized);
        assert_eq!(log.calls(), vec!["device init", "load autocontrol"]);

        param.system = Standard::Dvbt;
        demod.set_system(&mut param).unwrap();
        demod.scan(&mut param).unwrap();
        demod.tune(&mut param).unwrap();
        assert_eq!(demod.state(), SessionState::Tuned);
    }

    #[test]
    fn test_closed_session_rejects_operations() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        assert!(demod.init(&mut param).is_err());
        assert!(demod.set_system(&mut param).is_err());
        assert!(demod.tune(&mut param).is_err());
        assert!(demod.scan(&mut param).is_err());
        assert!(demod.get_info(&mut param, ids::LOCK).is_err());
        assert!(demod.set_info(&mut param, ids::LOCK, 1).is_err());
        assert!(demod.dump_registers(&[BANK_MAIN]).is_err());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_init_short_circuits() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        log.clear();

        demod.device_mut().fail_on("device init");
        assert_eq!(demod.init(&mut param), Err(DmdError::device("device init")));
        assert_eq!(log.calls(), vec!["device init"]);
        assert_eq!(demod.state(), SessionState::Opened);

        demod.device_mut().clear_faults();
        log.clear();
        demod.init(&mut param).unwrap();
        assert_eq!(log.calls(), vec!["device init", "load autocontrol"]);
        assert_eq!(demod.state(), SessionState::Initialized);
        assert_eq!(demod.get_info(&mut param, ids::PSEQREV).unwrap(), 0x2c);

        log.clear();
        demod.init_tuner(&mut param).unwrap();
        assert_eq!(log.calls(), vec!["tuner init"]);
        assert_eq!(demod.state(), SessionState::Initialized);

        demod.tuner_mut().fail_on("tuner init");
        assert_eq!(demod.init_tuner(&mut param), Err(DmdError::device("tuner init")));
    }

    #[test]
    fn test_set_system_order_and_abort() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        demod.init(&mut param).unwrap();
        param.system = Standard::Dvbt2;

        log.clear();
        demod.set_system(&mut param).unwrap();
        assert_eq!(
            log.calls(),
            vec!["tuner set_system", "ts output", "transfer mode", "echo enhancement"]
        );
        assert_eq!(demod.state(), SessionState::SystemSet);

        log.clear();
        demod.device_mut().fail_on("transfer mode");
        assert!(demod.set_system(&mut param).is_err());
        assert_eq!(
            log.calls(),
            vec!["tuner set_system", "ts output", "transfer mode"]
        );
    }

    #[test]
    fn test_tune_runs_every_step_after_failure() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        demod.init(&mut param).unwrap();
        param.system = Standard::Dvbt;
        demod.set_system(&mut param).unwrap();

        log.clear();
        demod.device_mut().fail_on("pre tune");
        assert_eq!(demod.tune(&mut param), Err(DmdError::device("pre tune")));
        assert_eq!(log.calls(), vec!["pre tune", "tuner tune", "post tune"]);
        assert_eq!(demod.state(), SessionState::SystemSet);

        log.clear();
        demod.device_mut().clear_faults();
        demod.tuner_mut().fail_on("tuner tune");
        assert_eq!(demod.scan(&mut param), Err(DmdError::device("tuner tune")));
        assert_eq!(log.calls(), vec!["pre tune", "tuner tune", "post tune"]);
    }

    #[test]
    fn test_tune_and_read_signal() {
        let (mut demod, _) = demod(SignalProfile {
            cnr_centi: 2_750,
            bit_errors: 25,
            bit_total: 1_000_000,
            packet_errors: 0,
            packet_total: 0,
            ..SignalProfile::default()
        });
        let mut param = DemodParameter::new();
        bring_up(&mut demod, &mut param, Standard::Dvbt);
        param.set_freq_khz(506_000);
        demod.tune(&mut param).unwrap();

        assert_eq!(demod.state(), SessionState::Tuned);
        assert_eq!(demod.tuner().tuned_khz(), Some(506_000));
        assert_eq!(demod.get_info(&mut param, ids::LOCK).unwrap(), 0);
        assert!((demod.cnr_db(&mut param).unwrap() - 27.5).abs() < 1e-9);
        assert!((demod.ber(&mut param).unwrap() - 25e-6).abs() < 1e-12);
        assert_eq!(demod.per(&mut param).unwrap(), 1.0);
        // 64QAM 2/3 needs 18.70 dB; BER 2.5e-5 scores (20 * 4602 - 40000) / 1000
        assert_eq!(demod.sqi(&mut param).unwrap(), 52);
    }

    #[test]
    fn test_info_id_bounds() {
        let (mut demod, _) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        assert!(demod.get_info(&mut param, 511).is_ok());
        assert!(demod.get_info(&mut param, 512).is_err());
        assert!(demod.set_info(&mut param, 512, 1).is_err());
        assert!(demod.get_info(&mut param, u32::MAX).is_err());

        demod.set_info(&mut param, 300, 42).unwrap();
        assert_eq!(param.info(300), 42);
    }

    #[test]
    fn test_term_and_close_idempotent() {
        let (mut demod, log) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        bring_up(&mut demod, &mut param, Standard::Dvbt);

        log.clear();
        demod.device_mut().fail_on("device term");
        assert!(demod.term(&mut param).is_err());
        assert_eq!(log.calls(), vec!["device term", "tuner term"]);
        assert_eq!(demod.state(), SessionState::Closed);
        assert!(!demod.bus().is_open());

        log.clear();
        assert!(demod.term(&mut param).is_ok());
        assert!(demod.close(&mut param).is_ok());
        assert!(demod.close(&mut param).is_ok());
        assert!(log.calls().is_empty());

        demod.open(&mut param).unwrap();
        log.clear();
        demod.close(&mut param).unwrap();
        assert_eq!(log.calls(), vec!["device close"]);
        assert_eq!(demod.state(), SessionState::Closed);
    }

    #[test]
    fn test_set_devid_and_dump() {
        let (mut demod, _) = demod(SignalProfile::default());
        let mut param = DemodParameter::new();
        demod.open(&mut param).unwrap();
        demod.set_devid(&mut param, 1).unwrap();
        assert_eq!(param.devid, 1);

        demod.init(&mut param).unwrap();
        let banks = demod.dump_registers(&[BANK_MAIN, BANK_USR]).unwrap();
        assert_eq!(banks.len(), 2);
        assert_eq!(banks[0][0xff], crate::hal::sim::CHIP_REVISION);
        assert_eq!(banks[1][0xf0], crate::hal::sim::PSEQ_REVISION);
    }
}
