//! Simulated backend for development and testing
//!
//! `SimBus` is an in-memory register file standing in for the I2C bus and
//! the chip behind it. When a `SignalProfile` is attached, starting
//! acquisition fills the status registers from the profile, the way the
//! chip would after locking. `SimTuner` and `SimDevice` implement the
//! collaborator traits on top of it and can be told to fail individual
//! steps.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{DemodDevice, RegisterBus, Tuner};
use crate::dmd::registers::{mask_write, RegisterTransferList, RegisterWrite};
use crate::dmd::sqi::calc_sqi;
use crate::dmd::{DemodParameter, DmdError, DmdResult, Standard};
use crate::info::ids::{self, InfoId};

/// Slave address of the main register bank
pub const BANK_MAIN: u8 = 0x18;
/// Slave address of the user (status) register bank
pub const BANK_USR: u8 = 0x10;
/// Slave address of the tuner behind the transfer bus
pub const TUNER_SLAVE: u8 = 0x60;

/// Chip revision reported in REGREV
pub const CHIP_REVISION: u8 = 0x08;
/// Revision of the autocontrol sequence loaded by `load_autocontrol_sequence`
pub const PSEQ_REVISION: u8 = 0x2c;

mod regs {
    // MAIN bank
    pub const RSTSET: u8 = 0x00;
    pub const SYSTEM: u8 = 0x01;
    pub const BW: u8 = 0x02;
    pub const SEQ_START: u8 = 0x03;
    pub const TSSET: u8 = 0x08;
    pub const TCBSET: u8 = 0x0a;
    pub const ECHO: u8 = 0x0c;
    pub const PLPSEL: u8 = 0x0e;
    pub const REVISION: u8 = 0xff;

    // USR bank
    pub const STATE: u8 = 0x00;
    pub const AGC: u8 = 0x02;
    pub const CNR: u8 = 0x04;
    pub const BERR: u8 = 0x08;
    pub const BITNUM: u8 = 0x0b;
    pub const PERR: u8 = 0x10;
    pub const PKTNUM: u8 = 0x12;
    pub const T_MODE: u8 = 0x20;
    pub const T_GI: u8 = 0x21;
    pub const T_CONST: u8 = 0x22;
    pub const T_HIER: u8 = 0x23;
    pub const T_HP_CR: u8 = 0x24;
    pub const T_LP_CR: u8 = 0x25;
    pub const T_CELLID: u8 = 0x26;
    pub const T_TPS_OK: u8 = 0x28;
    pub const T2_MODE: u8 = 0x30;
    pub const T2_GI: u8 = 0x31;
    pub const T2_PLP_MOD: u8 = 0x32;
    pub const T2_PLP_COD: u8 = 0x33;
    pub const T2_L1_OK: u8 = 0x34;
    pub const PSEQREV: u8 = 0xf0;

    /// Written to RSTSET to reset the demodulator state machine
    pub const RESET_CODE: u8 = 0x77;
}

/// Last status register the chip writes on acquisition
const STATUS_REG_END: u8 = 0x40;

/// State machine code once the system is in sync
fn sync_state(standard: Standard) -> u8 {
    match standard {
        Standard::Dvbt2 => 13,
        Standard::Dvbc => 9,
        _ => 10,
    }
}

/// Signal conditions the simulated chip reports after acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalProfile {
    pub locked: bool,
    pub agc: u8,
    /// CNR in 1/100 dB
    pub cnr_centi: u16,
    pub bit_errors: u32,
    pub bit_total: u32,
    pub packet_errors: u16,
    pub packet_total: u16,
    /// FFT mode code of the active system's list
    pub mode: u8,
    pub guard_interval: u8,
    pub modulation: u8,
    pub code_rate: u8,
    pub cell_id: u16,
}

impl Default for SignalProfile {
    fn default() -> Self {
        Self {
            locked: true,
            agc: 0x80,
            cnr_centi: 2_500,
            bit_errors: 0,
            bit_total: 1_000_000,
            packet_errors: 0,
            packet_total: 10_000,
            mode: 1,
            guard_interval: 0,
            modulation: 2,
            code_rate: 1,
            cell_id: 0x1a2b,
        }
    }
}

/// In-memory register file with fault injection
#[derive(Debug, Default)]
pub struct SimBus {
    registers: HashMap<(u8, u8), u8>,
    open: bool,
    write_log: Vec<RegisterWrite>,
    signal: Option<SignalProfile>,
    fail_open: bool,
    fail_reads: bool,
    write_budget: Option<usize>,
}

impl SimBus {
    /// Empty register file with no chip behaviour
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file of a chip that reports `signal` once acquisition starts
    pub fn with_signal(signal: SignalProfile) -> Self {
        let mut bus = Self::new();
        bus.poke(BANK_MAIN, regs::REVISION, CHIP_REVISION);
        bus.signal = Some(signal);
        bus
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Set a register without going through the bus
    pub fn poke(&mut self, slave: u8, reg: u8, value: u8) {
        self.registers.insert((slave, reg), value);
    }

    /// Current register value; unwritten registers read as 0
    pub fn peek(&self, slave: u8, reg: u8) -> u8 {
        self.registers.get(&(slave, reg)).copied().unwrap_or(0)
    }

    /// Every write that reached the register file, oldest first
    pub fn write_log(&self) -> &[RegisterWrite] {
        &self.write_log
    }

    pub fn fail_open(&mut self, fail: bool) {
        self.fail_open = fail;
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Accept `count` more writes, then fail every write
    pub fn fail_writes_after(&mut self, count: usize) {
        self.write_budget = Some(count);
    }

    pub fn clear_faults(&mut self) {
        self.fail_open = false;
        self.fail_reads = false;
        self.write_budget = None;
    }

    fn clear_status(&mut self) {
        self.registers
            .retain(|&(slave, reg), _| !(slave == BANK_USR && reg < STATUS_REG_END));
    }

    fn acquire(&mut self) {
        let Some(s) = self.signal else {
            return;
        };
        let standard = Standard::from_raw(u32::from(self.peek(BANK_MAIN, regs::SYSTEM)));
        debug!("Simulated acquisition for {} (locked: {})", standard, s.locked);

        self.poke(BANK_USR, regs::AGC, s.agc);
        if !s.locked {
            self.poke(BANK_USR, regs::STATE, 2);
            return;
        }
        self.poke(BANK_USR, regs::STATE, sync_state(standard));
        self.poke_be(regs::CNR, &s.cnr_centi.to_be_bytes());
        self.poke_be(regs::BERR, &s.bit_errors.to_be_bytes()[1..]);
        self.poke_be(regs::BITNUM, &s.bit_total.to_be_bytes()[1..]);
        self.poke_be(regs::PERR, &s.packet_errors.to_be_bytes());
        self.poke_be(regs::PKTNUM, &s.packet_total.to_be_bytes());

        self.poke(BANK_USR, regs::T_MODE, s.mode);
        self.poke(BANK_USR, regs::T_GI, s.guard_interval);
        self.poke(BANK_USR, regs::T_CONST, s.modulation);
        self.poke(BANK_USR, regs::T_HP_CR, s.code_rate);
        self.poke(BANK_USR, regs::T_LP_CR, s.code_rate);
        self.poke_be(regs::T_CELLID, &s.cell_id.to_be_bytes());
        self.poke(BANK_USR, regs::T_TPS_OK, 1);

        self.poke(BANK_USR, regs::T2_MODE, s.mode);
        self.poke(BANK_USR, regs::T2_GI, s.guard_interval);
        self.poke(BANK_USR, regs::T2_PLP_MOD, s.modulation);
        self.poke(BANK_USR, regs::T2_PLP_COD, s.code_rate);
        self.poke(BANK_USR, regs::T2_L1_OK, 1);
    }

    fn poke_be(&mut self, reg: u8, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.poke(BANK_USR, reg + i as u8, b);
        }
    }
}

impl RegisterBus for SimBus {
    fn open(&mut self) -> DmdResult<()> {
        if self.fail_open {
            return Err(DmdError::device("I2C open"));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> DmdResult<()> {
        self.open = false;
        Ok(())
    }

    fn read(&mut self, slave: u8, reg: u8) -> DmdResult<u8> {
        if !self.open || self.fail_reads {
            return Err(DmdError::device("I2C read"));
        }
        Ok(self.peek(slave, reg))
    }

    fn write(&mut self, slave: u8, reg: u8, value: u8) -> DmdResult<()> {
        if !self.open {
            return Err(DmdError::device("I2C write"));
        }
        if let Some(budget) = self.write_budget.as_mut() {
            if *budget == 0 {
                return Err(DmdError::device("I2C write"));
            }
            *budget -= 1;
        }

        self.poke(slave, reg, value);
        self.write_log.push(RegisterWrite::new(slave, reg, value));

        if slave == BANK_MAIN {
            match reg {
                regs::RSTSET if value == regs::RESET_CODE => self.clear_status(),
                regs::SEQ_START if value & 0x01 != 0 => self.acquire(),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Ordered record of collaborator calls, shared between sim components
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, step: &'static str) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(step);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Steps that record themselves and fail on request
#[derive(Debug, Default)]
struct Steps {
    log: CallLog,
    failing: HashSet<&'static str>,
}

impl Steps {
    fn run(&self, step: &'static str) -> DmdResult<()> {
        self.log.push(step);
        if self.failing.contains(step) {
            Err(DmdError::device(step))
        } else {
            Ok(())
        }
    }
}

/// Tuner that writes the tuned frequency to `TUNER_SLAVE`
#[derive(Debug, Default)]
pub struct SimTuner {
    steps: Steps,
    tuned_khz: Option<u32>,
}

impl SimTuner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: CallLog) -> Self {
        Self {
            steps: Steps {
                log,
                failing: HashSet::new(),
            },
            tuned_khz: None,
        }
    }

    /// Make `step` ("tuner init", "tuner set_system", "tuner tune", "tuner term") fail
    pub fn fail_on(&mut self, step: &'static str) {
        self.steps.failing.insert(step);
    }

    pub fn clear_faults(&mut self) {
        self.steps.failing.clear();
    }

    pub fn tuned_khz(&self) -> Option<u32> {
        self.tuned_khz
    }
}

impl Tuner for SimTuner {
    fn init(&mut self, _bus: &mut dyn RegisterBus, _param: &DemodParameter) -> DmdResult<()> {
        self.steps.run("tuner init")
    }

    fn set_system(&mut self, _bus: &mut dyn RegisterBus, _param: &DemodParameter) -> DmdResult<()> {
        self.steps.run("tuner set_system")
    }

    fn tune(&mut self, bus: &mut dyn RegisterBus, param: &DemodParameter) -> DmdResult<()> {
        self.steps.run("tuner tune")?;
        let khz = param.freq_khz();
        RegisterTransferList::from_writes(&[
            RegisterWrite::new(TUNER_SLAVE, 0x00, (khz >> 16) as u8),
            RegisterWrite::new(TUNER_SLAVE, 0x01, (khz >> 8) as u8),
            RegisterWrite::new(TUNER_SLAVE, 0x02, khz as u8),
        ])?
        .submit(bus)?;
        self.tuned_khz = Some(khz);
        Ok(())
    }

    fn term(&mut self, _bus: &mut dyn RegisterBus) -> DmdResult<()> {
        self.tuned_khz = None;
        self.steps.run("tuner term")
    }
}

/// Default register settings written by `init` after the soft reset
const INIT_REGS: [RegisterWrite; 4] = [
    RegisterWrite::new(BANK_MAIN, regs::RSTSET, regs::RESET_CODE),
    RegisterWrite::new(BANK_MAIN, regs::TSSET, 0x00),
    RegisterWrite::new(BANK_MAIN, regs::TCBSET, 0x00),
    RegisterWrite::new(BANK_MAIN, regs::ECHO, 0x00),
];

/// Autocontrol sequence in banked script form (bank 0 = MAIN, 1 = USR)
const PSEQ_SCRIPT: [u8; 13] = [
    0, 0x04, 0x01, // sequencer hold
    1, regs::PSEQREV, PSEQ_REVISION,
    0, 0x04, 0x00, // release
    0, 0x05, 0x3f,
    0xff,
];

/// MN88436-style device programming against the simulated register map
#[derive(Debug, Default)]
pub struct SimDevice {
    steps: Steps,
}

impl SimDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: CallLog) -> Self {
        Self {
            steps: Steps {
                log,
                failing: HashSet::new(),
            },
        }
    }

    /// Make a named step fail, e.g. "device init", "post tune", "get info"
    pub fn fail_on(&mut self, step: &'static str) {
        self.steps.failing.insert(step);
    }

    pub fn clear_faults(&mut self) {
        self.steps.failing.clear();
    }

    fn read_be(bus: &mut dyn RegisterBus, reg: u8, len: u8) -> DmdResult<u32> {
        let mut value = 0u32;
        for i in 0..len {
            value = (value << 8) | u32::from(bus.read(BANK_USR, reg + i)?);
        }
        Ok(value)
    }

    /// Decode one ID from the registers. `None` for IDs the chip does not
    /// report under the current system.
    fn decode(
        &self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
    ) -> DmdResult<Option<u32>> {
        let value = match id {
            ids::REGREV => u32::from(bus.read(BANK_MAIN, regs::REVISION)?),
            ids::PSEQREV => Self::read_be(bus, regs::PSEQREV, 1)?,
            ids::SYSTEM => u32::from(bus.read(BANK_MAIN, regs::SYSTEM)?),
            ids::LOCK => {
                let state = bus.read(BANK_USR, regs::STATE)?;
                if state >= sync_state(param.system) {
                    0
                } else if bus.read(BANK_USR, regs::AGC)? == 0 {
                    1
                } else {
                    2
                }
            }
            ids::AGC => Self::read_be(bus, regs::AGC, 1)?,
            ids::BERRNUM => Self::read_be(bus, regs::BERR, 3)?,
            ids::BITNUM => Self::read_be(bus, regs::BITNUM, 3)?,
            ids::CNR_INT => Self::read_be(bus, regs::CNR, 2)? / 100,
            ids::CNR_DEC => Self::read_be(bus, regs::CNR, 2)? % 100,
            ids::PERRNUM => Self::read_be(bus, regs::PERR, 2)?,
            ids::PACKETNUM => Self::read_be(bus, regs::PKTNUM, 2)?,
            ids::STATUS => Self::read_be(bus, regs::STATE, 1)?,
            ids::ERRORFREE => {
                let total = Self::read_be(bus, regs::BITNUM, 3)?;
                let errors = Self::read_be(bus, regs::BERR, 3)?;
                match (total, errors) {
                    (0, _) => 2,
                    (_, 0) => 1,
                    _ => 0,
                }
            }
            _ => return self.decode_system(bus, param, id),
        };
        Ok(Some(value))
    }

    fn decode_system(
        &self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
    ) -> DmdResult<Option<u32>> {
        let reg = match (param.system, id) {
            (Standard::Dvbt, ids::DVBT_SQI) | (Standard::Dvbt2, ids::DVBT2_SQI) => {
                return self.refresh_sqi(bus, param).map(Some);
            }
            (Standard::Dvbt, ids::DVBT_CELLID) => {
                return Self::read_be(bus, regs::T_CELLID, 2).map(Some);
            }
            (Standard::Dvbt, ids::DVBT_TPS_ALL) => regs::T_TPS_OK,
            (Standard::Dvbt, ids::DVBT_MODE) => regs::T_MODE,
            (Standard::Dvbt, ids::DVBT_GI) => regs::T_GI,
            (Standard::Dvbt, ids::DVBT_CONSTELLATION) => regs::T_CONST,
            (Standard::Dvbt, ids::DVBT_HIERARCHY) => regs::T_HIER,
            (Standard::Dvbt, ids::DVBT_HP_CODERATE) => regs::T_HP_CR,
            (Standard::Dvbt, ids::DVBT_LP_CODERATE) => regs::T_LP_CR,
            (Standard::Dvbt2, ids::DVBT2_MODE) => regs::T2_MODE,
            (Standard::Dvbt2, ids::DVBT2_GI) => regs::T2_GI,
            (Standard::Dvbt2, ids::DVBT2_L1_ALL) => regs::T2_L1_OK,
            (Standard::Dvbt2, ids::DVBT2_DAT_PLP_MOD) => regs::T2_PLP_MOD,
            (Standard::Dvbt2, ids::DVBT2_DAT_PLP_COD) => regs::T2_PLP_COD,
            (Standard::Dvbt2, ids::DVBT2_SELECTED_PLP) => {
                return bus.read(BANK_MAIN, regs::PLPSEL).map(|v| Some(u32::from(v)));
            }
            _ => return Ok(None),
        };
        bus.read(BANK_USR, reg).map(|v| Some(u32::from(v)))
    }

    /// Refresh every slot SQI depends on, then compute it
    fn refresh_sqi(&self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<u32> {
        let inputs: &[InfoId] = match param.system {
            Standard::Dvbt => &[ids::DVBT_CONSTELLATION, ids::DVBT_LP_CODERATE],
            _ => &[ids::DVBT2_DAT_PLP_MOD, ids::DVBT2_DAT_PLP_COD],
        };
        for &id in [ids::CNR_INT, ids::CNR_DEC, ids::BERRNUM, ids::BITNUM]
            .iter()
            .chain(inputs)
        {
            if let Some(value) = self.decode(bus, param, id)? {
                param.info[id as usize] = value;
            }
        }
        Ok(calc_sqi(param))
    }

    /// Refresh every slot of the current system
    fn refresh_all(&self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()> {
        for id in crate::info::defined_ids(param.system).filter(|&id| id != ids::ALL) {
            if let Some(value) = self.decode(bus, param, id)? {
                param.info[id as usize] = value;
            }
        }
        Ok(())
    }
}

impl DemodDevice for SimDevice {
    fn open(&mut self, _bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("device open")
    }

    fn init(&mut self, bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("device init")?;
        RegisterTransferList::from_writes(&INIT_REGS)?.submit(bus)
    }

    fn load_autocontrol_sequence(
        &mut self,
        bus: &mut dyn RegisterBus,
        _param: &mut DemodParameter,
    ) -> DmdResult<()> {
        self.steps.run("load autocontrol")?;
        RegisterTransferList::from_banked_script(&[BANK_MAIN, BANK_USR], &PSEQ_SCRIPT)?.submit(bus)
    }

    fn pre_tune(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("pre tune")?;
        let system = param.system as u32;
        RegisterTransferList::from_writes(&[
            RegisterWrite::new(BANK_MAIN, regs::SYSTEM, system as u8),
            RegisterWrite::new(BANK_MAIN, regs::BW, param.bw as u32 as u8),
            RegisterWrite::new(BANK_MAIN, regs::RSTSET, regs::RESET_CODE),
        ])?
        .submit(bus)
    }

    fn post_tune(&mut self, bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("post tune")?;
        bus.write(BANK_MAIN, regs::SEQ_START, 0x01)
    }

    fn set_transfer_mode(&mut self, bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("transfer mode")?;
        mask_write(bus, BANK_MAIN, regs::TCBSET, 0x80, 0x80)
    }

    fn set_echo_enhancement(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
    ) -> DmdResult<()> {
        self.steps.run("echo enhancement")?;
        mask_write(bus, BANK_MAIN, regs::ECHO, 0x03, param.echo_set as u8)
    }

    fn set_ts_output(&mut self, bus: &mut dyn RegisterBus, param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("ts output")?;
        mask_write(bus, BANK_MAIN, regs::TSSET, 0x03, param.ts_out as u8)
    }

    fn get_info(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
    ) -> DmdResult<u32> {
        self.steps.run("get info")?;
        if id == ids::ALL {
            self.refresh_all(bus, param)?;
            return Ok(0);
        }
        let slot = id as usize;
        if slot >= param.info.len() {
            return Err(DmdError::device("get info"));
        }
        if let Some(value) = self.decode(bus, param, id)? {
            param.info[slot] = value;
        }
        Ok(param.info[slot])
    }

    fn set_info(
        &mut self,
        bus: &mut dyn RegisterBus,
        param: &mut DemodParameter,
        id: InfoId,
        value: u32,
    ) -> DmdResult<()> {
        self.steps.run("set info")?;
        let slot = param
            .info
            .get_mut(id as usize)
            .ok_or(DmdError::device("set info"))?;
        *slot = value;
        if param.system == Standard::Dvbt2 && id == ids::DVBT2_SELECTED_PLP {
            bus.write(BANK_MAIN, regs::PLPSEL, value as u8)?;
        }
        Ok(())
    }

    fn close(&mut self, _bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("device close")
    }

    fn term(&mut self, _bus: &mut dyn RegisterBus, _param: &mut DemodParameter) -> DmdResult<()> {
        self.steps.run("device term")
    }
}
