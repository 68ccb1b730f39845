//! Register-level helpers built on a `RegisterBus`
//!
//! Batches of writes are held in a `RegisterTransferList` and sent in
//! order, stopping at the first failed write. Nothing is rolled back.

use tracing::{debug, warn};

use super::error::{DmdError, DmdResult};
use crate::hal::RegisterBus;

/// Capacity of one transfer list
pub const REGISTER_MAX: usize = 2048;

/// Terminator of the banked script form
pub const SCRIPT_END: u8 = 0xFF;

/// Registers per bank
pub const BANK_SIZE: usize = 256;

/// One register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub slave: u8,
    pub reg: u8,
    pub value: u8,
}

impl RegisterWrite {
    pub const fn new(slave: u8, reg: u8, value: u8) -> Self {
        Self { slave, reg, value }
    }
}

/// Bounded, ordered batch of register writes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterTransferList {
    writes: Vec<RegisterWrite>,
}

impl RegisterTransferList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[RegisterWrite] {
        &self.writes
    }

    /// Append a write; fails once `REGISTER_MAX` writes are queued
    pub fn push(&mut self, slave: u8, reg: u8, value: u8) -> DmdResult<()> {
        if self.writes.len() >= REGISTER_MAX {
            return Err(DmdError::device("register list full"));
        }
        self.writes.push(RegisterWrite::new(slave, reg, value));
        Ok(())
    }

    /// Build a list from a fixed table
    pub fn from_writes(writes: &[RegisterWrite]) -> DmdResult<Self> {
        let mut list = Self::new();
        for w in writes {
            list.push(w.slave, w.reg, w.value)?;
        }
        Ok(list)
    }

    /// Parse the banked script form: `[bank, reg, value]*` ended by `0xFF`.
    ///
    /// `bank` indexes `slaves`. A script may also simply end after its last
    /// triple. A truncated triple or an unknown bank index is rejected.
    pub fn from_banked_script(slaves: &[u8], script: &[u8]) -> DmdResult<Self> {
        let mut list = Self::new();
        let mut rest = script;
        loop {
            match rest {
                [] | [SCRIPT_END, ..] => break,
                [bank, reg, value, tail @ ..] => {
                    let slave = slaves.get(*bank as usize).copied().ok_or_else(|| {
                        warn!("Register script references unknown bank {}", bank);
                        DmdError::device("register script")
                    })?;
                    list.push(slave, *reg, *value)?;
                    rest = tail;
                }
                _ => {
                    warn!("Register script truncated ({} trailing bytes)", rest.len());
                    return Err(DmdError::device("register script"));
                }
            }
        }
        Ok(list)
    }

    /// Send every write in order. The first failed write aborts the batch;
    /// writes already sent stay applied.
    pub fn submit(&self, bus: &mut dyn RegisterBus) -> DmdResult<()> {
        for (i, w) in self.writes.iter().enumerate() {
            if let Err(e) = bus.write(w.slave, w.reg, w.value) {
                warn!(
                    "Register write {}/{} failed: slave 0x{:02x} reg 0x{:02x}",
                    i + 1,
                    self.writes.len(),
                    w.slave,
                    w.reg
                );
                return Err(e);
            }
        }
        debug!("Sent {} register writes", self.writes.len());
        Ok(())
    }
}

/// Update only the bits of `reg` selected by `mask` to the bits of `data`
pub fn mask_write(bus: &mut dyn RegisterBus, slave: u8, reg: u8, mask: u8, data: u8) -> DmdResult<()> {
    let current = bus.read(slave, reg)?;
    let updated = (current & !mask) | (data & mask);
    bus.write(slave, reg, updated)
}

/// Read a whole bank, logging it 16 registers per row
pub fn dump_bank(bus: &mut dyn RegisterBus, slave: u8) -> DmdResult<[u8; BANK_SIZE]> {
    let mut bank = [0u8; BANK_SIZE];
    for (reg, byte) in bank.iter_mut().enumerate() {
        *byte = bus.read(slave, reg as u8)?;
    }
    for (row, chunk) in bank.chunks(16).enumerate() {
        debug!("[0x{:02x}] {:02x}: {}", slave, row * 16, hex::encode(chunk));
    }
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::SimBus;

    const MAIN: u8 = 0x18;
    const USR: u8 = 0x10;

    fn open_bus() -> SimBus {
        let mut bus = SimBus::new();
        bus.open().unwrap();
        bus
    }

    #[test]
    fn test_list_is_bounded() {
        let mut list = RegisterTransferList::new();
        for i in 0..REGISTER_MAX {
            list.push(MAIN, i as u8, 0).unwrap();
        }
        assert_eq!(list.len(), REGISTER_MAX);
        assert!(list.push(MAIN, 0, 0).is_err());
        assert_eq!(list.len(), REGISTER_MAX);
    }

    #[test]
    fn test_submit_in_order() {
        let mut bus = open_bus();
        let list = RegisterTransferList::from_writes(&[
            RegisterWrite::new(MAIN, 0x01, 0xaa),
            RegisterWrite::new(USR, 0x02, 0xbb),
            RegisterWrite::new(MAIN, 0x01, 0xcc),
        ])
        .unwrap();
        list.submit(&mut bus).unwrap();
        assert_eq!(bus.peek(MAIN, 0x01), 0xcc);
        assert_eq!(bus.peek(USR, 0x02), 0xbb);
        assert_eq!(bus.write_log(), list.writes());
    }

    #[test]
    fn test_submit_stops_at_first_failure() {
        let mut bus = open_bus();
        bus.fail_writes_after(2);
        let list = RegisterTransferList::from_writes(&[
            RegisterWrite::new(MAIN, 0x01, 1),
            RegisterWrite::new(MAIN, 0x02, 2),
            RegisterWrite::new(MAIN, 0x03, 3),
            RegisterWrite::new(MAIN, 0x04, 4),
        ])
        .unwrap();
        assert!(list.submit(&mut bus).is_err());
        // earlier writes stay applied, later ones are never attempted
        assert_eq!(bus.peek(MAIN, 0x01), 1);
        assert_eq!(bus.peek(MAIN, 0x02), 2);
        assert_eq!(bus.peek(MAIN, 0x03), 0);
        assert_eq!(bus.peek(MAIN, 0x04), 0);
        assert_eq!(bus.write_log().len(), 2);
    }

    #[test]
    fn test_banked_script() {
        let script = hex::decode("0001110102220103ff0004ee").unwrap();
        let list = RegisterTransferList::from_banked_script(&[MAIN, USR], &script).unwrap();
        assert_eq!(
            list.writes(),
            &[
                RegisterWrite::new(MAIN, 0x01, 0x11),
                RegisterWrite::new(USR, 0x02, 0x22),
                RegisterWrite::new(USR, 0x03, 0xff),
            ]
        );

        let list = RegisterTransferList::from_banked_script(&[MAIN, USR], &[0, 5, 6]).unwrap();
        assert_eq!(list.len(), 1);
        assert!(RegisterTransferList::from_banked_script(&[MAIN], &[SCRIPT_END]).unwrap().is_empty());
    }

    #[test]
    fn test_banked_script_rejects_bad_input() {
        assert!(RegisterTransferList::from_banked_script(&[MAIN, USR], &[0, 1]).is_err());
        assert!(RegisterTransferList::from_banked_script(&[MAIN, USR], &[2, 1, 1, SCRIPT_END]).is_err());
    }

    #[test]
    fn test_mask_write() {
        let mut bus = open_bus();
        bus.poke(MAIN, 0x20, 0b1010_1010);
        mask_write(&mut bus, MAIN, 0x20, 0b0000_1111, 0b0101_0101).unwrap();
        assert_eq!(bus.peek(MAIN, 0x20), 0b1010_0101);
        mask_write(&mut bus, MAIN, 0x20, 0x00, 0xff).unwrap();
        assert_eq!(bus.peek(MAIN, 0x20), 0b1010_0101);
        mask_write(&mut bus, MAIN, 0x20, 0xff, 0x3c).unwrap();
        assert_eq!(bus.peek(MAIN, 0x20), 0x3c);
    }

    #[test]
    fn test_mask_write_read_failure() {
        let mut bus = open_bus();
        bus.poke(MAIN, 0x20, 0x0f);
        bus.fail_reads(true);
        assert!(mask_write(&mut bus, MAIN, 0x20, 0xf0, 0xf0).is_err());
        assert_eq!(bus.peek(MAIN, 0x20), 0x0f);
        assert!(bus.write_log().is_empty());
    }

    #[test]
    fn test_dump_bank() {
        let mut bus = open_bus();
        bus.poke(USR, 0x00, 0x12);
        bus.poke(USR, 0xff, 0x34);
        let bank = dump_bank(&mut bus, USR).unwrap();
        assert_eq!(bank[0x00], 0x12);
        assert_eq!(bank[0xff], 0x34);
        assert_eq!(bank[0x80], 0);
    }
}
