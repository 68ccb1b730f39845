//! Session record and the enums it is built from

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::info::ids::InfoId;
use crate::info::textlist;

/// Number of telemetry slots in a session
pub const INFORMATION_MAX: usize = 512;

/// Frequency programmed by `open`
pub const DEFAULT_FREQ_KHZ: u32 = 666_000;

/// Broadcast system, numbered as the chip's SYSTEM register reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum Standard {
    Isdbt = 0,
    Isdbs = 1,
    Dvbt = 2,
    Dvbt2 = 3,
    Dvbc = 4,
    Dvbc2 = 5,
    Atsc = 6,
    QamB64 = 7,
    QamB256 = 8,
    QamC64 = 9,
    QamC256 = 10,
    IsdbtBrazil = 11,
    NotDefined = 255,
}

impl Standard {
    /// All defined systems, in register order
    pub const ALL: [Standard; 12] = [
        Standard::Isdbt,
        Standard::Isdbs,
        Standard::Dvbt,
        Standard::Dvbt2,
        Standard::Dvbc,
        Standard::Dvbc2,
        Standard::Atsc,
        Standard::QamB64,
        Standard::QamB256,
        Standard::QamC64,
        Standard::QamC256,
        Standard::IsdbtBrazil,
    ];

    pub fn from_raw(raw: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| *s as u32 == raw)
            .unwrap_or(Standard::NotDefined)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Standard::Isdbt => "ISDBT",
            Standard::Isdbs => "ISDBS",
            Standard::Dvbt => "DVBT",
            Standard::Dvbt2 => "DVBT2",
            Standard::Dvbc => "DVBC",
            Standard::Dvbc2 => "DVBC2",
            Standard::Atsc => "ATSC",
            Standard::QamB64 => "QAMB_64QAM",
            Standard::QamB256 => "QAMB_256QAM",
            Standard::QamC64 => "QAMC_64QAM",
            Standard::QamC256 => "QAMC_256QAM",
            Standard::IsdbtBrazil => "ISDBT_Brazil",
            Standard::NotDefined => "Not Defined",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Standard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|std| std.name().to_ascii_uppercase() == wanted)
            .ok_or_else(|| format!("unknown broadcast system '{}'", s))
    }
}

/// Unit of `DemodParameter::freq`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreqUnit {
    Hz,
    KHz,
    MHz,
}

/// Channel bandwidth, numbered as the BW text list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum Bandwidth {
    NotSpecified = 0,
    Mhz6 = 1,
    Mhz7 = 2,
    Mhz8 = 3,
    Mhz5 = 4,
    Mhz1_7 = 5,
}

impl Bandwidth {
    pub fn label(&self) -> &'static str {
        textlist::BANDWIDTH.lookup(*self as u32)
    }
}

impl FromStr for Bandwidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().trim_end_matches("mhz") {
            "" | "auto" | "none" => Ok(Bandwidth::NotSpecified),
            "6" => Ok(Bandwidth::Mhz6),
            "7" => Ok(Bandwidth::Mhz7),
            "8" => Ok(Bandwidth::Mhz8),
            "5" => Ok(Bandwidth::Mhz5),
            "1.7" | "1_7" => Ok(Bandwidth::Mhz1_7),
            other => Err(format!("unknown bandwidth '{}'", other)),
        }
    }
}

/// Transport stream output routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[repr(u8)]
pub enum TsOutput {
    #[default]
    Parallel = 0,
    SerialFixedClock = 1,
    SerialVariableClock = 2,
}

impl FromStr for TsOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parallel" => Ok(TsOutput::Parallel),
            "serial" | "serial-fixed" => Ok(TsOutput::SerialFixedClock),
            "serial-variable" => Ok(TsOutput::SerialVariableClock),
            other => Err(format!("unknown TS output '{}'", other)),
        }
    }
}

/// Echo (multipath) enhancement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[repr(u8)]
pub enum EchoEnhance {
    Normal = 0,
    MinusEchoDelay = 1,
    /// Default: improves pre-echo reception without degrading other cases
    #[default]
    MinusEchoDelayNoSideEffect = 2,
}

impl FromStr for EchoEnhance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "off" => Ok(EchoEnhance::Normal),
            "minus-echo" => Ok(EchoEnhance::MinusEchoDelay),
            "minus-echo-no-side-effect" | "default" => Ok(EchoEnhance::MinusEchoDelayNoSideEffect),
            other => Err(format!("unknown echo mode '{}'", other)),
        }
    }
}

/// One telemetry slot: raw register-derived value for an information ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InformationSlot {
    pub id: InfoId,
    pub raw: u32,
}

/// Demodulator session record, owned by the caller
#[derive(Debug, Clone)]
pub struct DemodParameter {
    pub devid: u32,
    pub system: Standard,
    pub freq: u32,
    pub funit: FreqUnit,
    pub bw: Bandwidth,
    pub ts_out: TsOutput,
    pub echo_set: EchoEnhance,
    pub info: [u32; INFORMATION_MAX],
}

impl Default for DemodParameter {
    fn default() -> Self {
        Self {
            devid: 0,
            system: Standard::NotDefined,
            freq: DEFAULT_FREQ_KHZ,
            funit: FreqUnit::KHz,
            bw: Bandwidth::NotSpecified,
            ts_out: TsOutput::default(),
            echo_set: EchoEnhance::default(),
            info: [0; INFORMATION_MAX],
        }
    }
}

impl DemodParameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the values `open` starts from. TS output routing is kept.
    pub fn reset(&mut self) {
        let ts_out = self.ts_out;
        *self = Self {
            ts_out,
            ..Self::default()
        };
    }

    /// Tuned frequency in kHz regardless of the unit it was set in
    pub fn freq_khz(&self) -> u32 {
        match self.funit {
            FreqUnit::MHz => self.freq.saturating_mul(1000),
            FreqUnit::KHz => self.freq,
            FreqUnit::Hz => self.freq / 1000,
        }
    }

    pub fn set_freq_khz(&mut self, khz: u32) {
        self.freq = khz;
        self.funit = FreqUnit::KHz;
    }

    /// Raw slot value; out-of-range IDs read as 0
    pub fn info(&self, id: InfoId) -> u32 {
        self.info.get(id as usize).copied().unwrap_or(0)
    }

    /// Slots in `range`, clipped to the slot array
    pub fn slots(&self, range: std::ops::Range<InfoId>) -> impl Iterator<Item = InformationSlot> + '_ {
        let end = range.end.min(INFORMATION_MAX as InfoId);
        (range.start..end).map(move |id| InformationSlot {
            id,
            raw: self.info[id as usize],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = DemodParameter::new();
        assert_eq!(p.system, Standard::NotDefined);
        assert_eq!(p.freq_khz(), 666_000);
        assert_eq!(p.bw, Bandwidth::NotSpecified);
        assert_eq!(p.echo_set, EchoEnhance::MinusEchoDelayNoSideEffect);
        assert!(p.info.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_freq_units() {
        let mut p = DemodParameter::new();
        p.freq = 474;
        p.funit = FreqUnit::MHz;
        assert_eq!(p.freq_khz(), 474_000);
        p.freq = 474_000_000;
        p.funit = FreqUnit::Hz;
        assert_eq!(p.freq_khz(), 474_000);
        p.set_freq_khz(506_000);
        assert_eq!(p.freq_khz(), 506_000);
    }

    #[test]
    fn test_standard_parse_and_raw() {
        assert_eq!("dvbt2".parse::<Standard>(), Ok(Standard::Dvbt2));
        assert_eq!("qamb-256qam".parse::<Standard>(), Ok(Standard::QamB256));
        assert!("pal".parse::<Standard>().is_err());
        assert_eq!(Standard::from_raw(2), Standard::Dvbt);
        assert_eq!(Standard::from_raw(12), Standard::NotDefined);
    }

    #[test]
    fn test_bandwidth_parse() {
        assert_eq!("8MHz".parse::<Bandwidth>(), Ok(Bandwidth::Mhz8));
        assert_eq!("1.7".parse::<Bandwidth>(), Ok(Bandwidth::Mhz1_7));
        assert_eq!("auto".parse::<Bandwidth>(), Ok(Bandwidth::NotSpecified));
        assert_eq!(Bandwidth::Mhz7.label(), "7MHZ");
        assert_eq!(Bandwidth::Mhz1_7.label(), "1_7MHZ");
        assert_eq!(Bandwidth::NotSpecified.label(), "NOT_SPECIFIED");
    }

    #[test]
    fn test_slots_clipped() {
        let mut p = DemodParameter::new();
        p.info[510] = 7;
        let slots: Vec<_> = p.slots(508..600).collect();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[2], InformationSlot { id: 510, raw: 7 });
        assert_eq!(p.info(9999), 0);
        assert_eq!(p.slots(600..700).count(), 0);
    }
}
