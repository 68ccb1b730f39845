//! Display labels for enumerated register values

/// Returned for any code or ID that has no label
pub const NOT_DEFINED: &str = "Not Defined";

/// Ordered labels indexed by raw register code
#[derive(Debug)]
pub struct TextList {
    entries: &'static [&'static str],
}

impl TextList {
    pub const fn new(entries: &'static [&'static str]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label for `code`, or `NOT_DEFINED` past the end of the list
    pub fn lookup(&self, code: u32) -> &'static str {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.entries.get(i))
            .copied()
            .unwrap_or(NOT_DEFINED)
    }
}

// The chip's SYSTEM register numbering; codes 22 and up are reserved.
pub static SYSTEM: TextList = TextList::new(&[
    "ISDBT",
    "ISDBS",
    "DVBT",
    "DVBT2",
    "DVBC",
    "DVBC2",
    "ATSC",
    "QAMB_64QAM",
    "QAMB_256QAM",
    "QAMC_64QAM",
    "QAMC_256QAM",
    "ISDBT_Brazil",
    "---",
    "NTSC_M_BTSC",
    "PAL_M_BTSC",
    "PAL_N_BTSC",
    "PAL_B_G_NICAM",
    "PAL_I_NiCAM",
    "PAL_D_NiCAM",
    "PAL_B_G_A2",
    "SECAM_L_NiCAM",
    "SECAM_L1_NiCAM",
]);

pub static LOCK: TextList = TextList::new(&["LOCKED", "NOSIGNAL", "NOSYNC", "ERROR(TimeOut)"]);
pub static ERRORFREE: TextList = TextList::new(&["ERROR", "ERROR FREE", "Not Available"]);
pub static YESNO: TextList = TextList::new(&["No", "Yes"]);
pub static BANDWIDTH: TextList =
    TextList::new(&["NOT_SPECIFIED", "6MHZ", "7MHZ", "8MHZ", "5MHZ", "1_7MHZ"]);

// DVB-T (the ISDB-T state machine reports the same codes)
pub static DVBT_STATUS: TextList = TextList::new(&[
    "0_RESET",
    "1_TUNING",
    "2_AGC",
    "3_Mode_Search",
    "4_Clock_Carrier_Sync",
    "5_",
    "6_",
    "7_",
    "8_Freq_Sync",
    "9_Frame_Detect",
    "10_Sync",
    "11_Sync_Protect",
]);
pub static HIERARCHY_SEL: TextList = TextList::new(&["LP(No Hier)", "HP"]);
pub static TPS_ALL: TextList = TextList::new(&["Fail", "Success"]);
pub static DVBT_MODE: TextList = TextList::new(&["2k", "8k", "4k"]);
pub static DVBT_GI: TextList = TextList::new(&["1/32", "1/16", "1/8", "1/4"]);
pub static DVBT_CONST: TextList = TextList::new(&["QPSK", "16QAM", "64QAM"]);
pub static DVBT_HIERARCHY: TextList = TextList::new(&["No Hier", "alpha=1", "alpha=2", "alpha=4"]);
pub static DVBT_CR: TextList = TextList::new(&["1/2", "2/3", "3/4", "5/6", "7/8"]);

// DVB-T2
pub static DVBT2_STATUS: TextList = TextList::new(&[
    "0_RESET",
    "1_TUNING",
    "2_AGC",
    "3_P1_SEARCH",
    "4_GI_SEARCH",
    "5_Clock_Carrier_Sync",
    "6_",
    "7_",
    "8_",
    "9_",
    "10_Freq_Sync",
    "11_L1_PRE_Lock",
    "12_L1_POST_Lock",
    "13_Sync",
]);
pub static DVBT2_MODE: TextList = TextList::new(&["1k", "2k", "4k", "8k", "16k", "32k"]);
pub static DVBT2_GI: TextList =
    TextList::new(&["1/32", "1/16", "1/8", "1/4", "1/128", "19/128", "19/256"]);
pub static DVBT2_TYPE: TextList = TextList::new(&["TS Only", "GS Only", "TS & GS"]);
pub static DVBT2_PAPR: TextList = TextList::new(&["No PAPR", "ACE-PAPR", "TR-PAPR", "ACE&PAPR"]);
pub static DVBT2_L1_MOD: TextList = TextList::new(&["BPSK", "QPSK", "16QAM", "64QAM"]);
pub static DVBT2_COD: TextList = TextList::new(&["1/2", "3/5", "2/3", "3/4", "4/5", "5/6"]);
pub static DVBT2_FEC_TYPE: TextList = TextList::new(&["16k LDPC", "64k LDPC"]);
pub static DVBT2_PILOT_PATTERN: TextList =
    TextList::new(&["PP1", "PP2", "PP3", "PP4", "PP5", "PP6", "PP7", "PP8"]);
pub static DVBT2_PLP_MODE: TextList = TextList::new(&["Not Specified", "Normal Mode", "HE Mode"]);
pub static DVBT2_PLP_TYPE: TextList = TextList::new(&["Common", "Data Type1", "Data Type2"]);
pub static DVBT2_PAYLOAD_TYPE: TextList = TextList::new(&["GFPS", "GCS", "GSE", "TS"]);
pub static DVBT2_PLP_MOD: TextList = TextList::new(&["QPSK", "16QAM", "64QAM", "256QAM"]);

// ISDB-T
pub static ISDBT_MODE: TextList = TextList::new(&["Mode1", "Mode2", "Mode3"]);
pub static ISDBT_GI: TextList = TextList::new(&["1/32", "1/16", "1/8", "1/4"]);
pub static ISDBT_SYSTEM: TextList = TextList::new(&["ISDBT", "ISDBT(SB)"]);
pub static ISDBT_MAP: TextList =
    TextList::new(&["DQPSK", "QPSK", "16QAM", "64QAM", "-", "-", "-", "-"]);
pub static ISDBT_CR: TextList = TextList::new(&["1/2", "2/3", "3/4", "5/6", "7/8", "-", "-", "-"]);
pub static ISDBT_INT: TextList = TextList::new(&[
    "I=1,2,4",
    "I=2,4,8",
    "I=4,8,16",
    "I=8,16,32",
    "-",
    "-",
    "-",
    "-",
]);

// ISDB-S
pub static ISDBS_MOD: TextList = TextList::new(&[
    "Not Defined",
    "BPSK 1/2",
    "QPSK 1/2",
    "QPSK 2/3",
    "QPSK 3/4",
    "QPSK 5/6",
    "QPSK 7/8",
    "TC8PSK 2/3",
]);

// DVB-C
pub static DVBC_STATUS: TextList = TextList::new(&[
    "0_RESET",
    "1_TUNING",
    "2_AGC",
    "3_Rate Search",
    "4_",
    "5_",
    "6_Mode Search",
    "7_",
    "8_Frame_Sync",
    "9_Sync",
    "10_Sync",
]);
