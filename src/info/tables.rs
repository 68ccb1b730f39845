//! Per-system decode tables
//!
//! Each table is indexed by `id - COMMON_END` and says how a raw slot value
//! is shown: decimal, hex, or a label from a `TextList`.

use std::borrow::Cow;

use super::ids::{InfoId, COMMON_END};
use super::textlist::{self, TextList};

/// How a raw value is rendered
#[derive(Debug, Clone, Copy)]
pub enum ValueFormat {
    Decimal,
    Hex,
    List(&'static TextList),
}

impl ValueFormat {
    pub fn render(&self, raw: u32) -> Cow<'static, str> {
        match self {
            ValueFormat::Decimal => Cow::Owned(raw.to_string()),
            ValueFormat::Hex => Cow::Owned(format!("0x{:x}", raw)),
            ValueFormat::List(list) => Cow::Borrowed(list.lookup(raw)),
        }
    }
}

/// Title and format of one information ID
#[derive(Debug, Clone, Copy)]
pub struct InfoEntry {
    pub title: &'static str,
    pub format: ValueFormat,
}

impl InfoEntry {
    const fn decimal(title: &'static str) -> Self {
        Self { title, format: ValueFormat::Decimal }
    }

    const fn hex(title: &'static str) -> Self {
        Self { title, format: ValueFormat::Hex }
    }

    const fn list(title: &'static str, list: &'static TextList) -> Self {
        Self { title, format: ValueFormat::List(list) }
    }
}

/// Decoder for one family of broadcast systems
#[derive(Debug)]
pub struct InfoTable {
    /// Format of the common STATUS field for this family
    pub status: ValueFormat,
    /// System specific fields, starting at `COMMON_END`
    pub entries: &'static [InfoEntry],
}

impl InfoTable {
    /// One past the last system specific ID
    pub fn end(&self) -> InfoId {
        COMMON_END + self.entries.len() as InfoId
    }

    /// Entry for a system specific ID
    pub fn entry(&self, id: InfoId) -> Option<&'static InfoEntry> {
        let offset = id.checked_sub(COMMON_END)?;
        self.entries.get(offset as usize)
    }
}

pub static COMMON_ENTRIES: [InfoEntry; COMMON_END as usize] = [
    InfoEntry::decimal("ALL"),
    InfoEntry::decimal("Reg. Ver."),
    InfoEntry::decimal("PSEQ Ver."),
    InfoEntry::list("SYSTEM", &textlist::SYSTEM),
    InfoEntry::list("LOCK", &textlist::LOCK),
    InfoEntry::decimal("AGC"),
    InfoEntry::decimal("Bit Error"),
    InfoEntry::decimal("Total Bit"),
    InfoEntry::decimal("CNR(int)"),
    InfoEntry::decimal("CNR(dec)"),
    InfoEntry::decimal("Packet Error"),
    InfoEntry::decimal("Total Packet"),
    // Value is routed through the active system's `InfoTable::status`
    InfoEntry::decimal("Status"),
    InfoEntry::list("Error Free", &textlist::ERRORFREE),
];

static DVBT_ENTRIES: [InfoEntry; 11] = [
    InfoEntry::decimal("SQI"),
    InfoEntry::list("Selected Hier.", &textlist::HIERARCHY_SEL),
    InfoEntry::list("TPS Obtain", &textlist::TPS_ALL),
    InfoEntry::list("Mode", &textlist::DVBT_MODE),
    InfoEntry::list("GI", &textlist::DVBT_GI),
    InfoEntry::decimal("LENGTH_INDICATOR"),
    InfoEntry::list("CONSTELLATION", &textlist::DVBT_CONST),
    InfoEntry::list("HIERARCHY", &textlist::DVBT_HIERARCHY),
    InfoEntry::list("HP_CODERATE", &textlist::DVBT_CR),
    InfoEntry::list("LP_CODERATE", &textlist::DVBT_CR),
    InfoEntry::hex("CELLID"),
];

static DVBT2_ENTRIES: [InfoEntry; 76] = [
    InfoEntry::decimal("SQI"),
    InfoEntry::list("MODE", &textlist::DVBT2_MODE),
    InfoEntry::list("GI", &textlist::DVBT2_GI),
    InfoEntry::decimal("BERRNUM_C"),
    InfoEntry::decimal("BITNUM_C"),
    InfoEntry::decimal("SELECTED_PLP"),
    InfoEntry::decimal("L1_ALL"),
    InfoEntry::list("TYPE", &textlist::DVBT2_TYPE),
    InfoEntry::decimal("BW_EXT"),
    InfoEntry::decimal("S1"),
    InfoEntry::decimal("S2"),
    InfoEntry::list("PAPR", &textlist::DVBT2_PAPR),
    InfoEntry::list("L1_MOD", &textlist::DVBT2_L1_MOD),
    InfoEntry::list("L1_COD", &textlist::DVBT2_COD),
    InfoEntry::list("L1_FEC_TYPE", &textlist::DVBT2_FEC_TYPE),
    InfoEntry::decimal("L1_POST_SIZE"),
    InfoEntry::decimal("L1_POST_INFO_SIZE"),
    InfoEntry::list("PILOT_PATTERN", &textlist::DVBT2_PILOT_PATTERN),
    InfoEntry::decimal("TX_ID_AVAILABILITY"),
    InfoEntry::hex("CELL_ID"),
    InfoEntry::hex("NETWORK_ID"),
    InfoEntry::hex("T2_SYSTEM_ID"),
    InfoEntry::decimal("NUM_T2_FRAMES"),
    InfoEntry::decimal("NUM_DATA_SYMBOLS"),
    InfoEntry::decimal("REGEN_FLAG"),
    InfoEntry::decimal("L1_POST_EXTENSION"),
    InfoEntry::decimal("NUM_RF"),
    InfoEntry::decimal("CURRENT_RF_IDX"),
    InfoEntry::decimal("SUB_SLICES_PER_FRAME"),
    InfoEntry::decimal("SUB_SLICE_INTERVAL"),
    InfoEntry::decimal("NUM_PLP"),
    InfoEntry::decimal("NUM_AUX"),
    InfoEntry::list("PLP_MODE", &textlist::DVBT2_PLP_MODE),
    InfoEntry::decimal("FEF_TYPE"),
    InfoEntry::decimal("FEF_LENGTH"),
    InfoEntry::decimal("FEF_INTERVAL"),
    InfoEntry::decimal("DAT_PLP_ID"),
    InfoEntry::list("DAT_PLP_TYPE", &textlist::DVBT2_PLP_TYPE),
    InfoEntry::list("DAT_PLP_PAYLOAD_TYPE", &textlist::DVBT2_PAYLOAD_TYPE),
    InfoEntry::decimal("DAT_PLP_GROUP_ID"),
    InfoEntry::list("DAT_PLP_COD", &textlist::DVBT2_COD),
    InfoEntry::list("DAT_PLP_MOD", &textlist::DVBT2_PLP_MOD),
    InfoEntry::decimal("DAT_PLP_ROTATION"),
    InfoEntry::list("DAT_PLP_FEC_TYPE", &textlist::DVBT2_FEC_TYPE),
    InfoEntry::decimal("DAT_PLP_NUM_BLOCKS_MAX"),
    InfoEntry::decimal("DAT_PLP_FRAME_INTERVAL"),
    InfoEntry::decimal("DAT_PLP_TIME_IL_LENGTH"),
    InfoEntry::decimal("DAT_PLP_TIME_IL_TYPE"),
    InfoEntry::decimal("DAT_FF_FLAG"),
    InfoEntry::decimal("COM_PLP_ID"),
    InfoEntry::list("COM_PLP_TYPE", &textlist::DVBT2_PLP_TYPE),
    InfoEntry::list("COM_PLP_PAYLOAD_TYPE", &textlist::DVBT2_PAYLOAD_TYPE),
    InfoEntry::decimal("COM_PLP_GROUP_ID"),
    InfoEntry::list("COM_PLP_COD", &textlist::DVBT2_COD),
    InfoEntry::list("COM_PLP_MOD", &textlist::DVBT2_PLP_MOD),
    InfoEntry::decimal("COM_PLP_ROTATION"),
    InfoEntry::list("COM_PLP_FEC_TYPE", &textlist::DVBT2_FEC_TYPE),
    InfoEntry::decimal("COM_PLP_NUM_BLOCKS_MAX"),
    InfoEntry::decimal("COM_PLP_FRAME_INTERVAL"),
    InfoEntry::decimal("COM_PLP_TIME_IL_LENGTH"),
    InfoEntry::decimal("COM_PLP_TIME_IL_TYPE"),
    InfoEntry::decimal("COM_FF_FLAG"),
    InfoEntry::decimal("FRAME_IDX"),
    InfoEntry::decimal("TYPE_2_START"),
    InfoEntry::decimal("L1_CHANGE_COUNTER"),
    InfoEntry::decimal("START_RF_IDX"),
    InfoEntry::decimal("DAT_FIRST_RF_IDX"),
    InfoEntry::decimal("DAT_PLP_START"),
    InfoEntry::decimal("DAT_PLP_NUM_BLOCKS"),
    InfoEntry::decimal("COM_FIRST_RF_IDX"),
    InfoEntry::decimal("COM_PLP_START"),
    InfoEntry::decimal("COM_PLP_NUM_BLOCKS"),
    InfoEntry::decimal("STATIC_FLAG"),
    InfoEntry::decimal("STATIC_PADDING_FLAG"),
    InfoEntry::decimal("IN_BAND_A_FLAG"),
    InfoEntry::decimal("IN_BAND_B_FLAG"),
];

static ISDBT_ENTRIES: [InfoEntry; 28] = [
    InfoEntry::decimal("BERRNUM_A"),
    InfoEntry::decimal("BITNUM_A"),
    InfoEntry::decimal("BERRNUM_B"),
    InfoEntry::decimal("BITNUM_B"),
    InfoEntry::decimal("BERRNUM_C"),
    InfoEntry::decimal("BITNUM_C"),
    InfoEntry::list("ERRORFREE_A", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_B", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_C", &textlist::ERRORFREE),
    InfoEntry::list("MODE", &textlist::ISDBT_MODE),
    InfoEntry::list("GI", &textlist::ISDBT_GI),
    InfoEntry::list("SYSTEM", &textlist::ISDBT_SYSTEM),
    InfoEntry::decimal("COUNTDOWN"),
    InfoEntry::list("EMGFLG", &textlist::YESNO),
    InfoEntry::list("Part Reception", &textlist::YESNO),
    InfoEntry::list("Modulation(A)", &textlist::ISDBT_MAP),
    InfoEntry::list("CodeRate(A)", &textlist::ISDBT_CR),
    InfoEntry::list("InterleaveLen.(A)", &textlist::ISDBT_INT),
    InfoEntry::decimal("Segment Num.(A)"),
    InfoEntry::list("Modulation(B)", &textlist::ISDBT_MAP),
    InfoEntry::list("CodeRate(B)", &textlist::ISDBT_CR),
    InfoEntry::list("InterleaveLen.(B)", &textlist::ISDBT_INT),
    InfoEntry::decimal("Segment Num.(B)"),
    InfoEntry::list("Modulation(C)", &textlist::ISDBT_MAP),
    InfoEntry::list("CodeRate(C)", &textlist::ISDBT_CR),
    InfoEntry::list("InterleaveLen.(C)", &textlist::ISDBT_INT),
    InfoEntry::decimal("Segment Num.(C)"),
    InfoEntry::decimal("PhaseShift"),
];

static ISDBS_ENTRIES: [InfoEntry; 82] = [
    InfoEntry::decimal("BERRNUM_1"),
    InfoEntry::decimal("BITNUM_1"),
    InfoEntry::decimal("BERRNUM_2"),
    InfoEntry::decimal("BITNUM_2"),
    InfoEntry::decimal("BERRNUM_3"),
    InfoEntry::decimal("BITNUM_3"),
    InfoEntry::list("ERRORFREE_0", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_1", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_2", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_3", &textlist::ERRORFREE),
    InfoEntry::list("ERRORFREE_T", &textlist::ERRORFREE),
    InfoEntry::decimal("TSNO"),
    InfoEntry::hex("TSID"),
    InfoEntry::hex("Modulation(selected)"),
    InfoEntry::list("Emergency Switch", &textlist::YESNO),
    InfoEntry::decimal("UPLINK"),
    InfoEntry::list("EXON", &textlist::YESNO),
    InfoEntry::decimal("CHANGE"),
    InfoEntry::list("Modulation(Layer0)", &textlist::ISDBS_MOD),
    InfoEntry::decimal("Slot Num. (Layer0)"),
    InfoEntry::list("Modulation(Layer1)", &textlist::ISDBS_MOD),
    InfoEntry::decimal("Slot Num. (Layer1)"),
    InfoEntry::list("Modulation(Layer2)", &textlist::ISDBS_MOD),
    InfoEntry::decimal("Slot Num. (Layer2)"),
    InfoEntry::list("Modulation(Layer3)", &textlist::ISDBS_MOD),
    InfoEntry::decimal("Slot Num. (Layer3)"),
    InfoEntry::hex("TSID0"),
    InfoEntry::hex("TSID1"),
    InfoEntry::hex("TSID2"),
    InfoEntry::hex("TSID3"),
    InfoEntry::hex("TSID4"),
    InfoEntry::hex("TSID5"),
    InfoEntry::hex("TSID6"),
    InfoEntry::hex("TSID7"),
    InfoEntry::decimal("TSNO01"),
    InfoEntry::decimal("TSNO02"),
    InfoEntry::decimal("TSNO03"),
    InfoEntry::decimal("TSNO04"),
    InfoEntry::decimal("TSNO05"),
    InfoEntry::decimal("TSNO06"),
    InfoEntry::decimal("TSNO07"),
    InfoEntry::decimal("TSNO08"),
    InfoEntry::decimal("TSNO09"),
    InfoEntry::decimal("TSNO10"),
    InfoEntry::decimal("TSNO11"),
    InfoEntry::decimal("TSNO12"),
    InfoEntry::decimal("TSNO13"),
    InfoEntry::decimal("TSNO14"),
    InfoEntry::decimal("TSNO15"),
    InfoEntry::decimal("TSNO16"),
    InfoEntry::decimal("TSNO17"),
    InfoEntry::decimal("TSNO18"),
    InfoEntry::decimal("TSNO19"),
    InfoEntry::decimal("TSNO20"),
    InfoEntry::decimal("TSNO21"),
    InfoEntry::decimal("TSNO22"),
    InfoEntry::decimal("TSNO23"),
    InfoEntry::decimal("TSNO24"),
    InfoEntry::decimal("TSNO25"),
    InfoEntry::decimal("TSNO26"),
    InfoEntry::decimal("TSNO27"),
    InfoEntry::decimal("TSNO28"),
    InfoEntry::decimal("TSNO29"),
    InfoEntry::decimal("TSNO30"),
    InfoEntry::decimal("TSNO31"),
    InfoEntry::decimal("TSNO32"),
    InfoEntry::decimal("TSNO33"),
    InfoEntry::decimal("TSNO34"),
    InfoEntry::decimal("TSNO35"),
    InfoEntry::decimal("TSNO36"),
    InfoEntry::decimal("TSNO37"),
    InfoEntry::decimal("TSNO38"),
    InfoEntry::decimal("TSNO39"),
    InfoEntry::decimal("TSNO40"),
    InfoEntry::decimal("TSNO41"),
    InfoEntry::decimal("TSNO42"),
    InfoEntry::decimal("TSNO43"),
    InfoEntry::decimal("TSNO44"),
    InfoEntry::decimal("TSNO45"),
    InfoEntry::decimal("TSNO46"),
    InfoEntry::decimal("TSNO47"),
    InfoEntry::decimal("TSNO48"),
];

pub static DVBT: InfoTable = InfoTable {
    status: ValueFormat::List(&textlist::DVBT_STATUS),
    entries: &DVBT_ENTRIES,
};

pub static DVBT2: InfoTable = InfoTable {
    status: ValueFormat::List(&textlist::DVBT2_STATUS),
    entries: &DVBT2_ENTRIES,
};

pub static ISDBT: InfoTable = InfoTable {
    status: ValueFormat::List(&textlist::DVBT_STATUS),
    entries: &ISDBT_ENTRIES,
};

/// ISDB-S reports STATUS as a raw hex code
pub static ISDBS: InfoTable = InfoTable {
    status: ValueFormat::Hex,
    entries: &ISDBS_ENTRIES,
};

pub static DVBC: InfoTable = InfoTable {
    status: ValueFormat::List(&textlist::DVBC_STATUS),
    entries: &[],
};

/// ATSC and the QAM annexes: STATUS is a plain number
pub static VQ: InfoTable = InfoTable {
    status: ValueFormat::Decimal,
    entries: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ids;

    #[test]
    fn test_table_ends_match_ids() {
        assert_eq!(DVBT.end(), ids::DVBT_END);
        assert_eq!(DVBT2.end(), ids::DVBT2_END);
        assert_eq!(ISDBT.end(), ids::ISDBT_END);
        assert_eq!(ISDBS.end(), ids::ISDBS_END);
        assert_eq!(DVBC.end(), ids::DVBC_END);
    }

    #[test]
    fn test_named_ids_line_up() {
        assert_eq!(DVBT.entry(ids::DVBT_LP_CODERATE).map(|e| e.title), Some("LP_CODERATE"));
        assert_eq!(DVBT.entry(ids::DVBT_CELLID).map(|e| e.title), Some("CELLID"));
        assert_eq!(DVBT2.entry(ids::DVBT2_DAT_PLP_MOD).map(|e| e.title), Some("DAT_PLP_MOD"));
        assert_eq!(DVBT2.entry(ids::DVBT2_IN_BAND_B_FLAG).map(|e| e.title), Some("IN_BAND_B_FLAG"));
        assert_eq!(ISDBT.entry(ids::ISDBT_PHCOR).map(|e| e.title), Some("PhaseShift"));
        assert_eq!(ISDBS.entry(ids::ISDBS_TSID7).map(|e| e.title), Some("TSID7"));
        assert_eq!(ISDBS.entry(ids::ISDBS_TSNO48).map(|e| e.title), Some("TSNO48"));
    }

    #[test]
    fn test_entry_outside_table() {
        assert!(DVBT.entry(ids::LOCK).is_none());
        assert!(DVBT.entry(ids::DVBT_END).is_none());
        assert!(DVBC.entry(COMMON_END).is_none());
    }

    #[test]
    fn test_render() {
        assert_eq!(ValueFormat::Decimal.render(42), "42");
        assert_eq!(ValueFormat::Hex.render(0x3fa), "0x3fa");
        assert_eq!(ValueFormat::List(&textlist::DVBT_GI).render(2), "1/8");
        assert_eq!(ValueFormat::List(&textlist::DVBT_GI).render(9), textlist::NOT_DEFINED);
    }
}
