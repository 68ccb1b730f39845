//! Information IDs
//!
//! One flat ID space shared by every broadcast system. IDs below
//! `COMMON_END` mean the same thing for every system; IDs from
//! `COMMON_END` upward are reused by each system for its own fields, so
//! they only have meaning together with the active `Standard`.

/// Index into the session's telemetry slots
pub type InfoId = u32;

// Common to all systems
pub const ALL: InfoId = 0;
pub const REGREV: InfoId = 1;
pub const PSEQREV: InfoId = 2;
pub const SYSTEM: InfoId = 3;
pub const LOCK: InfoId = 4;
pub const AGC: InfoId = 5;
pub const BERRNUM: InfoId = 6;
pub const BITNUM: InfoId = 7;
pub const CNR_INT: InfoId = 8;
pub const CNR_DEC: InfoId = 9;
pub const PERRNUM: InfoId = 10;
pub const PACKETNUM: InfoId = 11;
/// Title is common, value is decoded per system
pub const STATUS: InfoId = 12;
pub const ERRORFREE: InfoId = 13;
pub const COMMON_END: InfoId = 14;

// DVB-T
pub const DVBT_SQI: InfoId = COMMON_END;
pub const DVBT_HIERARCHY_SELECT: InfoId = COMMON_END + 1;
pub const DVBT_TPS_ALL: InfoId = COMMON_END + 2;
pub const DVBT_MODE: InfoId = COMMON_END + 3;
pub const DVBT_GI: InfoId = COMMON_END + 4;
pub const DVBT_LENGTH_INDICATOR: InfoId = COMMON_END + 5;
pub const DVBT_CONSTELLATION: InfoId = COMMON_END + 6;
pub const DVBT_HIERARCHY: InfoId = COMMON_END + 7;
pub const DVBT_HP_CODERATE: InfoId = COMMON_END + 8;
pub const DVBT_LP_CODERATE: InfoId = COMMON_END + 9;
pub const DVBT_CELLID: InfoId = COMMON_END + 10;
pub const DVBT_END: InfoId = COMMON_END + 11;

// DVB-T2
pub const DVBT2_SQI: InfoId = COMMON_END;
pub const DVBT2_MODE: InfoId = COMMON_END + 1;
pub const DVBT2_GI: InfoId = COMMON_END + 2;
pub const DVBT2_BERRNUM_C: InfoId = COMMON_END + 3;
pub const DVBT2_BITNUM_C: InfoId = COMMON_END + 4;
pub const DVBT2_SELECTED_PLP: InfoId = COMMON_END + 5;
pub const DVBT2_L1_ALL: InfoId = COMMON_END + 6;
pub const DVBT2_TYPE: InfoId = COMMON_END + 7;
pub const DVBT2_BW_EXT: InfoId = COMMON_END + 8;
pub const DVBT2_S1: InfoId = COMMON_END + 9;
pub const DVBT2_S2: InfoId = COMMON_END + 10;
pub const DVBT2_PAPR: InfoId = COMMON_END + 11;
pub const DVBT2_L1_MOD: InfoId = COMMON_END + 12;
pub const DVBT2_L1_COD: InfoId = COMMON_END + 13;
pub const DVBT2_L1_FEC_TYPE: InfoId = COMMON_END + 14;
pub const DVBT2_L1_POST_SIZE: InfoId = COMMON_END + 15;
pub const DVBT2_L1_POST_INFO_SIZE: InfoId = COMMON_END + 16;
pub const DVBT2_PILOT_PATTERN: InfoId = COMMON_END + 17;
pub const DVBT2_TX_ID_AVAILABILITY: InfoId = COMMON_END + 18;
pub const DVBT2_CELL_ID: InfoId = COMMON_END + 19;
pub const DVBT2_NETWORK_ID: InfoId = COMMON_END + 20;
pub const DVBT2_T2_SYSTEM_ID: InfoId = COMMON_END + 21;
pub const DVBT2_NUM_T2_FRAMES: InfoId = COMMON_END + 22;
pub const DVBT2_NUM_DATA_SYMBOLS: InfoId = COMMON_END + 23;
pub const DVBT2_REGEN_FLAG: InfoId = COMMON_END + 24;
pub const DVBT2_L1_POST_EXTENSION: InfoId = COMMON_END + 25;
pub const DVBT2_NUM_RF: InfoId = COMMON_END + 26;
pub const DVBT2_CURRENT_RF_IDX: InfoId = COMMON_END + 27;
pub const DVBT2_SUB_SLICES_PER_FRAME: InfoId = COMMON_END + 28;
pub const DVBT2_SUB_SLICE_INTERVAL: InfoId = COMMON_END + 29;
pub const DVBT2_NUM_PLP: InfoId = COMMON_END + 30;
pub const DVBT2_NUM_AUX: InfoId = COMMON_END + 31;
pub const DVBT2_PLP_MODE: InfoId = COMMON_END + 32;
pub const DVBT2_FEF_TYPE: InfoId = COMMON_END + 33;
pub const DVBT2_FEF_LENGTH: InfoId = COMMON_END + 34;
pub const DVBT2_FEF_INTERVAL: InfoId = COMMON_END + 35;
pub const DVBT2_DAT_PLP_ID: InfoId = COMMON_END + 36;
pub const DVBT2_DAT_PLP_TYPE: InfoId = COMMON_END + 37;
pub const DVBT2_DAT_PLP_PAYLOAD_TYPE: InfoId = COMMON_END + 38;
pub const DVBT2_DAT_PLP_GROUP_ID: InfoId = COMMON_END + 39;
pub const DVBT2_DAT_PLP_COD: InfoId = COMMON_END + 40;
pub const DVBT2_DAT_PLP_MOD: InfoId = COMMON_END + 41;
pub const DVBT2_DAT_PLP_ROTATION: InfoId = COMMON_END + 42;
pub const DVBT2_DAT_PLP_FEC_TYPE: InfoId = COMMON_END + 43;
pub const DVBT2_DAT_PLP_NUM_BLOCKS_MAX: InfoId = COMMON_END + 44;
pub const DVBT2_DAT_PLP_FRAME_INTERVAL: InfoId = COMMON_END + 45;
pub const DVBT2_DAT_PLP_TIME_IL_LENGTH: InfoId = COMMON_END + 46;
pub const DVBT2_DAT_PLP_TIME_IL_TYPE: InfoId = COMMON_END + 47;
pub const DVBT2_DAT_FF_FLAG: InfoId = COMMON_END + 48;
pub const DVBT2_COM_PLP_ID: InfoId = COMMON_END + 49;
pub const DVBT2_COM_PLP_TYPE: InfoId = COMMON_END + 50;
pub const DVBT2_COM_PLP_PAYLOAD_TYPE: InfoId = COMMON_END + 51;
pub const DVBT2_COM_PLP_GROUP_ID: InfoId = COMMON_END + 52;
pub const DVBT2_COM_PLP_COD: InfoId = COMMON_END + 53;
pub const DVBT2_COM_PLP_MOD: InfoId = COMMON_END + 54;
pub const DVBT2_COM_PLP_ROTATION: InfoId = COMMON_END + 55;
pub const DVBT2_COM_PLP_FEC_TYPE: InfoId = COMMON_END + 56;
pub const DVBT2_COM_PLP_NUM_BLOCKS_MAX: InfoId = COMMON_END + 57;
pub const DVBT2_COM_PLP_FRAME_INTERVAL: InfoId = COMMON_END + 58;
pub const DVBT2_COM_PLP_TIME_IL_LENGTH: InfoId = COMMON_END + 59;
pub const DVBT2_COM_PLP_TIME_IL_TYPE: InfoId = COMMON_END + 60;
pub const DVBT2_COM_FF_FLAG: InfoId = COMMON_END + 61;
pub const DVBT2_FRAME_IDX: InfoId = COMMON_END + 62;
pub const DVBT2_TYPE_2_START: InfoId = COMMON_END + 63;
pub const DVBT2_L1_CHANGE_COUNTER: InfoId = COMMON_END + 64;
pub const DVBT2_START_RF_IDX: InfoId = COMMON_END + 65;
pub const DVBT2_DAT_FIRST_RF_IDX: InfoId = COMMON_END + 66;
pub const DVBT2_DAT_PLP_START: InfoId = COMMON_END + 67;
pub const DVBT2_DAT_PLP_NUM_BLOCKS: InfoId = COMMON_END + 68;
pub const DVBT2_COM_FIRST_RF_IDX: InfoId = COMMON_END + 69;
pub const DVBT2_COM_PLP_START: InfoId = COMMON_END + 70;
pub const DVBT2_COM_PLP_NUM_BLOCKS: InfoId = COMMON_END + 71;
pub const DVBT2_STATIC_FLAG: InfoId = COMMON_END + 72;
pub const DVBT2_STATIC_PADDING_FLAG: InfoId = COMMON_END + 73;
pub const DVBT2_IN_BAND_A_FLAG: InfoId = COMMON_END + 74;
pub const DVBT2_IN_BAND_B_FLAG: InfoId = COMMON_END + 75;
pub const DVBT2_END: InfoId = COMMON_END + 76;

// ISDB-T (also ISDB-T Brazil)
pub const ISDBT_BERRNUM_A: InfoId = COMMON_END;
pub const ISDBT_BITNUM_A: InfoId = COMMON_END + 1;
pub const ISDBT_BERRNUM_B: InfoId = COMMON_END + 2;
pub const ISDBT_BITNUM_B: InfoId = COMMON_END + 3;
pub const ISDBT_BERRNUM_C: InfoId = COMMON_END + 4;
pub const ISDBT_BITNUM_C: InfoId = COMMON_END + 5;
pub const ISDBT_ERRORFREE_A: InfoId = COMMON_END + 6;
pub const ISDBT_ERRORFREE_B: InfoId = COMMON_END + 7;
pub const ISDBT_ERRORFREE_C: InfoId = COMMON_END + 8;
pub const ISDBT_MODE: InfoId = COMMON_END + 9;
pub const ISDBT_GI: InfoId = COMMON_END + 10;
pub const ISDBT_SYS_TMCC: InfoId = COMMON_END + 11;
pub const ISDBT_COUNTDOWN: InfoId = COMMON_END + 12;
pub const ISDBT_EMGFLG: InfoId = COMMON_END + 13;
pub const ISDBT_PART: InfoId = COMMON_END + 14;
pub const ISDBT_MAPA: InfoId = COMMON_END + 15;
pub const ISDBT_CRA: InfoId = COMMON_END + 16;
pub const ISDBT_INTA: InfoId = COMMON_END + 17;
pub const ISDBT_SEGA: InfoId = COMMON_END + 18;
pub const ISDBT_MAPB: InfoId = COMMON_END + 19;
pub const ISDBT_CRB: InfoId = COMMON_END + 20;
pub const ISDBT_INTB: InfoId = COMMON_END + 21;
pub const ISDBT_SEGB: InfoId = COMMON_END + 22;
pub const ISDBT_MAPC: InfoId = COMMON_END + 23;
pub const ISDBT_CRC: InfoId = COMMON_END + 24;
pub const ISDBT_INTC: InfoId = COMMON_END + 25;
pub const ISDBT_SEGC: InfoId = COMMON_END + 26;
pub const ISDBT_PHCOR: InfoId = COMMON_END + 27;
pub const ISDBT_END: InfoId = COMMON_END + 28;

// ISDB-S: named fields, then TSID0-7 and the 48 TS numbers
pub const ISDBS_BERRNUM_1: InfoId = COMMON_END;
pub const ISDBS_BITNUM_1: InfoId = COMMON_END + 1;
pub const ISDBS_BERRNUM_2: InfoId = COMMON_END + 2;
pub const ISDBS_BITNUM_2: InfoId = COMMON_END + 3;
pub const ISDBS_BERRNUM_3: InfoId = COMMON_END + 4;
pub const ISDBS_BITNUM_3: InfoId = COMMON_END + 5;
pub const ISDBS_ERRORFREE_0: InfoId = COMMON_END + 6;
pub const ISDBS_ERRORFREE_1: InfoId = COMMON_END + 7;
pub const ISDBS_ERRORFREE_2: InfoId = COMMON_END + 8;
pub const ISDBS_ERRORFREE_3: InfoId = COMMON_END + 9;
pub const ISDBS_ERRORFREE_T: InfoId = COMMON_END + 10;
pub const ISDBS_TSNO: InfoId = COMMON_END + 11;
pub const ISDBS_TSID: InfoId = COMMON_END + 12;
pub const ISDBS_MOD: InfoId = COMMON_END + 13;
pub const ISDBS_EMGSW: InfoId = COMMON_END + 14;
pub const ISDBS_UPLINK: InfoId = COMMON_END + 15;
pub const ISDBS_EXON: InfoId = COMMON_END + 16;
pub const ISDBS_CHANGE: InfoId = COMMON_END + 17;
pub const ISDBS_MOD0: InfoId = COMMON_END + 18;
pub const ISDBS_SLOT0: InfoId = COMMON_END + 19;
pub const ISDBS_MOD1: InfoId = COMMON_END + 20;
pub const ISDBS_SLOT1: InfoId = COMMON_END + 21;
pub const ISDBS_MOD2: InfoId = COMMON_END + 22;
pub const ISDBS_SLOT2: InfoId = COMMON_END + 23;
pub const ISDBS_MOD3: InfoId = COMMON_END + 24;
pub const ISDBS_SLOT3: InfoId = COMMON_END + 25;
pub const ISDBS_TSID0: InfoId = COMMON_END + 26;
pub const ISDBS_TSID1: InfoId = COMMON_END + 27;
pub const ISDBS_TSID2: InfoId = COMMON_END + 28;
pub const ISDBS_TSID3: InfoId = COMMON_END + 29;
pub const ISDBS_TSID4: InfoId = COMMON_END + 30;
pub const ISDBS_TSID5: InfoId = COMMON_END + 31;
pub const ISDBS_TSID6: InfoId = COMMON_END + 32;
pub const ISDBS_TSID7: InfoId = COMMON_END + 33;
pub const ISDBS_TSNO01: InfoId = COMMON_END + 34;
pub const ISDBS_TSNO02: InfoId = COMMON_END + 35;
pub const ISDBS_TSNO03: InfoId = COMMON_END + 36;
pub const ISDBS_TSNO04: InfoId = COMMON_END + 37;
pub const ISDBS_TSNO05: InfoId = COMMON_END + 38;
pub const ISDBS_TSNO06: InfoId = COMMON_END + 39;
pub const ISDBS_TSNO07: InfoId = COMMON_END + 40;
pub const ISDBS_TSNO08: InfoId = COMMON_END + 41;
pub const ISDBS_TSNO09: InfoId = COMMON_END + 42;
pub const ISDBS_TSNO10: InfoId = COMMON_END + 43;
pub const ISDBS_TSNO11: InfoId = COMMON_END + 44;
pub const ISDBS_TSNO12: InfoId = COMMON_END + 45;
pub const ISDBS_TSNO13: InfoId = COMMON_END + 46;
pub const ISDBS_TSNO14: InfoId = COMMON_END + 47;
pub const ISDBS_TSNO15: InfoId = COMMON_END + 48;
pub const ISDBS_TSNO16: InfoId = COMMON_END + 49;
pub const ISDBS_TSNO17: InfoId = COMMON_END + 50;
pub const ISDBS_TSNO18: InfoId = COMMON_END + 51;
pub const ISDBS_TSNO19: InfoId = COMMON_END + 52;
pub const ISDBS_TSNO20: InfoId = COMMON_END + 53;
pub const ISDBS_TSNO21: InfoId = COMMON_END + 54;
pub const ISDBS_TSNO22: InfoId = COMMON_END + 55;
pub const ISDBS_TSNO23: InfoId = COMMON_END + 56;
pub const ISDBS_TSNO24: InfoId = COMMON_END + 57;
pub const ISDBS_TSNO25: InfoId = COMMON_END + 58;
pub const ISDBS_TSNO26: InfoId = COMMON_END + 59;
pub const ISDBS_TSNO27: InfoId = COMMON_END + 60;
pub const ISDBS_TSNO28: InfoId = COMMON_END + 61;
pub const ISDBS_TSNO29: InfoId = COMMON_END + 62;
pub const ISDBS_TSNO30: InfoId = COMMON_END + 63;
pub const ISDBS_TSNO31: InfoId = COMMON_END + 64;
pub const ISDBS_TSNO32: InfoId = COMMON_END + 65;
pub const ISDBS_TSNO33: InfoId = COMMON_END + 66;
pub const ISDBS_TSNO34: InfoId = COMMON_END + 67;
pub const ISDBS_TSNO35: InfoId = COMMON_END + 68;
pub const ISDBS_TSNO36: InfoId = COMMON_END + 69;
pub const ISDBS_TSNO37: InfoId = COMMON_END + 70;
pub const ISDBS_TSNO38: InfoId = COMMON_END + 71;
pub const ISDBS_TSNO39: InfoId = COMMON_END + 72;
pub const ISDBS_TSNO40: InfoId = COMMON_END + 73;
pub const ISDBS_TSNO41: InfoId = COMMON_END + 74;
pub const ISDBS_TSNO42: InfoId = COMMON_END + 75;
pub const ISDBS_TSNO43: InfoId = COMMON_END + 76;
pub const ISDBS_TSNO44: InfoId = COMMON_END + 77;
pub const ISDBS_TSNO45: InfoId = COMMON_END + 78;
pub const ISDBS_TSNO46: InfoId = COMMON_END + 79;
pub const ISDBS_TSNO47: InfoId = COMMON_END + 80;
pub const ISDBS_TSNO48: InfoId = COMMON_END + 81;
pub const ISDBS_END: InfoId = COMMON_END + 82;

// DVB-C, ATSC and QAM have no system specific fields
pub const DVBC_END: InfoId = COMMON_END;
