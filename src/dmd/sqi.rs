//! Signal Quality Indicator (Nordig)
//!
//! SQI blends the CNR margin above the required CNR for the current
//! modulation/code rate with the pre-RS bit error rate, on a 0-100 scale.

use super::math::integer_log10;
use super::types::{DemodParameter, Standard};
use crate::info::ids;

/// Required CNR (x100) for DVB-T, [constellation][code rate]
///
/// Constellation: QPSK, 16QAM, 64QAM. Code rate: 1/2, 2/3, 3/4, 5/6, 7/8.
pub const DVBT_CNR_P1: [[u32; 5]; 3] = [
    [510, 690, 790, 890, 970],
    [1080, 1310, 1460, 1560, 1600],
    [1650, 1870, 2020, 2160, 2250],
];

/// Required CNR (x100) for DVB-T2, [PLP modulation][PLP code rate]
///
/// Modulation: QPSK, 16QAM, 64QAM, 256QAM. Code rate: 1/2, 3/5, 2/3, 3/4, 4/5, 5/6.
pub const DVBT2_CNR_P1: [[u32; 6]; 4] = [
    [350, 470, 560, 660, 720, 770],
    [870, 1010, 1140, 1250, 1330, 1380],
    [1300, 1480, 1620, 1770, 1870, 1940],
    [1700, 1940, 2080, 2290, 2430, 2510],
];

/// Inverse BER used when no bit errors were counted
const BERI_ERROR_FREE: u32 = 100_000_000;

/// Margin below which the signal is unusable (x100 dB)
const CNR_REL_FLOOR: i64 = -700;

/// Margin above which CNR no longer limits the score (x100 dB)
const CNR_REL_KNEE: i64 = 300;

/// Required CNR (x100) for a modulation/code rate pair, if tabulated
pub fn required_cnr(standard: Standard, modulation: u32, code_rate: u32) -> Option<u32> {
    let (m, c) = (modulation as usize, code_rate as usize);
    match standard {
        Standard::Dvbt => DVBT_CNR_P1.get(m)?.get(c).copied(),
        Standard::Dvbt2 => DVBT2_CNR_P1.get(m)?.get(c).copied(),
        _ => None,
    }
}

/// BER part of the score, from the inverse error rate (bits per error)
fn ber_score(beri: u32) -> i64 {
    if beri < 1_000 {
        // BER worse than 1e-3
        0
    } else if beri < 10_000_000 {
        (20 * i64::from(integer_log10(beri)) - 40_000) / 1_000
    } else {
        100
    }
}

/// Signal Quality Indicator, 0-100
///
/// Returns 0 for systems without a CNR table (only DVB-T and DVB-T2 have
/// one) and for modulation/code rate indices outside the table.
pub fn compute_sqi(
    standard: Standard,
    cnr_int: u32,
    cnr_dec: u32,
    modulation: u32,
    code_rate: u32,
    bit_errors: u32,
    bit_total: u32,
) -> u32 {
    let Some(required) = required_cnr(standard, modulation, code_rate) else {
        return 0;
    };

    let cnr = i64::from(cnr_int) * 100 + i64::from(cnr_dec);
    let cnr_rel = cnr - i64::from(required);
    if cnr_rel < CNR_REL_FLOOR {
        return 0;
    }

    let beri = if bit_errors != 0 {
        bit_total / bit_errors
    } else {
        BERI_ERROR_FREE
    };
    let ber_sqi = ber_score(beri);

    let sqi = if cnr_rel <= CNR_REL_KNEE {
        (((cnr_rel - CNR_REL_KNEE) / 10) + 100) * ber_sqi / 100
    } else {
        ber_sqi
    };

    sqi.clamp(0, 100) as u32
}

/// SQI of the session from its telemetry slots
///
/// DVB-T uses the LP code rate, DVB-T2 the data PLP modulation/code rate.
pub fn calc_sqi(param: &DemodParameter) -> u32 {
    let (modulation, code_rate) = match param.system {
        Standard::Dvbt => (
            param.info(ids::DVBT_CONSTELLATION),
            param.info(ids::DVBT_LP_CODERATE),
        ),
        Standard::Dvbt2 => (
            param.info(ids::DVBT2_DAT_PLP_MOD),
            param.info(ids::DVBT2_DAT_PLP_COD),
        ),
        _ => return 0,
    };

    compute_sqi(
        param.system,
        param.info(ids::CNR_INT),
        param.info(ids::CNR_DEC),
        modulation,
        code_rate,
        param.info(ids::BERRNUM),
        param.info(ids::BITNUM),
    )
}
