//! Fixed-point math used by the signal quality calculations
//!
//! Everything here is integer-only: logarithms are in 1/1000 units and
//! bit error rates in 1e-7 units.

/// 1 unit of a scaled BER is 10^-7
pub const BER_UNIT: u32 = 10_000_000;

/// 1000 * log10(x / 10) for x in 0..=100 (index 0 is unused)
const LOG_TABLE: [i32; 101] = [
    0, -1000, -699, -523, -398, -301, -222, -155, -97, -46,
    0, 41, 79, 114, 146, 176, 204, 230, 255, 279,
    301, 322, 342, 362, 380, 398, 415, 431, 447, 462,
    477, 491, 505, 519, 531, 544, 556, 568, 580, 591,
    602, 613, 623, 633, 643, 653, 663, 672, 681, 690,
    699, 708, 716, 724, 732, 740, 748, 756, 763, 771,
    778, 785, 792, 799, 806, 813, 820, 826, 833, 839,
    845, 851, 857, 863, 869, 875, 881, 886, 892, 898,
    903, 908, 914, 919, 924, 929, 934, 940, 944, 949,
    954, 959, 964, 968, 973, 978, 982, 987, 991, 996,
    1000,
];

/// Chord error coefficient: (1000 / ln 10) / 2
const CHORD_CORRECTION: u128 = 217;

/// 1000 * log10(value)
///
/// Values up to 100 come straight from the table. Larger values are divided
/// down by 10 until they land in [10, 100), adding 1000 per division, and
/// the remainder is interpolated between neighbouring table entries with a
/// second order correction for the curvature of the log. Returns 0 for 0.
pub fn integer_log10(value: u32) -> i32 {
    if value == 0 {
        return 0;
    }
    if value <= 100 {
        return LOG_TABLE[value as usize] + 1000;
    }

    let mut scale: u32 = 1;
    let mut exponent: i32 = 0;
    while value / scale >= 100 {
        scale *= 10;
        exponent += 1;
    }

    let idx = (value / scale) as usize;
    let rem = u128::from(value % scale);
    let p = u128::from(scale);
    let lo = LOG_TABLE[idx];
    let step = (LOG_TABLE[idx + 1] - lo) as u128;
    let idx_sq = (idx * idx) as u128;

    let denom = p * p * idx_sq;
    let numer = step * rem * p * idx_sq + CHORD_CORRECTION * rem * (p - rem);
    let frac = ((numer + denom / 2) / denom) as i32;

    1000 * exponent + 1000 + lo + frac
}

/// errors / total scaled so that 1 == 10^-7
///
/// A zero total or errors >= total carries no usable ratio and reports the
/// worst case (`BER_UNIT`).
pub fn ber_scaled(errors: u32, total: u32) -> u32 {
    if total == 0 || errors >= total {
        return BER_UNIT;
    }
    // errors < total <= u32::MAX, so the widened product cannot overflow
    // and the quotient is below BER_UNIT.
    (u64::from(errors) * u64::from(BER_UNIT) / u64::from(total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn true_log(v: u32) -> f64 {
        1000.0 * (v as f64).log10()
    }

    #[test]
    fn test_log10_table_points() {
        assert_eq!(integer_log10(1), 0);
        assert_eq!(integer_log10(10), 1000);
        assert_eq!(integer_log10(100), 2000);
        assert_eq!(integer_log10(1000), 3000);
        assert_eq!(integer_log10(10_000_000), 7000);
        assert_eq!(integer_log10(2), 301);
        assert_eq!(integer_log10(50), 1699);
    }

    #[test]
    fn test_log10_accuracy() {
        for v in 1..=10_000u32 {
            let err = (integer_log10(v) as f64 - true_log(v)).abs();
            assert!(err <= 1.0, "log10({}) off by {}", v, err);
        }
    }

    #[test]
    fn test_log10_large_values() {
        for v in [123_456u32, 9_999_999, 100_000_000, u32::MAX] {
            let err = (integer_log10(v) as f64 - true_log(v)).abs();
            assert!(err <= 1.0, "log10({}) off by {}", v, err);
        }
    }

    #[test]
    fn test_log10_zero() {
        assert_eq!(integer_log10(0), 0);
    }

    #[test]
    fn test_ber_degenerate() {
        assert_eq!(ber_scaled(0, 0), BER_UNIT);
        assert_eq!(ber_scaled(5, 0), BER_UNIT);
        assert_eq!(ber_scaled(1000, 1000), BER_UNIT);
        assert_eq!(ber_scaled(2000, 1000), BER_UNIT);
    }

    #[test]
    fn test_ber_values() {
        assert_eq!(ber_scaled(0, 1000), 0);
        assert_eq!(ber_scaled(1, 1000), 10_000);
        assert_eq!(ber_scaled(500, 1000), 5_000_000);
        assert_eq!(ber_scaled(3, 4_000_000_000), 0);
        assert_eq!(ber_scaled(4_000_000_000, u32::MAX), 9_313_225);
    }

    #[test]
    fn test_ber_monotonic() {
        for total in [1_000u32, 110_000_000, u32::MAX] {
            let mut last = 0;
            for errors in 0..5_000u32.min(total) {
                let ber = ber_scaled(errors, total);
                assert!(ber >= last, "ber dropped at {}/{}", errors, total);
                last = ber;
            }
        }
    }
}
