//! Exact combinatorics.
//!
//! Binomial coefficients are computed as arbitrary-precision integers so that
//! likelihood ratios built from them stay exact until the final division.
//!
//! # Example
//!
//! ```
//! use bayes_urns::stats::combinatorics::{binomial, ratio_to_f64};
//! use num_bigint::BigUint;
//!
//! assert_eq!(binomial(5, 2), BigUint::from(10u32));
//! assert_eq!(binomial(5, 6), BigUint::from(0u32));
//!
//! // C(3,1) / C(4,2) = 3 / 6
//! let p = ratio_to_f64(&binomial(3, 1), &binomial(4, 2));
//! assert!((p - 0.5).abs() < 1e-15);
//! ```

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Minimum bit length of the scaled integer quotient in [`ratio_to_f64`].
///
/// Leaves at least 12 bits below the 53-bit mantissa for rounding.
const QUOTIENT_BITS: i64 = 66;

/// Exponent of the smallest normal `f64` (2^-1022).
const MIN_NORMAL_EXP: i64 = f64::MIN_EXP as i64 - 1;

/// Exponent of the smallest subnormal `f64` (2^-1074).
const MIN_SUBNORMAL_EXP: i64 = MIN_NORMAL_EXP - (f64::MANTISSA_DIGITS as i64 - 1);

/// Number of ways to choose `k` items from `n`, exactly.
///
/// Returns zero when `k < 0` or `k > n`; likelihood models rely on this to
/// express impossible draws.
///
/// Works on `min(k, n - k)` factors, multiplying and dividing alternately so
/// that the running value after step `t` is exactly `C(n, t + 1)`.
#[must_use]
pub fn binomial(n: u64, k: i64) -> BigUint {
    let Ok(k) = u64::try_from(k) else {
        return BigUint::zero();
    };
    if k > n {
        return BigUint::zero();
    }

    let k = k.min(n - k);
    let mut acc = BigUint::one();
    for t in 0..k {
        acc *= n - t;
        acc /= t + 1;
    }
    acc
}

/// Converts the exact ratio `numerator / denominator` to the nearest `f64`
/// (ties to even).
///
/// The quotient is computed as an integer of at least [`QUOTIENT_BITS`] bits,
/// with a sticky bit for any nonzero remainder, and rounded once to the
/// precision available at its binary exponent. Operands far beyond
/// `f64::MAX` are fine; results below the normal range come out subnormal,
/// and only ratios under half the smallest subnormal round to `0.0`.
/// A zero denominator yields `NaN`.
#[must_use]
pub fn ratio_to_f64(numerator: &BigUint, denominator: &BigUint) -> f64 {
    if denominator.is_zero() {
        return f64::NAN;
    }
    if numerator.is_zero() {
        return 0.0;
    }

    // value = quotient · 2^-scale, with quotient >= 2^(QUOTIENT_BITS - 1).
    let scale = QUOTIENT_BITS + bit_length(denominator) - bit_length(numerator);
    let (dividend, divisor) = if scale >= 0 {
        (numerator << scale.unsigned_abs(), denominator.clone())
    } else {
        (numerator.clone(), denominator << scale.unsigned_abs())
    };
    let mut quotient = &dividend / &divisor;
    if !(&dividend % &divisor).is_zero() {
        quotient |= BigUint::one();
    }

    let quotient_bits = bit_length(&quotient);
    let exponent = quotient_bits - 1 - scale;
    if exponent >= i64::from(f64::MAX_EXP) {
        return f64::INFINITY;
    }
    let precision = if exponent >= MIN_NORMAL_EXP {
        i64::from(f64::MANTISSA_DIGITS)
    } else {
        exponent - MIN_SUBNORMAL_EXP + 1
    };
    if precision < 0 {
        return 0.0;
    }

    let dropped_bits = quotient_bits - precision;
    let kept = &quotient >> dropped_bits.unsigned_abs();
    let dropped = &quotient - (&kept << dropped_bits.unsigned_abs());
    let half = BigUint::one() << (dropped_bits - 1).unsigned_abs();

    // At most 53 bits remain.
    let mut mantissa = kept.to_u64().unwrap_or(0);
    if dropped > half || (dropped == half && mantissa & 1 == 1) {
        mantissa += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let mantissa = mantissa as f64;
    mantissa * pow2(dropped_bits - scale)
}

fn bit_length(value: &BigUint) -> i64 {
    i64::try_from(value.bits()).unwrap_or(i64::MAX)
}

/// Exact `2^exponent` for `exponent` in `[-1074, 1023]`.
fn pow2(exponent: i64) -> f64 {
    let bits = if exponent >= MIN_NORMAL_EXP {
        (exponent - MIN_NORMAL_EXP + 1).unsigned_abs() << (f64::MANTISSA_DIGITS - 1)
    } else {
        1u64 << (exponent - MIN_SUBNORMAL_EXP).unsigned_abs()
    };
    f64::from_bits(bits)
}

/// Signed view of a count, for `k` arguments of [`binomial`] built from
/// differences. Saturates so that out-of-range inputs stay impossible draws.
pub(crate) fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
