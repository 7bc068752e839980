// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{construct_sint, error::FixedPointError};
use ::uint::construct_uint;
use std::fmt;

// these have scuffed doc comments because the macro codegens the beginning of them
construct_uint! {
    /// with 512-bits of precision, consisting of eight 64-bit words.
    pub struct U512(8);
}

construct_uint! {
    /// with 256-bits of precision, consisting of four 64-bit words.
    pub struct U256(4);
}

impl U256 {
    #[inline]
    pub fn wrapping_add(&self, other: U256) -> U256 {
        let (result, _) = self.overflowing_add(other);

        result
    }

    #[inline]
    pub fn wrapping_sub(&self, other: U256) -> U256 {
        let (result, _) = self.overflowing_sub(other);

        result
    }

    /// 10^exp, failing once the power leaves 256 bits (exp > 77)
    #[inline]
    pub fn checked_pow10(exp: u32) -> Option<U256> {
        U256::from(10u8).checked_pow(U256::from(exp))
    }
}

impl From<U256> for U512 {
    fn from(value: U256) -> U512 {
        let U256(ref arr) = value;

        U512([arr[0], arr[1], arr[2], arr[3], 0, 0, 0, 0])
    }
}

impl TryFrom<U512> for U256 {
    type Error = FixedPointError;

    fn try_from(value: U512) -> Result<U256, Self::Error> {
        let U512(ref arr) = value;
        if arr[4..].iter().any(|word| *word != 0) {
            return Err(FixedPointError::IntegerConversionError);
        }

        Ok(U256([arr[0], arr[1], arr[2], arr[3]]))
    }
}

/* Signed Integers */

construct_sint! {
    /// 256-bit two's-complement signed integer
    pub struct I256(U256);
}

// I256 -> i128
impl TryFrom<I256> for i128 {
    type Error = FixedPointError;

    fn try_from(v: I256) -> Result<Self, Self::Error> {
        let neg = v.is_negative();
        let U256(ref a) = v.to_unsigned(); // LE limbs: [lo, mid1, mid2, hi]

        if !neg {
            // non-negative must have all bits >=128 clear AND bit127 clear
            if a[3] != 0 || a[2] != 0 || (a[1] >> 63) != 0 {
                return Err(FixedPointError::IntegerConversionError);
            }
        } else {
            // negative must be proper sign-extension: bits 128..255 all ones
            // and bit127 set (>= i128::MIN)
            if a[3] != u64::MAX || a[2] != u64::MAX || (a[1] >> 63) == 0 {
                return Err(FixedPointError::IntegerConversionError);
            }
        }

        let lo128 = ((a[1] as u128) << 64) | (a[0] as u128);
        Ok(lo128 as i128)
    }
}

impl TryFrom<I256> for u128 {
    type Error = FixedPointError;

    fn try_from(v: I256) -> Result<Self, Self::Error> {
        if v.is_negative() { return Err(FixedPointError::IntegerConversionError); }
        let U256(ref a) = v.to_unsigned();
        // must fit in lower 128 bits
        if a[2] != 0 || a[3] != 0 { return Err(FixedPointError::IntegerConversionError); }
        Ok(((a[1] as u128) << 64) | (a[0] as u128))
    }
}

impl TryFrom<I256> for U256 {
    type Error = FixedPointError;

    fn try_from(v: I256) -> Result<Self, Self::Error> {
        if v.is_negative() { return Err(FixedPointError::IntegerConversionError); }
        Ok(v.to_unsigned())
    }
}

/// Narrow a 256-bit magnitude to 128 bits.
#[inline]
pub(crate) fn narrow_u128(value: U256) -> Result<u128, FixedPointError> {
    let U256(ref a) = value;
    if a[2] != 0 || a[3] != 0 {
        return Err(FixedPointError::IntegerConversionError);
    }

    Ok(((a[1] as u128) << 64) | (a[0] as u128))
}

/// Apply a sign to a 128-bit magnitude, failing when it leaves the i128 range.
#[inline]
pub(crate) fn signed_from_magnitude(magnitude: u128, negative: bool) -> Result<i128, FixedPointError> {
    const LIMIT: u128 = 1u128 << 127;

    match (negative, magnitude) {
        (true, m) if m <= LIMIT => Ok((m as i128).wrapping_neg()),
        (false, m) if m < LIMIT => Ok(m as i128),
        _ => Err(FixedPointError::IntegerConversionError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i256_bounds() {
        assert!(I256::MIN.is_negative());
        assert!(!I256::MAX.is_negative());
        assert_eq!(I256::MIN.abs(), U256::one() << 255);
        assert_eq!(I256::MAX.abs(), (U256::one() << 255) - U256::one());
        assert!(I256::MIN.checked_neg().is_none());
        assert_eq!(I256::BITS, 256);
    }

    #[test]
    fn i256_from_i128_sign_extends() {
        let minus_one = I256::from(-1i128);
        assert_eq!(minus_one, I256::minus_one());
        assert_eq!(minus_one.to_unsigned(), U256::MAX);

        let min = I256::from(i128::MIN);
        assert_eq!(i128::try_from(min).unwrap(), i128::MIN);
        assert_eq!(i128::try_from(I256::from(i128::MAX)).unwrap(), i128::MAX);
    }

    #[test]
    fn i256_narrowing_rejects_wide_values() {
        let big = I256::from(i128::MAX) + I256::one();
        assert_eq!(i128::try_from(big), Err(FixedPointError::IntegerConversionError));

        let small = I256::from(i128::MIN) - I256::one();
        assert_eq!(i128::try_from(small), Err(FixedPointError::IntegerConversionError));

        assert!(u128::try_from(I256::from(-5i64)).is_err());
        assert_eq!(u128::try_from(I256::from(5i64)).unwrap(), 5);
    }

    #[test]
    fn i256_ordering_across_signs() {
        let values = [
            I256::MIN,
            I256::from(-2i64),
            I256::from(-1i64),
            I256::zero(),
            I256::one(),
            I256::MAX,
        ];

        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn i256_shr_rounds_toward_negative_infinity() {
        assert_eq!(I256::from(-1i64) >> 64usize, I256::from(-1i64));
        assert_eq!(I256::from(-3i64) >> 1usize, I256::from(-2i64));
        assert_eq!(I256::from(3i64) >> 1usize, I256::one());
        assert_eq!(I256::MIN.arithmetic_shr(255), I256::minus_one());
        assert_eq!(I256::MAX.arithmetic_shr(254), I256::one());
    }

    #[test]
    fn i256_checked_arith() {
        assert!(I256::MAX.checked_add(I256::one()).is_none());
        assert!(I256::MIN.checked_sub(I256::one()).is_none());
        assert!(I256::MIN.checked_mul(I256::minus_one()).is_none());
        assert!(I256::MIN.checked_div(I256::minus_one()).is_none());
        assert_eq!(I256::from(-7i64).checked_div(I256::from(2i64)), Some(I256::from(-3i64)));
        assert_eq!(I256::from(-7i64) * I256::from(3i64), I256::from(-21i64));
    }

    #[test]
    fn i256_from_str_radix_signed() {
        assert_eq!(I256::from_str_radix("-42", 10).unwrap(), I256::from(-42i64));
        assert_eq!(I256::from_str_radix("+ff", 16).unwrap(), I256::from(255i64));
        assert_eq!(format!("{}", I256::from(-42i64)), "-42");
    }

    #[test]
    fn checked_from_magnitude_limits() {
        let half = U256::one() << 255;
        assert_eq!(I256::checked_from_magnitude(half, true), Some(I256::MIN));
        assert_eq!(I256::checked_from_magnitude(half, false), None);
        assert_eq!(I256::checked_from_magnitude(U256::zero(), true), Some(I256::zero()));
    }

    #[test]
    fn u512_widening_and_narrowing() {
        let x = U256::MAX;
        let wide = U512::from(x);
        assert_eq!(U256::try_from(wide).unwrap(), x);
        assert_eq!(
            U256::try_from(wide << 1),
            Err(FixedPointError::IntegerConversionError)
        );
    }

    #[test]
    fn pow10_limits() {
        assert_eq!(U256::checked_pow10(18), Some(U256::from(1_000_000_000_000_000_000u64)));
        assert!(U256::checked_pow10(77).is_some());
        assert!(U256::checked_pow10(78).is_none());
    }

    #[test]
    fn magnitude_helpers() {
        assert_eq!(signed_from_magnitude(1u128 << 127, true), Ok(i128::MIN));
        assert!(signed_from_magnitude(1u128 << 127, false).is_err());
        assert_eq!(signed_from_magnitude(5, true), Ok(-5));
        assert!(narrow_u128(U256::one() << 128).is_err());
        assert_eq!(narrow_u128(U256::from(u128::MAX)), Ok(u128::MAX));
    }
}
