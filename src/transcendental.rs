// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Square roots, powers, logarithms and exponentials.
//!
//! The logarithm and exponential are bit recurrences with a fixed iteration
//! count; their outputs are reproducible bit-for-bit across platforms.

use crate::{
    constants::{EXP2_FACTORS_LO, LN2_128X128},
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
    integers::{narrow_u128, signed_from_magnitude, I256, U256},
};

/// ## Square root of a non-negative 64.64 value
///
/// Truncated; exact for perfect squares.
///
/// ### Errors
///
/// * `DomainError` - `x` is negative
pub fn sqrt(x: Fixed64x64) -> Result<Fixed64x64> {
    if x.0 < 0 {
        return Err(FixedPointError::DomainError.reject("sqrt"));
    }

    // sqrt(raw * 2^64) is the raw root; raw < 2^127 keeps the radicand below 2^191
    Ok(Fixed64x64(sqrtu(U256::from(x.0 as u128) << 64) as i128))
}

/// ## Geometric mean, `sqrt(x * y)`
///
/// ### Errors
///
/// * `DomainError` - `x * y` is negative
/// * `Overflow` - `x * y >= 2^254`, only reachable as `MIN * MIN`
pub fn gavg(x: Fixed64x64, y: Fixed64x64) -> Result<Fixed64x64> {
    let product = I256::from(x.0) * I256::from(y.0);

    if product.is_negative() {
        return Err(FixedPointError::DomainError.reject("gavg"));
    }

    let radicand = product.to_unsigned();
    if radicand >= U256::one() << 254 {
        return Err(FixedPointError::Overflow.reject("gavg"));
    }

    Ok(Fixed64x64(sqrtu(radicand) as i128))
}

/// ## Raise a 64.64 value to an unsigned integer power
///
/// Square-and-multiply over the bits of `n`. Bases with `|x| <= 1` never
/// overflow; larger bases carry a separate binary exponent that is checked
/// before every step.
///
/// ### Errors
///
/// * `Overflow` - the result does not fit 64.64
pub fn pow(x: Fixed64x64, n: U256) -> Result<Fixed64x64> {
    let negative = x.0 < 0 && n.bit(0);

    let mut y = n;
    let mut abs_x = U256::from(x.0.unsigned_abs());
    // 1.0 with 128 fractional bits
    let mut abs_result = U256::one() << 128;

    if abs_x <= U256::one() << 64 {
        // base as 1.127, result as 1.128
        abs_x = abs_x << 63;

        while !y.is_zero() {
            if y.bit(0) {
                abs_result = (abs_result * abs_x) >> 127;
            }
            abs_x = (abs_x * abs_x) >> 127;

            y = y >> 1;
        }

        abs_result = abs_result >> 64;
    } else {
        // normalise the base into [2^127, 2^128); abs_x_shift is its binary exponent
        let msb = 255 - abs_x.leading_zeros() as usize;
        abs_x = abs_x << (127 - msb);
        let mut abs_x_shift = msb - 64;
        let mut result_shift = 0usize;

        while !y.is_zero() {
            if abs_x_shift >= 64 {
                return Err(FixedPointError::Overflow.reject("pow"));
            }

            if y.bit(0) {
                abs_result = (abs_result * abs_x) >> 127;
                result_shift += abs_x_shift;
                if abs_result > U256::one() << 128 {
                    abs_result = abs_result >> 1;
                    result_shift += 1;
                }
            }

            abs_x = (abs_x * abs_x) >> 127;
            abs_x_shift <<= 1;
            if abs_x >= U256::one() << 128 {
                abs_x = abs_x >> 1;
                abs_x_shift += 1;
            }

            y = y >> 1;
        }

        if result_shift >= 64 {
            return Err(FixedPointError::Overflow.reject("pow"));
        }

        abs_result = abs_result >> (64 - result_shift);
    }

    narrow_u128(abs_result)
        .and_then(|magnitude| signed_from_magnitude(magnitude, negative))
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::Overflow.reject("pow"))
}

/// ## Binary logarithm
///
/// The integer part comes from the position of the most significant bit; the
/// 64 fractional bits come from repeatedly squaring the normalised mantissa
/// and testing whether it crossed 2.
///
/// ### Errors
///
/// * `DomainError` - `x <= 0`
pub fn log_2(x: Fixed64x64) -> Result<Fixed64x64> {
    if x.0 <= 0 {
        return Err(FixedPointError::DomainError.reject("log_2"));
    }

    let raw = x.0 as u128;
    let msb = 127 - raw.leading_zeros() as i128;

    let mut result: i128 = (msb - 64) << 64;
    // mantissa in [2^127, 2^128), i.e. [1, 2) with 127 fractional bits
    let mut mantissa = U256::from(raw) << (127 - msb) as usize;

    let mut bit: i128 = 1 << 63;
    while bit > 0 {
        mantissa = mantissa * mantissa;

        let crossed = mantissa.bit(255);
        mantissa = mantissa >> (127 + crossed as usize);
        if crossed {
            result += bit;
        }

        bit >>= 1;
    }

    Ok(Fixed64x64(result))
}

/// ## Natural logarithm, `log_2(x) * ln(2)`
///
/// Rounded toward negative infinity.
///
/// ### Errors
///
/// * `DomainError` - `x <= 0`
pub fn ln(x: Fixed64x64) -> Result<Fixed64x64> {
    if x.0 <= 0 {
        return Err(FixedPointError::DomainError.reject("ln"));
    }

    let log = log_2(x)?;
    let product = I256::from(log.0) * I256::from(LN2_128X128);

    i128::try_from(product >> 128usize)
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::Overflow.reject("ln"))
}

/// ## Binary exponent, `2^x`
///
/// Inputs below -64 underflow to zero.
///
/// ### Errors
///
/// * `Overflow` - `x >= 64`, or the result exceeds `MAX` (any `x >= 63`)
pub fn exp_2(x: Fixed64x64) -> Result<Fixed64x64> {
    if x.0 >= 0x40 << 64 {
        return Err(FixedPointError::Overflow.reject("exp_2"));
    }

    if x.0 < -(0x40 << 64) {
        return Ok(Fixed64x64::ZERO);
    }

    // 1.0 with 127 fractional bits; stays below 2^128 since every factor is < 2
    let mut result = U256::one() << 127;

    for (k, factor) in EXP2_FACTORS_LO.iter().enumerate() {
        if x.0 & (1i128 << (63 - k)) != 0 {
            // result * (2^128 + factor) >> 128
            result = result + ((result * U256::from(*factor)) >> 128);
        }
    }

    // integer part of x is in [-64, 63]
    let shift = (63 - (x.0 >> 64)) as usize;
    result = result >> shift;

    narrow_u128(result)
        .and_then(|magnitude| signed_from_magnitude(magnitude, false))
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::Overflow.reject("exp_2"))
}

/// Floor square root of a 256-bit integer.
///
/// Starts from the power of two nearest below the root and takes seven Newton
/// steps, which is enough for any 256-bit input; the final `min` trims an
/// overshoot of one.
fn sqrtu(x: U256) -> u128 {
    if x.is_zero() {
        return 0;
    }

    let mut r = U256::one() << ((x.bits() - 1) / 2);
    for _ in 0..7 {
        r = (r + x / r) >> 1;
    }

    let r1 = x / r;
    r.min(r1).low_u128()
}
