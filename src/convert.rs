// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Conversions between plain integers, 64.64 and 128.128 values.

use crate::{
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
    integers::I256,
};

/// ## Convert a signed integer to 64.64
///
/// ### Errors
///
/// * `RangeError` - `n` is outside `[-2^63, 2^63 - 1]`
#[inline]
pub fn from_int(n: i128) -> Result<Fixed64x64> {
    if n < i64::MIN as i128 || n > i64::MAX as i128 {
        return Err(FixedPointError::RangeError.reject("from_int"));
    }

    Ok(Fixed64x64(n << 64))
}

/// Integer part of `x`, rounded toward negative infinity.
#[inline]
pub fn to_int(x: Fixed64x64) -> i64 {
    (x.0 >> 64) as i64
}

/// ## Convert an unsigned integer to 64.64
///
/// ### Errors
///
/// * `RangeError` - `n >= 2^63`
#[inline]
pub fn from_uint(n: u64) -> Result<Fixed64x64> {
    if n > i64::MAX as u64 {
        return Err(FixedPointError::RangeError.reject("from_uint"));
    }

    Ok(Fixed64x64((n as i128) << 64))
}

/// ## Integer part of a non-negative 64.64 value
///
/// ### Errors
///
/// * `RangeError` - `x` is negative
#[inline]
pub fn to_uint(x: Fixed64x64) -> Result<u64> {
    if x.0 < 0 {
        return Err(FixedPointError::RangeError.reject("to_uint"));
    }

    Ok((x.0 >> 64) as u64)
}

/// ## Narrow a 128.128 value to 64.64
///
/// Drops the low 64 fractional bits with an arithmetic shift (rounds toward
/// negative infinity).
///
/// ### Errors
///
/// * `RangeError` - the shifted value does not fit 64.64
pub fn from_128x128(x: I256) -> Result<Fixed64x64> {
    let shifted = x >> 64usize;

    i128::try_from(shifted)
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::RangeError.reject("from_128x128"))
}

/// Widen a 64.64 value to 128.128. Always exact.
#[inline]
pub fn to_128x128(x: Fixed64x64) -> I256 {
    I256::from(x.0) << 64usize
}
