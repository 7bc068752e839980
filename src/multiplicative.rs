// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Multiplication and division, staged through 256- and 512-bit intermediates.
//!
//! Every operation works on magnitudes and reapplies the sign at the end, so
//! results truncate toward zero.

use crate::{
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
    integers::{narrow_u128, signed_from_magnitude, I256, U256, U512},
};

/// ## Multiply two 64.64 values
///
/// `(|x| * |y|) >> 64` with the sign reapplied.
///
/// ### Errors
///
/// * `Overflow` - the product does not fit 64.64
pub fn mul(x: Fixed64x64, y: Fixed64x64) -> Result<Fixed64x64> {
    let negative = (x.0 < 0) ^ (y.0 < 0);

    // |x|, |y| <= 2^127, so the product stays below 2^254
    let product = U256::from(x.0.unsigned_abs()) * U256::from(y.0.unsigned_abs());

    narrow_u128(product >> 64)
        .and_then(|magnitude| signed_from_magnitude(magnitude, negative))
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::Overflow.reject("mul"))
}

/// ## Multiply a 64.64 value by a signed 256-bit integer
///
/// Returns the integer `x * n`, truncated toward zero.
///
/// ### Errors
///
/// * `Overflow` - the result does not fit a signed 256-bit integer
pub fn muli(x: Fixed64x64, n: I256) -> Result<I256> {
    let negative = (x.0 < 0) ^ n.is_negative();

    let product = U512::from(U256::from(x.0.unsigned_abs())) * U512::from(n.abs());

    U256::try_from(product >> 64)
        .ok()
        .and_then(|magnitude| I256::checked_from_magnitude(magnitude, negative))
        .ok_or_else(|| FixedPointError::Overflow.reject("muli"))
}

/// ## Multiply a non-negative 64.64 value by an unsigned 256-bit integer
///
/// Returns the integer `floor(x * n)`. A zero `n` yields zero for any `x`.
///
/// ### Errors
///
/// * `DomainError` - `x` is negative and `n` is not zero
/// * `Overflow` - the result does not fit 256 bits
pub fn mulu(x: Fixed64x64, n: U256) -> Result<U256> {
    if n.is_zero() {
        return Ok(U256::zero());
    }

    if x.0 < 0 {
        return Err(FixedPointError::DomainError.reject("mulu"));
    }

    let product = U512::from(U256::from(x.0 as u128)) * U512::from(n);

    U256::try_from(product >> 64).map_err(|_| FixedPointError::Overflow.reject("mulu"))
}

/// ## Divide two 64.64 values
///
/// ### Errors
///
/// * `DivisionByZero` - `y` is zero
/// * `Overflow` - the quotient does not fit 64.64
pub fn div(x: Fixed64x64, y: Fixed64x64) -> Result<Fixed64x64> {
    if y.0 == 0 {
        return Err(FixedPointError::DivisionByZero.reject("div"));
    }

    signed_quotient(
        U256::from(x.0.unsigned_abs()),
        U256::from(y.0.unsigned_abs()),
        (x.0 < 0) ^ (y.0 < 0),
        "div",
    )
}

/// ## Divide two signed 256-bit integers, producing 64.64
///
/// ### Errors
///
/// * `DivisionByZero` - `y` is zero
/// * `Overflow` - the quotient does not fit 64.64
pub fn divi(x: I256, y: I256) -> Result<Fixed64x64> {
    if y.is_zero() {
        return Err(FixedPointError::DivisionByZero.reject("divi"));
    }

    signed_quotient(x.abs(), y.abs(), x.is_negative() ^ y.is_negative(), "divi")
}

/// ## Divide two unsigned 256-bit integers, producing 64.64
///
/// ### Errors
///
/// * `DivisionByZero` - `y` is zero
/// * `Overflow` - the quotient exceeds `MAX`
pub fn divu(x: U256, y: U256) -> Result<Fixed64x64> {
    if y.is_zero() {
        return Err(FixedPointError::DivisionByZero.reject("divu"));
    }

    signed_quotient(x, y, false, "divu")
}

/// ## Reciprocal of a 64.64 value
///
/// ### Errors
///
/// * `DivisionByZero` - `x` is zero
/// * `Overflow` - `|x|` is too small for the reciprocal to fit, e.g. `x = -2^-64`
pub fn inv(x: Fixed64x64) -> Result<Fixed64x64> {
    if x.0 == 0 {
        return Err(FixedPointError::DivisionByZero.reject("inv"));
    }

    signed_quotient(
        U256::from(Fixed64x64::ONE.0 as u128),
        U256::from(x.0.unsigned_abs()),
        x.0 < 0,
        "inv",
    )
}

/// `(x << 64) / y` on magnitudes, exact, narrowed to 128 bits.
///
/// `y` must be non-zero.
#[inline]
fn divuu(x: U256, y: U256) -> Result<u128> {
    let quotient = (U512::from(x) << 64) / U512::from(y);

    U256::try_from(quotient).and_then(narrow_u128)
}

#[inline]
fn signed_quotient(x: U256, y: U256, negative: bool, op: &'static str) -> Result<Fixed64x64> {
    divuu(x, y)
        .and_then(|magnitude| signed_from_magnitude(magnitude, negative))
        .map(Fixed64x64)
        .map_err(|_| FixedPointError::Overflow.reject(op))
}
