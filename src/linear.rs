// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Addition, subtraction, negation and the arithmetic mean.

use crate::{
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
};

/// x + y
#[inline]
pub fn add(x: Fixed64x64, y: Fixed64x64) -> Result<Fixed64x64> {
    x.0.checked_add(y.0)
        .map(Fixed64x64)
        .ok_or_else(|| FixedPointError::Overflow.reject("add"))
}

/// x - y
#[inline]
pub fn sub(x: Fixed64x64, y: Fixed64x64) -> Result<Fixed64x64> {
    x.0.checked_sub(y.0)
        .map(Fixed64x64)
        .ok_or_else(|| FixedPointError::Overflow.reject("sub"))
}

/// -x, failing only for `MIN`
#[inline]
pub fn neg(x: Fixed64x64) -> Result<Fixed64x64> {
    x.0.checked_neg()
        .map(Fixed64x64)
        .ok_or_else(|| FixedPointError::Overflow.reject("neg"))
}

/// |x|, failing only for `MIN`
#[inline]
pub fn abs(x: Fixed64x64) -> Result<Fixed64x64> {
    x.0.checked_abs()
        .map(Fixed64x64)
        .ok_or_else(|| FixedPointError::Overflow.reject("abs"))
}

/// Arithmetic mean, rounded toward negative infinity.
///
/// Halving before adding keeps the sum inside 128 bits; the shared low bit
/// restores the carry both halves dropped.
#[inline]
pub fn avg(x: Fixed64x64, y: Fixed64x64) -> Fixed64x64 {
    Fixed64x64((x.0 >> 1) + (y.0 >> 1) + (x.0 & y.0 & 1))
}
