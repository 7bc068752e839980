// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Adapters between 64.64 values and integer token amounts scaled by `10^decimals`.

use crate::{
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
    integers::U256,
    multiplicative::{divu, mulu},
};

/// Decimals of an 18-decimal token (wei per ether)
pub const WEI_DECIMALS: u8 = 18;

#[inline]
fn scale(decimals: u8, op: &'static str) -> Result<U256> {
    U256::checked_pow10(decimals as u32).ok_or_else(|| FixedPointError::Overflow.reject(op))
}

/// ## Scale a non-negative 64.64 value to an integer amount
///
/// `floor(x * 10^decimals)`
///
/// ### Errors
///
/// * `DomainError` - `x` is negative
/// * `Overflow` - `10^decimals` does not fit 256 bits (`decimals > 77`)
pub fn to_decimals(x: Fixed64x64, decimals: u8) -> Result<U256> {
    mulu(x, scale(decimals, "to_decimals")?)
}

/// ## Read an integer amount scaled by `10^decimals` as 64.64
///
/// Truncated toward zero.
///
/// ### Errors
///
/// * `RangeError` - the rescaled value exceeds `MAX`
/// * `Overflow` - `10^decimals` does not fit 256 bits (`decimals > 77`)
pub fn from_decimals(value: U256, decimals: u8) -> Result<Fixed64x64> {
    divu(value, scale(decimals, "from_decimals")?).map_err(|error| match error {
        FixedPointError::Overflow => FixedPointError::RangeError.reject("from_decimals"),
        other => other,
    })
}

/// [`to_decimals`] with 18 decimals
#[inline]
pub fn to_wei(x: Fixed64x64) -> Result<U256> {
    to_decimals(x, WEI_DECIMALS)
}

/// [`from_decimals`] with 18 decimals
#[inline]
pub fn from_wei(value: U256) -> Result<Fixed64x64> {
    from_decimals(value, WEI_DECIMALS)
}
