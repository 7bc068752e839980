// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{
    constants::{E_64X64, MAX_64X64, MIN_64X64, ONE_64X64, PI_64X64},
    convert, linear, multiplicative, token, transcendental,
    error::{FixedPointError, Result},
    integers::{I256, U256},
};

/// Signed 64.64 binary fixed point number.
///
/// The raw `i128` holds `value * 2^64`: 64 integer bits including the sign and
/// 64 fractional bits. Every value in `[MIN, MAX]` is valid.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Fixed64x64(pub i128);

impl Fixed64x64 {
    pub const FRAC_BITS: u32 = 64;
    pub const MAX: Self = Self(MAX_64X64);
    pub const MIN: Self = Self(MIN_64X64);
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE_64X64);
    pub const E: Self = Self(E_64X64);
    pub const PI: Self = Self(PI_64X64);

    /// Scale used by `Display`: 9 fractional digits
    const DISPLAY_SCALE: u128 = 1_000_000_000;

    #[inline] pub const fn new(value: i128) -> Self { Self(value) }
    #[inline] pub const fn into_raw(self) -> i128 { self.0 }

    #[inline] pub const fn is_negative(self) -> bool { self.0 < 0 }
    #[inline] pub const fn is_zero(self) -> bool { self.0 == 0 }

    // --- conversions ---

    #[inline] pub fn from_int(n: i128) -> Result<Self> { convert::from_int(n) }
    #[inline] pub fn to_int(self) -> i64 { convert::to_int(self) }
    #[inline] pub fn from_uint(n: u64) -> Result<Self> { convert::from_uint(n) }
    #[inline] pub fn to_uint(self) -> Result<u64> { convert::to_uint(self) }
    #[inline] pub fn from_128x128(x: I256) -> Result<Self> { convert::from_128x128(x) }
    #[inline] pub fn to_128x128(self) -> I256 { convert::to_128x128(self) }

    #[inline] pub fn from_decimals(value: U256, decimals: u8) -> Result<Self> { token::from_decimals(value, decimals) }
    #[inline] pub fn to_decimals(self, decimals: u8) -> Result<U256> { token::to_decimals(self, decimals) }
    #[inline] pub fn from_wei(value: U256) -> Result<Self> { token::from_wei(value) }
    #[inline] pub fn to_wei(self) -> Result<U256> { token::to_wei(self) }

    // --- checked arithmetic ---

    #[inline] pub fn try_add(self, rhs: Self) -> Result<Self> { linear::add(self, rhs) }
    #[inline] pub fn try_sub(self, rhs: Self) -> Result<Self> { linear::sub(self, rhs) }
    #[inline] pub fn try_neg(self) -> Result<Self> { linear::neg(self) }
    #[inline] pub fn try_abs(self) -> Result<Self> { linear::abs(self) }
    #[inline] pub fn avg(self, rhs: Self) -> Self { linear::avg(self, rhs) }

    #[inline] pub fn try_mul(self, rhs: Self) -> Result<Self> { multiplicative::mul(self, rhs) }
    #[inline] pub fn try_div(self, rhs: Self) -> Result<Self> { multiplicative::div(self, rhs) }
    #[inline] pub fn muli(self, n: I256) -> Result<I256> { multiplicative::muli(self, n) }
    #[inline] pub fn mulu(self, n: U256) -> Result<U256> { multiplicative::mulu(self, n) }
    #[inline] pub fn divi(x: I256, y: I256) -> Result<Self> { multiplicative::divi(x, y) }
    #[inline] pub fn divu(x: U256, y: U256) -> Result<Self> { multiplicative::divu(x, y) }
    #[inline] pub fn inv(self) -> Result<Self> { multiplicative::inv(self) }

    // --- transcendental ---

    #[inline] pub fn sqrt(self) -> Result<Self> { transcendental::sqrt(self) }
    #[inline] pub fn gavg(self, rhs: Self) -> Result<Self> { transcendental::gavg(self, rhs) }
    #[inline] pub fn pow(self, n: U256) -> Result<Self> { transcendental::pow(self, n) }
    #[inline] pub fn log_2(self) -> Result<Self> { transcendental::log_2(self) }
    #[inline] pub fn ln(self) -> Result<Self> { transcendental::ln(self) }
    #[inline] pub fn exp_2(self) -> Result<Self> { transcendental::exp_2(self) }

    /// Integer part and the first 9 fractional digits of `|self|`, both truncated
    #[inline]
    fn decimal_parts(self) -> (u128, u128) {
        let magnitude = self.0.unsigned_abs();
        let int_part = magnitude >> 64;
        // (2^64 - 1) * 10^9 < 2^94
        let frac_part = ((magnitude & u64::MAX as u128) * Self::DISPLAY_SCALE) >> 64;

        (int_part, frac_part)
    }
}

// ---- operator impls (PANIC on any failure of the checked operation) ----

impl core::ops::Add<Fixed64x64> for Fixed64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.try_add(rhs).unwrap_or_else(|_| panic!("addition overflow"))
    }
}

impl core::ops::Sub<Fixed64x64> for Fixed64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.try_sub(rhs).unwrap_or_else(|_| panic!("subtraction overflow"))
    }
}

impl core::ops::Mul<Fixed64x64> for Fixed64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.try_mul(rhs).unwrap_or_else(|_| panic!("multiplication overflow"))
    }
}

impl core::ops::Div<Fixed64x64> for Fixed64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn div(self, rhs: Self) -> Self {
        match self.try_div(rhs) {
            Ok(quotient) => quotient,
            Err(FixedPointError::DivisionByZero) => panic!("division by zero"),
            Err(_) => panic!("division overflow"),
        }
    }
}

impl core::ops::Neg for Fixed64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn neg(self) -> Self {
        self.try_neg().unwrap_or_else(|_| panic!("unary negation overflow"))
    }
}

impl core::ops::AddAssign<Fixed64x64> for Fixed64x64 {
    #[track_caller]
    #[inline]
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl core::ops::SubAssign<Fixed64x64> for Fixed64x64 {
    #[track_caller]
    #[inline]
    fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}

impl core::ops::MulAssign<Fixed64x64> for Fixed64x64 {
    #[track_caller]
    #[inline]
    fn mul_assign(&mut self, rhs: Self) { *self = *self * rhs; }
}

impl core::ops::DivAssign<Fixed64x64> for Fixed64x64 {
    #[track_caller]
    #[inline]
    fn div_assign(&mut self, rhs: Self) { *self = *self / rhs; }
}

// ---- conversions ----

impl From<i64> for Fixed64x64 {
    #[inline]
    fn from(value: i64) -> Self {
        Self((value as i128) << 64)
    }
}

impl From<i32> for Fixed64x64 {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<u32> for Fixed64x64 {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from(value as i64)
    }
}

impl TryFrom<i128> for Fixed64x64 {
    type Error = FixedPointError;

    #[inline]
    fn try_from(value: i128) -> Result<Self> {
        convert::from_int(value)
    }
}

impl TryFrom<u64> for Fixed64x64 {
    type Error = FixedPointError;

    #[inline]
    fn try_from(value: u64) -> Result<Self> {
        convert::from_uint(value)
    }
}

impl From<Fixed64x64> for i128 {
    #[inline]
    fn from(value: Fixed64x64) -> i128 {
        value.0
    }
}

// ---- formatting ----

impl std::fmt::Display for Fixed64x64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (int_part, frac_part) = self.decimal_parts();

        // values that truncate to zero print without a sign
        let sign = if self.is_negative() && (int_part != 0 || frac_part != 0) { "-" } else { "" };

        let frac_str = format!("{:09}", frac_part);
        let trimmed = frac_str.trim_end_matches('0');

        if trimmed.is_empty() {
            write!(f, "{}{}", sign, int_part)
        } else {
            write!(f, "{}{}.{}", sign, int_part, trimmed)
        }
    }
}

impl std::fmt::LowerHex for Fixed64x64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl std::fmt::UpperHex for Fixed64x64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::UpperHex::fmt(&self.0, f)
    }
}

// Optional: bytemuck
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for Fixed64x64 {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for Fixed64x64 {}

// Optional: serde
#[cfg(feature = "serde")]
impl serde::Serialize for Fixed64x64 {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fixed64x64 {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        <i128 as serde::Deserialize>::deserialize(deserializer).map(Self)
    }
}

// Optional: borsh
#[cfg(feature = "borsh")]
impl borsh::BorshSerialize for Fixed64x64 {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        borsh::BorshSerialize::serialize(&self.0, writer)
    }
}

#[cfg(feature = "borsh")]
impl borsh::BorshDeserialize for Fixed64x64 {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = <i128 as borsh::BorshDeserialize>::deserialize_reader(reader)?;
        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed64x64;

    #[test]
    fn consts() {
        assert_eq!(Fixed64x64::FRAC_BITS, 64);
        assert_eq!(Fixed64x64::ZERO.into_raw(), 0);
        assert_eq!(Fixed64x64::ONE.into_raw(), 1i128 << 64);
        assert_eq!(Fixed64x64::MAX.into_raw(), i128::MAX);
        assert_eq!(Fixed64x64::MIN.into_raw(), i128::MIN);
        assert_eq!(Fixed64x64::default(), Fixed64x64::ZERO);
        assert!(Fixed64x64::MIN < Fixed64x64::ZERO && Fixed64x64::ZERO < Fixed64x64::MAX);
    }

    #[test]
    fn operators_match_checked_surface() {
        let a = fixed64x64!(7);
        let b = fixed64x64!(-2);

        assert_eq!(a + b, fixed64x64!(5));
        assert_eq!(a - b, fixed64x64!(9));
        assert_eq!(a * b, fixed64x64!(-14));
        assert_eq!(a / b, fixed64x64!(-7 / 2));
        assert_eq!(-a, fixed64x64!(-7));

        let mut c = a;
        c += b;
        c *= b;
        c -= fixed64x64!(1);
        c /= fixed64x64!(11);
        assert_eq!(c, fixed64x64!(-1));
    }

    #[test]
    fn methods_delegate() {
        let x = Fixed64x64::from_int(25).unwrap();

        assert_eq!(x.sqrt().unwrap(), fixed64x64!(5));
        assert_eq!(x.try_abs().unwrap(), x);
        assert_eq!(x.avg(fixed64x64!(5)), fixed64x64!(15));
        assert_eq!(x.gavg(fixed64x64!(1)).unwrap(), fixed64x64!(5));
        assert_eq!(x.inv().unwrap().into_raw(), (1i128 << 64) / 25);
        assert_eq!(fixed64x64!(2).pow(U256::from(3u8)).unwrap(), fixed64x64!(8));
        assert_eq!(fixed64x64!(8).log_2().unwrap(), fixed64x64!(3));
        assert_eq!(fixed64x64!(3).exp_2().unwrap(), fixed64x64!(8));
        assert_eq!(Fixed64x64::ONE.ln().unwrap(), Fixed64x64::ZERO);
        assert_eq!(x.to_int(), 25);
        assert_eq!(x.to_uint().unwrap(), 25);
        assert_eq!(x.mulu(U256::from(4u8)).unwrap(), U256::from(100u8));
        assert_eq!(x.muli(I256::from(-4i64)).unwrap(), I256::from(-100i64));
        assert_eq!(Fixed64x64::divu(U256::from(50u8), U256::from(2u8)).unwrap(), x);
        assert_eq!(Fixed64x64::divi(I256::from(-50i64), I256::from(-2i64)).unwrap(), x);
        assert_eq!(Fixed64x64::from_128x128(x.to_128x128()).unwrap(), x);
        assert_eq!(Fixed64x64::from_wei(x.to_wei().unwrap()).unwrap(), x);
        assert_eq!(Fixed64x64::from_decimals(x.to_decimals(6).unwrap(), 6).unwrap(), x);
        assert_eq!(Fixed64x64::from_uint(25).unwrap(), x);
    }

    #[test]
    #[should_panic(expected = "addition overflow")]
    fn add_overflow_panics() {
        let _ = Fixed64x64::MAX + Fixed64x64::new(1);
    }

    #[test]
    #[should_panic(expected = "subtraction overflow")]
    fn sub_underflow_panics() {
        let _ = Fixed64x64::MIN - Fixed64x64::new(1);
    }

    #[test]
    #[should_panic(expected = "multiplication overflow")]
    fn mul_overflow_panics() {
        let _ = Fixed64x64::MAX * fixed64x64!(2);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn div_by_zero_panics() {
        let _ = Fixed64x64::ONE / Fixed64x64::ZERO;
    }

    #[test]
    #[should_panic(expected = "division overflow")]
    fn div_overflow_panics() {
        let _ = Fixed64x64::MIN / fixed64x64!(-1);
    }

    #[test]
    #[should_panic(expected = "unary negation overflow")]
    fn neg_min_panics() {
        let _ = -Fixed64x64::MIN;
    }

    #[test]
    #[should_panic(expected = "addition overflow")]
    fn add_assign_overflow_panics() {
        let mut x = Fixed64x64::MAX;
        x += Fixed64x64::ONE;
    }

    #[test]
    fn conversions() {
        assert_eq!(Fixed64x64::from(-3i64), fixed64x64!(-3));
        assert_eq!(Fixed64x64::from(i64::MIN), Fixed64x64::MIN);
        assert_eq!(Fixed64x64::from(7i32), fixed64x64!(7));
        assert_eq!(Fixed64x64::from(u32::MAX).into_raw(), (u32::MAX as i128) << 64);
        assert_eq!(Fixed64x64::try_from(12i128).unwrap(), fixed64x64!(12));
        assert_eq!(Fixed64x64::try_from(1i128 << 63), Err(FixedPointError::RangeError));
        assert_eq!(Fixed64x64::try_from(1u64 << 63), Err(FixedPointError::RangeError));
        assert_eq!(i128::from(Fixed64x64::ONE), 1i128 << 64);
    }

    #[test]
    fn display() {
        assert_eq!(Fixed64x64::ONE.to_string(), "1");
        assert_eq!(fixed64x64!(-42).to_string(), "-42");
        assert_eq!(fixed64x64!(3 / 2).to_string(), "1.5");
        assert_eq!(fixed64x64!(-1 / 4).to_string(), "-0.25");
        assert_eq!(Fixed64x64::E.to_string(), "2.718281828");
        assert_eq!(Fixed64x64::PI.to_string(), "3.141592653");
        assert_eq!(Fixed64x64::ZERO.to_string(), "0");
        assert_eq!(Fixed64x64::new(-1).to_string(), "0");
        assert_eq!(Fixed64x64::MIN.to_string(), "-9223372036854775808");
        assert_eq!(Fixed64x64::MAX.to_string(), "9223372036854775807.999999999");
    }

    #[test]
    fn hex() {
        assert_eq!(format!("{:x}", Fixed64x64::ONE), "10000000000000000");
        assert_eq!(format!("{:#X}", Fixed64x64::E), "0x2B7E151628AED1975");
        assert_eq!(format!("{:x}", Fixed64x64::new(-1)), "ffffffffffffffffffffffffffffffff");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_as_raw_integer() {
        let json = serde_json::to_string(&Fixed64x64::ONE).unwrap();
        assert_eq!(json, "18446744073709551616");

        let back: Fixed64x64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Fixed64x64::ONE);

        let min: Fixed64x64 = serde_json::from_str(&serde_json::to_string(&Fixed64x64::MIN).unwrap()).unwrap();
        assert_eq!(min, Fixed64x64::MIN);
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn bytemuck_casts_to_raw() {
        let values = [Fixed64x64::ONE, Fixed64x64::MIN];
        let raw: &[i128] = bytemuck::cast_slice(&values[..]);
        assert_eq!(raw, &[1i128 << 64, i128::MIN]);
    }

    #[cfg(feature = "borsh")]
    #[test]
    fn borsh_as_raw_integer() {
        let bytes = borsh::to_vec(&Fixed64x64::PI).unwrap();
        assert_eq!(bytes, Fixed64x64::PI.into_raw().to_le_bytes().to_vec());
        assert_eq!(borsh::from_slice::<Fixed64x64>(&bytes).unwrap(), Fixed64x64::PI);
    }
}
