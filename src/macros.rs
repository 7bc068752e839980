// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

/// Macro to construct two's-complement signed integer types over `uint` words
#[macro_export]
macro_rules! construct_sint {
    ( $(#[$attr:meta])* $visibility:vis struct $sname:ident ( $uname:ident ); ) => {
        /// Signed integer type wrapping an unsigned type
        #[repr(transparent)]
        $(#[$attr])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        $visibility struct $sname($uname);

        impl $sname {
            /// The number of words in the underlying unsigned type
            const WORDS: usize = core::mem::size_of::<$uname>() / 8;
            /// The number of bits in this signed integer type
            pub const BITS: u32 = (Self::WORDS * 64) as u32;
            /// Position of the sign bit (MSB)
            const SIGN_BIT: usize = Self::BITS as usize - 1;

            /// Maximum positive value (2^(n-1) - 1)
            pub const MAX: $sname = {
                const N: usize = core::mem::size_of::<$uname>() / 8;
                let mut words = [u64::MAX; N];
                words[N - 1] = u64::MAX >> 1;
                $sname($uname(words))
            };

            /// Minimum negative value (-2^(n-1))
            pub const MIN: $sname = {
                const N: usize = core::mem::size_of::<$uname>() / 8;
                let mut words = [0u64; N];
                words[N - 1] = 1u64 << 63;
                $sname($uname(words))
            };

            #[inline]
            pub fn zero() -> Self {
                Self($uname::zero())
            }

            #[inline]
            pub fn one() -> Self {
                Self($uname::one())
            }

            /// All bits set
            #[inline]
            pub fn minus_one() -> Self {
                Self($uname::MAX)
            }

            #[inline]
            pub fn is_negative(&self) -> bool {
                self.0.bit(Self::SIGN_BIT)
            }

            /// Strictly greater than zero
            #[inline]
            pub fn is_positive(&self) -> bool {
                !self.is_negative() && !self.is_zero()
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Magnitude as the unsigned backing type; `MIN` maps to `2^(n-1)`
            #[inline]
            pub fn abs(&self) -> $uname {
                if self.is_negative() {
                    self.wrapping_neg().0
                } else {
                    self.0
                }
            }

            /// Rebuild a signed value from a magnitude and a sign.
            /// Returns None when the result does not fit.
            #[inline]
            pub fn checked_from_magnitude(magnitude: $uname, negative: bool) -> Option<Self> {
                let limit = Self::MIN.0;
                if negative {
                    if magnitude > limit {
                        return None;
                    }
                    Some(Self(magnitude).wrapping_neg())
                } else {
                    if magnitude >= limit {
                        return None;
                    }
                    Some(Self(magnitude))
                }
            }

            /// Two's complement negation
            #[inline]
            pub fn wrapping_neg(&self) -> Self {
                Self((!self.0).wrapping_add($uname::one()))
            }

            #[inline]
            pub fn checked_neg(self) -> Option<Self> {
                if self == Self::MIN {
                    None
                } else {
                    Some(self.wrapping_neg())
                }
            }

            #[inline]
            pub fn overflowing_add(self, other: Self) -> (Self, bool) {
                let wrapped = Self(self.0.wrapping_add(other.0));

                // same-signed operands producing a result of the other sign
                let overflow = (self.is_positive() && other.is_positive() && wrapped.is_negative()) ||
                              (self.is_negative() && other.is_negative() && !wrapped.is_negative());

                (wrapped, overflow)
            }

            #[inline]
            pub fn checked_add(self, other: Self) -> Option<Self> {
                let (result, overflow) = self.overflowing_add(other);
                if overflow { None } else { Some(result) }
            }

            #[inline]
            pub fn overflowing_sub(self, other: Self) -> (Self, bool) {
                let wrapped = Self(self.0.wrapping_sub(other.0));

                let overflow = (!self.is_negative() && other.is_negative() && wrapped.is_negative()) ||
                              (self.is_negative() && other.is_positive() && !wrapped.is_negative());

                (wrapped, overflow)
            }

            #[inline]
            pub fn checked_sub(self, other: Self) -> Option<Self> {
                let (result, overflow) = self.overflowing_sub(other);
                if overflow { None } else { Some(result) }
            }

            /// Multiply magnitudes, then reapply the sign
            #[inline]
            pub fn checked_mul(self, other: Self) -> Option<Self> {
                let (magnitude, overflow) = self.abs().overflowing_mul(other.abs());
                if overflow {
                    return None;
                }

                Self::checked_from_magnitude(magnitude, self.is_negative() ^ other.is_negative())
            }

            /// Division truncating toward zero. None on /0 or MIN / -1.
            #[inline]
            pub fn checked_div(self, other: Self) -> Option<Self> {
                if other.is_zero() {
                    return None;
                }

                let quotient = self.abs() / other.abs();
                Self::checked_from_magnitude(quotient, self.is_negative() ^ other.is_negative())
            }

            /// Reinterpret as the unsigned backing type
            pub const fn to_unsigned(self) -> $uname {
                self.0
            }

            /// Reinterpret an unsigned value as signed
            pub const fn from_unsigned(value: $uname) -> Self {
                Self(value)
            }

            /// Convert from string in given radix, accepting a leading sign
            pub fn from_str_radix(src: &str, radix: u32) -> core::result::Result<Self, ::uint::FromStrRadixErr> {
                let src = src.trim();
                if let Some(abs_part) = src.strip_prefix('-') {
                    let abs_val = $uname::from_str_radix(abs_part, radix)?;
                    Ok(Self(abs_val).wrapping_neg())
                } else {
                    let positive_part = src.strip_prefix('+').unwrap_or(src);
                    Ok(Self($uname::from_str_radix(positive_part, radix)?))
                }
            }

            /// Left shift by `rhs` bits; bits shifted past the top are lost
            #[inline]
            pub fn logical_shl(self, rhs: usize) -> Self {
                if rhs == 0 { return self; }
                if rhs >= Self::BITS as usize { panic!("shift overflow"); }

                Self(self.0 << rhs)
            }

            /// Arithmetic right shift by `rhs` bits (sign-extending, rounds toward -inf)
            #[inline]
            pub fn arithmetic_shr(self, rhs: usize) -> Self {
                if rhs == 0 { return self; }
                if rhs >= Self::BITS as usize { panic!("shift overflow"); }

                let logical = self.0 >> rhs;
                if !self.is_negative() {
                    Self(logical)
                } else {
                    // fill the top `rhs` bits with 1s to preserve the sign
                    let mask = (!$uname::zero()) << (Self::BITS as usize - rhs);
                    Self(logical | mask)
                }
            }
        }

        impl Default for $sname {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<i64> for $sname {
            fn from(value: i64) -> Self {
                Self::from(value as i128)
            }
        }

        impl From<i128> for $sname {
            fn from(value: i128) -> Self {
                let bits: u128 = value as u128;

                let lo: u64 = bits as u64;
                let hi: u64 = (bits >> 64) as u64;
                let mut u = $uname::from(lo) | ($uname::from(hi) << 64);

                // sign-extend into the words above 128 bits
                if value < 0 && (Self::BITS as usize) > 128 {
                    u = u | ((!$uname::zero()) << 128);
                }

                Self(u)
            }
        }

        impl From<u128> for $sname {
            fn from(value: u128) -> Self {
                Self($uname::from(value))
            }
        }

        impl core::ops::Add for $sname {
            type Output = Self;

            #[track_caller]
            fn add(self, other: Self) -> Self {
                self.checked_add(other).unwrap_or_else(|| panic!("arithmetic overflow"))
            }
        }

        impl core::ops::Sub for $sname {
            type Output = Self;

            #[track_caller]
            fn sub(self, other: Self) -> Self {
                self.checked_sub(other).unwrap_or_else(|| panic!("arithmetic overflow"))
            }
        }

        impl core::ops::Mul for $sname {
            type Output = Self;

            #[track_caller]
            fn mul(self, other: Self) -> Self {
                self.checked_mul(other).unwrap_or_else(|| panic!("arithmetic overflow"))
            }
        }

        impl core::ops::Div for $sname {
            type Output = Self;

            #[track_caller]
            #[inline]
            fn div(self, other: Self) -> Self {
                if other.is_zero() { panic!("division by zero"); }
                self.checked_div(other).unwrap_or_else(|| panic!("arithmetic overflow"))
            }
        }

        impl core::ops::Neg for $sname {
            type Output = Self;

            #[track_caller]
            fn neg(self) -> Self {
                self.checked_neg().unwrap_or_else(|| panic!("arithmetic overflow"))
            }
        }

        impl core::ops::Shl<usize> for $sname {
            type Output = Self;

            #[inline]
            fn shl(self, rhs: usize) -> Self { self.logical_shl(rhs) }
        }

        impl core::ops::Shl<u32> for $sname {
            type Output = Self;

            #[inline]
            fn shl(self, rhs: u32) -> Self { self.logical_shl(rhs as usize) }
        }

        impl core::ops::Shr<usize> for $sname {
            type Output = Self;

            #[inline]
            fn shr(self, rhs: usize) -> Self { self.arithmetic_shr(rhs) }
        }

        impl core::ops::Shr<u32> for $sname {
            type Output = Self;

            #[inline]
            fn shr(self, rhs: u32) -> Self { self.arithmetic_shr(rhs as usize) }
        }

        impl PartialOrd for $sname {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $sname {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                use core::cmp::Ordering;

                match (self.is_negative(), other.is_negative()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    // same sign: two's complement bit patterns order like unsigned
                    _ => self.0.cmp(&other.0),
                }
            }
        }

        impl fmt::Display for $sname {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if self.is_negative() {
                    write!(f, "-{}", self.abs())
                } else {
                    write!(f, "{}", self.0)
                }
            }
        }

        impl fmt::Debug for $sname {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl fmt::LowerHex for $sname {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if self.is_negative() {
                    write!(f, "-{:x}", self.abs())
                } else {
                    write!(f, "{:x}", self.0)
                }
            }
        }
    };
}

/// Build a `Fixed64x64` from an integer literal or a ratio of literals,
/// evaluated at compile time.
///
/// ```
/// use math64x64::fixed64x64;
///
/// assert_eq!(fixed64x64!(5).into_raw(), 5i128 << 64);
/// assert_eq!(fixed64x64!(-2).into_raw(), -2i128 << 64);
/// assert_eq!(fixed64x64!(1 / 2).into_raw(), 1i128 << 63);
/// ```
#[macro_export]
macro_rules! fixed64x64 {
    ($num:literal / $den:literal) => {{
        const S: i128 = 1i128 << 64;

        const N: i128 = $num as i128;
        const D: i128 = $den as i128;

        // round half away from zero
        const VAL: i128 = if N >= 0 { (N * S + D / 2) / D } else { (N * S - D / 2) / D };

        $crate::Fixed64x64::new(VAL)
    }};
    ($int:literal) => {{
        const VAL: i128 = ($int as i128) << 64;

        $crate::Fixed64x64::new(VAL)
    }};
}
