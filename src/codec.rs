// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Byte encodings of the raw 128-bit value.

use crate::{
    error::{FixedPointError, Result},
    fixed_point::Fixed64x64,
    utils::extract_from_raw_bytes,
};

/// Length of a contract ABI word
pub const ABI_WORD_LEN: usize = 32;

impl Fixed64x64 {
    #[inline] pub const fn to_be_bytes(self) -> [u8; 16] { self.0.to_be_bytes() }
    #[inline] pub const fn to_le_bytes(self) -> [u8; 16] { self.0.to_le_bytes() }
    #[inline] pub const fn from_be_bytes(bytes: [u8; 16]) -> Self { Self(i128::from_be_bytes(bytes)) }
    #[inline] pub const fn from_le_bytes(bytes: [u8; 16]) -> Self { Self(i128::from_le_bytes(bytes)) }

    /// Big-endian, sign-extended to 256 bits, as an ABI encodes `int128`.
    pub fn to_abi_word(self) -> [u8; ABI_WORD_LEN] {
        let fill = if self.is_negative() { 0xff } else { 0x00 };

        let mut word = [fill; ABI_WORD_LEN];
        word[16..].copy_from_slice(&self.to_be_bytes());
        word
    }

    /// ## Decode an ABI `int128` word
    ///
    /// ### Errors
    ///
    /// * `RangeError` - `word` is not 32 bytes long, or its upper 16 bytes are
    ///   not the sign extension of the lower 16
    pub fn from_abi_word(word: &[u8]) -> Result<Self> {
        if word.len() != ABI_WORD_LEN {
            return Err(FixedPointError::RangeError.reject("from_abi_word"));
        }

        let high: [u8; 16] = extract_from_raw_bytes(word, 0..16)?;
        let low: [u8; 16] = extract_from_raw_bytes(word, 16..ABI_WORD_LEN)?;

        let value = Self::from_be_bytes(low);
        let fill = if value.is_negative() { 0xff } else { 0x00 };
        if high.iter().any(|byte| *byte != fill) {
            return Err(FixedPointError::RangeError.reject("from_abi_word"));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed64x64;

    #[test]
    fn byte_orders() {
        let one = Fixed64x64::ONE;

        let be = one.to_be_bytes();
        assert_eq!(be[7], 1);
        assert!(be.iter().enumerate().all(|(i, b)| i == 7 || *b == 0));

        let le = one.to_le_bytes();
        assert_eq!(le[8], 1);

        assert_eq!(Fixed64x64::from_be_bytes(be), one);
        assert_eq!(Fixed64x64::from_le_bytes(le), one);
        assert_eq!(Fixed64x64::from_le_bytes(Fixed64x64::MIN.to_le_bytes()), Fixed64x64::MIN);
    }

    #[test]
    fn abi_word_sign_extends() {
        let word = fixed64x64!(-1).to_abi_word();
        assert!(word[..24].iter().all(|b| *b == 0xff));
        assert!(word[24..].iter().all(|b| *b == 0));

        let word = Fixed64x64::PI.to_abi_word();
        assert!(word[..16].iter().all(|b| *b == 0));
        assert_eq!(&word[16..], &Fixed64x64::PI.to_be_bytes());
    }

    #[test]
    fn abi_word_decodes() {
        for x in [Fixed64x64::ZERO, Fixed64x64::E, fixed64x64!(-7 / 3), Fixed64x64::MIN, Fixed64x64::MAX] {
            assert_eq!(Fixed64x64::from_abi_word(&x.to_abi_word()).unwrap(), x);
        }
    }

    #[test]
    fn abi_word_rejects_bad_input() {
        let short = [0u8; 31];
        assert_eq!(Fixed64x64::from_abi_word(&short), Err(FixedPointError::RangeError));
        assert_eq!(Fixed64x64::from_abi_word(&[0u8; 33]), Err(FixedPointError::RangeError));

        // positive low half under a negative high half
        let mut word = Fixed64x64::ONE.to_abi_word();
        word[0] = 0xff;
        assert_eq!(Fixed64x64::from_abi_word(&word), Err(FixedPointError::RangeError));

        // uint256 2^128 does not fit int128
        let mut word = [0u8; 32];
        word[15] = 1;
        assert_eq!(Fixed64x64::from_abi_word(&word), Err(FixedPointError::RangeError));

        // negative low half without sign extension
        let mut word = [0u8; 32];
        word[16] = 0x80;
        assert_eq!(Fixed64x64::from_abi_word(&word), Err(FixedPointError::RangeError));
    }
}
