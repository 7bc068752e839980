// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::error::{FixedPointError, Result};

/// Copy `bytes[range]` into a fixed-size value, failing with `RangeError` when
/// the range is out of bounds or has the wrong length.
#[inline]
pub(crate) fn extract_from_raw_bytes<T>(bytes: &[u8], range: std::ops::Range<usize>) -> Result<T>
where
    T: Sized + for<'a> TryFrom<&'a [u8]>,
{
    bytes
        .get(range)
        .and_then(|slice| T::try_from(slice).ok())
        .ok_or_else(|| FixedPointError::RangeError.reject("extract_from_raw_bytes"))
}
