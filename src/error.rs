// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedPointError {
    /// A value falls outside the 64.64 range or the target integer width.
    #[error("value out of 64.64 range")]
    RangeError,

    /// An intermediate or final result exceeds its working width.
    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    /// Input outside the mathematical domain of the operation.
    #[error("input outside the domain of the operation")]
    DomainError,

    /// Narrowing between wide integer types and primitives lost bits.
    #[error("integer conversion out of range")]
    IntegerConversionError,
}

impl FixedPointError {
    /// Report the rejection of `op` and hand the error back for propagation.
    #[inline]
    pub(crate) fn reject(self, op: &'static str) -> Self {
        log::trace!(target: "math64x64", "{} rejected: {}", op, self);
        self
    }
}

pub type Result<T> = core::result::Result<T, FixedPointError>;
