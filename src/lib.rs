// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Signed 64.64 binary fixed point arithmetic.
//!
//! Every operation is exact or deterministically truncated and reports
//! overflow, domain and division errors through [`Result`] instead of
//! wrapping. Wider intermediates use the 256- and 512-bit integers from
//! [`integers`].
//!
//! ```
//! use math64x64::{fixed64x64, ln, sqrt, Fixed64x64};
//!
//! let x = sqrt(fixed64x64!(25)).unwrap();
//! assert_eq!(x, fixed64x64!(5));
//! assert_eq!(ln(Fixed64x64::ONE).unwrap(), Fixed64x64::ZERO);
//! assert_eq!(x.to_string(), "5");
//! ```

pub mod error;
pub mod macros;
pub mod integers;
pub mod constants;
pub mod fixed_point;
pub mod convert;
pub mod linear;
pub mod multiplicative;
pub mod transcendental;
pub mod token;
pub mod codec;
mod utils;

pub use constants::{E_64X64, MAX_64X64, MIN_64X64, ONE_64X64, PI_64X64};
pub use error::{FixedPointError, Result};
pub use fixed_point::Fixed64x64;
pub use integers::{I256, U256, U512};

pub use convert::{from_128x128, from_int, from_uint, to_128x128, to_int, to_uint};
pub use linear::{abs, add, avg, neg, sub};
pub use multiplicative::{div, divi, divu, inv, mul, muli, mulu};
pub use token::{from_decimals, from_wei, to_decimals, to_wei, WEI_DECIMALS};
pub use transcendental::{exp_2, gavg, ln, log_2, pow, sqrt};
