// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Raw 64.64 constants and the fixed tables behind the transcendental operations.

/// Smallest representable 64.64 value, -2^63
pub const MIN_64X64: i128 = i128::MIN;
/// Largest representable 64.64 value, 2^63 - 2^-64
pub const MAX_64X64: i128 = i128::MAX;
/// 1.0
pub const ONE_64X64: i128 = 1i128 << 64;
/// Euler's number
pub const E_64X64: i128 = 0x2b7e151628aed1975;
/// Pi
pub const PI_64X64: i128 = 0x3243f6a8885a2f7a4;

/// ln(2) with 128 fractional bits
pub(crate) const LN2_128X128: u128 = 0xB17217F7D1CF79ABC9E3B39803F2F1AF;

/// Fractional parts of `2^(2^-k)` with 128 bits, for k = 1..=64, indexed by k - 1.
///
/// Every factor lies in (1, 2), so the implicit integer bit is dropped and the
/// full factor is `2^128 + EXP2_FACTORS_LO[k - 1]`.
pub(crate) const EXP2_FACTORS_LO: [u128; 64] = [
    0x6A09E667F3BCC908B2FB1366EA957D3E,
    0x306FE0A31B7152DE8D5A46305C85EDEC,
    0x172B83C7D517ADCDF7C8C50EB14A791F,
    0x0B5586CF9890F6298B92B71842A98363,
    0x059B0D31585743AE7C548EB68CA417FD,
    0x02C9A3E778060EE6F7CACA4F7A29BDE8,
    0x0163DA9FB33356D84A66AE336DCDFA3F,
    0x00B1AFA5ABCBED6129AB13EC11DC9543,
    0x0058C86DA1C09EA1FF19D294CF2F679B,
    0x002C605E2E8CEC506D21BFC89A23A00F,
    0x00162F3904051FA128BCA9C55C31E5DF,
    0x000B175EFFDC76BA38E31671CA939725,
    0x00058BA01FB9F96D6CACD4B180917C3D,
    0x0002C5CC37DA9491D0985C348C68E7B3,
    0x000162E525EE054754457D5995292026,
    0x0000B17255775C040618BF4A4ADE83FC,
    0x000058B91B5BC9AE2EED81E9B7D4CFAB,
    0x00002C5C89D5EC6CA4D7C8ACC017B7C9,
    0x0000162E43F4F831060E02D839A9D16D,
    0x00000B1721BCFC99D9F890EA06911763,
    0x0000058B90CF1E6D97F9CA14DBCC1628,
    0x000002C5C863B73F016468F6BAC5CA2B,
    0x00000162E430E5A18F6119E3C02282A5,
    0x000000B1721835514B86E6D96EFD1BFE,
    0x00000058B90C0B48C6BE5DF846C5B2EF,
    0x0000002C5C8601CC6B9E94213C72737A,
    0x000000162E42FFF037DF38AA2B219F06,
    0x0000000B17217FBA9C739AA5819F44F9,
    0x000000058B90BFCDEE5ACD3C1CEDC823,
    0x00000002C5C85FE31F35A6A30DA1BE50,
    0x0000000162E42FF0999CE3541B9FFFCF,
    0x00000000B17217F80F4EF5AADDA45554,
    0x0000000058B90BFBF8479BD5A81B51AD,
    0x000000002C5C85FDF84BD62AE30A74CC,
    0x00000000162E42FEFB2FED257559BDAA,
    0x000000000B17217F7D5A7716BBA4A9AE,
    0x00000000058B90BFBE9DDBAC5E109CCE,
    0x0000000002C5C85FDF4B15DE6F17EB0D,
    0x000000000162E42FEFA494F1478FDE05,
    0x0000000000B17217F7D20CF927C8E94C,
    0x000000000058B90BFBE8F71CB4E4B33D,
    0x00000000002C5C85FDF477B662B26945,
    0x0000000000162E42FEFA3AE53369388C,
    0x00000000000B17217F7D1D351A389D40,
    0x0000000000058B90BFBE8E8B2D3D4EDE,
    0x000000000002C5C85FDF4741BEA6E77E,
    0x00000000000162E42FEFA39FE95583C2,
    0x000000000000B17217F7D1CFB72B45E1,
    0x00000000000058B90BFBE8E7CC35C3F0,
    0x0000000000002C5C85FDF473E242EA38,
    0x000000000000162E42FEFA39F02B772C,
    0x0000000000000B17217F7D1CF7D83C1A,
    0x000000000000058B90BFBE8E7BDCBE2E,
    0x00000000000002C5C85FDF473DEA871F,
    0x0000000000000162E42FEFA39EF44D91,
    0x00000000000000B17217F7D1CF79E949,
    0x0000000000000058B90BFBE8E7BCE544,
    0x000000000000002C5C85FDF473DE6ECA,
    0x00000000000000162E42FEFA39EF366F,
    0x000000000000000B17217F7D1CF79AFA,
    0x00000000000000058B90BFBE8E7BCD6D,
    0x0000000000000002C5C85FDF473DE6B2,
    0x000000000000000162E42FEFA39EF358,
    0x0000000000000000B17217F7D1CF79AB,
];
