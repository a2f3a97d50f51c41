// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/fixed_point_64.rs

//! Helper constants for Q64.64 fixed point numbers.
//! The sqrt price is stored with 64 integer bits and 64 fractional bits.

pub const Q64: u128 = (u64::MAX as u128) + 1; // 2^64
pub const RESOLUTION: u8 = 64;
