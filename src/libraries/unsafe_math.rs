// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/unsafe_math.rs

use super::big_num::{U128, U256};

/// Math functions that do not check inputs or outputs.
/// The caller must guarantee `denominator != 0`.
pub trait UnsafeMathTrait {
    /// Returns `numerator / denominator` rounded towards positive infinity.
    fn div_rounding_up(numerator: Self, denominator: Self) -> Self;
}

impl UnsafeMathTrait for u64 {
    fn div_rounding_up(numerator: Self, denominator: Self) -> Self {
        numerator / denominator + u64::from(numerator % denominator > 0)
    }
}

impl UnsafeMathTrait for U128 {
    fn div_rounding_up(numerator: Self, denominator: Self) -> Self {
        let (quotient, remainder) = numerator.div_mod(denominator);
        if remainder.is_zero() { quotient } else { quotient + U128::one() }
    }
}

impl UnsafeMathTrait for U256 {
    fn div_rounding_up(numerator: Self, denominator: Self) -> Self {
        let (quotient, remainder) = numerator.div_mod(denominator);
        if remainder.is_zero() { quotient } else { quotient + U256::one() }
    }
}
