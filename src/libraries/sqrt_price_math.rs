// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/sqrt_price_math.rs
// Adapted for client-side use - checked arithmetic surfaces as typed errors

//! New sqrt price reached after consuming a given input or producing a
//! given output amount at constant liquidity. Rounding always favors the
//! pool: amount-0 moves round the price up, amount-1 moves round it down.

use super::big_num::U256;
use super::fixed_point_64;
use super::full_math::MulDiv;
use super::unsafe_math::UnsafeMathTrait;
use crate::error::ClmmError;

/// Gets the next sqrt price given a delta of token_0.
///
/// Always rounds up so the price moves far enough to honor the amount:
/// in exact-input (add = true) the price moves down by at most the amount,
/// in exact-output (add = false) it moves up by at least the amount.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
    add: bool,
) -> Result<u128, ClmmError> {
    if amount == 0 {
        return Ok(sqrt_price_x64);
    }
    let numerator_1 = U256::from(liquidity) << u32::from(fixed_point_64::RESOLUTION);
    let product = U256::from(amount) * U256::from(sqrt_price_x64);

    if add {
        let denominator = numerator_1.checked_add(product).ok_or(ClmmError::MathOverflow)?;
        // denominator >= numerator_1, so the result cannot exceed the
        // current price and always fits 128 bits
        let next = numerator_1
            .mul_div_ceil(U256::from(sqrt_price_x64), denominator)
            .ok_or(ClmmError::MathOverflow)?;
        Ok(next.as_u128())
    } else {
        if numerator_1 <= product {
            return Err(ClmmError::MathOverflow);
        }
        let denominator = numerator_1 - product;
        let next = numerator_1
            .mul_div_ceil(U256::from(sqrt_price_x64), denominator)
            .ok_or(ClmmError::MathOverflow)?;
        if next > U256::from(u128::MAX) {
            return Err(ClmmError::MathOverflow);
        }
        Ok(next.as_u128())
    }
}

/// Gets the next sqrt price given a delta of token_1.
///
/// Rounds down: in exact-input (add = true) the price moves up by at most
/// the amount, in exact-output it moves down by at least the amount.
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
    add: bool,
) -> Result<u128, ClmmError> {
    if liquidity == 0 {
        return Err(ClmmError::MathOverflow);
    }
    let delta = (U256::from(amount) << u32::from(fixed_point_64::RESOLUTION)) / U256::from(liquidity);
    if add {
        let next = U256::from(sqrt_price_x64)
            .checked_add(delta)
            .ok_or(ClmmError::MathOverflow)?;
        if next > U256::from(u128::MAX) {
            return Err(ClmmError::MathOverflow);
        }
        Ok(next.as_u128())
    } else {
        let delta = U256::div_rounding_up(
            U256::from(amount) << u32::from(fixed_point_64::RESOLUTION),
            U256::from(liquidity),
        );
        if U256::from(sqrt_price_x64) <= delta {
            return Err(ClmmError::MathOverflow);
        }
        Ok((U256::from(sqrt_price_x64) - delta).as_u128())
    }
}

/// Gets the next sqrt price given an input amount of token_0 or token_1.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount_in: u64,
    zero_for_one: bool,
) -> Result<u128, ClmmError> {
    if sqrt_price_x64 == 0 || liquidity == 0 {
        return Err(ClmmError::MathOverflow);
    }
    // round to make sure we don't pass the target price
    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x64, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x64, liquidity, amount_in, true)
    }
}

/// Gets the next sqrt price given an output amount of token_0 or token_1.
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount_out: u64,
    zero_for_one: bool,
) -> Result<u128, ClmmError> {
    if sqrt_price_x64 == 0 || liquidity == 0 {
        return Err(ClmmError::MathOverflow);
    }
    // round to make sure we pass the target price
    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x64, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x64, liquidity, amount_out, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::fixed_point_64::Q64;

    #[test]
    fn zero_amount_is_identity() {
        let p = Q64;
        assert_eq!(get_next_sqrt_price_from_amount_0_rounding_up(p, 10, 0, true).unwrap(), p);
        assert_eq!(get_next_sqrt_price_from_amount_1_rounding_down(p, 10, 0, true).unwrap(), p);
    }

    #[test]
    fn input_moves_price_toward_direction() {
        let p = Q64;
        let l = 1_000_000_000u128;
        let down = get_next_sqrt_price_from_input(p, l, 1_000, true).unwrap();
        assert!(down < p);
        let up = get_next_sqrt_price_from_input(p, l, 1_000, false).unwrap();
        assert!(up > p);
    }

    #[test]
    fn output_moves_price_past_direction() {
        let p = Q64;
        let l = 1_000_000_000u128;
        let down = get_next_sqrt_price_from_output(p, l, 1_000, true).unwrap();
        assert!(down < p);
        let up = get_next_sqrt_price_from_output(p, l, 1_000, false).unwrap();
        assert!(up > p);
    }

    #[test]
    fn draining_more_than_reserves_errors() {
        // token_0 exact-output larger than the pool can produce
        let p = Q64;
        let l = 10u128;
        assert!(get_next_sqrt_price_from_output(p, l, u64::MAX, false).is_err());
    }

    #[test]
    fn zero_liquidity_is_rejected() {
        assert!(get_next_sqrt_price_from_input(Q64, 0, 1, true).is_err());
        assert!(get_next_sqrt_price_from_output(Q64, 0, 1, true).is_err());
    }
}
