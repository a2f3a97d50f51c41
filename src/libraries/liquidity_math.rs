// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/liquidity_math.rs
// Adapted for client-side use

//! Conversions between liquidity and token amounts over a sqrt price
//! interval. Rounding direction is load-bearing: amounts the user owes
//! round up, amounts owed to the user round down.

use super::big_num::{U128, U256};
use super::fixed_point_64;
use super::full_math::MulDiv;
use super::unsafe_math::UnsafeMathTrait;
use crate::error::ClmmError;

/// Add a signed liquidity delta to liquidity, erroring on over/underflow.
pub fn add_delta(x: u128, y: i128) -> Result<u128, ClmmError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(ClmmError::LiquidityOverflow)
    } else {
        x.checked_add(y as u128).ok_or(ClmmError::LiquidityOverflow)
    }
}

/// Gets the delta amount_0 for given liquidity and price range.
///
/// `Δx = L * (1 / √p_lower - 1 / √p_upper)`
pub fn get_delta_amount_0_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, ClmmError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    if sqrt_ratio_a_x64 == 0 {
        return Err(ClmmError::SqrtPriceOutOfRange(sqrt_ratio_a_x64));
    }

    let numerator_1 = U256::from(liquidity) << u32::from(fixed_point_64::RESOLUTION);
    let numerator_2 = U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64);

    let result = if round_up {
        U256::div_rounding_up(
            numerator_1
                .mul_div_ceil(numerator_2, U256::from(sqrt_ratio_b_x64))
                .ok_or(ClmmError::MathOverflow)?,
            U256::from(sqrt_ratio_a_x64),
        )
    } else {
        numerator_1
            .mul_div_floor(numerator_2, U256::from(sqrt_ratio_b_x64))
            .ok_or(ClmmError::MathOverflow)?
            / U256::from(sqrt_ratio_a_x64)
    };
    if result > U256::from(u64::MAX) {
        return Err(ClmmError::MaxTokenOverflow);
    }
    Ok(result.as_u64())
}

/// Gets the delta amount_1 for given liquidity and price range.
///
/// `Δy = L * (√p_upper - √p_lower)`
pub fn get_delta_amount_1_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, ClmmError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    let result = if round_up {
        U256::from(liquidity).mul_div_ceil(
            U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64),
            U256::from(fixed_point_64::Q64),
        )
    } else {
        U256::from(liquidity).mul_div_floor(
            U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64),
            U256::from(fixed_point_64::Q64),
        )
    }
    .ok_or(ClmmError::MathOverflow)?;
    if result > U256::from(u64::MAX) {
        return Err(ClmmError::MaxTokenOverflow);
    }
    Ok(result.as_u64())
}

/// Computes the liquidity implied by an amount of token_0 over a range.
pub fn get_liquidity_from_amount_0(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_0: u64,
) -> Result<u128, ClmmError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    let intermediate = U128::from(sqrt_ratio_a_x64)
        .mul_div_floor(U128::from(sqrt_ratio_b_x64), U128::from(fixed_point_64::Q64))
        .ok_or(ClmmError::MathOverflow)?;

    Ok(U128::from(amount_0)
        .mul_div_floor(intermediate, U128::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64))
        .ok_or(ClmmError::MathOverflow)?
        .as_u128())
}

/// Computes the liquidity implied by an amount of token_1 over a range.
pub fn get_liquidity_from_amount_1(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_1: u64,
) -> Result<u128, ClmmError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    Ok(U128::from(amount_1)
        .mul_div_floor(
            U128::from(fixed_point_64::Q64),
            U128::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64),
        )
        .ok_or(ClmmError::MathOverflow)?
        .as_u128())
}

/// Liquidity from a single amount of token_0, by range position.
///
/// Token_0 only backs the part of the range above the current price; an
/// amount of it buys no liquidity in a range entirely below the price.
pub fn get_liquidity_from_single_amount_0(
    sqrt_price_x64: u128,
    sqrt_ratio_a_x64: u128,
    sqrt_ratio_b_x64: u128,
    amount_0: u64,
) -> Result<u128, ClmmError> {
    let (lower, upper) = if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        (sqrt_ratio_b_x64, sqrt_ratio_a_x64)
    } else {
        (sqrt_ratio_a_x64, sqrt_ratio_b_x64)
    };

    if sqrt_price_x64 <= lower {
        get_liquidity_from_amount_0(lower, upper, amount_0)
    } else if sqrt_price_x64 < upper {
        get_liquidity_from_amount_0(sqrt_price_x64, upper, amount_0)
    } else {
        Ok(0)
    }
}

/// Liquidity from a single amount of token_1, by range position.
pub fn get_liquidity_from_single_amount_1(
    sqrt_price_x64: u128,
    sqrt_ratio_a_x64: u128,
    sqrt_ratio_b_x64: u128,
    amount_1: u64,
) -> Result<u128, ClmmError> {
    let (lower, upper) = if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        (sqrt_ratio_b_x64, sqrt_ratio_a_x64)
    } else {
        (sqrt_ratio_a_x64, sqrt_ratio_b_x64)
    };

    if sqrt_price_x64 <= lower {
        Ok(0)
    } else if sqrt_price_x64 < upper {
        get_liquidity_from_amount_1(lower, sqrt_price_x64, amount_1)
    } else {
        get_liquidity_from_amount_1(lower, upper, amount_1)
    }
}

/// Liquidity from amounts of both tokens; when the range straddles the
/// current price the binding (smaller) side wins.
pub fn get_liquidity_from_amounts(
    sqrt_price_x64: u128,
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_0: u64,
    amount_1: u64,
) -> Result<u128, ClmmError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    if sqrt_price_x64 <= sqrt_ratio_a_x64 {
        get_liquidity_from_amount_0(sqrt_ratio_a_x64, sqrt_ratio_b_x64, amount_0)
    } else if sqrt_price_x64 < sqrt_ratio_b_x64 {
        let liquidity_0 = get_liquidity_from_amount_0(sqrt_price_x64, sqrt_ratio_b_x64, amount_0)?;
        let liquidity_1 = get_liquidity_from_amount_1(sqrt_ratio_a_x64, sqrt_price_x64, amount_1)?;
        Ok(liquidity_0.min(liquidity_1))
    } else {
        get_liquidity_from_amount_1(sqrt_ratio_a_x64, sqrt_ratio_b_x64, amount_1)
    }
}
