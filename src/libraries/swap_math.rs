// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/swap_math.rs
// Adapted for client-side use

use super::full_math::MulDiv;
use super::liquidity_math;
use super::sqrt_price_math;
use crate::constants::FEE_RATE_DENOMINATOR_VALUE;
use crate::error::ClmmError;

/// Result of a swap step
#[derive(Default, Debug, Clone, Copy)]
pub struct SwapStep {
    /// The price after swapping the amount in/out, not to exceed the price target
    pub sqrt_price_next_x64: u128,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
}

/// Computes the result of swapping some amount in, or amount out, within
/// one segment of constant liquidity.
///
/// The segment ends at `sqrt_price_target_x64` (the nearer of the next
/// initialized tick boundary and the caller's price limit); if the
/// remaining amount cannot carry the price that far, the reachable price
/// is derived from the amount instead and the segment is remaining-limited.
pub fn compute_swap_step(
    sqrt_price_current_x64: u128,
    sqrt_price_target_x64: u128,
    liquidity: u128,
    amount_remaining: u64,
    fee_rate: u32,
    is_base_input: bool,
    zero_for_one: bool,
) -> Result<SwapStep, ClmmError> {
    let mut swap_step = SwapStep::default();

    if is_base_input {
        let amount_remaining_less_fee = amount_remaining
            .mul_div_floor(
                (FEE_RATE_DENOMINATOR_VALUE - fee_rate).into(),
                FEE_RATE_DENOMINATOR_VALUE.into(),
            )
            .ok_or(ClmmError::MathOverflow)?;

        let amount_in = calculate_amount_in_range(
            sqrt_price_current_x64,
            sqrt_price_target_x64,
            liquidity,
            zero_for_one,
            is_base_input,
        )?;
        if let Some(amount_in) = amount_in {
            swap_step.amount_in = amount_in;
        }

        swap_step.sqrt_price_next_x64 =
            if amount_in.is_some() && amount_remaining_less_fee >= swap_step.amount_in {
                sqrt_price_target_x64
            } else {
                sqrt_price_math::get_next_sqrt_price_from_input(
                    sqrt_price_current_x64,
                    liquidity,
                    amount_remaining_less_fee,
                    zero_for_one,
                )?
            };
    } else {
        let amount_out = calculate_amount_in_range(
            sqrt_price_current_x64,
            sqrt_price_target_x64,
            liquidity,
            zero_for_one,
            is_base_input,
        )?;
        if let Some(amount_out) = amount_out {
            swap_step.amount_out = amount_out;
        }

        swap_step.sqrt_price_next_x64 =
            if amount_out.is_some() && amount_remaining >= swap_step.amount_out {
                sqrt_price_target_x64
            } else {
                sqrt_price_math::get_next_sqrt_price_from_output(
                    sqrt_price_current_x64,
                    liquidity,
                    amount_remaining,
                    zero_for_one,
                )?
            };
    }

    // whether we reached the max possible price for the given ticks
    let max = sqrt_price_target_x64 == swap_step.sqrt_price_next_x64;

    // get the input / output amounts when target price is not reached
    if zero_for_one {
        // if max is reached for exact input case, entire amount_in is needed
        if !(max && is_base_input) {
            swap_step.amount_in = liquidity_math::get_delta_amount_0_unsigned(
                swap_step.sqrt_price_next_x64,
                sqrt_price_current_x64,
                liquidity,
                true,
            )?;
        }
        // if max is reached for exact output case, entire amount_out is needed
        if !(max && !is_base_input) {
            swap_step.amount_out = liquidity_math::get_delta_amount_1_unsigned(
                swap_step.sqrt_price_next_x64,
                sqrt_price_current_x64,
                liquidity,
                false,
            )?;
        }
    } else {
        if !(max && is_base_input) {
            swap_step.amount_in = liquidity_math::get_delta_amount_1_unsigned(
                sqrt_price_current_x64,
                swap_step.sqrt_price_next_x64,
                liquidity,
                true,
            )?;
        }
        if !(max && !is_base_input) {
            swap_step.amount_out = liquidity_math::get_delta_amount_0_unsigned(
                sqrt_price_current_x64,
                swap_step.sqrt_price_next_x64,
                liquidity,
                false,
            )?;
        }
    }

    // For exact output case, cap the output amount to not exceed the remaining output amount
    if !is_base_input && swap_step.amount_out > amount_remaining {
        swap_step.amount_out = amount_remaining;
    }

    swap_step.fee_amount =
        if is_base_input && swap_step.sqrt_price_next_x64 != sqrt_price_target_x64 {
            // we didn't reach the target, so take the remainder of the maximum input as fee
            // swap dust is granted as fee
            amount_remaining
                .checked_sub(swap_step.amount_in)
                .ok_or(ClmmError::MathOverflow)?
        } else {
            // take pip percentage as fee
            swap_step
                .amount_in
                .mul_div_ceil(
                    fee_rate.into(),
                    (FEE_RATE_DENOMINATOR_VALUE - fee_rate).into(),
                )
                .ok_or(ClmmError::MathOverflow)?
        };

    Ok(swap_step)
}

/// Pre-calculate amount_in or amount_out for the full price range of the
/// segment. The amount may overflow u64 when the target is far away; that
/// is not an error here — `compute_swap_step` then derives the reachable
/// price from the remaining amount instead.
fn calculate_amount_in_range(
    sqrt_price_current_x64: u128,
    sqrt_price_target_x64: u128,
    liquidity: u128,
    zero_for_one: bool,
    is_base_input: bool,
) -> Result<Option<u64>, ClmmError> {
    let result = if is_base_input {
        if zero_for_one {
            liquidity_math::get_delta_amount_0_unsigned(
                sqrt_price_target_x64,
                sqrt_price_current_x64,
                liquidity,
                true,
            )
        } else {
            liquidity_math::get_delta_amount_1_unsigned(
                sqrt_price_current_x64,
                sqrt_price_target_x64,
                liquidity,
                true,
            )
        }
    } else if zero_for_one {
        liquidity_math::get_delta_amount_1_unsigned(
            sqrt_price_target_x64,
            sqrt_price_current_x64,
            liquidity,
            false,
        )
    } else {
        liquidity_math::get_delta_amount_0_unsigned(
            sqrt_price_current_x64,
            sqrt_price_target_x64,
            liquidity,
            false,
        )
    };

    match result {
        Ok(amount) => Ok(Some(amount)),
        Err(ClmmError::MaxTokenOverflow) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod swap_math_test {
    use super::*;
    use crate::libraries::tick_math;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn compute_swap_step_conserves_amounts(
            sqrt_price_current_x64 in tick_math::MIN_SQRT_PRICE_X64..tick_math::MAX_SQRT_PRICE_X64,
            sqrt_price_target_x64 in tick_math::MIN_SQRT_PRICE_X64..tick_math::MAX_SQRT_PRICE_X64,
            liquidity in 1..u32::MAX as u128,
            amount_remaining in 1..u64::MAX,
            fee_rate in 1..FEE_RATE_DENOMINATOR_VALUE / 2,
            is_base_input in proptest::bool::ANY,
        ) {
            prop_assume!(sqrt_price_current_x64 != sqrt_price_target_x64);

            let zero_for_one = sqrt_price_current_x64 > sqrt_price_target_x64;
            let swap_step = compute_swap_step(
                sqrt_price_current_x64,
                sqrt_price_target_x64,
                liquidity,
                amount_remaining,
                fee_rate,
                is_base_input,
                zero_for_one,
            ).unwrap();

            let amount_used = if is_base_input {
                swap_step.amount_in + swap_step.fee_amount
            } else {
                swap_step.amount_out
            };

            if swap_step.sqrt_price_next_x64 != sqrt_price_target_x64 {
                // remaining-limited: the entire remainder is consumed
                prop_assert_eq!(amount_used, amount_remaining);
            } else {
                prop_assert!(amount_used <= amount_remaining);
            }

            let price_lower = sqrt_price_current_x64.min(sqrt_price_target_x64);
            let price_upper = sqrt_price_current_x64.max(sqrt_price_target_x64);
            prop_assert!(swap_step.sqrt_price_next_x64 >= price_lower);
            prop_assert!(swap_step.sqrt_price_next_x64 <= price_upper);
        }
    }

    #[test]
    fn target_limited_fee_is_ratio_of_amount_in() {
        // huge remaining amount, nearby target: the step is target-limited
        let current = 1u128 << 64;
        let target = current + (current >> 10);
        let step = compute_swap_step(current, target, 1_000_000_000_000, u64::MAX / 2, 2500, true, false)
            .unwrap();
        assert_eq!(step.sqrt_price_next_x64, target);
        let expected_fee = step
            .amount_in
            .mul_div_ceil(2500u64, (FEE_RATE_DENOMINATOR_VALUE - 2500) as u64)
            .unwrap();
        assert_eq!(step.fee_amount, expected_fee);
    }

    #[test]
    fn remaining_limited_fee_is_the_leftover() {
        // tiny remaining amount, distant target: the step is remaining-limited
        let current = 1u128 << 64;
        let target = current * 2;
        let amount_remaining = 10_000u64;
        let step =
            compute_swap_step(current, target, 10_000_000, amount_remaining, 2500, true, false).unwrap();
        assert_ne!(step.sqrt_price_next_x64, target);
        assert_eq!(step.fee_amount, amount_remaining - step.amount_in);
    }
}
