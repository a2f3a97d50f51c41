//! Position sizing.
//!
//! Given a tick range and an amount on one side, derives the implied
//! liquidity and the paired amount on the other side, plus slippage
//! bounds oriented the same way the liquidity math rounds: maximums the
//! user must cover go up, minimums the user is guaranteed go down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClmmError;
use crate::libraries::liquidity_math::{
    get_delta_amount_0_unsigned, get_delta_amount_1_unsigned, get_liquidity_from_single_amount_0,
    get_liquidity_from_single_amount_1,
};
use crate::libraries::tick_math::{get_sqrt_price_at_tick, MAX_TICK, MIN_TICK};
use crate::quote::amount_with_slippage;
use crate::state::pool::PoolSnapshot;

/// Which token the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseSide {
    Token0,
    Token1,
}

/// Sizing result for one position change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAmountQuote {
    pub liquidity: u128,
    pub amount_0: u64,
    pub amount_1: u64,
    /// Slippage-adjusted bound: a maximum when adding, a minimum when
    /// removing.
    pub amount_0_bound: u64,
    pub amount_1_bound: u64,
}

/// Token amounts backing `liquidity` over `[sqrt_lower, sqrt_upper]`,
/// split by where the current tick sits relative to the range.
///
/// `round_up` is true when the amounts are owed by the user (adding
/// liquidity) and false when owed to the user (removing).
pub fn amounts_from_liquidity(
    tick_current: i32,
    sqrt_price_x64: u128,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    round_up: bool,
) -> Result<(u64, u64), ClmmError> {
    let sqrt_lower = get_sqrt_price_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_price_at_tick(tick_upper)?;

    if tick_current < tick_lower {
        // entirely above the price: all token_0
        Ok((get_delta_amount_0_unsigned(sqrt_lower, sqrt_upper, liquidity, round_up)?, 0))
    } else if tick_current < tick_upper {
        let amount_0 = get_delta_amount_0_unsigned(sqrt_price_x64, sqrt_upper, liquidity, round_up)?;
        let amount_1 = get_delta_amount_1_unsigned(sqrt_lower, sqrt_price_x64, liquidity, round_up)?;
        Ok((amount_0, amount_1))
    } else {
        // entirely below the price: all token_1
        Ok((0, get_delta_amount_1_unsigned(sqrt_lower, sqrt_upper, liquidity, round_up)?))
    }
}

/// Sizes a position from a one-sided amount.
///
/// `add` selects the rounding and slippage direction: `true` when
/// opening/increasing (amounts are maximums, scaled up by `slippage`),
/// `false` when decreasing (amounts are minimums, scaled down).
pub fn compute_pair_amount(
    pool: &PoolSnapshot,
    tick_lower: i32,
    tick_upper: i32,
    base: BaseSide,
    amount: u64,
    slippage: f64,
    add: bool,
) -> Result<PairAmountQuote, ClmmError> {
    if pool.tick_spacing == 0 {
        return Err(ClmmError::ZeroTickSpacing);
    }
    if tick_lower >= tick_upper {
        return Err(ClmmError::InvalidTickRange { lower: tick_lower, upper: tick_upper });
    }
    if tick_lower < MIN_TICK {
        return Err(ClmmError::TickOutOfRange(tick_lower));
    }
    if tick_upper > MAX_TICK {
        return Err(ClmmError::TickOutOfRange(tick_upper));
    }

    let sqrt_lower = get_sqrt_price_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_price_at_tick(tick_upper)?;

    let liquidity = match base {
        BaseSide::Token0 => get_liquidity_from_single_amount_0(
            pool.sqrt_price_x64,
            sqrt_lower,
            sqrt_upper,
            amount,
        )?,
        BaseSide::Token1 => get_liquidity_from_single_amount_1(
            pool.sqrt_price_x64,
            sqrt_lower,
            sqrt_upper,
            amount,
        )?,
    };

    let (amount_0, amount_1) = amounts_from_liquidity(
        pool.tick_current,
        pool.sqrt_price_x64,
        tick_lower,
        tick_upper,
        liquidity,
        add,
    )?;

    let amount_0_bound = amount_with_slippage(amount_0, slippage, add);
    let amount_1_bound = amount_with_slippage(amount_1, slippage, add);

    debug!(
        pool = %pool.pool_id,
        tick_lower,
        tick_upper,
        liquidity,
        amount_0,
        amount_1,
        "position sizing"
    );

    Ok(PairAmountQuote { liquidity, amount_0, amount_1, amount_0_bound, amount_1_bound })
}
